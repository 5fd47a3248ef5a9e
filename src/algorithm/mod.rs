//! Numerical algorithms shared by every strategy
//!
//! - [`lu`] - LU decomposition with partial pivoting, used for determinants

pub mod lu;
