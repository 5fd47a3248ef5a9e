//! # vecmath
//!
//! **Generic vectors and matrices that use SIMD registers when the CPU has them.**
//!
//! vecmath provides fixed-size `Vector<T>` and `Matrix<T>` containers over
//! `i32`, `f32` and `f64`. Hardware capability is detected once per process;
//! on AVX2 machines containers are stored as register-width lanes and
//! operated on with vector kernels, everywhere else they fall back to flat
//! buffers and scalar loops. Both paths expose the same API and produce the
//! same results, except for float summation order in dot products.
//!
//! ## Features
//!
//! - **Vectors**: add, subtract, multiply, dot, scale, divide, abs, normalize
//! - **Matrices**: row- or column-sliced layout, add, subtract, multiply,
//!   O(1) in-place transpose, LU determinant
//! - **Strategies**: serial and SIMD implementations behind one trait, chosen
//!   through an explicit [`Context`](runtime::Context)
//! - **Regression**: a gradient-descent linear regression built on the vector API
//!
//! ## Quick Start
//!
//! ```rust
//! use vecmath::prelude::*;
//!
//! let ctx = Context::global();
//! let a = Matrix::from_slice(&[1.0f32, 2.0, 3.0, 4.0], 2, 2, VectorizationMode::ByRow, ctx)?;
//! let b = Matrix::identity(2, ctx)?.with_mode(VectorizationMode::ByColumn);
//!
//! let c = a.multiply(&b)?;
//! assert_eq!(c.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
//! assert_eq!(a.determinant()?, -2.0);
//! # Ok::<(), vecmath::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `simd` (default): runtime AVX2 detection; without it every container
//!   uses the serial layout

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod regression;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::ops::{MatrixOps, VectorOps};
    pub use crate::runtime::{is_hardware_accelerated, Backend, Context};
    pub use crate::tensor::{Matrix, Vector, VectorizationMode};
}
