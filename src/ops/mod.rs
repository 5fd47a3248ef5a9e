//! Vector and matrix operation strategies
//!
//! This module defines the strategy traits and their two implementations.
//!
//! # Design
//!
//! Each backend maps to one strategy family, resolved through
//! [`Backend::vector_ops`](crate::runtime::Backend::vector_ops) and
//! [`Backend::matrix_ops`](crate::runtime::Backend::matrix_ops):
//!
//! ```text
//! Backend
//!   ├── serial ── SerialVectorOps / SerialMatrixOps  (flat buffers, scalar loops)
//!   └── simd ──── SimdVectorOps / SimdMatrixOps      (lane kernels, slice-wise matrices)
//! ```
//!
//! Strategies are zero-sized and stateless. Both families validate operands
//! with the helpers below, so they fail identically on bad input.
//!
//! The SIMD family also accepts flat operands (it sees them as all tail) and
//! hands flat matrices to the serial family, so calling a strategy directly
//! with containers from another backend is still correct, only slower.

mod serial;
mod simd;
mod traits;

pub use serial::{SerialMatrixOps, SerialVectorOps};
pub use simd::{SimdMatrixOps, SimdVectorOps};
pub use traits::{MatrixOps, VectorOps};

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::Backend;
use crate::tensor::{Matrix, Vector};

/// Check that two operands were built by the same backend
#[inline]
pub fn validate_backends(lhs: Backend, rhs: Backend) -> Result<()> {
    if lhs != rhs {
        return Err(Error::BackendMismatch { lhs, rhs });
    }
    Ok(())
}

/// Check operands of an elementwise vector operation
pub fn validate_vector_pair<T: Element>(op: &'static str, a: &Vector<T>, b: &Vector<T>) -> Result<()> {
    validate_backends(a.backend(), b.backend())?;
    if a.len() != b.len() {
        return Err(Error::shape_mismatch(op, &[a.len()], &[b.len()]));
    }
    Ok(())
}

/// Check operands of an elementwise matrix operation
pub fn validate_matrix_pair<T: Element>(op: &'static str, a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    validate_backends(a.backend(), b.backend())?;
    if a.shape() != b.shape() {
        return Err(Error::shape_mismatch(
            op,
            &[a.rows(), a.cols()],
            &[b.rows(), b.cols()],
        ));
    }
    Ok(())
}

/// Check that `a @ b` is defined
pub fn validate_matmul_shapes<T: Element>(a: &Matrix<T>, b: &Matrix<T>) -> Result<()> {
    validate_backends(a.backend(), b.backend())?;
    if a.cols() != b.rows() {
        return Err(Error::shape_mismatch(
            "multiply",
            &[a.rows(), a.cols()],
            &[b.rows(), b.cols()],
        ));
    }
    Ok(())
}

/// Check that `v @ m` is defined
pub fn validate_vector_matrix<T: Element>(v: &Vector<T>, m: &Matrix<T>) -> Result<()> {
    validate_backends(v.backend(), m.backend())?;
    if v.len() != m.rows() {
        return Err(Error::not_supported(
            "multiply_matrix",
            format!(
                "vector of length {} cannot multiply a {}x{} matrix",
                v.len(),
                m.rows(),
                m.cols()
            ),
        ));
    }
    Ok(())
}

/// Reject integer division by zero
#[inline]
pub fn validate_divisor<T: Element>(divisor: T) -> Result<()> {
    if T::DTYPE.is_int() && divisor == T::zero() {
        return Err(Error::invalid_argument("divisor", "integer division by zero"));
    }
    Ok(())
}
