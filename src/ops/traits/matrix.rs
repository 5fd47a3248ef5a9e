//! Matrix operations trait.

use crate::algorithm::lu::lu_decompose;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::Matrix;

/// Matrix arithmetic strategy
///
/// Like [`VectorOps`](super::VectorOps), implementations are stateless and
/// results are laid out for the backend of the left-hand operand.
pub trait MatrixOps<T: Element>: Send + Sync {
    /// Elementwise `a + b`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the shapes differ.
    fn add(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>>;

    /// Elementwise `a - b`
    fn subtract(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>>;

    /// Matrix product `a @ b`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` naming both shapes if
    /// `a.cols() != b.rows()`.
    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>>;

    /// Turn `m` into its transpose
    fn transpose_in_place(&self, m: &mut Matrix<T>);

    /// Transposed copy of `m`
    fn transpose(&self, m: &Matrix<T>) -> Matrix<T>;

    /// Determinant via LU decomposition with partial pivoting
    ///
    /// Arithmetic runs in `f64` for every element type; integer results are
    /// rounded to the nearest value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotSupported` for a non-square matrix and
    /// `Error::SingularMatrix` when a pivot column is zero.
    fn determinant(&self, m: &Matrix<T>) -> Result<T> {
        if !m.is_square() {
            return Err(Error::not_supported(
                "determinant",
                format!("matrix must be square, got {}x{}", m.rows(), m.cols()),
            ));
        }

        let data: Vec<f64> = m.to_vec().into_iter().map(Element::to_f64).collect();
        let det = lu_decompose(&data, m.rows())?.determinant();
        if T::DTYPE.is_int() {
            Ok(T::from_f64(det.round()))
        } else {
            Ok(T::from_f64(det))
        }
    }
}
