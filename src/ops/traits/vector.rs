//! Vector operations trait.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::{Matrix, Vector};

/// Vector arithmetic strategy
///
/// Implementations are stateless and shared process-wide. Every method
/// validates its operands and returns a new vector laid out for the backend of
/// the left-hand operand.
pub trait VectorOps<T: Element>: Send + Sync {
    /// Elementwise `a + b`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the lengths differ and
    /// `Error::BackendMismatch` if the operands come from different backends.
    fn add(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>>;

    /// Elementwise `a - b`
    fn subtract(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>>;

    /// Elementwise `a * b`
    fn multiply(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>>;

    /// Sum of `a[i] * b[i]`
    fn dot(&self, a: &Vector<T>, b: &Vector<T>) -> Result<T>;

    /// `a * factor` for every element
    fn multiply_scalar(&self, a: &Vector<T>, factor: T) -> Vector<T>;

    /// `a / divisor` for every element
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for a zero divisor on an integer vector.
    fn divide(&self, a: &Vector<T>, divisor: T) -> Result<Vector<T>>;

    /// Elementwise absolute value
    fn abs(&self, a: &Vector<T>) -> Vector<T>;

    /// Row vector times matrix, `out[j] = sum_i v[i] * m[i, j]`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotSupported` if `v.len() != m.rows()`.
    fn multiply_matrix(&self, v: &Vector<T>, m: &Matrix<T>) -> Result<Vector<T>>;

    /// Square root of the sum of squares
    ///
    /// Summation follows the same order as [`dot`](Self::dot).
    fn magnitude(&self, a: &Vector<T>) -> T;

    /// `a / magnitude(a)`
    fn normalize(&self, a: &Vector<T>) -> Result<Vector<T>> {
        let length = self.magnitude(a);
        if length == T::zero() {
            return Err(Error::invalid_argument(
                "vector",
                "cannot normalize a vector of zero magnitude",
            ));
        }
        self.divide(a, length)
    }
}
