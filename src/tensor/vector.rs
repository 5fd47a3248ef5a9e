//! Fixed-length numeric vector

use super::storage::Storage;
use super::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Backend, Context};
use std::fmt;

/// One-dimensional numeric container of fixed length
///
/// On a SIMD backend the elements are laid out as full register lanes plus a
/// scalar tail; on the serial backend they are kept as one flat buffer. The
/// layout never changes after construction and indexing resolves to the same
/// logical element either way.
///
/// Arithmetic never mutates: every operation returns a new vector built by the
/// strategy of the backend this vector was created with.
///
/// # Example
///
/// ```
/// use vecmath::prelude::*;
///
/// let ctx = Context::global();
/// let a = Vector::from_slice(&[1.0f32, 2.0, 3.0], ctx)?;
/// let b = Vector::from_slice(&[4.0f32, 5.0, 6.0], ctx)?;
/// assert_eq!(a.dot(&b)?, 32.0);
/// # Ok::<(), vecmath::error::Error>(())
/// ```
#[derive(Clone)]
pub struct Vector<T: Element> {
    storage: Storage<T>,
    backend: Backend,
}

impl<T: Element> Vector<T> {
    /// Create a vector by copying `data`
    ///
    /// Fails with `InvalidArgument` if `data` is empty.
    pub fn from_slice(data: &[T], ctx: &Context) -> Result<Self> {
        Self::from_vec(data.to_vec(), ctx)
    }

    /// Create a vector taking ownership of `data`
    pub fn from_vec(data: Vec<T>, ctx: &Context) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::invalid_argument("data", "vector data must not be empty"));
        }
        Ok(Self::with_backend(data, ctx.backend()))
    }

    /// Create a vector of `count` copies of `value`
    pub fn filled(value: T, count: usize, ctx: &Context) -> Result<Self> {
        if count == 0 {
            return Err(Error::invalid_argument("count", "vector length must be positive"));
        }
        Ok(Self::with_backend(vec![value; count], ctx.backend()))
    }

    /// Lay out non-empty `data` for `backend`
    pub(crate) fn with_backend(data: Vec<T>, backend: Backend) -> Self {
        debug_assert!(!data.is_empty());
        Self {
            storage: Storage::new(data, backend),
            backend,
        }
    }

    /// Assemble a vector from lane results computed by a SIMD strategy
    pub(crate) fn from_lanes(lanes: Vec<T>, tail: Vec<T>, width: usize, backend: Backend) -> Self {
        let storage = if width > 1 {
            Storage::from_parts(lanes, tail, width)
        } else {
            let mut data = lanes;
            data.extend(tail);
            Storage::new(data, backend)
        };
        Self { storage, backend }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Always false; construction rejects empty input
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Backend this vector was built with
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns true if the elements are stored as SIMD lanes
    #[inline]
    pub fn is_vectorized(&self) -> bool {
        matches!(self.storage, Storage::Lanes { .. })
    }

    /// Lane width `W`, 1 for flat storage
    #[inline]
    pub fn lane_width(&self) -> usize {
        self.storage.width()
    }

    /// `(lanes, tail)` views of the storage
    ///
    /// `lanes.len()` is a multiple of [`lane_width`](Self::lane_width). A flat
    /// vector reports no lanes and all of its elements as tail.
    #[inline]
    pub fn lane_parts(&self) -> (&[T], &[T]) {
        self.storage.parts()
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len(),
            });
        }
        Ok(self.storage.at(index))
    }

    #[inline]
    pub(crate) fn at(&self, index: usize) -> T {
        self.storage.at(index)
    }

    /// Iterate over the elements in logical order
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.storage.iter()
    }

    /// Copy the elements out in logical order
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Elementwise sum
    pub fn add(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().add(self, other)
    }

    /// Elementwise difference
    pub fn subtract(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().subtract(self, other)
    }

    /// Elementwise product
    pub fn multiply(&self, other: &Vector<T>) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().multiply(self, other)
    }

    /// Sum of elementwise products
    ///
    /// The SIMD strategy accumulates per lane before summing the register, so
    /// float results may differ from the serial strategy in the last bits.
    pub fn dot(&self, other: &Vector<T>) -> Result<T> {
        self.backend.vector_ops::<T>().dot(self, other)
    }

    /// Multiply every element by `factor`
    pub fn multiply_scalar(&self, factor: T) -> Vector<T> {
        self.backend.vector_ops::<T>().multiply_scalar(self, factor)
    }

    /// Divide every element by `divisor`
    ///
    /// Integer vectors reject a zero divisor with `InvalidArgument`.
    pub fn divide_scalar(&self, divisor: T) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().divide(self, divisor)
    }

    /// Euclidean length, the square root of the sum of squares
    pub fn magnitude(&self) -> T {
        self.backend.vector_ops::<T>().magnitude(self)
    }

    /// Elementwise absolute value
    pub fn abs(&self) -> Vector<T> {
        self.backend.vector_ops::<T>().abs(self)
    }

    /// This vector divided by its magnitude
    ///
    /// A zero vector fails with `InvalidArgument`.
    pub fn normalize(&self) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().normalize(self)
    }

    /// Row vector times matrix
    ///
    /// Requires `self.len() == matrix.rows()`, otherwise fails with
    /// `NotSupported`. A column-sliced matrix is the fast layout on a SIMD
    /// backend; a row-sliced one is multiplied with scalar loops.
    pub fn multiply_matrix(&self, matrix: &Matrix<T>) -> Result<Vector<T>> {
        self.backend.vector_ops::<T>().multiply_matrix(self, matrix)
    }
}

impl<T: Element> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len())
            .field("backend", &self.backend)
            .field("data", &self.to_vec())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_input_rejected() {
        let ctx = Context::global();
        let err = Vector::<f32>::from_slice(&[], ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = Vector::filled(1i32, 0, ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_index_resolves_across_lanes_and_tail() {
        let ctx = Context::global();
        let data: Vec<f32> = (0..21).map(|x| x as f32).collect();
        let v = Vector::from_slice(&data, ctx).unwrap();

        for (i, &expected) in data.iter().enumerate() {
            assert_eq!(v.get(i).unwrap(), expected);
        }
        assert_eq!(v.get(21).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(v.to_vec(), data);
    }

    #[test]
    fn test_layout_follows_backend() {
        let v = Vector::from_slice(&[1, 2, 3], &Context::serial()).unwrap();
        assert!(!v.is_vectorized());
        assert_eq!(v.lane_width(), 1);
        assert_eq!(v.lane_parts().1, &[1, 2, 3]);

        let v = Vector::filled(2.0f64, 9, Context::global()).unwrap();
        assert_eq!(v.is_vectorized(), Backend::detect().is_simd());
        assert_eq!(v.len(), 9);
        assert!(v.iter().all(|x| x == 2.0));
    }

    #[test]
    fn test_equality_ignores_layout() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let flat = Vector::from_slice(&data, &Context::serial()).unwrap();
        let detected = Vector::from_slice(&data, Context::global()).unwrap();
        assert_eq!(flat, detected);
    }
}
