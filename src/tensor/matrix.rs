//! Two-dimensional numeric container with row or column slicing

use super::Vector;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Backend, Context};
use std::fmt;

/// How a matrix on a SIMD backend is cut into [`Vector`] slices
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VectorizationMode {
    /// One slice per row, each of length `cols`
    #[default]
    ByRow,
    /// One slice per column, each of length `rows`
    ByColumn,
}

impl VectorizationMode {
    /// The other mode
    #[inline]
    pub const fn swapped(self) -> Self {
        match self {
            Self::ByRow => Self::ByColumn,
            Self::ByColumn => Self::ByRow,
        }
    }
}

#[derive(Clone)]
pub(crate) enum MatrixStorage<T: Element> {
    /// SIMD backend: one vector per row or per column
    Sliced(Vec<Vector<T>>),
    /// Serial backend: row-major elements
    Flat(Vec<T>),
}

/// Fixed-size numeric matrix
///
/// On a SIMD backend the data is held as a list of [`Vector`] slices, one per
/// row for [`VectorizationMode::ByRow`] or one per column for
/// [`VectorizationMode::ByColumn`]. On the serial backend it is a flat
/// row-major buffer and the mode is only recorded.
///
/// Slice layout matters for cost:
/// - `multiply` is fastest with a `ByRow` left operand and a `ByColumn` right
///   operand; other combinations are re-sliced first
/// - `add`/`subtract` re-slice both operands to `ByRow` when modes differ
/// - `transpose_in_place` on a sliced matrix just flips the mode
///
/// # Example
///
/// ```
/// use vecmath::prelude::*;
///
/// let ctx = Context::global();
/// let m = Matrix::from_slice(&[1.0f32, 2.0, 3.0, 4.0], 2, 2, VectorizationMode::ByRow, ctx)?;
/// assert_eq!(m.determinant()?, -2.0);
/// # Ok::<(), vecmath::error::Error>(())
/// ```
#[derive(Clone)]
pub struct Matrix<T: Element> {
    rows: usize,
    cols: usize,
    mode: VectorizationMode,
    storage: MatrixStorage<T>,
    backend: Backend,
}

impl<T: Element> Matrix<T> {
    /// Create a matrix from row-major `data`
    ///
    /// Fails with `InvalidArgument` if either dimension is zero or
    /// `data.len() != rows * cols`.
    pub fn from_slice(
        data: &[T],
        rows: usize,
        cols: usize,
        mode: VectorizationMode,
        ctx: &Context,
    ) -> Result<Self> {
        let len = check_dims(rows, cols)?;
        if data.len() != len {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "expected {} elements for a {}x{} matrix, got {}",
                    len,
                    rows,
                    cols,
                    data.len()
                ),
            ));
        }
        Ok(Self::from_row_major(data.to_vec(), rows, cols, mode, ctx.backend()))
    }

    /// Create a matrix from a list of equally long rows
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R], mode: VectorizationMode, ctx: &Context) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        check_dims(rows.len(), cols)?;

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::invalid_argument(
                    "rows",
                    format!("row {} has {} elements, expected {}", i, row.len(), cols),
                ));
            }
            data.extend_from_slice(row);
        }

        Ok(Self::from_row_major(data, rows.len(), cols, mode, ctx.backend()))
    }

    /// Create a matrix from existing slices
    ///
    /// Each vector becomes one row (`ByRow`) or one column (`ByColumn`). Only
    /// available on a SIMD backend; the serial backend fails with
    /// `NotSupported`.
    pub fn from_vectors(vectors: Vec<Vector<T>>, mode: VectorizationMode, ctx: &Context) -> Result<Self> {
        let backend = ctx.backend();
        if !backend.is_simd() {
            return Err(Error::not_supported(
                "Matrix::from_vectors",
                "slice construction requires SIMD hardware support",
            ));
        }

        let len = match vectors.first() {
            Some(v) => v.len(),
            None => return Err(Error::invalid_argument("vectors", "at least one slice is required")),
        };
        for v in &vectors {
            if v.backend() != backend {
                return Err(Error::BackendMismatch {
                    lhs: backend,
                    rhs: v.backend(),
                });
            }
            if v.len() != len {
                return Err(Error::invalid_argument(
                    "vectors",
                    format!("slices must share one length, found {} and {}", len, v.len()),
                ));
            }
        }

        let (rows, cols) = match mode {
            VectorizationMode::ByRow => (vectors.len(), len),
            VectorizationMode::ByColumn => (len, vectors.len()),
        };
        Ok(Self::from_slices(vectors, rows, cols, mode, backend))
    }

    /// Matrix of zeros, sliced by row
    pub fn zeros(rows: usize, cols: usize, ctx: &Context) -> Result<Self> {
        Self::filled(T::zero(), rows, cols, ctx)
    }

    /// Matrix of ones, sliced by row
    pub fn ones(rows: usize, cols: usize, ctx: &Context) -> Result<Self> {
        Self::filled(T::one(), rows, cols, ctx)
    }

    /// `n x n` identity matrix, sliced by row
    pub fn identity(n: usize, ctx: &Context) -> Result<Self> {
        let len = check_dims(n, n)?;
        let mut data = vec![T::zero(); len];
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        Ok(Self::from_row_major(data, n, n, VectorizationMode::ByRow, ctx.backend()))
    }

    fn filled(value: T, rows: usize, cols: usize, ctx: &Context) -> Result<Self> {
        let len = check_dims(rows, cols)?;
        Ok(Self::from_row_major(
            vec![value; len],
            rows,
            cols,
            VectorizationMode::ByRow,
            ctx.backend(),
        ))
    }

    /// Lay out row-major `data` for `backend`; dimensions must already be valid
    pub(crate) fn from_row_major(
        data: Vec<T>,
        rows: usize,
        cols: usize,
        mode: VectorizationMode,
        backend: Backend,
    ) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        if !backend.is_simd() {
            return Self {
                rows,
                cols,
                mode,
                storage: MatrixStorage::Flat(data),
                backend,
            };
        }

        let slices = match mode {
            VectorizationMode::ByRow => data
                .chunks_exact(cols)
                .map(|row| Vector::with_backend(row.to_vec(), backend))
                .collect(),
            VectorizationMode::ByColumn => (0..cols)
                .map(|col| {
                    let column = (0..rows).map(|row| data[row * cols + col]).collect();
                    Vector::with_backend(column, backend)
                })
                .collect(),
        };
        Self::from_slices(slices, rows, cols, mode, backend)
    }

    pub(crate) fn from_slices(
        slices: Vec<Vector<T>>,
        rows: usize,
        cols: usize,
        mode: VectorizationMode,
        backend: Backend,
    ) -> Self {
        debug_assert_eq!(
            slices.len(),
            match mode {
                VectorizationMode::ByRow => rows,
                VectorizationMode::ByColumn => cols,
            }
        );
        Self {
            rows,
            cols,
            mode,
            storage: MatrixStorage::Sliced(slices),
            backend,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns true if the matrix is square
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Slice layout
    #[inline]
    pub fn mode(&self) -> VectorizationMode {
        self.mode
    }

    /// Backend this matrix was built with
    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns true if the data is held as vector slices
    #[inline]
    pub fn is_vectorized(&self) -> bool {
        matches!(self.storage, MatrixStorage::Sliced(_))
    }

    /// Row or column slices, `None` for the flat layout
    pub fn vectors(&self) -> Option<&[Vector<T>]> {
        match &self.storage {
            MatrixStorage::Sliced(slices) => Some(slices),
            MatrixStorage::Flat(_) => None,
        }
    }

    /// Element at (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        if row >= self.rows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.rows,
            });
        }
        if col >= self.cols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.cols,
            });
        }
        Ok(self.at(row, col))
    }

    /// Element at (`row`, `col`), which must be in bounds
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> T {
        match &self.storage {
            MatrixStorage::Sliced(slices) => match self.mode {
                VectorizationMode::ByRow => slices[row].at(col),
                VectorizationMode::ByColumn => slices[col].at(row),
            },
            MatrixStorage::Flat(data) => data[row * self.cols + col],
        }
    }

    /// Copy the elements out in row-major order
    pub fn to_vec(&self) -> Vec<T> {
        match &self.storage {
            MatrixStorage::Sliced(slices) => match self.mode {
                VectorizationMode::ByRow => slices.iter().flat_map(|row| row.iter()).collect(),
                VectorizationMode::ByColumn => {
                    let mut out = vec![T::zero(); self.rows * self.cols];
                    for (col, column) in slices.iter().enumerate() {
                        for (row, value) in column.iter().enumerate() {
                            out[row * self.cols + col] = value;
                        }
                    }
                    out
                }
            },
            MatrixStorage::Flat(data) => data.clone(),
        }
    }

    /// Copy the elements out as one `Vec` per row
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.to_vec().chunks_exact(self.cols).map(<[T]>::to_vec).collect()
    }

    /// Copy of this matrix sliced by `mode`
    ///
    /// Re-slicing copies every element; use it to arrange operands ahead of a
    /// hot loop rather than letting each operation do it.
    pub fn with_mode(&self, mode: VectorizationMode) -> Matrix<T> {
        if mode == self.mode {
            return self.clone();
        }
        if !self.is_vectorized() {
            let mut out = self.clone();
            out.mode = mode;
            return out;
        }
        log::trace!(
            "re-slicing {}x{} matrix from {:?} to {:?}",
            self.rows,
            self.cols,
            self.mode,
            mode
        );
        Self::from_row_major(self.to_vec(), self.rows, self.cols, mode, self.backend)
    }

    /// Elementwise sum
    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.backend.matrix_ops::<T>().add(self, other)
    }

    /// Elementwise difference
    pub fn subtract(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.backend.matrix_ops::<T>().subtract(self, other)
    }

    /// Matrix product
    ///
    /// Requires `self.cols() == other.rows()`, otherwise fails with
    /// `InvalidOperation`.
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.backend.matrix_ops::<T>().multiply(self, other)
    }

    /// Transpose this matrix in place
    ///
    /// A sliced matrix only swaps its mode and dimensions; a flat matrix
    /// rebuilds its buffer.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        self.backend.matrix_ops::<T>().transpose_in_place(self);
        self
    }

    /// Transposed copy of this matrix
    pub fn transpose(&self) -> Matrix<T> {
        self.backend.matrix_ops::<T>().transpose(self)
    }

    /// Determinant by LU decomposition with partial pivoting
    ///
    /// Fails with `NotSupported` for a non-square or singular matrix.
    pub fn determinant(&self) -> Result<T> {
        self.backend.matrix_ops::<T>().determinant(self)
    }

    /// Flip the slice interpretation, turning the matrix into its transpose
    pub(crate) fn swap_mode(&mut self) {
        debug_assert!(self.is_vectorized());
        self.mode = self.mode.swapped();
        std::mem::swap(&mut self.rows, &mut self.cols);
    }

    /// Replace the contents with row-major `data` of a new shape
    pub(crate) fn replace_data(&mut self, data: Vec<T>, rows: usize, cols: usize) {
        *self = Self::from_row_major(data, rows, cols, self.mode, self.backend);
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_vec() == other.to_vec()
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape())
            .field("mode", &self.mode)
            .field("backend", &self.backend)
            .field("rows", &self.to_rows())
            .finish()
    }
}

/// Element count of a `rows x cols` matrix
fn check_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::invalid_argument(
            "data",
            format!("matrix dimensions must be positive, got {}x{}", rows, cols),
        ));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::invalid_argument(
            "data",
            format!("{}x{} matrix has more elements than fit in usize", rows, cols),
        )
    })
}
