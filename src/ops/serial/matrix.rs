//! Serial matrix operations

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::{validate_matmul_shapes, validate_matrix_pair, MatrixOps};
use crate::tensor::{Matrix, VectorizationMode};

/// Matrix strategy over row-major buffers
#[derive(Copy, Clone, Debug, Default)]
pub struct SerialMatrixOps;

impl<T: Element> MatrixOps<T> for SerialMatrixOps {
    fn add(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matrix_pair("add", a, b)?;
        Ok(zip_map(a, b, T::wrapping_add))
    }

    fn subtract(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matrix_pair("subtract", a, b)?;
        Ok(zip_map(a, b, T::wrapping_sub))
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matmul_shapes(a, b)?;

        let (m, k, n) = (a.rows(), a.cols(), b.cols());
        let mut out = vec![T::zero(); m * n];
        for row in 0..m {
            for col in 0..n {
                let mut acc = T::zero();
                for p in 0..k {
                    acc = acc.wrapping_add(a.at(row, p).wrapping_mul(b.at(p, col)));
                }
                out[row * n + col] = acc;
            }
        }

        Ok(Matrix::from_row_major(out, m, n, VectorizationMode::ByRow, a.backend()))
    }

    fn transpose_in_place(&self, m: &mut Matrix<T>) {
        let data = transposed(m);
        let (rows, cols) = m.shape();
        m.replace_data(data, cols, rows);
    }

    fn transpose(&self, m: &Matrix<T>) -> Matrix<T> {
        Matrix::from_row_major(transposed(m), m.cols(), m.rows(), m.mode(), m.backend())
    }
}

/// Row-major elements of the transpose of `m`
pub(crate) fn transposed<T: Element>(m: &Matrix<T>) -> Vec<T> {
    let (rows, cols) = m.shape();
    let mut out = Vec::with_capacity(rows * cols);
    for col in 0..cols {
        for row in 0..rows {
            out.push(m.at(row, col));
        }
    }
    out
}

fn zip_map<T: Element>(a: &Matrix<T>, b: &Matrix<T>, f: impl Fn(T, T) -> T) -> Matrix<T> {
    let data = a
        .to_vec()
        .into_iter()
        .zip(b.to_vec())
        .map(|(x, y)| f(x, y))
        .collect();
    Matrix::from_row_major(data, a.rows(), a.cols(), a.mode(), a.backend())
}
