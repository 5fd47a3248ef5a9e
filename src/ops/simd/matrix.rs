//! SIMD matrix operations

use super::vector::{lane_dot_product, lanewise};
use crate::dtype::Element;
use crate::error::Result;
use crate::ops::{validate_matmul_shapes, validate_matrix_pair, MatrixOps, SerialMatrixOps};
use crate::runtime::simd::LaneOp;
use crate::tensor::{Matrix, VectorizationMode};
use std::borrow::Cow;

/// Matrix strategy working slice by slice
///
/// Flat operands are handed to [`SerialMatrixOps`].
#[derive(Copy, Clone, Debug, Default)]
pub struct SimdMatrixOps;

impl<T: Element> MatrixOps<T> for SimdMatrixOps {
    fn add(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matrix_pair("add", a, b)?;
        Ok(slicewise("add", LaneOp::Add, a, b))
    }

    fn subtract(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matrix_pair("subtract", a, b)?;
        Ok(slicewise("subtract", LaneOp::Sub, a, b))
    }

    fn multiply(&self, a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
        validate_matmul_shapes(a, b)?;
        if !a.is_vectorized() || !b.is_vectorized() {
            return SerialMatrixOps.multiply(a, b);
        }

        let left = arrange("multiply", a, VectorizationMode::ByRow);
        let right = arrange("multiply", b, VectorizationMode::ByColumn);
        let (Some(rows), Some(cols)) = (left.vectors(), right.vectors()) else {
            return SerialMatrixOps.multiply(a, b);
        };

        let mut out = Vec::with_capacity(rows.len() * cols.len());
        for row in rows {
            for col in cols {
                out.push(lane_dot_product(row, col));
            }
        }

        Ok(Matrix::from_row_major(
            out,
            a.rows(),
            b.cols(),
            VectorizationMode::ByRow,
            a.backend(),
        ))
    }

    fn transpose_in_place(&self, m: &mut Matrix<T>) {
        if m.is_vectorized() {
            m.swap_mode();
        } else {
            SerialMatrixOps.transpose_in_place(m);
        }
    }

    fn transpose(&self, m: &Matrix<T>) -> Matrix<T> {
        if !m.is_vectorized() {
            return SerialMatrixOps.transpose(m);
        }
        let mut out = m.clone();
        out.swap_mode();
        out
    }
}

/// Elementwise `op` applied slice by slice on validated operands
///
/// Operands with different modes are both re-sliced by row first.
fn slicewise<T: Element>(name: &'static str, op: LaneOp, a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    let (left, right) = if a.mode() == b.mode() {
        (Cow::Borrowed(a), Cow::Borrowed(b))
    } else {
        (
            arrange(name, a, VectorizationMode::ByRow),
            arrange(name, b, VectorizationMode::ByRow),
        )
    };

    match (left.vectors(), right.vectors()) {
        (Some(xs), Some(ys)) => {
            let slices = xs.iter().zip(ys).map(|(x, y)| lanewise(op, x, y)).collect();
            Matrix::from_slices(slices, a.rows(), a.cols(), left.mode(), a.backend())
        }
        _ => {
            let data = left
                .to_vec()
                .into_iter()
                .zip(right.to_vec())
                .map(|(x, y)| match op {
                    LaneOp::Add => x.wrapping_add(y),
                    LaneOp::Sub => x.wrapping_sub(y),
                    LaneOp::Mul => x.wrapping_mul(y),
                })
                .collect();
            Matrix::from_row_major(data, a.rows(), a.cols(), a.mode(), a.backend())
        }
    }
}

/// `m` sliced by `mode`, borrowing when it already is
fn arrange<'a, T: Element>(op: &str, m: &'a Matrix<T>, mode: VectorizationMode) -> Cow<'a, Matrix<T>> {
    if m.mode() == mode {
        Cow::Borrowed(m)
    } else {
        log::trace!("{}: re-slicing {}x{} operand to {:?}", op, m.rows(), m.cols(), mode);
        Cow::Owned(m.with_mode(mode))
    }
}
