//! SIMD vector operations

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::serial::vector_matrix_product;
use crate::ops::{validate_divisor, validate_vector_matrix, validate_vector_pair, VectorOps};
use crate::runtime::simd::{lane_abs, lane_binary, lane_divide, lane_dot, lane_scale, LaneOp, SimdLevel};
use crate::tensor::{Matrix, Vector, VectorizationMode};

/// Vector strategy running lane kernels over full registers and scalar code
/// over the tail
#[derive(Copy, Clone, Debug, Default)]
pub struct SimdVectorOps;

impl<T: Element> VectorOps<T> for SimdVectorOps {
    fn add(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("add", a, b)?;
        Ok(lanewise(LaneOp::Add, a, b))
    }

    fn subtract(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("subtract", a, b)?;
        Ok(lanewise(LaneOp::Sub, a, b))
    }

    fn multiply(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("multiply", a, b)?;
        Ok(lanewise(LaneOp::Mul, a, b))
    }

    fn dot(&self, a: &Vector<T>, b: &Vector<T>) -> Result<T> {
        validate_vector_pair("dot", a, b)?;
        Ok(lane_dot_product(a, b))
    }

    fn multiply_scalar(&self, a: &Vector<T>, factor: T) -> Vector<T> {
        unary(a, |level, xs| lane_scale(level, xs, factor))
    }

    fn divide(&self, a: &Vector<T>, divisor: T) -> Result<Vector<T>> {
        validate_divisor(divisor)?;
        Ok(unary(a, |level, xs| lane_divide(level, xs, divisor)))
    }

    fn abs(&self, a: &Vector<T>) -> Vector<T> {
        unary(a, lane_abs)
    }

    fn magnitude(&self, a: &Vector<T>) -> T {
        lane_dot_product(a, a).sqrt_val()
    }

    fn multiply_matrix(&self, v: &Vector<T>, m: &Matrix<T>) -> Result<Vector<T>> {
        validate_vector_matrix(v, m)?;

        match m.vectors() {
            Some(columns) if m.mode() == VectorizationMode::ByColumn => {
                let out = columns.iter().map(|c| lane_dot_product(v, c)).collect();
                Ok(Vector::with_backend(out, v.backend()))
            }
            _ => {
                // Re-slicing costs more than the scalar loops it would save.
                log::trace!(
                    "multiply_matrix: {}x{} {:?} matrix, using scalar loops",
                    m.rows(),
                    m.cols(),
                    m.mode()
                );
                Ok(vector_matrix_product(v, m))
            }
        }
    }
}

/// Elementwise `op` over lanes and tail of two validated vectors
pub(crate) fn lanewise<T: Element>(op: LaneOp, a: &Vector<T>, b: &Vector<T>) -> Vector<T> {
    let level = a.backend().level();
    let (lanes_a, tail_a) = a.lane_parts();
    let (lanes_b, tail_b) = b.lane_parts();

    Vector::from_lanes(
        lane_binary(level, op, lanes_a, lanes_b),
        lane_binary(level, op, tail_a, tail_b),
        a.lane_width(),
        a.backend(),
    )
}

/// Lane-wise partial sums reduced across the register, plus the tail summed
/// in order
pub(crate) fn lane_dot_product<T: Element>(a: &Vector<T>, b: &Vector<T>) -> T {
    let level = a.backend().level();
    let (lanes_a, tail_a) = a.lane_parts();
    let (lanes_b, tail_b) = b.lane_parts();

    let lanes = lane_dot(level, lanes_a, lanes_b, a.lane_width());
    let tail = lane_dot(SimdLevel::Scalar, tail_a, tail_b, 1);
    lanes.wrapping_add(tail)
}

fn unary<T: Element>(a: &Vector<T>, kernel: impl Fn(SimdLevel, &[T]) -> Vec<T>) -> Vector<T> {
    let level = a.backend().level();
    let (lanes, tail) = a.lane_parts();
    Vector::from_lanes(kernel(level, lanes), kernel(level, tail), a.lane_width(), a.backend())
}
