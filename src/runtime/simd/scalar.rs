//! Scalar lane kernels
//!
//! Used for remainders shorter than one register and on CPUs without a
//! supported instruction set. `dot` keeps the per-lane accumulation order of
//! the vector kernels so both paths round identically.

use super::LaneOp;
use crate::dtype::Element;

#[inline]
pub fn binary<T: Element>(op: LaneOp, a: &[T], b: &[T], out: &mut [T]) {
    let pairs = a.iter().zip(b.iter());
    match op {
        LaneOp::Add => {
            for (o, (&x, &y)) in out.iter_mut().zip(pairs) {
                *o = x.wrapping_add(y);
            }
        }
        LaneOp::Sub => {
            for (o, (&x, &y)) in out.iter_mut().zip(pairs) {
                *o = x.wrapping_sub(y);
            }
        }
        LaneOp::Mul => {
            for (o, (&x, &y)) in out.iter_mut().zip(pairs) {
                *o = x.wrapping_mul(y);
            }
        }
    }
}

#[inline]
pub fn scale<T: Element>(a: &[T], factor: T, out: &mut [T]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x.wrapping_mul(factor);
    }
}

#[inline]
pub fn divide<T: Element>(a: &[T], divisor: T, out: &mut [T]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x.wrapping_div(divisor);
    }
}

#[inline]
pub fn abs<T: Element>(a: &[T], out: &mut [T]) {
    for (o, &x) in out.iter_mut().zip(a) {
        *o = x.abs_val();
    }
}

/// Dot product with `width` independent partial sums
///
/// Element `i` is accumulated into partial sum `i % width`; the partial sums
/// are then added left to right.
pub fn dot<T: Element>(a: &[T], b: &[T], width: usize) -> T {
    let width = width.max(1);
    let mut acc = vec![T::zero(); width];

    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        let lane = i % width;
        acc[lane] = acc[lane].wrapping_add(x.wrapping_mul(y));
    }

    acc.into_iter().fold(T::zero(), T::wrapping_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_width_one_is_sequential() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 5.0, 6.0];
        assert_eq!(dot(&a, &b, 1), 32.0);
    }

    #[test]
    fn test_dot_partial_sums() {
        let a = [1i32, 2, 3, 4, 5, 6, 7, 8];
        let b = [1i32; 8];
        assert_eq!(dot(&a, &b, 4), 36);
    }

    #[test]
    fn test_binary_and_scale() {
        let a = [1.0f64, -2.0];
        let b = [3.0f64, 4.0];
        let mut out = [0.0f64; 2];

        binary(LaneOp::Sub, &a, &b, &mut out);
        assert_eq!(out, [-2.0, -6.0]);

        scale(&a, -3.0, &mut out);
        assert_eq!(out, [-3.0, 6.0]);

        abs(&a, &mut out);
        assert_eq!(out, [1.0, 2.0]);
    }
}
