//! Serial vector operations

use crate::dtype::Element;
use crate::error::Result;
use crate::ops::{validate_divisor, validate_vector_matrix, validate_vector_pair, VectorOps};
use crate::tensor::{Matrix, Vector};

/// Vector strategy that walks elements one at a time
#[derive(Copy, Clone, Debug, Default)]
pub struct SerialVectorOps;

impl<T: Element> VectorOps<T> for SerialVectorOps {
    fn add(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("add", a, b)?;
        Ok(zip_map(a, b, T::wrapping_add))
    }

    fn subtract(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("subtract", a, b)?;
        Ok(zip_map(a, b, T::wrapping_sub))
    }

    fn multiply(&self, a: &Vector<T>, b: &Vector<T>) -> Result<Vector<T>> {
        validate_vector_pair("multiply", a, b)?;
        Ok(zip_map(a, b, T::wrapping_mul))
    }

    fn dot(&self, a: &Vector<T>, b: &Vector<T>) -> Result<T> {
        validate_vector_pair("dot", a, b)?;
        Ok(sequential_dot(a, b))
    }

    fn multiply_scalar(&self, a: &Vector<T>, factor: T) -> Vector<T> {
        map(a, |x| x.wrapping_mul(factor))
    }

    fn divide(&self, a: &Vector<T>, divisor: T) -> Result<Vector<T>> {
        validate_divisor(divisor)?;
        Ok(map(a, |x| x.wrapping_div(divisor)))
    }

    fn abs(&self, a: &Vector<T>) -> Vector<T> {
        map(a, Element::abs_val)
    }

    fn magnitude(&self, a: &Vector<T>) -> T {
        sequential_dot(a, a).sqrt_val()
    }

    fn multiply_matrix(&self, v: &Vector<T>, m: &Matrix<T>) -> Result<Vector<T>> {
        validate_vector_matrix(v, m)?;
        Ok(vector_matrix_product(v, m))
    }
}

/// `v @ m` with one sequential sum per output column
pub(crate) fn vector_matrix_product<T: Element>(v: &Vector<T>, m: &Matrix<T>) -> Vector<T> {
    let out = (0..m.cols())
        .map(|col| {
            v.iter()
                .enumerate()
                .fold(T::zero(), |acc, (row, x)| acc.wrapping_add(x.wrapping_mul(m.at(row, col))))
        })
        .collect();
    Vector::with_backend(out, v.backend())
}

#[inline]
fn sequential_dot<T: Element>(a: &Vector<T>, b: &Vector<T>) -> T {
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (x, y)| acc.wrapping_add(x.wrapping_mul(y)))
}

#[inline]
fn map<T: Element>(a: &Vector<T>, f: impl Fn(T) -> T) -> Vector<T> {
    Vector::with_backend(a.iter().map(f).collect(), a.backend())
}

#[inline]
fn zip_map<T: Element>(a: &Vector<T>, b: &Vector<T>, f: impl Fn(T, T) -> T) -> Vector<T> {
    Vector::with_backend(
        a.iter().zip(b.iter()).map(|(x, y)| f(x, y)).collect(),
        a.backend(),
    )
}
