//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::Pod;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a vector or matrix
///
/// This is the numeric adapter between generic container code and the concrete
/// primitive kinds. Arithmetic uses the operator bounds directly; anything the
/// operators cannot express (absolute value, square root, conversions) goes
/// through the trait methods.
///
/// # Bounds
/// - `Pod` - lets SIMD dispatch reinterpret `&[T]` as `&[f32]`/`&[i32]`/`&[f64]`
///   once `DTYPE` has identified the concrete type (bytemuck)
/// - `Add + Sub + Mul + Div` - Arithmetic operations (Output = Self)
/// - `PartialOrd` - Pivot selection and comparisons
pub trait Element:
    Copy
    + Clone
    + Debug
    + Send
    + Sync
    + Pod
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    ///
    /// Integer types truncate toward zero, matching an `as` cast.
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Absolute value
    fn abs_val(self) -> Self;

    /// Square root
    ///
    /// Integer types return the truncated root of the value.
    fn sqrt_val(self) -> Self;

    /// `self + rhs`, wrapping on integer overflow like the vector registers do
    fn wrapping_add(self, rhs: Self) -> Self;

    /// `self - rhs`, wrapping on integer overflow
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// `self * rhs`, wrapping on integer overflow
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// `self / rhs`, wrapping `MIN / -1` for integers
    ///
    /// A zero integer divisor still panics; callers reject it first.
    fn wrapping_div(self, rhs: Self) -> Self;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn abs_val(self) -> Self {
        self.abs()
    }

    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn wrapping_div(self, rhs: Self) -> Self {
        self / rhs
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn abs_val(self) -> Self {
        self.abs()
    }

    #[inline]
    fn sqrt_val(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline]
    fn wrapping_div(self, rhs: Self) -> Self {
        self / rhs
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i32
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn abs_val(self) -> Self {
        self.wrapping_abs()
    }

    #[inline]
    fn sqrt_val(self) -> Self {
        (self as f64).sqrt() as i32
    }

    #[inline]
    fn wrapping_add(self, rhs: Self) -> Self {
        i32::wrapping_add(self, rhs)
    }

    #[inline]
    fn wrapping_sub(self, rhs: Self) -> Self {
        i32::wrapping_sub(self, rhs)
    }

    #[inline]
    fn wrapping_mul(self, rhs: Self) -> Self {
        i32::wrapping_mul(self, rhs)
    }

    #[inline]
    fn wrapping_div(self, rhs: Self) -> Self {
        i32::wrapping_div(self, rhs)
    }
}
