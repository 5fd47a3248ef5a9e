//! SIMD detection and lane kernels
//!
//! Detection runs once per process and is cached. Kernels operate on lane
//! buffers: contiguous runs of elements whose length is a multiple of the
//! register width. Each public kernel dispatches on the detected level and on
//! the element's [`DType`], falling back to scalar loops that reproduce the
//! lane-wise evaluation order.
//!
//! # Architecture Support
//!
//! | Architecture | Instruction Set | Vector Width | Status    |
//! |--------------|-----------------|--------------|-----------|
//! | x86-64       | AVX2            | 256 bits     | Supported |
//! | Any          | Scalar          | N/A          | Fallback  |

#[cfg(target_arch = "x86_64")]
mod avx2;
mod scalar;

use crate::dtype::{DType, Element};
use bytemuck::{cast_slice, cast_slice_mut};
use std::sync::OnceLock;

/// Width of one SIMD register in bytes
pub const REGISTER_BYTES: usize = 32;

/// SIMD capability level detected at runtime
///
/// Note: All variants are defined on all platforms for API completeness,
/// but `Avx2` is only constructed at runtime on x86-64.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(dead_code)]
pub enum SimdLevel {
    /// AVX2 (256-bit vectors, 8 f32/i32 or 4 f64)
    Avx2 = 1,
    /// Scalar fallback (no SIMD)
    Scalar = 0,
}

impl SimdLevel {
    /// Returns true if this level uses vector registers
    #[inline]
    pub const fn is_simd(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// Number of `T` elements per vector register
    #[inline]
    pub const fn lanes_for(self, dtype: DType) -> usize {
        match self {
            Self::Avx2 => REGISTER_BYTES / dtype.size_in_bytes(),
            Self::Scalar => 1,
        }
    }

    /// Returns the name of this SIMD level as a string
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Avx2 => "AVX2",
            Self::Scalar => "Scalar",
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached SIMD level detection
static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level for the current CPU
///
/// The first call performs detection, subsequent calls return the cached result.
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_uncached)
}

/// Perform actual CPU feature detection (called once)
#[cold]
fn detect_simd_uncached() -> SimdLevel {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx2") {
            return SimdLevel::Avx2;
        }
    }

    SimdLevel::Scalar
}

/// Element-wise operation between two lane buffers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaneOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
}

/// Element-wise `op` over two equally sized lane buffers
pub fn lane_binary<T: Element>(level: SimdLevel, op: LaneOp, a: &[T], b: &[T]) -> Vec<T> {
    debug_assert_eq!(a.len(), b.len());
    let mut out = vec![T::zero(); a.len()];

    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe {
            match T::DTYPE {
                DType::F32 => avx2::binary_f32(op, cast_slice(a), cast_slice(b), cast_slice_mut(&mut out)),
                DType::F64 => avx2::binary_f64(op, cast_slice(a), cast_slice(b), cast_slice_mut(&mut out)),
                DType::I32 => avx2::binary_i32(op, cast_slice(a), cast_slice(b), cast_slice_mut(&mut out)),
            }
        },
        _ => scalar::binary(op, a, b, &mut out),
    }

    out
}

/// Multiply every element of a lane buffer by `factor`
pub fn lane_scale<T: Element>(level: SimdLevel, a: &[T], factor: T) -> Vec<T> {
    let mut out = vec![T::zero(); a.len()];

    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe {
            match T::DTYPE {
                DType::F32 => avx2::scale_f32(cast_slice(a), scalar_as(factor), cast_slice_mut(&mut out)),
                DType::F64 => avx2::scale_f64(cast_slice(a), scalar_as(factor), cast_slice_mut(&mut out)),
                DType::I32 => avx2::scale_i32(cast_slice(a), scalar_as(factor), cast_slice_mut(&mut out)),
            }
        },
        _ => scalar::scale(a, factor, &mut out),
    }

    out
}

/// Divide every element of a lane buffer by `divisor`
///
/// AVX2 has no integer division, so `i32` buffers always take the scalar loop.
/// Callers must reject a zero integer divisor.
pub fn lane_divide<T: Element>(level: SimdLevel, a: &[T], divisor: T) -> Vec<T> {
    let mut out = vec![T::zero(); a.len()];

    match (level, T::DTYPE) {
        #[cfg(target_arch = "x86_64")]
        (SimdLevel::Avx2, DType::F32) => unsafe {
            avx2::divide_f32(cast_slice(a), scalar_as(divisor), cast_slice_mut(&mut out))
        },
        #[cfg(target_arch = "x86_64")]
        (SimdLevel::Avx2, DType::F64) => unsafe {
            avx2::divide_f64(cast_slice(a), scalar_as(divisor), cast_slice_mut(&mut out))
        },
        _ => scalar::divide(a, divisor, &mut out),
    }

    out
}

/// Absolute value of every element of a lane buffer
pub fn lane_abs<T: Element>(level: SimdLevel, a: &[T]) -> Vec<T> {
    let mut out = vec![T::zero(); a.len()];

    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe {
            match T::DTYPE {
                DType::F32 => avx2::abs_f32(cast_slice(a), cast_slice_mut(&mut out)),
                DType::F64 => avx2::abs_f64(cast_slice(a), cast_slice_mut(&mut out)),
                DType::I32 => avx2::abs_i32(cast_slice(a), cast_slice_mut(&mut out)),
            }
        },
        _ => scalar::abs(a, &mut out),
    }

    out
}

/// Dot product of two lane buffers
///
/// Products are accumulated per lane into one register of `width` partial sums,
/// which is then summed left to right. This order differs from a sequential
/// scalar sum, so float results can differ in the last bits from the serial path.
pub fn lane_dot<T: Element>(level: SimdLevel, a: &[T], b: &[T], width: usize) -> T {
    debug_assert_eq!(a.len(), b.len());

    match level {
        #[cfg(target_arch = "x86_64")]
        SimdLevel::Avx2 => unsafe {
            match T::DTYPE {
                DType::F32 => scalar_as(avx2::dot_f32(cast_slice(a), cast_slice(b))),
                DType::F64 => scalar_as(avx2::dot_f64(cast_slice(a), cast_slice(b))),
                DType::I32 => scalar_as(avx2::dot_i32(cast_slice(a), cast_slice(b))),
            }
        },
        _ => scalar::dot(a, b, width),
    }
}

/// Reinterpret a scalar whose concrete type has already been matched via `DTYPE`
#[inline]
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn scalar_as<A: Element, B: Element>(value: A) -> B {
    bytemuck::cast(value)
}
