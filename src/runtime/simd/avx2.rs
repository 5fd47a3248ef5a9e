//! AVX2 lane kernels
//!
//! Processes 8 f32/i32 or 4 f64 per iteration using 256-bit vectors. Any
//! elements past the last full register are handed to the scalar kernels, so
//! the functions accept buffers of arbitrary length.

use std::arch::x86_64::*;

use super::LaneOp;
use super::scalar;

const F32_LANES: usize = 8;
const F64_LANES: usize = 4;
const I32_LANES: usize = 8;

// ============================================================================
// Element-wise binary kernels
// ============================================================================

/// # Safety
/// - CPU must support AVX2
/// - `a`, `b` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn binary_f32(op: LaneOp, a: &[f32], b: &[f32], out: &mut [f32]) {
    let chunks = a.len() / F32_LANES;
    let (pa, pb, po) = (a.as_ptr(), b.as_ptr(), out.as_mut_ptr());

    for i in 0..chunks {
        let offset = i * F32_LANES;
        let va = _mm256_loadu_ps(pa.add(offset));
        let vb = _mm256_loadu_ps(pb.add(offset));
        let vr = match op {
            LaneOp::Add => _mm256_add_ps(va, vb),
            LaneOp::Sub => _mm256_sub_ps(va, vb),
            LaneOp::Mul => _mm256_mul_ps(va, vb),
        };
        _mm256_storeu_ps(po.add(offset), vr);
    }

    let done = chunks * F32_LANES;
    scalar::binary(op, &a[done..], &b[done..], &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a`, `b` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn binary_f64(op: LaneOp, a: &[f64], b: &[f64], out: &mut [f64]) {
    let chunks = a.len() / F64_LANES;
    let (pa, pb, po) = (a.as_ptr(), b.as_ptr(), out.as_mut_ptr());

    for i in 0..chunks {
        let offset = i * F64_LANES;
        let va = _mm256_loadu_pd(pa.add(offset));
        let vb = _mm256_loadu_pd(pb.add(offset));
        let vr = match op {
            LaneOp::Add => _mm256_add_pd(va, vb),
            LaneOp::Sub => _mm256_sub_pd(va, vb),
            LaneOp::Mul => _mm256_mul_pd(va, vb),
        };
        _mm256_storeu_pd(po.add(offset), vr);
    }

    let done = chunks * F64_LANES;
    scalar::binary(op, &a[done..], &b[done..], &mut out[done..]);
}

/// Integer lanes wrap on overflow.
///
/// # Safety
/// - CPU must support AVX2
/// - `a`, `b` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn binary_i32(op: LaneOp, a: &[i32], b: &[i32], out: &mut [i32]) {
    let chunks = a.len() / I32_LANES;
    let (pa, pb, po) = (
        a.as_ptr() as *const __m256i,
        b.as_ptr() as *const __m256i,
        out.as_mut_ptr() as *mut __m256i,
    );

    for i in 0..chunks {
        let va = _mm256_loadu_si256(pa.add(i));
        let vb = _mm256_loadu_si256(pb.add(i));
        let vr = match op {
            LaneOp::Add => _mm256_add_epi32(va, vb),
            LaneOp::Sub => _mm256_sub_epi32(va, vb),
            LaneOp::Mul => _mm256_mullo_epi32(va, vb),
        };
        _mm256_storeu_si256(po.add(i), vr);
    }

    let done = chunks * I32_LANES;
    scalar::binary(op, &a[done..], &b[done..], &mut out[done..]);
}

// ============================================================================
// Broadcast scalar kernels
// ============================================================================

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn scale_f32(a: &[f32], factor: f32, out: &mut [f32]) {
    let chunks = a.len() / F32_LANES;
    let vs = _mm256_set1_ps(factor);

    for i in 0..chunks {
        let offset = i * F32_LANES;
        let va = _mm256_loadu_ps(a.as_ptr().add(offset));
        _mm256_storeu_ps(out.as_mut_ptr().add(offset), _mm256_mul_ps(va, vs));
    }

    let done = chunks * F32_LANES;
    scalar::scale(&a[done..], factor, &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn scale_f64(a: &[f64], factor: f64, out: &mut [f64]) {
    let chunks = a.len() / F64_LANES;
    let vs = _mm256_set1_pd(factor);

    for i in 0..chunks {
        let offset = i * F64_LANES;
        let va = _mm256_loadu_pd(a.as_ptr().add(offset));
        _mm256_storeu_pd(out.as_mut_ptr().add(offset), _mm256_mul_pd(va, vs));
    }

    let done = chunks * F64_LANES;
    scalar::scale(&a[done..], factor, &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn scale_i32(a: &[i32], factor: i32, out: &mut [i32]) {
    let chunks = a.len() / I32_LANES;
    let vs = _mm256_set1_epi32(factor);
    let pa = a.as_ptr() as *const __m256i;
    let po = out.as_mut_ptr() as *mut __m256i;

    for i in 0..chunks {
        let va = _mm256_loadu_si256(pa.add(i));
        _mm256_storeu_si256(po.add(i), _mm256_mullo_epi32(va, vs));
    }

    let done = chunks * I32_LANES;
    scalar::scale(&a[done..], factor, &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn divide_f32(a: &[f32], divisor: f32, out: &mut [f32]) {
    let chunks = a.len() / F32_LANES;
    let vs = _mm256_set1_ps(divisor);

    for i in 0..chunks {
        let offset = i * F32_LANES;
        let va = _mm256_loadu_ps(a.as_ptr().add(offset));
        _mm256_storeu_ps(out.as_mut_ptr().add(offset), _mm256_div_ps(va, vs));
    }

    let done = chunks * F32_LANES;
    scalar::divide(&a[done..], divisor, &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn divide_f64(a: &[f64], divisor: f64, out: &mut [f64]) {
    let chunks = a.len() / F64_LANES;
    let vs = _mm256_set1_pd(divisor);

    for i in 0..chunks {
        let offset = i * F64_LANES;
        let va = _mm256_loadu_pd(a.as_ptr().add(offset));
        _mm256_storeu_pd(out.as_mut_ptr().add(offset), _mm256_div_pd(va, vs));
    }

    let done = chunks * F64_LANES;
    scalar::divide(&a[done..], divisor, &mut out[done..]);
}

// ============================================================================
// Unary kernels
// ============================================================================

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn abs_f32(a: &[f32], out: &mut [f32]) {
    let chunks = a.len() / F32_LANES;
    // Clearing the sign bit is exact for every value including -0.0 and NaN.
    let sign = _mm256_set1_ps(-0.0);

    for i in 0..chunks {
        let offset = i * F32_LANES;
        let va = _mm256_loadu_ps(a.as_ptr().add(offset));
        _mm256_storeu_ps(out.as_mut_ptr().add(offset), _mm256_andnot_ps(sign, va));
    }

    let done = chunks * F32_LANES;
    scalar::abs(&a[done..], &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn abs_f64(a: &[f64], out: &mut [f64]) {
    let chunks = a.len() / F64_LANES;
    let sign = _mm256_set1_pd(-0.0);

    for i in 0..chunks {
        let offset = i * F64_LANES;
        let va = _mm256_loadu_pd(a.as_ptr().add(offset));
        _mm256_storeu_pd(out.as_mut_ptr().add(offset), _mm256_andnot_pd(sign, va));
    }

    let done = chunks * F64_LANES;
    scalar::abs(&a[done..], &mut out[done..]);
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `out` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn abs_i32(a: &[i32], out: &mut [i32]) {
    let chunks = a.len() / I32_LANES;
    let pa = a.as_ptr() as *const __m256i;
    let po = out.as_mut_ptr() as *mut __m256i;

    for i in 0..chunks {
        let va = _mm256_loadu_si256(pa.add(i));
        _mm256_storeu_si256(po.add(i), _mm256_abs_epi32(va));
    }

    let done = chunks * I32_LANES;
    scalar::abs(&a[done..], &mut out[done..]);
}

// ============================================================================
// Dot product kernels
// ============================================================================
//
// Products are added to a per-lane accumulator (no FMA, so each step rounds
// exactly like the scalar emulation), then the register is summed in lane order.

/// # Safety
/// - CPU must support AVX2
/// - `a` and `b` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    let chunks = a.len() / F32_LANES;
    let mut acc = _mm256_setzero_ps();

    for i in 0..chunks {
        let offset = i * F32_LANES;
        let va = _mm256_loadu_ps(a.as_ptr().add(offset));
        let vb = _mm256_loadu_ps(b.as_ptr().add(offset));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
    }

    let mut lanes = [0.0f32; F32_LANES];
    _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
    let mut sum = lanes.iter().fold(0.0f32, |s, &x| s + x);

    for j in (chunks * F32_LANES)..a.len() {
        sum += a[j] * b[j];
    }
    sum
}

/// # Safety
/// - CPU must support AVX2
/// - `a` and `b` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
    let chunks = a.len() / F64_LANES;
    let mut acc = _mm256_setzero_pd();

    for i in 0..chunks {
        let offset = i * F64_LANES;
        let va = _mm256_loadu_pd(a.as_ptr().add(offset));
        let vb = _mm256_loadu_pd(b.as_ptr().add(offset));
        acc = _mm256_add_pd(acc, _mm256_mul_pd(va, vb));
    }

    let mut lanes = [0.0f64; F64_LANES];
    _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
    let mut sum = lanes.iter().fold(0.0f64, |s, &x| s + x);

    for j in (chunks * F64_LANES)..a.len() {
        sum += a[j] * b[j];
    }
    sum
}

/// Integer lanes wrap on overflow.
///
/// # Safety
/// - CPU must support AVX2
/// - `a` and `b` must have the same length
#[target_feature(enable = "avx2")]
pub unsafe fn dot_i32(a: &[i32], b: &[i32]) -> i32 {
    let chunks = a.len() / I32_LANES;
    let pa = a.as_ptr() as *const __m256i;
    let pb = b.as_ptr() as *const __m256i;
    let mut acc = _mm256_setzero_si256();

    for i in 0..chunks {
        let va = _mm256_loadu_si256(pa.add(i));
        let vb = _mm256_loadu_si256(pb.add(i));
        acc = _mm256_add_epi32(acc, _mm256_mullo_epi32(va, vb));
    }

    let mut lanes = [0i32; I32_LANES];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc);
    let mut sum = lanes.iter().fold(0i32, |s, &x| s.wrapping_add(x));

    for j in (chunks * I32_LANES)..a.len() {
        sum = sum.wrapping_add(a[j].wrapping_mul(b[j]));
    }
    sum
}
