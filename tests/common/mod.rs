//! Common test utilities
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecmath::runtime::{Backend, Context};

/// Context for every backend available on this machine
///
/// Always contains the serial context; the SIMD context is added when the
/// CPU supports it.
pub fn all_contexts() -> Vec<Context> {
    let mut contexts = vec![Context::serial()];
    let detected = Backend::detect();
    if detected.is_simd() {
        contexts.push(Context::new(detected));
    }
    contexts
}

/// SIMD context, or None when the CPU has no supported instruction set
pub fn simd_context() -> Option<Context> {
    let detected = Backend::detect();
    detected.is_simd().then(|| Context::new(detected))
}

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Seeded random f32 data in `[0, max)`
pub fn sample_f32(len: usize, seed: u64, max: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0.0..max)).collect()
}

/// Seeded random i32 data in `[0, max)`
pub fn sample_i32(len: usize, seed: u64, max: i32) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..max)).collect()
}

/// Serial triple-loop reference product of row-major matrices
pub fn reference_matmul_f32(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    let mut c = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..k {
                sum += a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
    c
}
