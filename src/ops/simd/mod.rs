//! SIMD strategies: lane kernels over register-width slices

mod matrix;
mod vector;

pub use matrix::SimdMatrixOps;
pub use vector::SimdVectorOps;
