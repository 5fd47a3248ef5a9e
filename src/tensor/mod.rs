//! Vector and matrix containers
//!
//! Containers lay their data out once, at construction, according to the
//! backend of the [`Context`](crate::runtime::Context) they were built with:
//! SIMD lanes plus a scalar tail, or a flat buffer. Operations delegate to the
//! matching strategy in [`ops`](crate::ops).

mod matrix;
mod storage;
mod vector;

pub use matrix::{Matrix, VectorizationMode};
pub use vector::Vector;
