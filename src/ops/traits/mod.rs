//! Strategy traits for vector and matrix operations

mod matrix;
mod vector;

pub use matrix::MatrixOps;
pub use vector::VectorOps;
