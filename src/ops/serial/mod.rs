//! Serial strategies: scalar loops over flat buffers

mod matrix;
mod vector;

pub use matrix::SerialMatrixOps;
pub use vector::SerialVectorOps;

pub(crate) use vector::vector_matrix_product;
