//! Single-variable linear regression on top of the vector engine
//!
//! A thin consumer of the public [`Vector`](crate::tensor::Vector) API:
//! [`generator`] produces training points, [`Rescaling`] maps both axes onto
//! `[0, 1]`, and [`GradientDescent`] fits `h(x) = k0 + k1*x` with batch
//! gradient descent.

pub mod generator;
mod gradient;
mod normalization;

pub use gradient::{GradientDescent, RegressionResult};
pub use normalization::Rescaling;

/// One training sample
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DataPoint {
    /// Feature
    pub x: f32,
    /// Target
    pub y: f32,
}

impl DataPoint {
    /// Create a point from its feature and target
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
