//! Batch gradient descent for `h(x) = k0 + k1*x`

use super::{DataPoint, Rescaling};
use crate::error::{Error, Result};
use crate::runtime::Context;
use crate::tensor::Vector;
use std::fmt;
use std::time::{Duration, Instant};

/// Gradient descent configuration
///
/// Minimizes the mean squared error `1/2m * sum((k0 + k1*x - y)^2)` over
/// rescaled data, starting from `k0 = k1 = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientDescent {
    /// Step size
    pub learning_rate: f32,
    /// Stop once both parameters move less than this in one step
    pub tolerance: f32,
    /// Give up after this many steps
    pub max_iterations: usize,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            learning_rate: 0.75,
            tolerance: 1e-6,
            max_iterations: 100_000,
        }
    }
}

impl GradientDescent {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step size
    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the convergence threshold
    pub fn tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration limit
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fit a line to `points`
    ///
    /// Both axes are rescaled to `[0, 1]` first; the returned parameters are
    /// in rescaled units and [`RegressionResult::predict`] maps back.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` for empty input, a degenerate axis, or a
    ///   non-positive learning rate
    /// - `Error::NotConverged` if `max_iterations` is reached
    pub fn fit(&self, points: &[DataPoint], ctx: &Context) -> Result<RegressionResult> {
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(Error::invalid_argument(
                "learning_rate",
                format!("must be positive, got {}", self.learning_rate),
            ));
        }

        let scaling = Rescaling::fit(points)?;
        let normalized = scaling.normalize(points);
        let xs: Vec<f32> = normalized.iter().map(|p| p.x).collect();
        let ys: Vec<f32> = normalized.iter().map(|p| p.y).collect();

        let x = Vector::from_vec(xs, ctx)?;
        let y = Vector::from_vec(ys, ctx)?;
        let ones = Vector::filled(1.0f32, points.len(), ctx)?;
        let fraction = 1.0 / points.len() as f32;

        let mut k0 = 0.0f32;
        let mut k1 = 0.0f32;
        let start = Instant::now();

        for iteration in 1..=self.max_iterations {
            let prediction = x.multiply_scalar(k1).add(&ones.multiply_scalar(k0))?;
            let residual = prediction.subtract(&y)?;

            let d0 = fraction * residual.dot(&ones)?;
            let d1 = fraction * residual.dot(&x)?;

            let next_k0 = k0 - self.learning_rate * d0;
            let next_k1 = k1 - self.learning_rate * d1;

            if (next_k0 - k0).abs() < self.tolerance && (next_k1 - k1).abs() < self.tolerance {
                let duration = start.elapsed();
                log::info!(
                    "gradient descent converged after {} iterations in {:?} ({})",
                    iteration,
                    duration,
                    ctx.backend()
                );
                return Ok(RegressionResult {
                    intercept: next_k0,
                    slope: next_k1,
                    iterations: iteration,
                    duration,
                    scaling,
                });
            }

            k0 = next_k0;
            k1 = next_k1;
        }

        Err(Error::NotConverged {
            iterations: self.max_iterations,
        })
    }
}

/// Fitted line and run statistics
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegressionResult {
    /// `k0`, in rescaled units
    pub intercept: f32,
    /// `k1`, in rescaled units
    pub slope: f32,
    /// Gradient steps taken, including the final one
    pub iterations: usize,
    /// Wall time of the descent loop
    pub duration: Duration,
    /// Rescaling applied to the training data
    pub scaling: Rescaling,
}

impl RegressionResult {
    /// Evaluate the fitted line at raw `x`, returning raw `y`
    pub fn predict(&self, x: f32) -> f32 {
        let h = self.intercept + self.slope * self.scaling.normalize_x(x);
        self.scaling.denormalize_y(h)
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h(x) = {:.4} + {:.4}*x", self.intercept, self.slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::regression::generator;

    #[test]
    fn test_fits_identity() {
        let points = generator::identity(100);
        let result = GradientDescent::default().fit(&points, &Context::serial()).unwrap();

        assert!(result.intercept.abs() < 1e-3, "{}", result);
        assert!((result.slope - 1.0).abs() < 1e-3, "{}", result);
        assert!(result.iterations > 1);
        let shown = result.to_string();
        assert!(shown.starts_with("h(x) = ") && shown.ends_with("*x"), "{}", shown);
    }

    #[test]
    fn test_iteration_limit() {
        let points = generator::linear(20, 3.0, -2.0);
        let err = GradientDescent::new()
            .max_iterations(3)
            .fit(&points, &Context::serial())
            .unwrap_err();
        assert_eq!(err, Error::NotConverged { iterations: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_invalid_input() {
        let ctx = Context::serial();
        assert!(GradientDescent::default().fit(&[], &ctx).is_err());
        let points = generator::identity(10);
        let err = GradientDescent::new().learning_rate(0.0).fit(&points, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
