//! Training data generators

use super::DataPoint;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// `count` points on `y = slope * x + intercept` for `x = 0, 1, ..., count - 1`
pub fn linear(count: usize, slope: f32, intercept: f32) -> Vec<DataPoint> {
    (0..count)
        .map(|i| {
            let x = i as f32;
            DataPoint::new(x, slope * x + intercept)
        })
        .collect()
}

/// `count` points on `y = x`
pub fn identity(count: usize) -> Vec<DataPoint> {
    linear(count, 1.0, 0.0)
}

/// Points on a line with Gaussian noise added to `y`
///
/// The same `seed` always yields the same points.
pub fn noisy(count: usize, slope: f32, intercept: f32, noise_std: f32, seed: u64) -> Result<Vec<DataPoint>> {
    let normal = Normal::new(0.0f32, noise_std)
        .map_err(|e| Error::invalid_argument("noise_std", e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok(linear(count, slope, intercept)
        .into_iter()
        .map(|p| DataPoint::new(p.x, p.y + normal.sample(&mut rng)))
        .collect())
}
