//! Min-max rescaling of training data

use super::DataPoint;
use crate::error::{Error, Result};

/// Per-axis minimum and maximum of a training set
///
/// Maps both axes onto `[0, 1]` with `(v - min) / (max - min)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rescaling {
    /// Smallest feature
    pub x_min: f32,
    /// Largest feature
    pub x_max: f32,
    /// Smallest target
    pub y_min: f32,
    /// Largest target
    pub y_max: f32,
}

impl Rescaling {
    /// Record the range of each axis of `points`
    ///
    /// Fails with `InvalidArgument` if `points` is empty or an axis has a
    /// single value.
    pub fn fit(points: &[DataPoint]) -> Result<Self> {
        let first = points
            .first()
            .ok_or_else(|| Error::invalid_argument("points", "no data points to rescale"))?;

        let mut scaling = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for p in &points[1..] {
            scaling.x_min = scaling.x_min.min(p.x);
            scaling.x_max = scaling.x_max.max(p.x);
            scaling.y_min = scaling.y_min.min(p.y);
            scaling.y_max = scaling.y_max.max(p.y);
        }

        if scaling.x_max == scaling.x_min {
            return Err(Error::invalid_argument("points", "all x values are equal"));
        }
        if scaling.y_max == scaling.y_min {
            return Err(Error::invalid_argument("points", "all y values are equal"));
        }
        Ok(scaling)
    }

    /// Rescale every point
    pub fn normalize(&self, points: &[DataPoint]) -> Vec<DataPoint> {
        points
            .iter()
            .map(|p| DataPoint::new(self.normalize_x(p.x), self.normalize_y(p.y)))
            .collect()
    }

    /// Rescale a raw feature
    #[inline]
    pub fn normalize_x(&self, x: f32) -> f32 {
        (x - self.x_min) / (self.x_max - self.x_min)
    }

    /// Rescale a raw target
    #[inline]
    pub fn normalize_y(&self, y: f32) -> f32 {
        (y - self.y_min) / (self.y_max - self.y_min)
    }

    /// Map a normalized target back to raw units
    #[inline]
    pub fn denormalize_y(&self, y: f32) -> f32 {
        y * (self.y_max - self.y_min) + self.y_min
    }
}
