//! Planar geometry for the service area.
//!
//! Bins and the depot live on a bounded 2D plane (typically
//! [0,100]×[0,100]), so straight-line distance is the travel estimate.

use serde::{Deserialize, Serialize};

use crate::traits::{DistanceMetric, Located};

/// A position on the service plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Arithmetic mean of a set of points, or `None` when empty.
    pub fn mean<I>(points: I) -> Option<Point>
    where
        I: IntoIterator<Item = Point>,
    {
        let (count, sum_x, sum_y) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, sx, sy), p| (n + 1, sx + p.x, sy + p.y));

        if count == 0 {
            return None;
        }
        Some(Point::new(sum_x / count as f64, sum_y / count as f64))
    }
}

impl Located for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance metric (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    fn distance(&self, from: Point, to: Point) -> f64 {
        from.distance(to)
    }
}
