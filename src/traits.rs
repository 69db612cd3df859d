//! Core seams for the collection pipeline.
//!
//! Kept minimal: the pipeline only needs to know where things are and how
//! far apart two positions are.

use crate::geometry::Point;

/// Anything with a position on the service plane.
pub trait Located {
    fn position(&self) -> Point;
}

/// Measures travel distance between two positions.
///
/// The router and route-length statistics are generic over this; the
/// clusterer is always Euclidean since its mean update assumes it.
pub trait DistanceMetric {
    fn distance(&self, from: Point, to: Point) -> f64;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance(&self, from: Point, to: Point) -> f64 {
        (**self).distance(from, to)
    }
}
