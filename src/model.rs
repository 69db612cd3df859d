//! Domain records exchanged with the host application.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::traits::{DistanceMetric, Located};

/// Fill level of a completely full bin (percent).
pub const FULL_LEVEL: f64 = 100.0;

/// Informational bin category. Does not affect clustering or routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCategory {
    Residential,
    Commercial,
    Industrial,
}

impl BinCategory {
    pub const ALL: [BinCategory; 3] = [
        BinCategory::Residential,
        BinCategory::Commercial,
        BinCategory::Industrial,
    ];
}

/// A waste bin in the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Stable identifier, unique across the fleet.
    pub id: u32,
    pub position: Point,
    /// Percent full, 0 to 100.
    pub fill_level: f64,
    /// Percent gained per simulated day.
    pub fill_rate: f64,
    pub category: BinCategory,
    /// Cluster index, or `None` when unassigned / not due for collection.
    #[serde(default)]
    pub cluster: Option<usize>,
}

impl Bin {
    pub fn new(id: u32, position: Point, fill_level: f64) -> Self {
        Self {
            id,
            position,
            fill_level,
            fill_rate: 1.0,
            category: BinCategory::Residential,
            cluster: None,
        }
    }

    pub fn with_fill_rate(mut self, fill_rate: f64) -> Self {
        self.fill_rate = fill_rate;
        self
    }

    pub fn with_category(mut self, category: BinCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_cluster(mut self, cluster: Option<usize>) -> Self {
        self.cluster = cluster;
        self
    }

    /// True when the bin is at or above the collection threshold.
    pub fn needs_collection(&self, threshold: f64) -> bool {
        self.fill_level >= threshold
    }
}

impl Located for Bin {
    fn position(&self) -> Point {
        self.position
    }
}

/// The shared start and end point of every tour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub position: Point,
}

impl Depot {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

impl Default for Depot {
    fn default() -> Self {
        Self::new(5.0, 5.0)
    }
}

impl Located for Depot {
    fn position(&self) -> Point {
        self.position
    }
}

/// What a waypoint refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stop {
    Depot,
    Bin(u32),
}

/// A positional waypoint in a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub stop: Stop,
    pub position: Point,
}

impl RoutePoint {
    pub fn depot(depot: &Depot) -> Self {
        Self {
            stop: Stop::Depot,
            position: depot.position,
        }
    }

    pub fn bin(bin: &Bin) -> Self {
        Self {
            stop: Stop::Bin(bin.id),
            position: bin.position,
        }
    }

    pub fn is_depot(&self) -> bool {
        self.stop == Stop::Depot
    }
}

impl Located for RoutePoint {
    fn position(&self) -> Point {
        self.position
    }
}

/// A closed tour for one cluster: depot, member bins, depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub cluster: usize,
    pub points: Vec<RoutePoint>,
}

impl Tour {
    /// Bin ids in visiting order.
    pub fn bin_ids(&self) -> Vec<u32> {
        self.points
            .iter()
            .filter_map(|point| match point.stop {
                Stop::Bin(id) => Some(id),
                Stop::Depot => None,
            })
            .collect()
    }

    /// Sum of hop distances from the opening depot back to the closing one.
    pub fn length<M: DistanceMetric>(&self, metric: &M) -> f64 {
        self.points
            .windows(2)
            .map(|hop| metric.distance(hop[0].position, hop[1].position))
            .sum()
    }
}

/// Tours for every non-empty cluster, in ascending cluster order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    pub tours: Vec<Tour>,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// The flattened route sequence.
    pub fn points(&self) -> impl Iterator<Item = &RoutePoint> + '_ {
        self.tours.iter().flat_map(|tour| tour.points.iter())
    }

    pub fn into_points(self) -> Vec<RoutePoint> {
        self.tours.into_iter().flat_map(|tour| tour.points).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Euclidean;

    fn sample_tour() -> Tour {
        let depot = Depot::new(0.0, 0.0);
        let bin = Bin::new(7, Point::new(3.0, 4.0), 90.0);
        Tour {
            cluster: 0,
            points: vec![RoutePoint::depot(&depot), RoutePoint::bin(&bin), RoutePoint::depot(&depot)],
        }
    }

    #[test]
    fn test_needs_collection_is_inclusive() {
        let bin = Bin::new(1, Point::new(0.0, 0.0), 70.0);
        assert!(bin.needs_collection(70.0));
        assert!(!bin.needs_collection(70.5));
    }

    #[test]
    fn test_tour_bin_ids_skip_depot() {
        assert_eq!(sample_tour().bin_ids(), vec![7]);
    }

    #[test]
    fn test_tour_length() {
        assert!((sample_tour().length(&Euclidean) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_plan_flattening_keeps_order() {
        let mut second = sample_tour();
        second.cluster = 1;
        let plan = RoutePlan {
            tours: vec![sample_tour(), second],
        };
        assert_eq!(plan.points().count(), 6);
        let flat = plan.into_points();
        assert!(flat[2].is_depot() && flat[3].is_depot());
    }

    #[test]
    fn test_bin_serde_defaults_cluster() {
        let json = r#"{"id":3,"position":{"x":1.0,"y":2.0},"fill_level":55.0,"fill_rate":2.0,"category":"industrial"}"#;
        let bin: Bin = serde_json::from_str(json).expect("valid bin json");
        assert_eq!(bin.cluster, None);
        assert_eq!(bin.category, BinCategory::Industrial);
    }
}
