//! Greedy nearest-neighbour tours, one per cluster.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::config::OptimizationSettings;
use crate::error::{Error, Result, validate_bins};
use crate::geometry::{Euclidean, Point};
use crate::model::{Bin, Depot, RoutePlan, RoutePoint, Tour};
use crate::traits::DistanceMetric;

#[derive(Debug, Clone, Default)]
pub struct Router<M = Euclidean> {
    metric: M,
}

impl<M: DistanceMetric> Router<M> {
    pub fn new(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Build a closed tour from the depot through every due bin of each
    /// cluster `0..k`, in ascending cluster order.
    ///
    /// Clusters without due members emit nothing.
    pub fn route(&self, bins: &[Bin], depot: &Depot, settings: &OptimizationSettings) -> Result<RoutePlan> {
        if !settings.threshold.is_finite() {
            return Err(Error::NonFiniteSetting { field: "threshold" });
        }
        if !depot.position.is_finite() {
            return Err(Error::NonFiniteDepot);
        }
        validate_bins(bins)?;
        Ok(self.build(bins, depot, settings))
    }

    /// Routing proper, on inputs already validated by the caller.
    ///
    /// Members are grouped in one pass, so the work depends on the number of
    /// due bins rather than on the requested cluster count.
    pub(crate) fn build(&self, bins: &[Bin], depot: &Depot, settings: &OptimizationSettings) -> RoutePlan {
        let threshold = settings.threshold;
        let k = settings.effective_clusters();

        let mut clusters: BTreeMap<usize, Vec<&Bin>> = BTreeMap::new();
        for bin in bins.iter().filter(|bin| bin.needs_collection(threshold)) {
            if let Some(cluster) = bin.cluster.filter(|&cluster| cluster < k) {
                clusters.entry(cluster).or_default().push(bin);
            }
        }

        let tours: Vec<Tour> = clusters
            .into_iter()
            .map(|(cluster, members)| {
                trace!(cluster, stops = members.len(), "tour built");
                self.tour(cluster, &members, depot)
            })
            .collect();

        debug!(tours = tours.len(), "routing finished");
        RoutePlan { tours }
    }

    fn tour(&self, cluster: usize, members: &[&Bin], depot: &Depot) -> Tour {
        let mut points = Vec::with_capacity(members.len() + 2);
        points.push(RoutePoint::depot(depot));

        let mut visited = vec![false; members.len()];
        let mut current: Point = depot.position;

        for _ in 0..members.len() {
            let Some(next) = self.nearest_unvisited(current, members, &visited) else {
                break;
            };
            visited[next] = true;
            current = members[next].position;
            points.push(RoutePoint::bin(members[next]));
        }

        points.push(RoutePoint::depot(depot));
        Tour { cluster, points }
    }

    /// First member in scan order at minimum distance from `from`.
    fn nearest_unvisited(&self, from: Point, members: &[&Bin], visited: &[bool]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, bin) in members.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let distance = self.metric.distance(from, bin.position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Route with the Euclidean metric.
pub fn route(bins: &[Bin], depot: &Depot, threshold: f64, k: i32) -> Result<RoutePlan> {
    Router::new(Euclidean).route(bins, depot, &OptimizationSettings::new(threshold, k))
}
