//! The optimize action: cluster the due bins, then route each cluster.

use tracing::{debug, warn};

use crate::cluster::Clusterer;
use crate::config::{OptimizationSettings, PipelineConfig};
use crate::error::{Result, validate};
use crate::geometry::Euclidean;
use crate::model::{Bin, Depot, RoutePlan};
use crate::router::Router;
use crate::stats::SystemStats;
use crate::traits::DistanceMetric;

#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    /// Bins with fresh cluster assignments, in input order.
    pub bins: Vec<Bin>,
    pub route: RoutePlan,
    pub stats: SystemStats,
    /// K-means rounds executed.
    pub rounds: usize,
}

/// Runs the clusterer and router back to back with one configuration.
#[derive(Debug, Clone)]
pub struct Optimizer<M = Euclidean> {
    config: PipelineConfig,
    clusterer: Clusterer,
    router: Router<M>,
}

impl Optimizer<Euclidean> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_metric(config, Euclidean)
    }
}

impl Default for Optimizer<Euclidean> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<M: DistanceMetric> Optimizer<M> {
    pub fn with_metric(config: PipelineConfig, metric: M) -> Self {
        Self {
            clusterer: Clusterer::new(config.cluster.clone()),
            router: Router::new(metric),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Optimize with the configured settings and depot.
    pub fn run(&self, bins: &[Bin]) -> Result<Optimization> {
        self.run_with(bins, &self.config.settings, &self.config.depot)
    }

    /// Optimize with caller-supplied settings and depot.
    pub fn run_with(&self, bins: &[Bin], settings: &OptimizationSettings, depot: &Depot) -> Result<Optimization> {
        validate(bins, settings, depot)?;

        if settings.cluster_count <= 0 {
            warn!(cluster_count = settings.cluster_count, "non-positive cluster count, no routes built");
        }

        let clustering = self.clusterer.partition(bins, settings);
        let route = self.router.build(&clustering.bins, depot, settings);
        let stats = SystemStats::compute(&clustering.bins, route.points(), settings.threshold, self.router.metric());

        debug!(
            bins = stats.total_bins,
            due = stats.need_collection,
            tours = route.tours.len(),
            rounds = clustering.rounds,
            distance = stats.route_distance,
            "optimization finished"
        );

        Ok(Optimization {
            bins: clustering.bins,
            route,
            stats,
            rounds: clustering.rounds,
        })
    }
}

/// Optimize with default round cap, tolerance and the Euclidean metric.
pub fn optimize(bins: &[Bin], settings: &OptimizationSettings, depot: &Depot) -> Result<Optimization> {
    Optimizer::<Euclidean>::default().run_with(bins, settings, depot)
}
