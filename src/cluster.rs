//! K-means partitioning of the bins due for collection.
//!
//! Seeding is deterministic: the first `k` eligible bins, in input order,
//! provide the initial centroids. Each round assigns every eligible bin to
//! its nearest centroid (lowest index wins ties) and moves each centroid to
//! the mean of its members. A centroid that loses all members stays where it
//! was. Rounds stop once no centroid moves by more than the tolerance on
//! either axis, or when the round cap is reached.

use tracing::{debug, trace};

use crate::config::{ClusterOptions, OptimizationSettings};
use crate::error::{Error, Result, validate_bins};
use crate::geometry::Point;
use crate::model::Bin;

/// Output of one clustering call.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Input bins, in input order, with fresh cluster assignments.
    pub bins: Vec<Bin>,
    /// Final centroid positions; at most `k`, fewer when fewer bins are eligible.
    pub centroids: Vec<Point>,
    /// Assignment/update rounds executed.
    pub rounds: usize,
    /// False when the round cap stopped the iteration.
    pub converged: bool,
}

impl Clustering {
    /// Ids of the bins assigned to `cluster`, in input order.
    pub fn members(&self, cluster: usize) -> Vec<u32> {
        self.bins
            .iter()
            .filter(|bin| bin.cluster == Some(cluster))
            .map(|bin| bin.id)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clusterer {
    options: ClusterOptions,
}

impl Clusterer {
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Partition the bins at or above `settings.threshold` into at most
    /// `settings.cluster_count` groups.
    ///
    /// Bins below the threshold always come back unassigned, whatever they
    /// carried before. The input slice is left untouched.
    pub fn cluster(&self, bins: &[Bin], settings: &OptimizationSettings) -> Result<Clustering> {
        if !settings.threshold.is_finite() {
            return Err(Error::NonFiniteSetting { field: "threshold" });
        }
        validate_bins(bins)?;
        Ok(self.partition(bins, settings))
    }

    /// Clustering proper, on inputs already validated by the caller.
    pub(crate) fn partition(&self, bins: &[Bin], settings: &OptimizationSettings) -> Clustering {
        let threshold = settings.threshold;
        let k = settings.effective_clusters();

        let mut clustered: Vec<Bin> = bins
            .iter()
            .map(|bin| Bin {
                cluster: None,
                ..bin.clone()
            })
            .collect();

        let eligible: Vec<usize> = bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.needs_collection(threshold))
            .map(|(index, _)| index)
            .collect();

        if eligible.is_empty() || k == 0 {
            debug!(eligible = eligible.len(), k, "nothing to cluster");
            return Clustering {
                bins: clustered,
                centroids: Vec::new(),
                rounds: 0,
                converged: true,
            };
        }

        let positions: Vec<Point> = eligible.iter().map(|&index| bins[index].position).collect();
        let mut centroids: Vec<Point> = positions.iter().take(k).copied().collect();
        let mut labels = vec![0usize; positions.len()];

        let max_rounds = self.options.round_cap();
        let tolerance = self.options.movement_tolerance();
        let mut rounds = 0;
        let mut converged = false;

        while rounds < max_rounds {
            rounds += 1;

            for (label, position) in labels.iter_mut().zip(&positions) {
                *label = nearest_centroid(*position, &centroids);
            }

            let updated: Vec<Point> = centroids
                .iter()
                .enumerate()
                .map(|(cluster, previous)| {
                    let members = positions
                        .iter()
                        .zip(&labels)
                        .filter(|(_, label)| **label == cluster)
                        .map(|(position, _)| *position);
                    Point::mean(members).unwrap_or(*previous)
                })
                .collect();

            let moved = centroids.iter().zip(&updated).any(|(old, new)| {
                (old.x - new.x).abs() > tolerance || (old.y - new.y).abs() > tolerance
            });

            centroids = updated;
            trace!(round = rounds, moved, "k-means round");

            if !moved {
                converged = true;
                break;
            }
        }

        for (&index, &label) in eligible.iter().zip(&labels) {
            clustered[index].cluster = Some(label);
        }

        debug!(
            eligible = eligible.len(),
            k,
            centroids = centroids.len(),
            rounds,
            converged,
            "clustering finished"
        );

        Clustering {
            bins: clustered,
            centroids,
            rounds,
            converged,
        }
    }
}

/// Cluster with the default round cap and tolerance.
pub fn cluster(bins: &[Bin], threshold: f64, k: i32) -> Result<Clustering> {
    Clusterer::default().cluster(bins, &OptimizationSettings::new(threshold, k))
}

/// Index of the closest centroid; the first one scanned wins ties.
fn nearest_centroid(position: Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = position.distance(*centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}
