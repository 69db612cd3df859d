//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Depot;

/// Caller-owned settings for one optimization call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationSettings {
    /// Fill percentage at or above which a bin is due for collection.
    pub threshold: f64,
    /// Requested number of clusters (routes). Zero or negative means none.
    pub cluster_count: i32,
    /// Horizon for fill forecasts, in days.
    pub prediction_days: u32,
}

impl Default for OptimizationSettings {
    fn default() -> Self {
        Self {
            threshold: 70.0,
            cluster_count: 3,
            prediction_days: 7,
        }
    }
}

impl OptimizationSettings {
    pub fn new(threshold: f64, cluster_count: i32) -> Self {
        Self {
            threshold,
            cluster_count,
            ..Self::default()
        }
    }

    /// Cluster count with non-positive requests clamped to zero.
    pub fn effective_clusters(&self) -> usize {
        usize::try_from(self.cluster_count).unwrap_or(0)
    }
}

/// Upper bound on k-means rounds, whatever the options ask for.
pub const MAX_ROUNDS: usize = 50;

/// Centroid movement tolerance used when none (or a bad one) is configured.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Tuning for the k-means rounds.
///
/// Both values are read through [`ClusterOptions::round_cap`] and
/// [`ClusterOptions::movement_tolerance`], which keep them inside the
/// supported range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Requested cap on assignment/update rounds, clamped to `1..=MAX_ROUNDS`.
    pub max_rounds: usize,
    /// A centroid counts as moved when either axis shifts by more than this.
    pub tolerance: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ClusterOptions {
    /// Rounds actually allowed. At least one round always runs so every
    /// eligible bin gets a label.
    pub fn round_cap(&self) -> usize {
        self.max_rounds.clamp(1, MAX_ROUNDS)
    }

    /// Tolerance actually applied; negative or non-finite values fall back
    /// to the default.
    pub fn movement_tolerance(&self) -> f64 {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            self.tolerance
        } else {
            DEFAULT_TOLERANCE
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub settings: OptimizationSettings,
    pub depot: Depot,
    pub cluster: ClusterOptions,
}

impl PipelineConfig {
    /// Parse a config document; omitted fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.settings.threshold, 70.0);
        assert_eq!(config.settings.cluster_count, 3);
        assert_eq!(config.settings.prediction_days, 7);
        assert_eq!(config.cluster.max_rounds, 50);
        assert_eq!(config.cluster.tolerance, 0.1);
        assert_eq!(config.depot, Depot::new(5.0, 5.0));
    }

    #[test]
    fn test_effective_clusters_clamps_non_positive() {
        assert_eq!(OptimizationSettings::new(70.0, 4).effective_clusters(), 4);
        assert_eq!(OptimizationSettings::new(70.0, 0).effective_clusters(), 0);
        assert_eq!(OptimizationSettings::new(70.0, -2).effective_clusters(), 0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PipelineConfig::from_json(
            r#"{"settings":{"threshold":85.0},"depot":{"position":{"x":50.0,"y":0.0}}}"#,
        )
        .expect("valid config");
        assert_eq!(config.settings.threshold, 85.0);
        assert_eq!(config.settings.cluster_count, 3);
        assert_eq!(config.depot, Depot::new(50.0, 0.0));
        assert_eq!(config.cluster, ClusterOptions::default());
    }

    #[test]
    fn test_round_cap_is_clamped() {
        let options = |max_rounds| ClusterOptions {
            max_rounds,
            ..ClusterOptions::default()
        };
        assert_eq!(options(0).round_cap(), 1);
        assert_eq!(options(12).round_cap(), 12);
        assert_eq!(options(200).round_cap(), MAX_ROUNDS);
        assert_eq!(options(usize::MAX).round_cap(), MAX_ROUNDS);
    }

    #[test]
    fn test_bad_tolerance_falls_back_to_default() {
        let options = |tolerance| ClusterOptions {
            tolerance,
            ..ClusterOptions::default()
        };
        assert_eq!(options(0.0).movement_tolerance(), 0.0);
        assert_eq!(options(0.5).movement_tolerance(), 0.5);
        assert_eq!(options(-1.0).movement_tolerance(), DEFAULT_TOLERANCE);
        assert_eq!(options(f64::NAN).movement_tolerance(), DEFAULT_TOLERANCE);
        assert_eq!(options(f64::INFINITY).movement_tolerance(), DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(PipelineConfig::from_json("{\"settings\":").is_err());
    }
}
