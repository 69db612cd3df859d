//! Simulated fleet inputs: seeded bin layouts, fill growth and forecasts.
//!
//! Everything here is deterministic for a given seed so hosts and tests can
//! replay the same fleet.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::config::OptimizationSettings;
use crate::geometry::Point;
use crate::model::{Bin, BinCategory, FULL_LEVEL};

/// Shape of a generated fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub bin_count: u32,
    /// Lowest coordinate on both axes.
    pub min_coord: f64,
    /// Coordinates fall in `[min_coord, min_coord + coord_span)`.
    pub coord_span: f64,
    pub min_fill_rate: f64,
    pub fill_rate_span: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            bin_count: 20,
            min_coord: 10.0,
            coord_span: 85.0,
            min_fill_rate: 1.0,
            fill_rate_span: 5.0,
        }
    }
}

/// Generate a fleet with ids `1..=bin_count`, all unassigned.
pub fn generate_fleet(config: &FleetConfig, seed: u64) -> Vec<Bin> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (1..=config.bin_count)
        .map(|id| {
            let position = Point::new(
                config.min_coord + rng.gen_range(0.0..1.0) * config.coord_span,
                config.min_coord + rng.gen_range(0.0..1.0) * config.coord_span,
            );
            let fill_level = rng.gen_range(0.0..FULL_LEVEL);
            let category = random_category(&mut rng);
            let fill_rate = config.min_fill_rate + rng.gen_range(0.0..1.0) * config.fill_rate_span;

            Bin::new(id, position, fill_level)
                .with_fill_rate(fill_rate)
                .with_category(category)
        })
        .collect()
}

/// Re-randomize fill levels and categories, keeping positions and rates.
/// Cluster assignments are cleared.
pub fn reset_fill(bins: &[Bin], seed: u64) -> Vec<Bin> {
    let mut rng = SmallRng::seed_from_u64(seed);
    bins.iter()
        .map(|bin| Bin {
            fill_level: rng.gen_range(0.0..FULL_LEVEL),
            category: random_category(&mut rng),
            cluster: None,
            ..bin.clone()
        })
        .collect()
}

/// Fill level after `days` of growth, capped at full.
pub fn forecast_fill(bin: &Bin, days: f64) -> f64 {
    (bin.fill_level + bin.fill_rate * days).min(FULL_LEVEL)
}

/// Grow every bin by `days` worth of fill. Assignments are left as they are.
pub fn advance(bins: &[Bin], days: f64) -> Vec<Bin> {
    bins.iter()
        .map(|bin| Bin {
            fill_level: forecast_fill(bin, days),
            ..bin.clone()
        })
        .collect()
}

/// Projected fill for one bin on each day `0..=days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillForecast {
    pub bin_id: u32,
    pub levels: Vec<f64>,
}

pub fn forecast(bins: &[Bin], days: u32) -> Vec<FillForecast> {
    bins.iter()
        .map(|bin| FillForecast {
            bin_id: bin.id,
            levels: (0..=days).map(|day| forecast_fill(bin, f64::from(day))).collect(),
        })
        .collect()
}

/// Ids of bins not yet due that will reach the threshold within the
/// forecast horizon.
pub fn due_within(bins: &[Bin], settings: &OptimizationSettings) -> Vec<u32> {
    let horizon = f64::from(settings.prediction_days);
    bins.iter()
        .filter(|bin| !bin.needs_collection(settings.threshold))
        .filter(|bin| forecast_fill(bin, horizon) >= settings.threshold)
        .map(|bin| bin.id)
        .collect()
}

fn random_category(rng: &mut SmallRng) -> BinCategory {
    BinCategory::ALL[rng.gen_range(0..BinCategory::ALL.len())]
}
