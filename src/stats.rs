//! Derived fleet statistics.

use serde::{Deserialize, Serialize};

use crate::model::Bin;
use crate::traits::{DistanceMetric, Located};

/// Headline numbers for a fleet and its current route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_bins: usize,
    /// Bins at or above the threshold.
    pub need_collection: usize,
    /// Mean fill level over all bins, 0 for an empty fleet.
    pub avg_fill_level: f64,
    pub route_distance: f64,
}

impl SystemStats {
    pub fn compute<'a, I, P, M>(bins: &[Bin], route: I, threshold: f64, metric: &M) -> Self
    where
        I: IntoIterator<Item = &'a P>,
        P: Located + 'a,
        M: DistanceMetric,
    {
        let avg_fill_level = if bins.is_empty() {
            0.0
        } else {
            bins.iter().map(|bin| bin.fill_level).sum::<f64>() / bins.len() as f64
        };

        Self {
            total_bins: bins.len(),
            need_collection: bins.iter().filter(|bin| bin.needs_collection(threshold)).count(),
            avg_fill_level,
            route_distance: route_distance(route, metric),
        }
    }
}

/// Sum of distances between consecutive points of the flattened route.
///
/// Runs straight across tour boundaries: the depot-to-depot hop between
/// two tours is summed like any other hop.
pub fn route_distance<'a, I, P, M>(route: I, metric: &M) -> f64
where
    I: IntoIterator<Item = &'a P>,
    P: Located + 'a,
    M: DistanceMetric,
{
    let mut total = 0.0;
    let mut previous = None;
    for point in route {
        let position = point.position();
        if let Some(prev) = previous {
            total += metric.distance(prev, position);
        }
        previous = Some(position);
    }
    total
}

/// Bin counts per quarter of the fill range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillDistribution {
    /// Below 25%.
    pub low: usize,
    /// 25% up to 50%.
    pub moderate: usize,
    /// 50% up to 75%.
    pub high: usize,
    /// 75% and above.
    pub critical: usize,
}

impl FillDistribution {
    pub fn from_bins(bins: &[Bin]) -> Self {
        let mut distribution = Self::default();
        for bin in bins {
            match bin.fill_level {
                level if level < 25.0 => distribution.low += 1,
                level if level < 50.0 => distribution.moderate += 1,
                level if level < 75.0 => distribution.high += 1,
                _ => distribution.critical += 1,
            }
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high + self.critical
    }
}

/// Level at which a bin is flagged as filling up, regardless of threshold.
const ELEVATED_LEVEL: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
    Normal,
    Elevated,
    Collect,
}

impl FillStatus {
    pub fn of(bin: &Bin, threshold: f64) -> Self {
        if bin.needs_collection(threshold) {
            FillStatus::Collect
        } else if bin.fill_level >= ELEVATED_LEVEL {
            FillStatus::Elevated
        } else {
            FillStatus::Normal
        }
    }
}

/// Bins ordered fullest first, each with its status. Equal fill levels keep
/// their input order.
pub fn status_board(bins: &[Bin], threshold: f64) -> Vec<(&Bin, FillStatus)> {
    let mut board: Vec<(&Bin, FillStatus)> = bins
        .iter()
        .map(|bin| (bin, FillStatus::of(bin, threshold)))
        .collect();
    board.sort_by(|a, b| b.0.fill_level.total_cmp(&a.0.fill_level));
    board
}
