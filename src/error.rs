//! Boundary validation for the pipeline.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::OptimizationSettings;
use crate::model::{Bin, Depot};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when a call is rejected at the boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A bin carries a NaN or infinite value.
    #[error("bin {id} has a non-finite {field}")]
    NonFiniteBin { id: u32, field: &'static str },

    #[error("setting '{field}' is not finite")]
    NonFiniteSetting { field: &'static str },

    #[error("depot position is not finite")]
    NonFiniteDepot,

    /// Two bins share an id.
    #[error("bin id {id} appears more than once")]
    DuplicateBinId { id: u32 },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Reject inputs that would poison the pipeline with NaN or break bin identity.
pub fn validate(bins: &[Bin], settings: &OptimizationSettings, depot: &Depot) -> Result<()> {
    if !settings.threshold.is_finite() {
        return Err(Error::NonFiniteSetting { field: "threshold" });
    }
    if !depot.position.is_finite() {
        return Err(Error::NonFiniteDepot);
    }
    validate_bins(bins)
}

pub(crate) fn validate_bins(bins: &[Bin]) -> Result<()> {
    let mut seen = HashSet::with_capacity(bins.len());
    for bin in bins {
        if !bin.position.is_finite() {
            return Err(Error::NonFiniteBin { id: bin.id, field: "position" });
        }
        if !bin.fill_level.is_finite() {
            return Err(Error::NonFiniteBin { id: bin.id, field: "fill_level" });
        }
        if !seen.insert(bin.id) {
            return Err(Error::DuplicateBinId { id: bin.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_accepts_well_formed_input() {
        let bins = vec![Bin::new(1, Point::new(1.0, 1.0), 50.0), Bin::new(2, Point::new(2.0, 2.0), 90.0)];
        assert!(validate(&bins, &OptimizationSettings::default(), &Depot::default()).is_ok());
    }

    #[test]
    fn test_rejects_nan_fill() {
        let bins = vec![Bin::new(4, Point::new(1.0, 1.0), f64::NAN)];
        let err = validate(&bins, &OptimizationSettings::default(), &Depot::default()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteBin { id: 4, field: "fill_level" }));
    }

    #[test]
    fn test_rejects_infinite_position() {
        let bins = vec![Bin::new(9, Point::new(f64::INFINITY, 1.0), 80.0)];
        let err = validate_bins(&bins).unwrap_err();
        assert!(matches!(err, Error::NonFiniteBin { id: 9, field: "position" }));
    }

    #[test]
    fn test_rejects_bad_threshold_and_depot() {
        let settings = OptimizationSettings::new(f64::NAN, 2);
        assert!(matches!(
            validate(&[], &settings, &Depot::default()),
            Err(Error::NonFiniteSetting { field: "threshold" })
        ));
        assert!(matches!(
            validate(&[], &OptimizationSettings::default(), &Depot::new(f64::NAN, 0.0)),
            Err(Error::NonFiniteDepot)
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let bins = vec![Bin::new(1, Point::new(1.0, 1.0), 80.0), Bin::new(1, Point::new(5.0, 5.0), 80.0)];
        let err = validate_bins(&bins).unwrap_err();
        assert_eq!(err.to_string(), "bin id 1 appears more than once");
    }
}
