//! Temporal aggregation of rainfall series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result, ValidationError};

/// Reduction applied to each aggregation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Window total, for depths
    Sum,
    /// Window average, for rates
    Mean,
    /// Largest sample in the window
    Max,
    /// Smallest sample in the window
    Min,
    /// Split coarse totals into finer steps (not available)
    Disaggregate,
}

impl FromStr for Aggregation {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sum" => Ok(Self::Sum),
            "mean" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            "disaggregate" => Ok(Self::Disaggregate),
            other => Err(ValidationError::UnknownMethod {
                kind: "aggregation",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Max => "max",
            Self::Min => "min",
            Self::Disaggregate => "disaggregate",
        })
    }
}

/// Reduce consecutive, non-overlapping windows of `window` samples.
///
/// A trailing partial window is reduced over the samples it has.
pub fn aggregate(series: &[f64], window: usize, method: Aggregation) -> Result<Vec<f64>> {
    let reduce: fn(&[f64]) -> f64 = match method {
        Aggregation::Sum => |c| c.iter().sum(),
        Aggregation::Mean => |c| c.iter().sum::<f64>() / c.len() as f64,
        Aggregation::Max => |c| c.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Min => |c| c.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Disaggregate => {
            return Err(HydroError::NotImplemented("rainfall disaggregation"));
        }
    };
    if window == 0 {
        return Err(HydroError::invalid("window", "must be at least one sample"));
    }
    Ok(series.chunks(window).map(reduce).collect())
}
