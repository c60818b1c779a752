//! Areal rainfall averaging over a set of gauges.

use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result, ValidationError};
use crate::series::pad_to_common_length;

/// Station rainfall and optional Thiessen polygon areas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArealRainfall {
    /// One series per station, sharing a time step
    pub stations: Vec<Vec<f64>>,
    /// Thiessen polygon area of each station
    #[serde(default)]
    pub areas: Vec<f64>,
}

impl ArealRainfall {
    /// Create from station series without areas.
    pub fn new(stations: Vec<Vec<f64>>) -> Self {
        Self {
            stations,
            areas: Vec::new(),
        }
    }

    /// Set the polygon areas.
    pub fn with_areas(mut self, areas: Vec<f64>) -> Self {
        self.areas = areas;
        self
    }

    /// Arithmetic mean over stations. See [`arithmetic_mean`].
    pub fn arithmetic_mean(&self) -> Result<Vec<f64>> {
        arithmetic_mean(&self.stations)
    }

    /// Thiessen weighted mean. See [`thiessen`].
    pub fn thiessen(&self) -> Result<Vec<f64>> {
        thiessen(&self.stations, &self.areas)
    }
}

/// Mean of all stations at each time step.
///
/// Every station must report the same number of samples.
pub fn arithmetic_mean(stations: &[Vec<f64>]) -> Result<Vec<f64>> {
    let Some(first) = stations.first() else {
        return Err(HydroError::invalid("stations", "at least one station is required"));
    };
    let n = first.len();
    if let Some(bad) = stations.iter().find(|s| s.len() != n) {
        return Err(ValidationError::LengthMismatch {
            what: "station series",
            expected: n,
            actual: bad.len(),
        }
        .into());
    }

    let m = stations.len() as f64;
    Ok((0..n)
        .map(|j| stations.iter().map(|s| s[j]).sum::<f64>() / m)
        .collect())
}

/// Area-weighted mean of all stations at each time step.
///
/// Series shorter than the longest are treated as zero past their end.
/// When the total area is zero every output holds the previous value
/// (zero at the first step).
pub fn thiessen(stations: &[Vec<f64>], areas: &[f64]) -> Result<Vec<f64>> {
    if stations.is_empty() {
        return Err(HydroError::invalid("stations", "at least one station is required"));
    }
    if areas.len() != stations.len() {
        return Err(ValidationError::LengthMismatch {
            what: "Thiessen areas",
            expected: stations.len(),
            actual: areas.len(),
        }
        .into());
    }
    for (index, &a) in areas.iter().enumerate() {
        if !a.is_finite() {
            return Err(ValidationError::NonNumericArea { index }.into());
        }
        if a < 0.0 {
            return Err(HydroError::invalid(
                "areas",
                format!("area at index {index} is negative ({a})"),
            ));
        }
    }

    let total: f64 = areas.iter().sum();
    let padded = pad_to_common_length(stations);
    let n = padded.first().map_or(0, Vec::len);

    if total == 0.0 {
        tracing::warn!(stations = stations.len(), "total Thiessen area is zero");
        return Ok(vec![0.0; n]);
    }

    Ok((0..n)
        .map(|j| {
            padded
                .iter()
                .zip(areas)
                .map(|(s, a)| s[j] * a)
                .sum::<f64>()
                / total
        })
        .collect())
}
