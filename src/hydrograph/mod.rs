//! Unit hydrograph synthesis.
//!
//! This module provides:
//! - Empirical time parameters (time of concentration, time to peak, lag)
//!   from the SCS, Kirpich and Kerby equations
//! - Dimensionless hydrograph families (Gamma, Log-Pearson III, Weibull)
//! - Unit hydrograph construction, either by scaling a dimensionless curve
//!   or by normalizing an observed storm hydrograph
//!
//! # Example
//!
//! ```
//! use hydro_rs::hydrograph::{
//!     DimensionlessConfig, HydrographDistribution, PeakRateFactor, dimensionless_hydrograph,
//! };
//!
//! let config = DimensionlessConfig::new(
//!     0.1,
//!     5.0,
//!     HydrographDistribution::Gamma { peak_rate_factor: PeakRateFactor::Prf484 },
//! );
//! let uh = dimensionless_hydrograph(&config).unwrap();
//! let (t_peak, q_peak) = uh.peak();
//! assert!((t_peak - 1.0).abs() < 1e-9);
//! assert!((q_peak - 1.0).abs() < 1e-9);
//! ```

mod construction;
mod dimensionless;
mod synthetic;

pub use construction::{
    UnitHydrographConfig, UnitHydrographMethod, UnitHydrographResult, unit_hydrograph,
};
pub use dimensionless::{
    DimensionlessConfig, DistributionKind, HydrographDistribution, PeakRateFactor,
    dimensionless_hydrograph,
};
pub use synthetic::{SyntheticConfig, TcMethod, TimeParameters, synthetic_time_parameters};

pub(crate) use synthetic::curve_number;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Discharge response to one unit of excess rainfall.
///
/// Stored as parallel time and discharge vectors. For dimensionless curves
/// these are t/tp and q/qp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitHydrograph {
    /// Time ordinates
    pub time: Vec<f64>,
    /// Discharge ordinates
    pub discharge: Vec<f64>,
}

impl UnitHydrograph {
    /// Create a unit hydrograph from parallel vectors.
    pub fn new(time: Vec<f64>, discharge: Vec<f64>) -> Result<Self> {
        if time.len() != discharge.len() {
            return Err(ValidationError::LengthMismatch {
                what: "unit hydrograph ordinates",
                expected: time.len(),
                actual: discharge.len(),
            }
            .into());
        }
        Ok(Self { time, discharge })
    }

    /// Number of ordinates.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if the hydrograph has no ordinates.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Discharge ordinates, as used by convolution.
    pub fn ordinates(&self) -> &[f64] {
        &self.discharge
    }

    /// (time, discharge) at the largest discharge.
    ///
    /// Returns (0, 0) for an empty hydrograph.
    pub fn peak(&self) -> (f64, f64) {
        self.time
            .iter()
            .zip(&self.discharge)
            .fold((0.0, 0.0), |best, (&t, &q)| if q > best.1 { (t, q) } else { best })
    }

    /// Area under the curve by the trapezoidal rule.
    pub fn area(&self) -> f64 {
        self.time
            .windows(2)
            .zip(self.discharge.windows(2))
            .map(|(t, q)| 0.5 * (q[0] + q[1]) * (t[1] - t[0]))
            .sum()
    }

    /// Scale a dimensionless curve by time to peak and peak discharge.
    pub fn scaled(&self, time_to_peak: f64, peak_discharge: f64) -> Self {
        Self {
            time: self.time.iter().map(|t| t * time_to_peak).collect(),
            discharge: self.discharge.iter().map(|q| q * peak_discharge).collect(),
        }
    }
}

/// Sample times 0, Δt, 2Δt, ... up to and including `duration`.
fn sample_times(time_step: f64, duration: f64) -> Result<Vec<f64>> {
    crate::error::require_positive("time_step", time_step)?;
    crate::error::require_non_negative("duration", duration)?;
    let n = (duration / time_step + 1e-9).floor() as usize + 1;
    Ok((0..n).map(|i| i as f64 * time_step).collect())
}
