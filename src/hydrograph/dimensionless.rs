//! Dimensionless unit hydrograph families.
//!
//! Each family yields parallel (t/tp, q/qp) ordinates with q/qp = 1 at the
//! peak and the curve starting at the origin.
//!
//! # Gamma
//! ```text
//! q/qp = e^m (t/tp)^m e^(-m t/tp)
//! ```
//! The shape m is tied to the peak rate factor (PRF) through a fixed table;
//! PRF = 484 is the standard NRCS curve.
//!
//! # Log-Pearson III
//! A log-gamma kernel in ln(1 + t):
//! ```text
//! f(t) = ln(1 + t)^(λ-1) (1 + t)^-(1 + 1/β),   1/β = (λ-1)/ln(1 + tpeak) - 1
//! ```
//! The scale is fixed by requiring the maximum at `tpeak`.
//!
//! # Weibull
//! ```text
//! f(t) = z^(α-1) e^(-z^α),   z = (t - t0)/β,  t > t0
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{UnitHydrograph, sample_times};
use crate::error::{HydroError, Result, ValidationError, require_positive};

/// Peak rate factors with a tabulated gamma shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PeakRateFactor {
    /// PRF 101, m = 0.26
    Prf101,
    /// PRF 238, m = 1
    Prf238,
    /// PRF 349, m = 2
    Prf349,
    /// PRF 433, m = 3
    Prf433,
    /// PRF 484, m = 3.7 (standard NRCS)
    Prf484,
    /// PRF 504, m = 4
    Prf504,
    /// PRF 566, m = 5
    Prf566,
}

impl PeakRateFactor {
    /// All tabulated factors, in increasing order.
    pub const ALL: [Self; 7] = [
        Self::Prf101,
        Self::Prf238,
        Self::Prf349,
        Self::Prf433,
        Self::Prf484,
        Self::Prf504,
        Self::Prf566,
    ];

    /// Look up a numeric PRF; values outside the table are rejected.
    pub fn from_value(value: u32) -> Result<Self> {
        Ok(Self::try_from(value)?)
    }

    /// Numeric peak rate factor.
    pub fn value(self) -> u32 {
        match self {
            Self::Prf101 => 101,
            Self::Prf238 => 238,
            Self::Prf349 => 349,
            Self::Prf433 => 433,
            Self::Prf484 => 484,
            Self::Prf504 => 504,
            Self::Prf566 => 566,
        }
    }

    /// Gamma shape parameter m.
    pub fn gamma_shape(self) -> f64 {
        match self {
            Self::Prf101 => 0.26,
            Self::Prf238 => 1.0,
            Self::Prf349 => 2.0,
            Self::Prf433 => 3.0,
            Self::Prf484 => 3.7,
            Self::Prf504 => 4.0,
            Self::Prf566 => 5.0,
        }
    }
}

impl TryFrom<u32> for PeakRateFactor {
    type Error = ValidationError;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|prf| prf.value() == value)
            .ok_or(ValidationError::UnsupportedPeakRateFactor(value))
    }
}

impl From<PeakRateFactor> for u32 {
    fn from(prf: PeakRateFactor) -> u32 {
        prf.value()
    }
}

/// Family names accepted when the distribution is selected by string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistributionKind {
    /// `gamma`
    Gamma,
    /// `lp3` or `log-pearson3`
    LogPearson3,
    /// `weibull`
    Weibull,
}

impl FromStr for DistributionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gamma" => Ok(Self::Gamma),
            "lp3" | "log-pearson3" => Ok(Self::LogPearson3),
            "weibull" => Ok(Self::Weibull),
            other => Err(ValidationError::UnknownMethod {
                kind: "hydrograph distribution",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gamma => "gamma",
            Self::LogPearson3 => "log-pearson3",
            Self::Weibull => "weibull",
        })
    }
}

/// Dimensionless hydrograph family with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HydrographDistribution {
    /// Gamma curve; the time axis is already t/tp
    Gamma { peak_rate_factor: PeakRateFactor },
    /// Log-Pearson III curve with shape λ > 1 peaking at `peak_time`
    #[serde(rename = "log-pearson3")]
    LogPearson3 { shape: f64, peak_time: f64 },
    /// Weibull curve with shape α, scale β and location t0
    Weibull { shape: f64, scale: f64, location: f64 },
}

impl HydrographDistribution {
    /// Family of this distribution.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Gamma { .. } => DistributionKind::Gamma,
            Self::LogPearson3 { .. } => DistributionKind::LogPearson3,
            Self::Weibull { .. } => DistributionKind::Weibull,
        }
    }
}

/// Sampling and family for a dimensionless hydrograph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DimensionlessConfig {
    /// Sampling interval
    pub time_step: f64,
    /// Last sampled time
    pub duration: f64,
    /// Curve family
    pub distribution: HydrographDistribution,
}

impl DimensionlessConfig {
    /// Create a config.
    pub fn new(time_step: f64, duration: f64, distribution: HydrographDistribution) -> Self {
        Self {
            time_step,
            duration,
            distribution,
        }
    }
}

/// Generate (t/tp, q/qp) ordinates.
pub fn dimensionless_hydrograph(config: &DimensionlessConfig) -> Result<UnitHydrograph> {
    let times = sample_times(config.time_step, config.duration)?;
    match config.distribution {
        HydrographDistribution::Gamma { peak_rate_factor } => {
            Ok(gamma(&times, peak_rate_factor.gamma_shape()))
        }
        HydrographDistribution::LogPearson3 { shape, peak_time } => {
            log_pearson3(&times, shape, peak_time)
        }
        HydrographDistribution::Weibull {
            shape,
            scale,
            location,
        } => weibull(&times, shape, scale, location),
    }
}

fn gamma(ttp: &[f64], m: f64) -> UnitHydrograph {
    let discharge = ttp
        .iter()
        .map(|&x| m.exp() * x.powf(m) * (-m * x).exp())
        .collect();
    UnitHydrograph {
        time: ttp.to_vec(),
        discharge,
    }
}

fn log_pearson3(times: &[f64], shape: f64, peak_time: f64) -> Result<UnitHydrograph> {
    require_positive("peak_time", peak_time)?;
    if !(shape > 1.0) {
        return Err(HydroError::invalid(
            "shape",
            format!("log-Pearson III shape must exceed 1, got {shape}"),
        ));
    }
    let inv_beta = (shape - 1.0) / peak_time.ln_1p() - 1.0;
    if !(inv_beta > 0.0) {
        return Err(HydroError::invalid(
            "peak_time",
            format!("shape {shape} cannot place the peak at {peak_time}"),
        ));
    }

    let kernel = |t: f64| t.ln_1p().powf(shape - 1.0) * (1.0 + t).powf(-(1.0 + inv_beta));
    let peak = kernel(peak_time);

    Ok(UnitHydrograph {
        time: times.iter().map(|t| t / peak_time).collect(),
        discharge: times.iter().map(|&t| kernel(t) / peak).collect(),
    })
}

fn weibull(times: &[f64], shape: f64, scale: f64, location: f64) -> Result<UnitHydrograph> {
    require_positive("shape", shape)?;
    require_positive("scale", scale)?;
    if !location.is_finite() {
        return Err(HydroError::invalid("location", "must be finite"));
    }

    let kernel = |t: f64| {
        if t <= location {
            return 0.0;
        }
        let z = (t - location) / scale;
        z.powf(shape - 1.0) * (-z.powf(shape)).exp()
    };

    let raw: Vec<f64> = times.iter().map(|&t| kernel(t)).collect();
    let (mode, peak) = if shape > 1.0 {
        let mode = location + scale * ((shape - 1.0) / shape).powf(1.0 / shape);
        (mode, kernel(mode))
    } else {
        // Density is monotone decreasing past t0: use the sampled maximum
        times
            .iter()
            .zip(&raw)
            .fold((0.0, 0.0), |best, (&t, &q)| if q > best.1 { (t, q) } else { best })
    };

    if !(peak > 0.0) || !(mode > 0.0) {
        return Err(HydroError::invalid(
            "duration",
            "sampled window contains no positive Weibull ordinate",
        ));
    }

    Ok(UnitHydrograph {
        time: times.iter().map(|t| t / mode).collect(),
        discharge: raw.iter().map(|q| q / peak).collect(),
    })
}
