//! Unit hydrograph construction.
//!
//! Two branches:
//! - **Dimensionless**: scale a (t/tp, q/qp) curve by the basin's time to
//!   peak and peak discharge, qp = PRF A / tp (customary) or
//!   qp = (2.08/484) PRF A / tp (metric).
//! - **Observed**: subtract baseflow from a storm hydrograph, integrate the
//!   direct runoff to a volume, convert to a runoff depth over the basin and
//!   divide the direct runoff by that depth.

use serde::{Deserialize, Serialize};

use super::UnitHydrograph;
use crate::error::{HydroError, Result, ValidationError, require_non_negative, require_positive};
use crate::series::{OutputOrder, Series};
use crate::units::{SECONDS_PER_HOUR, UnitSystem};

/// Metric peak discharge coefficient (m³/s per km² per cm) for PRF 484.
const METRIC_PRF_484: f64 = 2.08;

/// How the unit hydrograph is obtained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UnitHydrographMethod {
    /// Scale a dimensionless curve
    #[serde(rename = "dim")]
    Dimensionless {
        /// (t/tp, q/qp) ordinates
        curve: UnitHydrograph,
        /// Peak rate factor used for qp
        peak_rate_factor: f64,
        /// Drainage area (mi² or km²)
        area: f64,
        /// Time to peak, hours
        time_to_peak: f64,
    },
    /// Normalize an observed storm hydrograph
    #[serde(rename = "obs")]
    Observed {
        /// Observed discharge (ft³/s or m³/s)
        hydrograph: Series,
        /// Constant baseflow to remove
        #[serde(default)]
        baseflow: f64,
        /// Drainage area (mi² or km²)
        area: f64,
        /// Uniform step in hours, used when the series has no timestamps
        #[serde(default)]
        time_step: Option<f64>,
        /// Order of the returned ordinates
        #[serde(default)]
        order: OutputOrder,
    },
}

/// Inputs for [`unit_hydrograph`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitHydrographConfig {
    /// Unit system for areas and discharges
    pub units: UnitSystem,
    /// Construction branch
    pub method: UnitHydrographMethod,
}

/// Constructed unit hydrograph with the quantities used to normalize it.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitHydrographResult {
    /// Unit hydrograph (time in hours)
    pub unit_hydrograph: UnitHydrograph,
    /// Direct runoff volume (ft³ or m³), observed branch only
    pub total_volume: Option<f64>,
    /// Direct runoff depth (in or cm), observed branch only
    pub runoff_depth: Option<f64>,
}

/// Build a unit hydrograph.
pub fn unit_hydrograph(config: &UnitHydrographConfig) -> Result<UnitHydrographResult> {
    match &config.method {
        UnitHydrographMethod::Dimensionless {
            curve,
            peak_rate_factor,
            area,
            time_to_peak,
        } => {
            let qp = peak_discharge(config.units, *peak_rate_factor, *area, *time_to_peak)?;
            Ok(UnitHydrographResult {
                unit_hydrograph: curve.scaled(*time_to_peak, qp),
                total_volume: None,
                runoff_depth: None,
            })
        }
        UnitHydrographMethod::Observed {
            hydrograph,
            baseflow,
            area,
            time_step,
            order,
        } => observed(config.units, hydrograph, *baseflow, *area, *time_step, *order),
    }
}

/// Peak discharge of the unit hydrograph.
pub(crate) fn peak_discharge(
    units: UnitSystem,
    peak_rate_factor: f64,
    area: f64,
    time_to_peak: f64,
) -> Result<f64> {
    require_positive("peak_rate_factor", peak_rate_factor)?;
    require_positive("area", area)?;
    require_positive("time_to_peak", time_to_peak)?;
    Ok(match units {
        UnitSystem::Customary => peak_rate_factor * area / time_to_peak,
        UnitSystem::Metric => METRIC_PRF_484 / 484.0 * peak_rate_factor * area / time_to_peak,
    })
}

fn observed(
    units: UnitSystem,
    hydrograph: &Series,
    baseflow: f64,
    area: f64,
    time_step: Option<f64>,
    order: OutputOrder,
) -> Result<UnitHydrographResult> {
    require_non_negative("baseflow", baseflow)?;
    require_positive("area", area)?;
    let n = hydrograph.len();
    if n < 2 {
        return Err(ValidationError::invalid(
            "hydrograph",
            format!("need at least 2 samples, got {n}"),
        )
        .into());
    }

    let steps = match (hydrograph.step_hours(), time_step) {
        (Some(steps), _) => steps,
        (None, Some(dt)) => vec![require_positive("time_step", dt)?; n - 1],
        (None, None) => {
            return Err(HydroError::invalid(
                "time_step",
                "required when the hydrograph has no timestamps",
            ));
        }
    };

    let mut clipped = 0usize;
    let direct: Vec<f64> = hydrograph
        .values
        .iter()
        .map(|&q| {
            let dr = q - baseflow;
            if dr < 0.0 {
                clipped += 1;
                0.0
            } else {
                dr
            }
        })
        .collect();
    if clipped > 0 {
        tracing::warn!(clipped, baseflow, "direct runoff below baseflow clipped to zero");
    }

    let volume: f64 = direct
        .windows(2)
        .zip(&steps)
        .map(|(q, dt)| 0.5 * (q[0] + q[1]) * dt * SECONDS_PER_HOUR)
        .sum();
    let depth = volume / units.area_to_volume_base(area) * units.depth_units_per_length();
    if !(depth > 0.0) {
        return Err(HydroError::invalid(
            "hydrograph",
            "no direct runoff above baseflow, cannot normalize",
        ));
    }

    let mut time = Vec::with_capacity(n);
    let mut elapsed = 0.0;
    time.push(elapsed);
    for dt in &steps {
        elapsed += dt;
        time.push(elapsed);
    }
    let discharge = direct.iter().map(|q| q / depth).collect();

    Ok(UnitHydrographResult {
        unit_hydrograph: UnitHydrograph {
            time: order.arrange(time),
            discharge: order.arrange(discharge),
        },
        total_volume: Some(volume),
        runoff_depth: Some(depth),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn observed_config(values: Vec<f64>, baseflow: f64, order: OutputOrder) -> UnitHydrographConfig {
        UnitHydrographConfig {
            units: UnitSystem::Metric,
            method: UnitHydrographMethod::Observed {
                hydrograph: Series::new(values),
                baseflow,
                area: 3.6,
                time_step: Some(1.0),
                order,
            },
        }
    }

    #[test]
    fn test_dimensionless_scaling() {
        let curve = UnitHydrograph::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.2]).unwrap();
        let config = UnitHydrographConfig {
            units: UnitSystem::Customary,
            method: UnitHydrographMethod::Dimensionless {
                curve,
                peak_rate_factor: 484.0,
                area: 2.0,
                time_to_peak: 4.0,
            },
        };
        let result = unit_hydrograph(&config).unwrap();
        let uh = result.unit_hydrograph;
        assert_eq!(uh.time, vec![0.0, 4.0, 8.0]);
        assert!((uh.discharge[1] - 242.0).abs() < TOL);
        assert!((uh.discharge[2] - 48.4).abs() < TOL);
        assert!(result.total_volume.is_none());
    }

    #[test]
    fn test_metric_peak_discharge() {
        let qp = peak_discharge(UnitSystem::Metric, 484.0, 10.0, 2.0).unwrap();
        assert!((qp - 10.4).abs() < TOL);
        assert!(peak_discharge(UnitSystem::Metric, 484.0, 0.0, 2.0).is_err());
    }

    #[test]
    fn test_observed_normalizes_to_unit_depth() {
        // 3.6 km², triangle of 10 m³/s peak over 2 hours -> 36000 m³ -> 1 cm
        let config = observed_config(vec![2.0, 12.0, 2.0], 2.0, OutputOrder::Chronological);
        let result = unit_hydrograph(&config).unwrap();

        assert!((result.total_volume.unwrap() - 36_000.0).abs() < 1e-6);
        assert!((result.runoff_depth.unwrap() - 1.0).abs() < TOL);
        let uh = result.unit_hydrograph;
        assert_eq!(uh.time, vec![0.0, 1.0, 2.0]);
        assert!((uh.discharge[1] - 10.0).abs() < TOL);
    }

    #[test]
    fn test_observed_default_order_is_reversed() {
        let chrono = unit_hydrograph(&observed_config(
            vec![1.0, 5.0, 3.0, 1.0],
            1.0,
            OutputOrder::Chronological,
        ))
        .unwrap();
        let reversed =
            unit_hydrograph(&observed_config(vec![1.0, 5.0, 3.0, 1.0], 1.0, OutputOrder::default()))
                .unwrap();

        let mut expected = chrono.unit_hydrograph.discharge.clone();
        expected.reverse();
        assert_eq!(reversed.unit_hydrograph.discharge, expected);
        assert_eq!(reversed.unit_hydrograph.time[0], 3.0);
    }

    #[test]
    fn test_observed_all_baseflow_rejected() {
        let config = observed_config(vec![2.0, 2.0, 1.0], 2.0, OutputOrder::Chronological);
        assert!(unit_hydrograph(&config).unwrap_err().is_validation());
    }

    #[test]
    fn test_observed_requires_time_step() {
        let config = UnitHydrographConfig {
            units: UnitSystem::Customary,
            method: UnitHydrographMethod::Observed {
                hydrograph: Series::new(vec![0.0, 5.0, 0.0]),
                baseflow: 0.0,
                area: 1.0,
                time_step: None,
                order: OutputOrder::Chronological,
            },
        };
        assert!(unit_hydrograph(&config).is_err());
    }
}
