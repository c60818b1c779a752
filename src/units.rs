//! Unit systems accepted by the empirical hydrologic formulas.
//!
//! The empirical equations (SCS retention, Kirpich, Kerby, peak discharge)
//! carry unit-dependent constants, so every formula that uses them takes an
//! explicit [`UnitSystem`]. Parsing is strict: anything other than `si` or `m`
//! is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Feet per meter.
pub const FT_PER_M: f64 = 3.280_839_895;
/// Centimeters per inch.
pub const CM_PER_IN: f64 = 2.54;
/// Square feet per square mile.
pub const FT2_PER_MI2: f64 = 27_878_400.0;
/// Square meters per square kilometer.
pub const M2_PER_KM2: f64 = 1.0e6;
/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Unit system for lengths, depths and areas.
///
/// | System | Length | Depth | Area | Discharge |
/// |--------|--------|-------|------|-----------|
/// | `si`   | ft     | in    | mi²  | ft³/s     |
/// | `m`    | m      | cm    | km²  | m³/s      |
///
/// `si` follows the historical naming of the customary-unit branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Feet, inches, square miles.
    #[serde(rename = "si")]
    Customary,
    /// Meters, centimeters, square kilometers.
    #[serde(rename = "m")]
    Metric,
}

impl UnitSystem {
    /// Maximum potential retention S for a curve number, in inches or cm.
    pub fn max_retention(self, curve_number: f64) -> f64 {
        match self {
            Self::Customary => 1000.0 / curve_number - 10.0,
            Self::Metric => 2540.0 / curve_number - 25.4,
        }
    }

    /// Convert a length in this system to feet.
    pub fn length_to_feet(self, length: f64) -> f64 {
        match self {
            Self::Customary => length,
            Self::Metric => length * FT_PER_M,
        }
    }

    /// Convert a depth in this system to inches.
    pub fn depth_to_inches(self, depth: f64) -> f64 {
        match self {
            Self::Customary => depth,
            Self::Metric => depth / CM_PER_IN,
        }
    }

    /// Area in this system's area unit, expressed in the squared length unit
    /// used for volumes (ft² or m²).
    pub fn area_to_volume_base(self, area: f64) -> f64 {
        match self {
            Self::Customary => area * FT2_PER_MI2,
            Self::Metric => area * M2_PER_KM2,
        }
    }

    /// Number of depth units per length unit (12 in/ft or 100 cm/m).
    pub fn depth_units_per_length(self) -> f64 {
        match self {
            Self::Customary => 12.0,
            Self::Metric => 100.0,
        }
    }

    /// Canonical string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customary => "si",
            Self::Metric => "m",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "si" => Ok(Self::Customary),
            "m" => Ok(Self::Metric),
            other => Err(ValidationError::UnknownUnitSystem(other.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_parse_known_systems() {
        assert_eq!("si".parse::<UnitSystem>().unwrap(), UnitSystem::Customary);
        assert_eq!("m".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        for bad in ["SI", "metric", "", "ft", "M"] {
            let err = bad.parse::<UnitSystem>().unwrap_err();
            assert_eq!(err, ValidationError::UnknownUnitSystem(bad.to_string()));
        }
    }

    #[test]
    fn test_max_retention_consistent_across_systems() {
        let s_in = UnitSystem::Customary.max_retention(80.0);
        let s_cm = UnitSystem::Metric.max_retention(80.0);
        assert!((s_in - 2.5).abs() < TOL);
        assert!((s_cm - s_in * CM_PER_IN).abs() < 1e-9);
    }

    #[test]
    fn test_display_roundtrip() {
        for units in [UnitSystem::Customary, UnitSystem::Metric] {
            assert_eq!(units.to_string().parse::<UnitSystem>().unwrap(), units);
        }
    }
}
