//! Darcy's law for a single flow path.

use crate::error::{HydroError, Result, require_positive};

/// Specific discharge q = -K (h_down - h_up) / L.
///
/// Positive when flow goes from `head_up` towards `head_down`.
pub fn darcy_flux(conductivity: f64, head_up: f64, head_down: f64, length: f64) -> Result<f64> {
    require_positive("conductivity", conductivity)?;
    require_positive("length", length)?;
    Ok(-conductivity * (head_down - head_up) / length)
}

/// Average linear (seepage) velocity v = q / n_e.
pub fn seepage_velocity(flux: f64, effective_porosity: f64) -> Result<f64> {
    if !(effective_porosity > 0.0 && effective_porosity <= 1.0) {
        return Err(HydroError::invalid(
            "effective_porosity",
            format!("must lie in (0, 1], got {effective_porosity}"),
        ));
    }
    Ok(flux / effective_porosity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_direction() {
        let q = darcy_flux(10.0, 12.0, 10.0, 100.0).unwrap();
        assert!((q - 0.2).abs() < 1e-12);
        let back = darcy_flux(10.0, 10.0, 12.0, 100.0).unwrap();
        assert!((back + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_seepage_velocity() {
        assert!((seepage_velocity(0.2, 0.25).unwrap() - 0.8).abs() < 1e-12);
        assert!(seepage_velocity(0.2, 0.0).is_err());
        assert!(seepage_velocity(0.2, 1.5).is_err());
    }

    #[test]
    fn test_rejects_zero_length() {
        assert!(darcy_flux(1.0, 1.0, 0.0, 0.0).is_err());
    }
}
