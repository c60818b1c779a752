//! Infiltration capacity models.
//!
//! - [`Horton`]: exponential decay from an initial to a final rate
//! - [`GreenAmpt`]: sharp wetting front driven by suction and conductivity
//!
//! Rates are depth per hour and times are hours, in whatever depth unit the
//! parameters use.

use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result, require_non_negative, require_positive};

/// Convergence tolerance of the Green-Ampt cumulative depth iteration.
const GREEN_AMPT_TOL: f64 = 1e-8;
/// Iteration cap of the Green-Ampt cumulative depth iteration.
const GREEN_AMPT_MAX_ITER: usize = 100;

/// Horton infiltration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Horton {
    /// Initial rate f0
    pub initial_rate: f64,
    /// Final (saturated) rate fc
    pub final_rate: f64,
    /// Decay constant k, 1/hour
    pub decay: f64,
}

impl Horton {
    /// Validate and create. Requires `f0 >= fc >= 0` and `k > 0`.
    pub fn new(initial_rate: f64, final_rate: f64, decay: f64) -> Result<Self> {
        require_non_negative("final_rate", final_rate)?;
        require_positive("decay", decay)?;
        if !(initial_rate.is_finite() && initial_rate >= final_rate) {
            return Err(HydroError::invalid(
                "initial_rate",
                format!("must be at least the final rate {final_rate}, got {initial_rate}"),
            ));
        }
        Ok(Self {
            initial_rate,
            final_rate,
            decay,
        })
    }

    /// Capacity rate at time `t`.
    pub fn rate(&self, t: f64) -> f64 {
        self.final_rate + (self.initial_rate - self.final_rate) * (-self.decay * t).exp()
    }

    /// Cumulative depth infiltrated by time `t`.
    pub fn cumulative(&self, t: f64) -> f64 {
        self.final_rate * t
            + (self.initial_rate - self.final_rate) * (1.0 - (-self.decay * t).exp()) / self.decay
    }
}

/// Green-Ampt infiltration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GreenAmpt {
    /// Saturated hydraulic conductivity K
    pub conductivity: f64,
    /// Wetting front suction head ψ
    pub suction_head: f64,
    /// Moisture deficit Δθ = θs - θi
    pub moisture_deficit: f64,
}

impl GreenAmpt {
    /// Validate and create. `K` and `ψ` must be positive, `Δθ` in (0, 1].
    pub fn new(conductivity: f64, suction_head: f64, moisture_deficit: f64) -> Result<Self> {
        require_positive("conductivity", conductivity)?;
        require_positive("suction_head", suction_head)?;
        require_positive("moisture_deficit", moisture_deficit)?;
        if moisture_deficit > 1.0 {
            return Err(HydroError::invalid(
                "moisture_deficit",
                format!("must not exceed 1, got {moisture_deficit}"),
            ));
        }
        Ok(Self {
            conductivity,
            suction_head,
            moisture_deficit,
        })
    }

    fn suction_storage(&self) -> f64 {
        self.suction_head * self.moisture_deficit
    }

    /// Capacity rate once `cumulative` depth has infiltrated.
    pub fn rate(&self, cumulative: f64) -> Result<f64> {
        require_positive("cumulative", cumulative)?;
        Ok(self.conductivity * (1.0 + self.suction_storage() / cumulative))
    }

    /// Cumulative depth infiltrated by time `t` under ponded conditions.
    ///
    /// Solves `g(F) = F - K t - ψΔθ ln(1 + F / ψΔθ) = 0` by Newton's method
    /// with `g'(F) = F / (ψΔθ + F)`. `g` is convex and increasing for
    /// `F > 0`, so the iterates stay positive from any positive start.
    pub fn cumulative(&self, t: f64) -> Result<f64> {
        require_non_negative("t", t)?;
        if t == 0.0 {
            return Ok(0.0);
        }
        let psi = self.suction_storage();
        let kt = self.conductivity * t;

        // Early-time asymptote F ≈ sqrt(2 ψΔθ K t) as the starting guess
        let mut f = (2.0 * psi * kt).sqrt().max(kt);
        for iter in 0..GREEN_AMPT_MAX_ITER {
            let g = f - kt - psi * (1.0 + f / psi).ln();
            let slope = f / (psi + f);
            let next = f - g / slope;
            if (next - f).abs() < GREEN_AMPT_TOL * f.max(1.0) {
                tracing::debug!(iter, cumulative = next, "Green-Ampt converged");
                return Ok(next);
            }
            f = next;
        }
        Err(HydroError::NumericalError(format!(
            "Green-Ampt cumulative depth did not converge in {GREEN_AMPT_MAX_ITER} iterations at t = {t}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_horton_limits() {
        let h = Horton::new(3.0, 0.5, 2.0).unwrap();
        assert!((h.rate(0.0) - 3.0).abs() < TOL);
        assert!((h.rate(50.0) - 0.5).abs() < TOL);
        assert_eq!(h.cumulative(0.0), 0.0);
        // F(t) approaches fc t + (f0 - fc) / k
        assert!((h.cumulative(50.0) - (25.0 + 1.25)).abs() < TOL);
    }

    #[test]
    fn test_horton_rejects_inverted_rates() {
        assert!(Horton::new(0.5, 3.0, 2.0).is_err());
        assert!(Horton::new(3.0, 0.5, 0.0).is_err());
    }

    #[test]
    fn test_green_ampt_satisfies_implicit_equation() {
        // Silt loam: K = 0.65 cm/h, psi = 16.7 cm, deficit 0.34
        let ga = GreenAmpt::new(0.65, 16.7, 0.34).unwrap();
        let t = 1.0;
        let f = ga.cumulative(t).unwrap();
        let psi = 16.7 * 0.34;
        let residual = f - 0.65 * t - psi * (1.0 + f / psi).ln();
        assert!(residual.abs() < 1e-6, "residual = {residual}");
        assert!(f > 0.65 * t);
        // Rate exceeds K and decreases as F grows
        let r1 = ga.rate(f).unwrap();
        let r2 = ga.rate(ga.cumulative(5.0).unwrap()).unwrap();
        assert!(r1 > r2 && r2 > 0.65);
    }

    fn residual(ga: &GreenAmpt, t: f64, f: f64) -> f64 {
        let psi = ga.suction_head * ga.moisture_deficit;
        f - ga.conductivity * t - psi * (1.0 + f / psi).ln()
    }

    #[test]
    fn test_green_ampt_early_time_silt_loam() {
        let ga = GreenAmpt::new(0.65, 16.7, 0.34).unwrap();
        for t in [0.01, 0.05] {
            let f = ga.cumulative(t).unwrap();
            assert!(residual(&ga, t, f).abs() < 1e-9, "t = {t}, F = {f}");
            // Close to the sorptivity limit sqrt(2 ψΔθ K t)
            let early = (2.0 * 16.7 * 0.34 * 0.65 * t).sqrt();
            assert!(f > 0.65 * t && f < early * 1.05, "t = {t}, F = {f}");
        }
    }

    #[test]
    fn test_green_ampt_low_conductivity_clay() {
        let ga = GreenAmpt::new(0.03, 31.63, 0.385).unwrap();
        for t in [1.0, 5.0, 100.0] {
            let f = ga.cumulative(t).unwrap();
            assert!(residual(&ga, t, f).abs() < 1e-9, "t = {t}, F = {f}");
            assert!(f > 0.03 * t);
        }
    }

    #[test]
    fn test_green_ampt_zero_time() {
        let ga = GreenAmpt::new(1.0, 10.0, 0.3).unwrap();
        assert_eq!(ga.cumulative(0.0).unwrap(), 0.0);
        assert!(ga.rate(0.0).is_err());
        assert!(GreenAmpt::new(1.0, 10.0, 1.5).is_err());
    }
}
