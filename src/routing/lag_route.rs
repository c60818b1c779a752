//! Lag-and-Route channel routing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{HydroError, Result};

/// Reach parameters for Lag-and-Route routing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LagAndRouteParams {
    /// Lag time, in routing steps
    pub lag_time: f64,
    /// Routing coefficients applied to the current and previous inflows
    pub coefficients: Vec<f64>,
}

impl LagAndRouteParams {
    /// Create Lag-and-Route parameters.
    pub fn new(lag_time: f64, coefficients: Vec<f64>) -> Self {
        Self {
            lag_time,
            coefficients,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(HydroError::invalid("coefficients", "at least one is required"));
        }
        if !self.lag_time.is_finite() || self.lag_time <= -1.0 {
            return Err(HydroError::invalid(
                "lag_time",
                format!("must be finite and greater than -1, got {}", self.lag_time),
            ));
        }
        Ok(())
    }
}

/// Outflow of a Lag-and-Route pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LagAndRouteResult {
    /// Outflow, one value per inflow sample
    pub outflow: Vec<f64>,
    /// Delay buffer after the last step, most recent first
    pub delay_buffer: Vec<f64>,
}

/// Route an inflow series through one reach.
///
/// `O[i] = Σ_j c[j] I[i - j] / (1 + lag)` over the terms with `i - j >= 0`.
/// The delay buffer keeps the last `coefficients.len()` values of `I - O`.
pub fn lag_and_route(inflow: &[f64], params: &LagAndRouteParams) -> Result<LagAndRouteResult> {
    params.validate()?;
    let n_coeffs = params.coefficients.len();
    let scale = 1.0 + params.lag_time;

    let mut buffer: VecDeque<f64> = VecDeque::from(vec![0.0; n_coeffs]);
    let mut outflow = Vec::with_capacity(inflow.len());

    for i in 0..inflow.len() {
        let weighted: f64 = params
            .coefficients
            .iter()
            .take(i + 1)
            .enumerate()
            .map(|(j, c)| c * inflow[i - j])
            .sum();
        let q_out = weighted / scale;

        buffer.pop_back();
        buffer.push_front(inflow[i] - q_out);
        outflow.push(q_out);
    }
    tracing::debug!(steps = inflow.len(), n_coeffs, "lag-and-route routed");

    Ok(LagAndRouteResult {
        outflow,
        delay_buffer: buffer.into(),
    })
}
