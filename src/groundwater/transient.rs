//! Transient 1-D groundwater flow with Crank-Nicolson time stepping.
//!
//! Averaging the explicit and implicit diffusion operators gives, for each
//! interior node and r = K/dx²:
//! ```text
//! (S/Δt + r) h_i^{n+1} - (r/2)(h_{i-1} + h_{i+1})^{n+1}
//!     = (S/Δt - r) h_i^n + (r/2)(h_{i-1} + h_{i+1})^n + W_i
//! ```
//! The scheme is unconditionally stable but oscillates for large grid Fourier
//! numbers KΔt/(S dx²); choosing Δt is left to the caller.

use serde::{Deserialize, Serialize};

use super::{BoundaryCondition, Side, apply_boundary_row, grid_spacing, resolve_sources};
use crate::error::{Result, ValidationError, require_non_negative, require_positive};
use crate::linalg::{GaussianElimination, LinearSolver, LinearSystem, Matrix};

/// Inputs for a transient run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransientGroundwaterConfig {
    /// Domain length L
    pub length: f64,
    /// Hydraulic conductivity K (length/time)
    pub conductivity: f64,
    /// Storage coefficient S (specific yield for unconfined aquifers)
    pub storage: f64,
    /// Number of grid nodes, including both ends
    pub n_nodes: usize,
    /// Time step Δt
    pub dt: f64,
    /// Total simulated time T; ⌈T/Δt⌉ steps are taken
    pub total_time: f64,
    /// Head at every node at t = 0
    pub initial_heads: Vec<f64>,
    /// Condition at x = 0
    pub left: BoundaryCondition,
    /// Condition at x = L
    pub right: BoundaryCondition,
    /// Per-node injection (+) or extraction (-) rate; zeros when absent
    #[serde(default)]
    pub sources: Option<Vec<f64>>,
    /// Keep the head field of every step
    #[serde(default)]
    pub record_history: bool,
}

impl TransientGroundwaterConfig {
    /// Create a config with uniform initial head and no sources.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        length: f64,
        conductivity: f64,
        storage: f64,
        n_nodes: usize,
        dt: f64,
        total_time: f64,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Self {
        Self {
            length,
            conductivity,
            storage,
            n_nodes,
            dt,
            total_time,
            initial_heads: vec![0.0; n_nodes],
            left,
            right,
            sources: None,
            record_history: false,
        }
    }

    /// Set the initial head field.
    pub fn with_initial_heads(mut self, heads: Vec<f64>) -> Self {
        self.initial_heads = heads;
        self
    }

    /// Set per-node sources.
    pub fn with_sources(mut self, sources: Vec<f64>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Record every step's heads.
    pub fn with_history(mut self) -> Self {
        self.record_history = true;
        self
    }

    /// Number of steps ⌈T/Δt⌉.
    pub fn n_steps(&self) -> usize {
        (self.total_time / self.dt).ceil() as usize
    }
}

/// Darcy fluxes through the two domain ends, positive in the +x direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundaryFluxes {
    /// -K (h_1 - h_0) / dx
    pub left: f64,
    /// -K (h_{n-1} - h_{n-2}) / dx
    pub right: f64,
}

impl BoundaryFluxes {
    fn from_heads(heads: &[f64], conductivity: f64, dx: f64) -> Self {
        let n = heads.len();
        Self {
            left: -conductivity * (heads[1] - heads[0]) / dx,
            right: -conductivity * (heads[n - 1] - heads[n - 2]) / dx,
        }
    }
}

/// Result of a transient run.
#[derive(Clone, Debug)]
pub struct TransientGroundwaterSolution {
    /// Heads at the final time
    pub heads: Vec<f64>,
    /// Boundary fluxes after the last step
    pub final_fluxes: BoundaryFluxes,
    /// Boundary fluxes after each step (empty unless history was requested)
    pub boundary_fluxes: Vec<BoundaryFluxes>,
    /// Heads after each step, starting with the initial field
    /// (empty unless history was requested)
    pub history: Vec<Vec<f64>>,
    /// Number of steps taken
    pub n_steps: usize,
    /// Simulated time reached, n_steps * Δt
    pub final_time: f64,
}

/// Run the transient problem with the default pivoting solver.
pub fn solve_transient(config: &TransientGroundwaterConfig) -> Result<TransientGroundwaterSolution> {
    solve_transient_with(config, &GaussianElimination::default())
}

/// Run the transient problem with a caller-chosen linear solver.
pub fn solve_transient_with<S: LinearSolver + ?Sized>(
    config: &TransientGroundwaterConfig,
    solver: &S,
) -> Result<TransientGroundwaterSolution> {
    let n = config.n_nodes;
    let k = config.conductivity;
    let dx = grid_spacing(config.length, k, n)?;
    let storage = require_positive("storage", config.storage)?;
    let dt = require_positive("dt", config.dt)?;
    require_non_negative("total_time", config.total_time)?;
    let sources = resolve_sources(config.sources.as_deref(), n)?;
    if config.initial_heads.len() != n {
        return Err(ValidationError::LengthMismatch {
            what: "initial_heads",
            expected: n,
            actual: config.initial_heads.len(),
        }
        .into());
    }

    let n_steps = config.n_steps();
    let r = k / (dx * dx);
    let s_dt = storage / dt;
    tracing::debug!(
        n_nodes = n,
        n_steps,
        fourier = k * dt / (storage * dx * dx),
        solver = solver.name(),
        "starting transient groundwater run"
    );

    let mut heads = config.initial_heads.clone();
    let mut final_fluxes = BoundaryFluxes::from_heads(&heads, k, dx);
    let mut boundary_fluxes = Vec::new();
    let mut history = Vec::new();
    if config.record_history {
        boundary_fluxes.reserve(n_steps);
        history.reserve(n_steps + 1);
        history.push(heads.clone());
    }

    for _ in 0..n_steps {
        let mut a = Matrix::zeros(n, n);
        let mut b = vec![0.0; n];

        for i in 1..n - 1 {
            a.set(i, i - 1, -0.5 * r);
            a.set(i, i, s_dt + r);
            a.set(i, i + 1, -0.5 * r);
            b[i] = (s_dt - r) * heads[i] + 0.5 * r * (heads[i - 1] + heads[i + 1]) + sources[i];
        }
        b[0] = apply_boundary_row(&mut a, Side::Left, config.left, k, dx);
        b[n - 1] = apply_boundary_row(&mut a, Side::Right, config.right, k, dx);

        heads = solver.solve(LinearSystem::new(a, b)?)?;
        final_fluxes = BoundaryFluxes::from_heads(&heads, k, dx);

        if config.record_history {
            boundary_fluxes.push(final_fluxes);
            history.push(heads.clone());
        }
    }

    Ok(TransientGroundwaterSolution {
        heads,
        final_fluxes,
        boundary_fluxes,
        history,
        n_steps,
        final_time: n_steps as f64 * dt,
    })
}
