//! Steady-state 1-D groundwater flow.
//!
//! Central differences on interior nodes:
//! ```text
//! (K/dx²) (2 h_i - h_{i-1} - h_{i+1}) = W_i
//! ```
//! with the first and last rows replaced by the boundary conditions.

use serde::{Deserialize, Serialize};

use super::{
    BoundaryCondition, Side, apply_boundary_row, grid_spacing, nodal_discharge, resolve_sources,
};
use crate::error::Result;
use crate::linalg::{GaussianElimination, LinearSolver, LinearSystem, Matrix};

/// Inputs for a steady-state solve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SteadyGroundwaterConfig {
    /// Domain length L
    pub length: f64,
    /// Hydraulic conductivity K (length/time)
    pub conductivity: f64,
    /// Number of grid nodes, including both ends
    pub n_nodes: usize,
    /// Condition at x = 0
    pub left: BoundaryCondition,
    /// Condition at x = L
    pub right: BoundaryCondition,
    /// Per-node injection (+) or extraction (-) rate; zeros when absent
    #[serde(default)]
    pub sources: Option<Vec<f64>>,
}

impl SteadyGroundwaterConfig {
    /// Create a config with no sources.
    pub fn new(
        length: f64,
        conductivity: f64,
        n_nodes: usize,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Self {
        Self {
            length,
            conductivity,
            n_nodes,
            left,
            right,
            sources: None,
        }
    }

    /// Set per-node sources.
    pub fn with_sources(mut self, sources: Vec<f64>) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// Head profile and derived discharge.
#[derive(Clone, Debug)]
pub struct SteadyGroundwaterSolution {
    /// Hydraulic head at each node
    pub heads: Vec<f64>,
    /// Darcy flux in the +x direction at each node
    pub discharge: Vec<f64>,
    /// Grid spacing used
    pub dx: f64,
}

/// Solve the steady problem with the default pivoting solver.
pub fn solve_steady(config: &SteadyGroundwaterConfig) -> Result<SteadyGroundwaterSolution> {
    solve_steady_with(config, &GaussianElimination::default())
}

/// Solve the steady problem with a caller-chosen linear solver.
///
/// Two flux boundaries leave the head undetermined up to a constant; the
/// solver then reports a singular matrix.
pub fn solve_steady_with<S: LinearSolver + ?Sized>(
    config: &SteadyGroundwaterConfig,
    solver: &S,
) -> Result<SteadyGroundwaterSolution> {
    let n = config.n_nodes;
    let k = config.conductivity;
    let dx = grid_spacing(config.length, k, n)?;
    let sources = resolve_sources(config.sources.as_deref(), n)?;

    let coeff = k / (dx * dx);
    let mut a = Matrix::zeros(n, n);
    let mut b = vec![0.0; n];

    for i in 1..n - 1 {
        a.set(i, i - 1, -coeff);
        a.set(i, i, 2.0 * coeff);
        a.set(i, i + 1, -coeff);
        b[i] = sources[i];
    }
    b[0] = apply_boundary_row(&mut a, Side::Left, config.left, k, dx);
    b[n - 1] = apply_boundary_row(&mut a, Side::Right, config.right, k, dx);

    tracing::debug!(n_nodes = n, dx, solver = solver.name(), "solving steady groundwater");

    let heads = solver.solve(LinearSystem::new(a, b)?)?;
    let discharge = nodal_discharge(&heads, k, dx);

    Ok(SteadyGroundwaterSolution {
        heads,
        discharge,
        dx,
    })
}
