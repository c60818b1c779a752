//! One-dimensional groundwater flow.
//!
//! Both solvers discretize the confined-aquifer diffusion equation on a
//! uniform grid of `n_nodes` nodes over `[0, L]`:
//! ```text
//! S ∂h/∂t = K ∂²h/∂x² + W
//! ```
//! where h is hydraulic head, K hydraulic conductivity, S the storage
//! coefficient and W a per-node source (positive = injection/recharge,
//! negative = extraction).
//!
//! - [`solve_steady`]: drops the time derivative and solves once
//! - [`solve_transient`]: Crank-Nicolson time marching, one solve per step
//!
//! Each end of the domain carries a [`BoundaryCondition`], either a fixed head
//! or a prescribed flux. Flux values are positive when water enters the domain.

mod darcy;
mod steady;
mod transient;

pub use darcy::{darcy_flux, seepage_velocity};
pub use steady::{SteadyGroundwaterConfig, SteadyGroundwaterSolution, solve_steady, solve_steady_with};
pub use transient::{
    BoundaryFluxes, TransientGroundwaterConfig, TransientGroundwaterSolution, solve_transient,
    solve_transient_with,
};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError, require_positive};
use crate::linalg::Matrix;

/// Kind of condition imposed at a domain end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Fixed hydraulic head
    Head,
    /// Prescribed flux, positive into the domain
    Flux,
}

/// Condition at one end of the 1-D domain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    /// Head (length) or flux (length²/time per unit width)
    pub value: f64,
    /// Whether `value` is a head or a flux
    pub kind: BoundaryKind,
}

impl BoundaryCondition {
    /// Fixed head.
    pub fn head(value: f64) -> Self {
        Self {
            value,
            kind: BoundaryKind::Head,
        }
    }

    /// Prescribed inflow; zero gives a no-flow boundary.
    pub fn flux(value: f64) -> Self {
        Self {
            value,
            kind: BoundaryKind::Flux,
        }
    }
}

/// Domain end a boundary row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Write the boundary row for `side` into `a`, returning its right-hand side.
///
/// Head rows pin the node; flux rows encode `(K/dx)(h_end - h_inner) = q`.
fn apply_boundary_row(
    a: &mut Matrix,
    side: Side,
    bc: BoundaryCondition,
    conductivity: f64,
    dx: f64,
) -> f64 {
    let n = a.nrows();
    let (end, inner) = match side {
        Side::Left => (0, 1),
        Side::Right => (n - 1, n - 2),
    };
    match bc.kind {
        BoundaryKind::Head => {
            a.set(end, end, 1.0);
            bc.value
        }
        BoundaryKind::Flux => {
            let c = conductivity / dx;
            a.set(end, end, c);
            a.set(end, inner, -c);
            bc.value
        }
    }
}

/// Validate the spatial inputs shared by both solvers and return dx.
fn grid_spacing(length: f64, conductivity: f64, n_nodes: usize) -> Result<f64> {
    require_positive("length", length)?;
    require_positive("conductivity", conductivity)?;
    if n_nodes < 3 {
        return Err(ValidationError::invalid(
            "n_nodes",
            format!("need at least 3 nodes, got {n_nodes}"),
        )
        .into());
    }
    Ok(length / (n_nodes - 1) as f64)
}

/// Per-node sources, defaulting to zero.
fn resolve_sources(sources: Option<&[f64]>, n_nodes: usize) -> Result<Vec<f64>> {
    match sources {
        None => Ok(vec![0.0; n_nodes]),
        Some(s) if s.len() == n_nodes => Ok(s.to_vec()),
        Some(s) => Err(ValidationError::LengthMismatch {
            what: "sources",
            expected: n_nodes,
            actual: s.len(),
        }
        .into()),
    }
}

/// Darcy flux in the +x direction at every node, by central differences
/// (one-sided at the two ends).
fn nodal_discharge(heads: &[f64], conductivity: f64, dx: f64) -> Vec<f64> {
    let n = heads.len();
    (0..n)
        .map(|i| {
            let gradient = if i == 0 {
                (heads[1] - heads[0]) / dx
            } else if i == n - 1 {
                (heads[n - 1] - heads[n - 2]) / dx
            } else {
                (heads[i + 1] - heads[i - 1]) / (2.0 * dx)
            };
            -conductivity * gradient
        })
        .collect()
}
