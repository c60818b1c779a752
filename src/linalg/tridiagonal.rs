//! Thomas algorithm for tridiagonal systems.
//!
//! The groundwater matrices only couple each node to its two neighbours, so
//! the band can be solved in O(n) without pivoting.

use super::{LinearSolver, LinearSystem};
use crate::error::{HydroError, Result, ValidationError};
use crate::linalg::gaussian::DEFAULT_PIVOT_TOLERANCE;

/// Tridiagonal solver (no pivoting).
///
/// Rejects matrices with non-zero entries outside the three central bands.
#[derive(Clone, Copy, Debug)]
pub struct ThomasSolver {
    /// Denominators with magnitude below this are reported as singular
    pub pivot_tolerance: f64,
}

impl Default for ThomasSolver {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl LinearSolver for ThomasSolver {
    fn solve(&self, system: LinearSystem) -> Result<Vec<f64>> {
        let n = system.size();
        let a = system.matrix();
        let b = system.rhs();

        for i in 0..n {
            for j in 0..n {
                if i.abs_diff(j) > 1 && a.get(i, j) != 0.0 {
                    return Err(ValidationError::invalid(
                        "matrix",
                        format!("entry ({i}, {j}) lies outside the tridiagonal band"),
                    )
                    .into());
                }
            }
        }

        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        for i in 0..n {
            let lower = if i > 0 { a.get(i, i - 1) } else { 0.0 };
            let upper = if i + 1 < n { a.get(i, i + 1) } else { 0.0 };
            let prev_c = if i > 0 { c_prime[i - 1] } else { 0.0 };
            let prev_d = if i > 0 { d_prime[i - 1] } else { 0.0 };

            let denom = a.get(i, i) - lower * prev_c;
            if denom.is_nan() || denom.abs() < self.pivot_tolerance {
                tracing::warn!(row = i, pivot = denom, "near-zero tridiagonal pivot");
                return Err(HydroError::SingularMatrix {
                    column: i,
                    pivot: denom.abs(),
                });
            }
            c_prime[i] = upper / denom;
            d_prime[i] = (b[i] - lower * prev_d) / denom;
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let next = if i + 1 < n { x[i + 1] } else { 0.0 };
            x[i] = d_prime[i] - c_prime[i] * next;
        }
        Ok(x)
    }

    fn name(&self) -> &'static str {
        "thomas"
    }
}
