//! Gaussian elimination with partial pivoting.
//!
//! For each pivot column k the row with the largest |A[r][k]|, r >= k, is
//! swapped into position k before the entries below are eliminated:
//! ```text
//! A[i][j] -= (A[i][k] / A[k][k]) * A[k][j]    for i > k, j >= k
//! b[i]    -= (A[i][k] / A[k][k]) * b[k]
//! ```
//! Back substitution then runs from the last row up:
//! ```text
//! x[k] = (b[k] - Σ_{i>k} A[k][i] x[i]) / A[k][k]
//! ```

use super::{LinearSolver, LinearSystem};
use crate::error::{HydroError, Result};

/// Default magnitude below which a pivot is considered zero.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// Dense direct solver using partial pivoting.
#[derive(Clone, Copy, Debug)]
pub struct GaussianElimination {
    /// Pivots with magnitude below this are reported as singular
    pub pivot_tolerance: f64,
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl GaussianElimination {
    /// Create a solver with a custom pivot tolerance.
    pub fn with_tolerance(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }
}

impl LinearSolver for GaussianElimination {
    fn solve(&self, system: LinearSystem) -> Result<Vec<f64>> {
        let (mut a, mut b) = system.into_parts();
        let n = b.len();

        for k in 0..n {
            // Partial pivot: largest magnitude in column k at or below the diagonal
            let mut pivot_row = k;
            let mut pivot_mag = a.get(k, k).abs();
            for r in (k + 1)..n {
                let mag = a.get(r, k).abs();
                if mag > pivot_mag {
                    pivot_row = r;
                    pivot_mag = mag;
                }
            }

            if pivot_mag.is_nan() || pivot_mag < self.pivot_tolerance {
                tracing::warn!(column = k, pivot = pivot_mag, "near-singular pivot");
                return Err(HydroError::SingularMatrix {
                    column: k,
                    pivot: pivot_mag,
                });
            }

            if pivot_row != k {
                a.swap_rows(k, pivot_row);
                b.swap(k, pivot_row);
            }

            let pivot = a.get(k, k);
            for i in (k + 1)..n {
                let factor = a.get(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..n {
                    a.set(i, j, a.get(i, j) - factor * a.get(k, j));
                }
                b[i] -= factor * b[k];
            }
        }

        let mut x = vec![0.0; n];
        for k in (0..n).rev() {
            let mut sum = b[k];
            for i in (k + 1)..n {
                sum -= a.get(k, i) * x[i];
            }
            x[k] = sum / a.get(k, k);
        }

        Ok(x)
    }

    fn name(&self) -> &'static str {
        "gaussian-elimination"
    }
}
