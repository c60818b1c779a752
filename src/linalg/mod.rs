//! Direct linear-system solvers.
//!
//! The groundwater solvers assemble a [`LinearSystem`] and hand it to any
//! [`LinearSolver`]. Two are provided:
//! - [`GaussianElimination`]: dense, partial pivoting, O(n³)
//! - [`ThomasSolver`]: tridiagonal only, no pivoting, O(n)
//!
//! Both report a near-zero pivot as [`HydroError::SingularMatrix`] instead of
//! dividing through it.
//!
//! # Example
//!
//! ```
//! use hydro_rs::linalg::{GaussianElimination, LinearSolver, LinearSystem, Matrix};
//!
//! let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let system = LinearSystem::new(a, vec![3.0, 5.0]).unwrap();
//! let x = GaussianElimination::default().solve(system).unwrap();
//! assert!((x[0] - 0.8).abs() < 1e-12);
//! assert!((x[1] - 1.4).abs() < 1e-12);
//! ```
//!
//! [`HydroError::SingularMatrix`]: crate::error::HydroError::SingularMatrix

mod gaussian;
mod matrix;
mod tridiagonal;

pub use gaussian::{DEFAULT_PIVOT_TOLERANCE, GaussianElimination};
pub use matrix::{LinearSystem, Matrix};
pub use tridiagonal::ThomasSolver;

use crate::error::Result;

/// A direct solver for square linear systems.
///
/// Implementations take ownership of the system and may overwrite it.
pub trait LinearSolver {
    /// Solve `A x = b`, returning `x`.
    fn solve(&self, system: LinearSystem) -> Result<Vec<f64>>;

    /// Short identifier used in log events.
    fn name(&self) -> &'static str;
}

/// Solve with the default partial-pivoting solver.
pub fn solve_linear_system(system: LinearSystem) -> Result<Vec<f64>> {
    GaussianElimination::default().solve(system)
}
