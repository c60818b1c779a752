//! Integration tests for the 1-D groundwater solvers.
//!
//! Verifies symmetry of the steady solution, agreement between the dense and
//! tridiagonal linear solvers, and that transient Crank-Nicolson marching
//! relaxes to the steady profile.

use approx::assert_relative_eq;
use hydro_rs::groundwater::{
    BoundaryCondition, SteadyGroundwaterConfig, TransientGroundwaterConfig, solve_steady,
    solve_steady_with, solve_transient, solve_transient_with,
};
use hydro_rs::linalg::{GaussianElimination, ThomasSolver};
use hydro_rs::{HydroError, darcy_flux};

const TOL: f64 = 1e-6;

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[test]
fn test_steady_symmetric_recharge_mound() {
    let n = 21;
    let config = SteadyGroundwaterConfig::new(
        200.0,
        5.0,
        n,
        BoundaryCondition::head(10.0),
        BoundaryCondition::head(10.0),
    )
    .with_sources(vec![0.01; n]);
    let solution = solve_steady(&config).unwrap();

    for i in 0..n {
        let mirror = solution.heads[n - 1 - i];
        assert!(
            (solution.heads[i] - mirror).abs() < TOL,
            "head {i} = {} but mirror = {mirror}",
            solution.heads[i]
        );
    }
    // Recharge mounds the water table above the boundary heads
    let mid = solution.heads[n / 2];
    assert!(mid > 10.0, "mid head = {mid}");
    // Discharge is antisymmetric about the divide
    assert!(solution.discharge[n / 2].abs() < TOL);
    assert!(solution.discharge[0] < 0.0 && solution.discharge[n - 1] > 0.0);
}

#[test]
fn test_steady_linear_profile_matches_darcy() {
    let config = SteadyGroundwaterConfig::new(
        50.0,
        2.0,
        11,
        BoundaryCondition::head(8.0),
        BoundaryCondition::head(3.0),
    );
    let solution = solve_steady(&config).unwrap();
    let q = darcy_flux(2.0, 8.0, 3.0, 50.0).unwrap();
    for (i, &flux) in solution.discharge.iter().enumerate() {
        assert!((flux - q).abs() < TOL, "node {i}: flux {flux} vs Darcy {q}");
    }
}

#[test]
fn test_dense_and_tridiagonal_agree() {
    let n = 31;
    let sources: Vec<f64> = (0..n).map(|i| 0.002 * (i as f64 * 0.3).sin()).collect();
    let config = SteadyGroundwaterConfig::new(
        300.0,
        12.0,
        n,
        BoundaryCondition::head(20.0),
        BoundaryCondition::flux(0.05),
    )
    .with_sources(sources);

    let dense = solve_steady_with(&config, &GaussianElimination::default()).unwrap();
    let banded = solve_steady_with(&config, &ThomasSolver::default()).unwrap();
    for (d, t) in dense.heads.iter().zip(&banded.heads) {
        assert_relative_eq!(*d, *t, epsilon = 1e-9);
    }
}

#[test]
fn test_transient_relaxes_to_steady() {
    let left = BoundaryCondition::head(5.0);
    let right = BoundaryCondition::head(2.0);
    let steady = solve_steady(&SteadyGroundwaterConfig::new(100.0, 10.0, 11, left, right)).unwrap();

    let config = TransientGroundwaterConfig::new(100.0, 10.0, 0.1, 11, 1.0, 300.0, left, right)
        .with_initial_heads(vec![3.0; 11]);
    let transient = solve_transient(&config).unwrap();

    assert_eq!(transient.n_steps, 300);
    assert!((transient.final_time - 300.0).abs() < 1e-9);
    let diff = max_abs_diff(&transient.heads, &steady.heads);
    assert!(diff < TOL, "transient differs from steady by {diff}");
}

#[test]
fn test_transient_history_and_solver_choice() {
    let config = TransientGroundwaterConfig::new(
        40.0,
        1.0,
        0.2,
        9,
        0.5,
        5.0,
        BoundaryCondition::head(1.0),
        BoundaryCondition::flux(0.0),
    )
    .with_initial_heads(vec![0.0; 9])
    .with_history();

    let dense = solve_transient(&config).unwrap();
    let banded = solve_transient_with(&config, &ThomasSolver::default()).unwrap();

    assert_eq!(dense.history.len(), dense.n_steps + 1);
    assert_eq!(dense.boundary_fluxes.len(), dense.n_steps);
    assert!(max_abs_diff(&dense.heads, &banded.heads) < 1e-9);
    // Water enters through the fixed-head end and raises interior heads
    assert!(dense.heads[1] > 0.0 && dense.heads[1] < 1.0);
}

#[test]
fn test_transient_no_flow_ends_relax_to_mean() {
    let n = 11;
    let initial: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let config = TransientGroundwaterConfig::new(
        100.0,
        10.0,
        0.1,
        n,
        1.0,
        2000.0,
        BoundaryCondition::flux(0.0),
        BoundaryCondition::flux(0.0),
    )
    .with_initial_heads(initial);

    let dense = solve_transient(&config).unwrap();
    let banded = solve_transient_with(&config, &ThomasSolver::default()).unwrap();
    for h in &dense.heads {
        assert_relative_eq!(*h, 5.0, epsilon = 1e-4);
    }
    assert!(max_abs_diff(&dense.heads, &banded.heads) < 1e-9);
}

#[test]
fn test_two_flux_boundaries_are_singular() {
    let config = SteadyGroundwaterConfig::new(
        10.0,
        1.0,
        5,
        BoundaryCondition::flux(0.0),
        BoundaryCondition::flux(0.0),
    );
    let err = solve_steady(&config).unwrap_err();
    assert!(matches!(err, HydroError::SingularMatrix { .. }), "got {err}");
}
