//! # hydro-rs
//!
//! Numerical hydrology routines for rainfall-runoff and groundwater analysis.
//!
//! This crate provides:
//! - Dense and tridiagonal direct linear solvers
//! - 1-D groundwater flow (steady and Crank-Nicolson transient)
//! - Unit hydrograph synthesis (SCS, Kirpich, Kerby time parameters;
//!   Gamma, Log-Pearson III and Weibull dimensionless curves)
//! - Flood hydrographs by convolution, Muskingum-Cunge and Lag-and-Route
//!   channel routing
//! - Areal rainfall averaging (arithmetic, Thiessen) and temporal aggregation
//! - Horton and Green-Ampt infiltration
//!
//! Every routine validates its inputs before computing and returns
//! [`HydroError`] on failure. Diagnostics are emitted through `tracing`; no
//! subscriber is installed by the library.

pub mod error;
pub mod groundwater;
pub mod hydrograph;
pub mod infiltration;
pub mod linalg;
pub mod precipitation;
pub mod routing;
pub mod series;
pub mod units;

// Re-export main types for convenience
pub use error::{HydroError, Result, ValidationError};
pub use series::{OutputOrder, Series, numeric_array};
pub use units::UnitSystem;

// Linear algebra
pub use linalg::{
    GaussianElimination, LinearSolver, LinearSystem, Matrix, ThomasSolver, solve_linear_system,
};

// Groundwater
pub use groundwater::{
    BoundaryCondition, BoundaryKind, SteadyGroundwaterConfig, SteadyGroundwaterSolution,
    TransientGroundwaterConfig, TransientGroundwaterSolution, darcy_flux, solve_steady,
    solve_transient,
};

// Surface water
pub use hydrograph::{
    DimensionlessConfig, HydrographDistribution, PeakRateFactor, SyntheticConfig, TcMethod,
    TimeParameters, UnitHydrograph, UnitHydrographConfig, UnitHydrographMethod,
    UnitHydrographResult, dimensionless_hydrograph, synthetic_time_parameters, unit_hydrograph,
};
pub use routing::{
    FloodHydrographConfig, FloodHydrographMethod, LagAndRouteParams, MuskingumCungeParams,
    ObservedRunoffConfig, RoutingMethod, RoutingParameters, RoutingResult, ScsRunoffConfig,
    flood_hydrograph, route,
};
pub use precipitation::{Aggregation, aggregate, arithmetic_mean, thiessen};
pub use infiltration::{GreenAmpt, Horton};
