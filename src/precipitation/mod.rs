//! Rainfall preprocessing.
//!
//! Areal averaging turns per-station series into one basin series, either as
//! a plain arithmetic mean or weighted by Thiessen polygon area. Temporal
//! aggregation coarsens a series to a longer step.

mod aggregation;
mod areal;

pub use aggregation::{Aggregation, aggregate};
pub use areal::{ArealRainfall, arithmetic_mean, thiessen};
