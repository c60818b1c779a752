//! Loading operation configs from JSON.
//!
//! Selectors deserialize from the same strings their `FromStr` impls accept.

use hydro_rs::groundwater::{BoundaryKind, SteadyGroundwaterConfig, solve_steady};
use hydro_rs::hydrograph::{
    DimensionlessConfig, HydrographDistribution, PeakRateFactor, SyntheticConfig, TcMethod,
    dimensionless_hydrograph, synthetic_time_parameters,
};
use hydro_rs::routing::{FloodHydrographConfig, FloodMethodKind, RoutingParameters, route};
use hydro_rs::{OutputOrder, UnitSystem};

#[test]
fn test_synthetic_config_from_json() {
    let json = r#"{
        "method": "SCS",
        "units": "si",
        "length": 4000.0,
        "slope": 0.02,
        "curve_number": 80.0
    }"#;
    let config: SyntheticConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.method, TcMethod::Scs);
    assert_eq!(config.units, UnitSystem::Customary);
    assert!(config.roughness.is_none());

    let params = synthetic_time_parameters(&config).unwrap();
    assert!((params.max_retention.unwrap() - 2.5).abs() < 1e-12);
}

#[test]
fn test_unknown_unit_system_rejected() {
    let json = r#"{"method": "kirpich", "units": "imperial", "length": 1.0, "slope": 0.1}"#;
    assert!(serde_json::from_str::<SyntheticConfig>(json).is_err());
    assert!("imperial".parse::<UnitSystem>().is_err());
}

#[test]
fn test_dimensionless_config_from_json() {
    let json = r#"{
        "time_step": 0.1,
        "duration": 4.0,
        "distribution": { "type": "gamma", "peak_rate_factor": 238 }
    }"#;
    let config: DimensionlessConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.distribution,
        HydrographDistribution::Gamma {
            peak_rate_factor: PeakRateFactor::Prf238
        }
    );
    let uh = dimensionless_hydrograph(&config).unwrap();
    assert!((uh.peak().1 - 1.0).abs() < 1e-9);

    let bad = json.replace("238", "300");
    assert!(serde_json::from_str::<DimensionlessConfig>(&bad).is_err());
}

#[test]
fn test_routing_parameters_from_json() {
    let json = r#"{ "method": "muskingum-cunge", "k": 0.4, "x": 0.2, "dt": 1.0 }"#;
    let params: RoutingParameters = serde_json::from_str(json).unwrap();
    let RoutingParameters::MuskingumCunge(mc) = &params else {
        panic!("expected Muskingum-Cunge parameters");
    };
    assert_eq!(mc.initial_storage, 0.0);
    assert_eq!(route(&[1.0, 2.0], &params).unwrap().outflow().len(), 2);

    let json = r#"{ "method": "lag-and-route", "lag_time": 1.0, "coefficients": [0.5, 0.5] }"#;
    let params: RoutingParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.method().to_string(), "lag-and-route");
}

#[test]
fn test_flood_config_from_json() {
    let json = r#"{
        "method": "obs",
        "rainfall": { "values": [1.0, 0.5] },
        "unit_hydrograph": [0.0, 2.0, 1.0],
        "baseflow": 1.0
    }"#;
    let config: FloodHydrographConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.method.kind(), FloodMethodKind::Observed);
    let flood = hydro_rs::routing::flood_hydrograph(&config).unwrap();
    assert_eq!(flood, vec![1.0, 3.0, 3.0, 1.5]);
}

#[test]
fn test_groundwater_config_round_trip() {
    let json = r#"{
        "length": 100.0,
        "conductivity": 10.0,
        "n_nodes": 11,
        "left": { "value": 10.0, "kind": "head" },
        "right": { "value": 5.0, "kind": "head" }
    }"#;
    let config: SteadyGroundwaterConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.left.kind, BoundaryKind::Head);
    assert!(config.sources.is_none());

    let encoded = serde_json::to_string(&config).unwrap();
    let decoded: SteadyGroundwaterConfig = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, config);

    let heads = solve_steady(&config).unwrap().heads;
    assert!((heads[5] - 7.5).abs() < 1e-9);
}

#[test]
fn test_output_order_names() {
    let order: OutputOrder = serde_json::from_str(r#""chronological""#).unwrap();
    assert_eq!(order, OutputOrder::Chronological);
    assert_eq!(serde_json::to_string(&OutputOrder::default()).unwrap(), r#""reversed""#);
}
