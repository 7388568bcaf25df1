//! End-to-end checks of the design pipeline through the public API.

use approx::assert_relative_eq;

use pave_core::calculations::capacity::{Layer, LayerPosition};
use pave_core::equations::aashto;
use pave_core::solver::{SolverConfig, SolverMethod};
use pave_core::{run_design, resolve_zr, solve_for_sn, DesignInputs, DesignSettings, PavementSection};

fn adequate_section() -> PavementSection {
    PavementSection {
        surface: Layer::surface(0.44, 5.0),
        base: Layer::granular(0.14, 10.0, 1.0),
        subbase: Layer::granular(0.11, 12.0, 1.0),
    }
}

#[test]
fn reference_scenario_round_trips() {
    let inputs = DesignInputs::default();
    let result = solve_for_sn(&inputs, &DesignSettings::default()).unwrap();
    assert!(result.converged);

    let sn = result.structural_number.unwrap();
    assert!(sn > 4.45 && sn < 4.65, "SN = {}", sn);

    let w18 = aashto::evaluate(sn, resolve_zr(95.0).unwrap(), 0.45, 2.0, 7500.0).unwrap();
    assert_relative_eq!(w18 / 1.0e6, 5.0, max_relative = 0.01);
}

#[test]
fn newton_matches_bisection_in_fewer_iterations() {
    let inputs = DesignInputs::default();
    let bisection = solve_for_sn(&inputs, &DesignSettings::default()).unwrap();
    let newton = solve_for_sn(
        &inputs,
        &DesignSettings {
            solver: SolverConfig::default().with_method(SolverMethod::Newton),
            ..DesignSettings::default()
        },
    )
    .unwrap();

    assert!(newton.converged);
    assert_relative_eq!(
        newton.structural_number.unwrap(),
        bisection.structural_number.unwrap(),
        epsilon = 0.02
    );
    assert!(newton.iterations_used < bisection.iterations_used);
}

#[test]
fn default_section_provides_3_32_and_fails() {
    let report = run_design(
        &DesignInputs::default(),
        &PavementSection::default(),
        &DesignSettings::default(),
    )
    .unwrap();

    assert_relative_eq!(report.capacity.provided_sn, 3.32, epsilon = 1e-9);
    assert!(!report.capacity.adequate);
    assert!(report.capacity.margin < 0.0);

    let positions: Vec<LayerPosition> = report.capacity.contributions.iter().map(|c| c.position).collect();
    assert_eq!(positions, LayerPosition::ALL.to_vec());
    let total: f64 = report.capacity.contributions.iter().map(|c| c.percentage).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);
}

#[test]
fn heavier_traffic_needs_more_structure() {
    let settings = DesignSettings::default();
    let mut previous = 0.0;
    for w18_millions in [0.5, 2.0, 10.0, 50.0] {
        let inputs = DesignInputs { w18_millions, ..DesignInputs::default() };
        let report = run_design(&inputs, &adequate_section(), &settings).unwrap();
        assert!(report.required_sn > previous);
        previous = report.required_sn;
    }
}

#[test]
fn report_serializes_to_json() {
    let report = run_design(&DesignInputs::default(), &adequate_section(), &DesignSettings::default()).unwrap();
    assert!(report.passes());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["solver"]["status"], "Converged");
    assert_eq!(json["capacity"]["adequate"], true);
    assert_eq!(json["capacity"]["contributions"].as_array().unwrap().len(), 3);
}

#[test]
fn zero_serviceability_loss_is_rejected() {
    let err = aashto::evaluate(4.0, -1.645, 0.45, 0.0, 7500.0).unwrap_err();
    assert_eq!(err.error_code(), "DOMAIN_ERROR");

    let inputs = DesignInputs {
        initial_serviceability: 2.5,
        terminal_serviceability: 2.5,
        ..DesignInputs::default()
    };
    let err = run_design(&inputs, &adequate_section(), &DesignSettings::default()).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn error_serializes_with_type_tag() {
    let inputs = DesignInputs {
        reliability_pct: 101.0,
        ..DesignInputs::default()
    };
    let err = run_design(&inputs, &adequate_section(), &DesignSettings::default()).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["type"], "InvalidInput");
}
