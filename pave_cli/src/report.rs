//! Plain-text report output.

use pave_core::calculations::capacity::LayerPosition;
use pave_core::calculations::{DesignReport, PavementSection};
use pave_core::equations::registry::Equation;
use pave_core::materials::LayerMaterial;

const BANNER: &str = "═══════════════════════════════════════";

pub fn print_design(report: &DesignReport, section: &PavementSection) {
    let inputs = &report.inputs;
    let solver = &report.solver;
    let capacity = &report.capacity;

    println!("{}", BANNER);
    println!("  AASHTO 1993 FLEXIBLE PAVEMENT DESIGN");
    println!("{}", BANNER);
    println!();
    println!("Input:");
    println!("  W18:         {:.2} M ESALs", inputs.w18_millions);
    println!("  Reliability: {:.1}% (ZR = {:.3})", inputs.reliability_pct, report.zr);
    println!("  So:          {:.2}", inputs.standard_deviation);
    println!(
        "  pi / pt:     {:.1} / {:.1} (ΔPSI = {:.2})",
        inputs.initial_serviceability, inputs.terminal_serviceability, report.delta_psi
    );
    println!("  MR:          {:.0} psi", inputs.subgrade_modulus_psi);
    println!();
    println!("Required SN:");
    println!(
        "  Solver:      {} ({}, {} iterations) {}",
        solver.method,
        solver.status,
        solver.iterations_used,
        status_icon(solver.converged)
    );
    println!("  SN_req = {:.2}", report.required_sn);
    println!(
        "  W18 at SN_req = {:.3} M ESALs ({:+.2}% of target)",
        report.verification_w18_millions,
        report.verification_error() * 100.0
    );
    println!();
    println!("Section:");
    for ((position, layer), contribution) in section.layers().iter().zip(&capacity.contributions) {
        println!(
            "  {:<8} a{i} = {:.2}  D{i} = {:>5.1} in  m{i} = {:.2}  → {:.2} ({:.1}%)",
            position.display_name(),
            layer.coefficient,
            layer.thickness_in,
            layer.drainage_factor,
            contribution.contribution,
            contribution.percentage,
            i = position.index()
        );
    }
    println!("  Total thickness: {:.1} in", section.total_thickness_in());
    println!(
        "  SN_prov = {:.2} vs SN_req = {:.2} (margin {:+.2}) {}",
        capacity.provided_sn,
        capacity.required_sn,
        capacity.margin,
        status_icon(capacity.adequate)
    );
    println!();
    println!("{}", BANNER);
    println!(
        "  RESULT: {} (unity {:.2})",
        if report.passes() { "PASS" } else { "FAIL" },
        capacity.unity()
    );
    println!("{}", BANNER);
}

pub fn print_coefficients() {
    println!("Typical Layer Coefficients (AASHTO 1993)");
    for position in LayerPosition::ALL {
        println!();
        println!("{}:", position.display_name());
        for material in LayerMaterial::for_position(position) {
            let range = material.typical_range();
            println!("  {:<20} {}  (midpoint {:.3})", material.display_name(), range, range.midpoint());
        }
    }
}

pub fn print_equations() {
    for equation in Equation::ALL {
        let meta = equation.metadata();
        println!("{}", meta.name);
        println!("  {}", meta.formula);
        println!("  Reference: {}", meta.reference.citation());
        for var in &meta.variables {
            if var.units.is_empty() {
                println!("    {:<10} {}", var.symbol, var.description);
            } else {
                println!("    {:<10} {} ({})", var.symbol, var.description, var.units);
            }
        }
        println!();
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
