//! # Flexible Pavement Design Check
//!
//! Runs the full AASHTO 1993 flexible pavement check in one call:
//!
//! 1. Validate inputs and resolve ZR from the reliability level
//! 2. Solve the design equation for the required SN
//! 3. Verify the solution by re-evaluating W18 at the solved SN
//! 4. Compare the section's provided SN with the required SN
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::capacity::PavementSection;
//! use pave_core::calculations::design::run_design;
//! use pave_core::calculations::structural_number::DesignInputs;
//! use pave_core::settings::DesignSettings;
//!
//! let report = run_design(
//!     &DesignInputs::default(),
//!     &PavementSection::default(),
//!     &DesignSettings::default(),
//! )
//! .unwrap();
//!
//! println!("Required SN {:.2}, provided {:.2}", report.required_sn, report.capacity.provided_sn);
//! assert!(!report.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::reliability::AASHTO_RELIABILITY;
use crate::settings::DesignSettings;

use super::capacity::{check_capacity, CapacityResult, PavementSection};
use super::structural_number::{solve, DesignInputs, SolverResult};

/// Complete design check output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    /// Inputs the report was computed from
    pub inputs: DesignInputs,

    /// Standard normal deviate used
    pub zr: f64,

    /// Serviceability loss pi − pt
    pub delta_psi: f64,

    /// Raw solver outcome
    pub solver: SolverResult,

    /// Required structural number fed to the capacity check
    pub required_sn: f64,

    /// W18 re-evaluated at the required SN (millions of ESALs)
    pub verification_w18_millions: f64,

    /// Section capacity check
    pub capacity: CapacityResult,
}

impl DesignReport {
    /// True when the solve converged and the section is adequate
    pub fn passes(&self) -> bool {
        self.solver.converged && self.capacity.adequate
    }

    /// Relative difference between verification traffic and design traffic
    pub fn verification_error(&self) -> f64 {
        (self.verification_w18_millions - self.inputs.w18_millions) / self.inputs.w18_millions
    }
}

/// Run the complete design check.
///
/// # Errors
///
/// * `InvalidInput` for invalid design inputs, settings or layers
/// * `DomainError` if the equation cannot be evaluated
/// * `NoRootInBracket` if no SN in the bracket carries the design traffic
/// * `NotConverged` if the solver hit its cap and best-effort is not accepted
/// * `DivisionByZero` if the section provides no structural number
pub fn run_design(
    inputs: &DesignInputs,
    section: &PavementSection,
    settings: &DesignSettings,
) -> CalcResult<DesignReport> {
    inputs.validate()?;
    settings.validate()?;
    section.validate()?;

    let zr = AASHTO_RELIABILITY.resolve(inputs.reliability_pct, settings.reliability_policy)?;
    let delta_psi = inputs.delta_psi();

    let solver = solve(
        inputs.w18_millions,
        zr,
        inputs.standard_deviation,
        delta_psi,
        inputs.subgrade_modulus_psi,
        &settings.solver,
    )?;
    let required_sn = solver.required_sn(settings.accept_best_effort)?;

    let verification_w18_millions = solver.predicted_w18_millions().ok_or_else(|| {
        CalcError::invalid_input(
            "structural_number",
            required_sn.to_string(),
            "Solver returned a structural number without a predicted W18",
        )
    })?;

    if !solver.converged {
        log::warn!(
            "Using best-effort SN {:.3} after {} iterations",
            required_sn,
            solver.iterations_used
        );
    }

    let capacity = check_capacity(required_sn, section)?;

    Ok(DesignReport {
        inputs: *inputs,
        zr,
        delta_psi,
        solver,
        required_sn,
        verification_w18_millions,
        capacity,
    })
}
