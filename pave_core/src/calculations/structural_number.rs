//! # Required Structural Number
//!
//! Inverts the AASHTO 1993 flexible pavement design equation: given design
//! traffic, reliability, serviceability loss and subgrade modulus, find the
//! structural number whose predicted W18 matches the design traffic.
//!
//! For ΔPSI ≥ [`MONOTONE_MIN_DELTA_PSI`] the predicted W18 increases
//! monotonically with SN over the default bracket [0.1, 15.0], so the root
//! is found by a bracketed search (see [`crate::solver`]). Below that the
//! serviceability term dips around SN 3 to 3.5 and the bracketed root is
//! not necessarily the smallest SN; such solves log a warning. A solve has
//! three outcomes and callers must tell them apart:
//!
//! - `Converged` - predicted W18 within `tolerance × target`
//! - `MaxIterationsReached` - best-effort SN, `converged == false`
//! - `NoRootInBracket` - no SN in the bracket carries the traffic
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::structural_number::{solve_for_sn, DesignInputs};
//! use pave_core::settings::DesignSettings;
//!
//! let inputs = DesignInputs {
//!     w18_millions: 5.0,
//!     reliability_pct: 95.0,
//!     standard_deviation: 0.45,
//!     initial_serviceability: 4.5,
//!     terminal_serviceability: 2.5,
//!     subgrade_modulus_psi: 7500.0,
//! };
//!
//! let result = solve_for_sn(&inputs, &DesignSettings::default()).unwrap();
//! assert!(result.converged);
//! println!("Required SN = {:.2}", result.structural_number.unwrap());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::aashto::{self, MONOTONE_MIN_DELTA_PSI};
use crate::errors::{CalcError, CalcResult};
use crate::reliability::AASHTO_RELIABILITY;
use crate::settings::DesignSettings;
use crate::solver::{self, MonotoneProblem, SolverConfig, SolverMethod, Status};
use crate::units::{Esals, MillionEsals};

/// Design inputs for the flexible pavement equation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "w18_millions": 5.0,
///   "reliability_pct": 95.0,
///   "standard_deviation": 0.45,
///   "initial_serviceability": 4.5,
///   "terminal_serviceability": 2.5,
///   "subgrade_modulus_psi": 7500.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignInputs {
    /// Design traffic W18 in millions of 18-kip ESALs
    pub w18_millions: f64,

    /// Reliability level R (%), 50 to 99.9
    pub reliability_pct: f64,

    /// Overall standard deviation So (0.30 to 0.50, typically 0.45 for flexible)
    pub standard_deviation: f64,

    /// Initial serviceability index pi
    pub initial_serviceability: f64,

    /// Terminal serviceability index pt (must be below pi)
    pub terminal_serviceability: f64,

    /// Effective subgrade resilient modulus MR (psi)
    pub subgrade_modulus_psi: f64,
}

impl Default for DesignInputs {
    fn default() -> Self {
        Self {
            w18_millions: 5.0,
            reliability_pct: 95.0,
            standard_deviation: 0.45,
            initial_serviceability: 4.5,
            terminal_serviceability: 2.5,
            subgrade_modulus_psi: 7500.0,
        }
    }
}

impl DesignInputs {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.w18_millions.is_finite() || self.w18_millions <= 0.0 {
            return Err(CalcError::invalid_input(
                "w18_millions",
                self.w18_millions.to_string(),
                "Design traffic must be positive",
            ));
        }
        if !(50.0..=99.9).contains(&self.reliability_pct) {
            return Err(CalcError::invalid_input(
                "reliability_pct",
                self.reliability_pct.to_string(),
                "Reliability must be between 50% and 99.9%",
            ));
        }
        if !(0.30..=0.50).contains(&self.standard_deviation) {
            return Err(CalcError::invalid_input(
                "standard_deviation",
                self.standard_deviation.to_string(),
                "Standard deviation must be between 0.30 and 0.50",
            ));
        }
        if !(1.5..=5.0).contains(&self.initial_serviceability) {
            return Err(CalcError::invalid_input(
                "initial_serviceability",
                self.initial_serviceability.to_string(),
                "Initial serviceability must be between 1.5 and 5.0",
            ));
        }
        if !(1.5..=5.0).contains(&self.terminal_serviceability) {
            return Err(CalcError::invalid_input(
                "terminal_serviceability",
                self.terminal_serviceability.to_string(),
                "Terminal serviceability must be between 1.5 and 5.0",
            ));
        }
        if self.terminal_serviceability >= self.initial_serviceability {
            return Err(CalcError::invalid_input(
                "terminal_serviceability",
                self.terminal_serviceability.to_string(),
                format!(
                    "Terminal serviceability must be below initial serviceability ({})",
                    self.initial_serviceability
                ),
            ));
        }
        if !self.subgrade_modulus_psi.is_finite() || self.subgrade_modulus_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "subgrade_modulus_psi",
                self.subgrade_modulus_psi.to_string(),
                "Resilient modulus must be positive",
            ));
        }
        Ok(())
    }

    /// Serviceability loss ΔPSI = pi − pt
    pub fn delta_psi(&self) -> f64 {
        self.initial_serviceability - self.terminal_serviceability
    }

    /// Design traffic in raw ESALs
    pub fn target_esals(&self) -> Esals {
        MillionEsals(self.w18_millions).into()
    }
}

/// Result of a structural number solve.
///
/// ## JSON Example
///
/// ```json
/// {
///   "structural_number": 4.5380,
///   "status": "Converged",
///   "converged": true,
///   "iterations_used": 10,
///   "method": "Bisection",
///   "target_w18": 5000000.0,
///   "predicted_w18": 5028425.9
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Required SN; `None` when no root exists in the bracket
    pub structural_number: Option<f64>,

    /// Terminal solver state
    pub status: Status,

    /// True only for `Status::Converged`
    pub converged: bool,

    /// Interior evaluations performed
    pub iterations_used: usize,

    /// Strategy that produced the result
    pub method: SolverMethod,

    /// Design traffic (ESALs)
    pub target_w18: f64,

    /// Predicted W18 (ESALs) at `structural_number`
    pub predicted_w18: Option<f64>,

    /// Search bracket `[low, high]` on SN
    pub bracket: [f64; 2],

    /// Predicted W18 (ESALs) at the bracket ends
    pub bracket_w18: [f64; 2],
}

impl SolverResult {
    /// Required SN for downstream checks.
    ///
    /// # Errors
    ///
    /// * `NoRootInBracket` if the solve found no bracketed root
    /// * `NotConverged` if the iteration cap was hit and best-effort values
    ///   are not accepted
    pub fn required_sn(&self, accept_best_effort: bool) -> CalcResult<f64> {
        match (self.status, self.structural_number) {
            (Status::Converged, Some(sn)) => Ok(sn),
            (Status::MaxIterationsReached, Some(sn)) if accept_best_effort => Ok(sn),
            (Status::MaxIterationsReached, Some(sn)) => Err(CalcError::NotConverged {
                iterations: self.iterations_used,
                best_sn: sn,
            }),
            _ => Err(CalcError::NoRootInBracket {
                low_sn: self.bracket[0],
                high_sn: self.bracket[1],
                w18_low: self.bracket_w18[0],
                w18_high: self.bracket_w18[1],
                target_w18: self.target_w18,
            }),
        }
    }

    /// Predicted traffic at the solution, in millions of ESALs
    pub fn predicted_w18_millions(&self) -> Option<f64> {
        self.predicted_w18
            .map(|w| MillionEsals::from(Esals(w)).value())
    }
}

/// The W18(SN) − target residual for one set of design parameters.
#[derive(Debug, Clone, Copy)]
struct SnProblem {
    zr: f64,
    so: f64,
    delta_psi: f64,
    mr: f64,
    target: Esals,
    tolerance: f64,
}

impl SnProblem {
    fn predicted(&self, sn: f64) -> CalcResult<Esals> {
        aashto::evaluate(sn, self.zr, self.so, self.delta_psi, self.mr).map(Esals)
    }
}

impl MonotoneProblem for SnProblem {
    fn residual(&self, sn: f64) -> CalcResult<f64> {
        Ok((self.predicted(sn)? - self.target).value())
    }

    fn is_converged(&self, residual: f64) -> bool {
        residual.abs() < (self.target * self.tolerance).value()
    }

    fn newton_step(&self, sn: f64, _residual: f64) -> CalcResult<Option<f64>> {
        // Newton on log10(W18) - log10(target); far better conditioned than
        // the raw residual, which spans ten orders of magnitude
        let log_residual =
            aashto::log10_w18(sn, self.zr, self.so, self.delta_psi, self.mr)? - self.target.value().log10();
        let slope = aashto::dlog10_w18_dsn(sn, self.delta_psi)?;
        Ok((slope > 0.0).then(|| sn - log_residual / slope))
    }
}

/// Solve for the structural number from raw design parameters.
///
/// # Arguments
///
/// * `target_w18_millions` - Design traffic (millions of ESALs)
/// * `zr` - Standard normal deviate
/// * `so` - Overall standard deviation
/// * `delta_psi` - Serviceability loss
/// * `mr` - Subgrade resilient modulus (psi)
/// * `config` - Method, tolerance, iteration cap and bracket
///
/// # Errors
///
/// * `InvalidInput` for a non-positive target or invalid config
/// * `DomainError` if the equation cannot be evaluated (e.g. ΔPSI ≤ 0)
pub fn solve(
    target_w18_millions: f64,
    zr: f64,
    so: f64,
    delta_psi: f64,
    mr: f64,
    config: &SolverConfig,
) -> CalcResult<SolverResult> {
    if !target_w18_millions.is_finite() || target_w18_millions <= 0.0 {
        return Err(CalcError::invalid_input(
            "w18_millions",
            target_w18_millions.to_string(),
            "Design traffic must be positive",
        ));
    }

    if delta_psi < MONOTONE_MIN_DELTA_PSI {
        log::warn!(
            "ΔPSI {} is below {}; W18(SN) is not monotone and the SN found may not be the smallest",
            delta_psi,
            MONOTONE_MIN_DELTA_PSI
        );
    }

    let problem = SnProblem {
        zr,
        so,
        delta_psi,
        mr,
        target: MillionEsals(target_w18_millions).into(),
        tolerance: config.tolerance(),
    };

    log::debug!(
        "Solving SN: W18 = {} M, ZR = {}, So = {}, ΔPSI = {}, MR = {}",
        target_w18_millions,
        zr,
        so,
        delta_psi,
        mr
    );

    let solution = solver::solve(&problem, config)?;
    let predicted_w18 = match solution.x {
        Some(sn) => Some(problem.predicted(sn)?.value()),
        None => None,
    };

    Ok(SolverResult {
        structural_number: solution.x,
        status: solution.status,
        converged: solution.status == Status::Converged,
        iterations_used: solution.iterations,
        method: config.method(),
        target_w18: problem.target.value(),
        predicted_w18,
        bracket: config.bracket(),
        bracket_w18: solution.endpoint_residuals.map(|r| (Esals(r) + problem.target).value()),
    })
}

/// Solve for the required structural number from validated design inputs.
///
/// Inputs are validated and ZR resolved (per the settings' reliability
/// policy) before any equation evaluation.
///
/// # Errors
///
/// * `InvalidInput` if the inputs or reliability level are rejected
/// * `DomainError` if the equation cannot be evaluated
pub fn solve_for_sn(inputs: &DesignInputs, settings: &DesignSettings) -> CalcResult<SolverResult> {
    inputs.validate()?;
    let zr = AASHTO_RELIABILITY.resolve(inputs.reliability_pct, settings.reliability_policy)?;
    solve(
        inputs.w18_millions,
        zr,
        inputs.standard_deviation,
        inputs.delta_psi(),
        inputs.subgrade_modulus_psi,
        &settings.solver,
    )
}
