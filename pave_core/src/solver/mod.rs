//! # Bracketed Root Finding
//!
//! Finds the root of a monotonically increasing residual inside a fixed
//! bracket. Problems describe themselves through [`MonotoneProblem`]; the
//! solver owns the bracket bookkeeping and the outcome classification.
//!
//! ## Outcomes
//!
//! ```text
//! Initialized ──► Iterating ──┬──► Converged
//!      │                      └──► MaxIterationsReached
//!      └──────────────────────────► NoRootInBracket
//! ```
//!
//! A `DomainError` from the problem aborts the solve and is returned as
//! `Err`. The bracket is never widened on the caller's behalf.
//!
//! ## Methods
//!
//! - [`SolverMethod::Bisection`] - evaluate the midpoint, keep the half
//!   with the sign change
//! - [`SolverMethod::Newton`] - take the problem's Newton step when it lands
//!   strictly inside the current bracket, otherwise bisect

mod bracket;
mod config;

pub use bracket::Sign;
pub use config::{
    ConfigError, SolverConfig, SolverMethod, DEFAULT_BRACKET, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

use bracket::Bracket;

/// A scalar root-finding problem with an increasing residual.
///
/// Implementors must only be solved where the residual is increasing over
/// the bracket. If it is not, the solver still returns a bracketed sign
/// change, but not necessarily the smallest root.
pub trait MonotoneProblem {
    /// Signed residual at `x`; negative below the root, positive above.
    ///
    /// # Errors
    ///
    /// Propagates domain errors from the underlying model.
    fn residual(&self, x: f64) -> CalcResult<f64>;

    /// True if `residual` is close enough to zero to accept `x`.
    fn is_converged(&self, residual: f64) -> bool;

    /// Proposed Newton iterate from `x`, or `None` if no step is available
    /// (e.g. a non-positive slope).
    ///
    /// # Errors
    ///
    /// Propagates domain errors from the underlying model.
    fn newton_step(&self, x: f64, residual: f64) -> CalcResult<Option<f64>>;
}

/// Terminal state of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Residual met the tolerance
    Converged,
    /// Iteration cap reached; `x` is the last iterate
    MaxIterationsReached,
    /// Endpoint residuals share a sign; no `x`
    NoRootInBracket,
}

impl Status {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Status::Converged => "Converged",
            Status::MaxIterationsReached => "Max iterations reached",
            Status::NoRootInBracket => "No root in bracket",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of a bracketed solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub status: Status,
    /// Accepted or best-effort root; `None` when no root is bracketed
    pub x: Option<f64>,
    /// Residual at `x`, or at the bracket end closest to zero when `x` is `None`
    pub residual: f64,
    /// Number of interior evaluations performed
    pub iterations: usize,
    /// Residuals at the initial bracket ends
    pub endpoint_residuals: [f64; 2],
}

/// Solve `problem` inside the configured bracket.
///
/// # Errors
///
/// * `InvalidInput` if the config fails validation
/// * Any error returned by the problem's residual or Newton step
pub fn solve<P: MonotoneProblem>(problem: &P, config: &SolverConfig) -> CalcResult<Solution> {
    config.validate()?;

    let [low, high] = config.bracket();
    let residual_low = problem.residual(low)?;
    let residual_high = problem.residual(high)?;
    let endpoint_residuals = [residual_low, residual_high];

    log::debug!(
        "{} solve on [{}, {}]: residuals {:.4e} / {:.4e}",
        config.method(),
        low,
        high,
        residual_low,
        residual_high
    );

    // A bracket end may already satisfy the tolerance
    for (x, residual) in [(low, residual_low), (high, residual_high)] {
        if problem.is_converged(residual) {
            log::debug!("Bracket end {} already within tolerance", x);
            return Ok(Solution {
                status: Status::Converged,
                x: Some(x),
                residual,
                iterations: 0,
                endpoint_residuals,
            });
        }
    }

    let Some(mut bracket) = Bracket::new(low, high, residual_low, residual_high) else {
        log::warn!(
            "No sign change on [{}, {}] (residuals {:.4e} / {:.4e})",
            low,
            high,
            residual_low,
            residual_high
        );
        let residual = if residual_low.abs() <= residual_high.abs() {
            residual_low
        } else {
            residual_high
        };
        return Ok(Solution {
            status: Status::NoRootInBracket,
            x: None,
            residual,
            iterations: 0,
            endpoint_residuals,
        });
    };

    let mut x = bracket.midpoint();
    let mut residual = f64::NAN;

    for iteration in 1..=config.max_iterations() {
        residual = problem.residual(x)?;
        log::trace!(
            "iter {:>3}: x = {:.6}, residual = {:.4e}, width = {:.3e}",
            iteration,
            x,
            residual,
            bracket.width()
        );

        if problem.is_converged(residual) {
            log::debug!("Converged to {:.6} in {} iterations", x, iteration);
            return Ok(Solution {
                status: Status::Converged,
                x: Some(x),
                residual,
                iterations: iteration,
                endpoint_residuals,
            });
        }

        if iteration == config.max_iterations() {
            break;
        }

        bracket.shrink(x, residual);
        x = match config.method() {
            SolverMethod::Bisection => bracket.midpoint(),
            SolverMethod::Newton => problem
                .newton_step(x, residual)?
                .filter(|next| bracket.contains(*next))
                .unwrap_or_else(|| bracket.midpoint()),
        };
    }

    log::warn!(
        "Stopped after {} iterations at x = {:.6} (residual {:.4e})",
        config.max_iterations(),
        x,
        residual
    );
    Ok(Solution {
        status: Status::MaxIterationsReached,
        x: Some(x),
        residual,
        iterations: config.max_iterations(),
        endpoint_residuals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    use crate::errors::CalcError;

    /// Residual x³ − target with an absolute tolerance.
    struct Cube {
        target: f64,
        tol: f64,
    }

    impl MonotoneProblem for Cube {
        fn residual(&self, x: f64) -> CalcResult<f64> {
            Ok(x.powi(3) - self.target)
        }

        fn is_converged(&self, residual: f64) -> bool {
            residual.abs() < self.tol
        }

        fn newton_step(&self, x: f64, residual: f64) -> CalcResult<Option<f64>> {
            let slope = 3.0 * x * x;
            Ok((slope > 0.0).then(|| x - residual / slope))
        }
    }

    /// Fails for any x above a threshold.
    struct Fragile;

    impl MonotoneProblem for Fragile {
        fn residual(&self, x: f64) -> CalcResult<f64> {
            if x > 10.0 {
                return Err(CalcError::domain_error("x", x, "too large"));
            }
            Ok(x - 5.3)
        }

        fn is_converged(&self, residual: f64) -> bool {
            residual.abs() < 1e-9
        }

        fn newton_step(&self, _x: f64, _residual: f64) -> CalcResult<Option<f64>> {
            Ok(None)
        }
    }

    fn config(method: SolverMethod) -> SolverConfig {
        SolverConfig::new(method, 0.01, 100, [0.0, 10.0]).expect("valid config")
    }

    #[test]
    fn bisection_converges() {
        let problem = Cube { target: 27.0, tol: 1e-6 };
        let solution = solve(&problem, &config(SolverMethod::Bisection)).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_abs_diff_eq!(solution.x.unwrap(), 3.0, epsilon = 1e-6);
        assert!(solution.iterations > 10);
    }

    #[test]
    fn newton_converges_faster() {
        let problem = Cube { target: 27.0, tol: 1e-6 };
        let bisection = solve(&problem, &config(SolverMethod::Bisection)).unwrap();
        let newton = solve(&problem, &config(SolverMethod::Newton)).unwrap();

        assert_eq!(newton.status, Status::Converged);
        assert_abs_diff_eq!(newton.x.unwrap(), 3.0, epsilon = 1e-6);
        assert!(newton.iterations < bisection.iterations);
    }

    #[test]
    fn first_bisection_iterate_is_midpoint() {
        let problem = Cube { target: 125.0, tol: 1e-6 };
        let capped = config(SolverMethod::Bisection).with_max_iterations(1).unwrap();
        let solution = solve(&problem, &capped).unwrap();

        // Midpoint of [0, 10] is exactly the root
        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.x, Some(5.0));
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn max_iterations_returns_last_iterate() {
        let problem = Cube { target: 27.0, tol: 1e-12 };
        let capped = config(SolverMethod::Bisection).with_max_iterations(3).unwrap();
        let solution = solve(&problem, &capped).unwrap();

        // Iterates: 5.0 (high), 2.5 (low), 3.75
        assert_eq!(solution.status, Status::MaxIterationsReached);
        assert_eq!(solution.iterations, 3);
        assert_eq!(solution.x, Some(3.75));
    }

    #[test]
    fn no_sign_change_reports_no_root() {
        let problem = Cube { target: 5000.0, tol: 1e-6 };
        let solution = solve(&problem, &config(SolverMethod::Bisection)).unwrap();

        assert_eq!(solution.status, Status::NoRootInBracket);
        assert!(solution.x.is_none());
        assert_eq!(solution.iterations, 0);
        assert_abs_diff_eq!(solution.residual, 1000.0 - 5000.0);
    }

    #[test]
    fn endpoint_within_tolerance_is_accepted() {
        let problem = Cube { target: 1000.0, tol: 1e-6 };
        let solution = solve(&problem, &config(SolverMethod::Newton)).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(solution.x, Some(10.0));
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn domain_error_aborts() {
        let wide = config(SolverMethod::Bisection).with_bracket([0.0, 20.0]).unwrap();
        let err = solve(&Fragile, &wide).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn newton_without_step_falls_back_to_bisection() {
        let newton = solve(&Fragile, &config(SolverMethod::Newton)).unwrap();
        let bisection = solve(&Fragile, &config(SolverMethod::Bisection)).unwrap();
        assert_eq!(newton, bisection);
    }
}
