use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::CalcError;

/// Default relative tolerance on the residual (1% of the target)
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default search bracket for the structural number
pub const DEFAULT_BRACKET: [f64; 2] = [0.1, 15.0];

/// Root-finding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SolverMethod {
    /// Interval halving; always stays inside the bracket
    #[default]
    Bisection,
    /// Newton steps on the log residual, falling back to bisection when a
    /// step would leave the current bracket
    Newton,
}

impl SolverMethod {
    /// All solver methods for UI selection
    pub const ALL: [SolverMethod; 2] = [SolverMethod::Bisection, SolverMethod::Newton];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SolverMethod::Bisection => "Bisection",
            SolverMethod::Newton => "Safeguarded Newton",
        }
    }
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Errors that can occur when validating a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    Tolerance(f64),

    #[error("max_iterations must be at least 1")]
    MaxIterations,

    #[error("bracket bounds must be finite with -1 < low < high, got [{0}, {1}]")]
    Bracket(f64, f64),
}

impl From<ConfigError> for CalcError {
    fn from(err: ConfigError) -> Self {
        let field = match err {
            ConfigError::Tolerance(_) => "tolerance",
            ConfigError::MaxIterations => "max_iterations",
            ConfigError::Bracket(..) => "bracket",
        };
        let value = match err {
            ConfigError::Tolerance(t) => t.to_string(),
            ConfigError::MaxIterations => "0".to_string(),
            ConfigError::Bracket(lo, hi) => format!("[{}, {}]", lo, hi),
        };
        CalcError::invalid_input(field, value, err.to_string())
    }
}

/// Configuration for the structural number solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    method: SolverMethod,
    tolerance: f64,
    max_iterations: usize,
    bracket: [f64; 2],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: SolverMethod::default(),
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            bracket: DEFAULT_BRACKET,
        }
    }
}

impl SolverConfig {
    /// Creates a new config with validated values.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not positive, the iteration cap
    /// is zero, or the bracket is not a finite interval above SN = -1.
    pub fn new(
        method: SolverMethod,
        tolerance: f64,
        max_iterations: usize,
        bracket: [f64; 2],
    ) -> Result<Self, ConfigError> {
        let config = Self {
            method,
            tolerance,
            max_iterations,
            bracket,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants `new` enforces.
    ///
    /// Configs read from JSON skip `new`, so the solver re-validates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::Tolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        let [low, high] = self.bracket;
        if !low.is_finite() || !high.is_finite() || low <= -1.0 || low >= high {
            return Err(ConfigError::Bracket(low, high));
        }
        Ok(())
    }

    /// Returns a copy using a different method.
    #[must_use]
    pub fn with_method(mut self, method: SolverMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns a copy with a different relative tolerance.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Tolerance` if the tolerance is not positive.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, ConfigError> {
        self.tolerance = tolerance;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with a different iteration cap.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MaxIterations` if `max_iterations` is zero.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self, ConfigError> {
        self.max_iterations = max_iterations;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with a different search bracket.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Bracket` if the bracket is invalid.
    pub fn with_bracket(mut self, bracket: [f64; 2]) -> Result<Self, ConfigError> {
        self.bracket = bracket;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn method(&self) -> SolverMethod {
        self.method
    }

    /// Relative tolerance on the residual.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Search bracket `[low, high]`.
    #[must_use]
    pub fn bracket(&self) -> [f64; 2] {
        self.bracket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bisection_at_one_percent() {
        let config = SolverConfig::default();
        assert_eq!(config.method(), SolverMethod::Bisection);
        assert_eq!(config.tolerance(), 0.01);
        assert_eq!(config.max_iterations(), 100);
        assert_eq!(config.bracket(), [0.1, 15.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(
            SolverConfig::default().with_tolerance(0.0),
            Err(ConfigError::Tolerance(0.0))
        );
        assert!(SolverConfig::default().with_tolerance(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        assert_eq!(
            SolverConfig::default().with_max_iterations(0),
            Err(ConfigError::MaxIterations)
        );
    }

    #[test]
    fn rejects_bad_brackets() {
        assert!(SolverConfig::default().with_bracket([5.0, 1.0]).is_err());
        assert!(SolverConfig::default().with_bracket([-1.0, 10.0]).is_err());
        assert!(SolverConfig::default().with_bracket([0.0, f64::NAN]).is_err());
        assert!(SolverConfig::default().with_bracket([0.0, 20.0]).is_ok());
    }

    #[test]
    fn config_error_maps_to_invalid_input() {
        let err: CalcError = ConfigError::Tolerance(-1.0).into();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "tolerance"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{ "method": "Newton" }"#).unwrap();
        assert_eq!(config.method(), SolverMethod::Newton);
        assert_eq!(config.max_iterations(), DEFAULT_MAX_ITERATIONS);
    }
}
