//! # Error Types
//!
//! Structured error types for pave_core. Every failure carries enough
//! context (field, value, bracket bounds) for a front end to tell the
//! engineer what to change, and every variant serializes to JSON.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::errors::{CalcError, CalcResult};
//!
//! fn validate_modulus(mr_psi: f64) -> CalcResult<()> {
//!     if mr_psi <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "subgrade_modulus_psi",
//!             mr_psi.to_string(),
//!             "Resilient modulus must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pave_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, inconsistent with another input)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The design equation was evaluated outside its mathematical domain
    #[error("Domain error for '{parameter}': {value} - {reason}")]
    DomainError {
        parameter: String,
        value: String,
        reason: String,
    },

    /// The solver bracket does not contain a sign change
    #[error(
        "No root in bracket [{low_sn}, {high_sn}]: W18 ranges {w18_low:.3e} to {w18_high:.3e}, target {target_w18:.3e}"
    )]
    NoRootInBracket {
        low_sn: f64,
        high_sn: f64,
        w18_low: f64,
        w18_high: f64,
        target_w18: f64,
    },

    /// The solver ran out of iterations and the caller required convergence
    #[error("Solver did not converge after {iterations} iterations (best SN {best_sn:.4})")]
    NotConverged { iterations: usize, best_sn: f64 },

    /// A ratio was requested with a zero denominator
    #[error("Division by zero: {quantity} is zero")]
    DivisionByZero { quantity: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(parameter: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(quantity: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            quantity: quantity.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for outcomes reported by the SN solver rather than bad input.
    pub fn is_solver_outcome(&self) -> bool {
        matches!(
            self,
            CalcError::NoRootInBracket { .. } | CalcError::NotConverged { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::NoRootInBracket { .. } => "NO_ROOT_IN_BRACKET",
            CalcError::NotConverged { .. } => "NOT_CONVERGED",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
