//! # Design Settings
//!
//! Calculation-wide options that are not part of the pavement design
//! inputs themselves: how ZR is resolved, how the SN solver runs, and
//! whether a non-converged solve may feed the capacity check.
//!
//! Settings serialize to JSON; every field is optional on read and falls
//! back to its default.
//!
//! ```json
//! {
//!   "solver": { "method": "Newton", "tolerance": 0.005 },
//!   "reliability_policy": "ExactMatch",
//!   "accept_best_effort": false
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::reliability::ReliabilityPolicy;
use crate::solver::SolverConfig;

/// Settings applied to every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignSettings {
    /// SN solver method, tolerance, iteration cap and bracket
    pub solver: SolverConfig,

    /// Treatment of reliability levels between table rows
    pub reliability_policy: ReliabilityPolicy,

    /// Let a solve that hit the iteration cap supply the required SN
    pub accept_best_effort: bool,
}

impl DesignSettings {
    /// Parse settings from JSON and validate the solver config.
    ///
    /// # Errors
    ///
    /// * `SerializationError` if the JSON is malformed
    /// * `InvalidInput` if the solver config is invalid
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the solver config.
    pub fn validate(&self) -> CalcResult<()> {
        self.solver.validate()?;
        Ok(())
    }
}
