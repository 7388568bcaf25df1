//! # Reliability (ZR) Lookup
//!
//! Maps a design reliability level to the standard normal deviate ZR used
//! in the AASHTO 1993 design equation (AASHTO Guide Part I, Table 4.1).
//!
//! Reliability levels between tabulated values are never silently snapped
//! to a default. Depending on [`ReliabilityPolicy`] they are either rejected
//! or linearly interpolated between the two bracketing rows.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::reliability::{resolve_zr, ReliabilityPolicy, AASHTO_RELIABILITY};
//!
//! assert_eq!(resolve_zr(95.0).unwrap(), -1.645);
//!
//! // 92.5% sits halfway between 90% and 95%
//! let zr = AASHTO_RELIABILITY.resolve(92.5, ReliabilityPolicy::Interpolate).unwrap();
//! assert!((zr - (-1.4635)).abs() < 1e-9);
//!
//! assert!(AASHTO_RELIABILITY.resolve(92.5, ReliabilityPolicy::ExactMatch).is_err());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Tolerance used when matching a reliability percentage to a table key
const KEY_TOLERANCE: f64 = 1e-9;

/// Tabulated (reliability %, ZR) pairs, ascending by reliability
const AASHTO_1993_ZR: [(f64, f64); 10] = [
    (50.0, 0.000),
    (60.0, -0.253),
    (70.0, -0.524),
    (75.0, -0.674),
    (80.0, -0.841),
    (85.0, -1.037),
    (90.0, -1.282),
    (95.0, -1.645),
    (99.0, -2.327),
    (99.9, -3.090),
];

/// Process-wide AASHTO 1993 reliability table.
pub static AASHTO_RELIABILITY: Lazy<ReliabilityTable> = Lazy::new(ReliabilityTable::aashto_1993);

/// How to treat reliability levels that are not table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReliabilityPolicy {
    /// Only tabulated reliability levels are accepted
    ExactMatch,
    /// Linear interpolation between the bracketing tabulated levels
    #[default]
    Interpolate,
}

impl ReliabilityPolicy {
    /// All policy variants for UI selection
    pub const ALL: [ReliabilityPolicy; 2] = [ReliabilityPolicy::ExactMatch, ReliabilityPolicy::Interpolate];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReliabilityPolicy::ExactMatch => "Exact table match",
            ReliabilityPolicy::Interpolate => "Linear interpolation",
        }
    }
}

impl std::fmt::Display for ReliabilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single row of the reliability table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityEntry {
    /// Reliability level R (%)
    pub reliability_pct: f64,
    /// Standard normal deviate ZR
    pub zr: f64,
}

/// Immutable reliability → ZR table.
///
/// Rows are sorted by ascending reliability and ZR decreases strictly
/// from row to row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReliabilityTable {
    entries: Vec<ReliabilityEntry>,
}

impl ReliabilityTable {
    /// The standard AASHTO 1993 table.
    pub fn aashto_1993() -> Self {
        Self {
            entries: AASHTO_1993_ZR
                .iter()
                .map(|&(reliability_pct, zr)| ReliabilityEntry { reliability_pct, zr })
                .collect(),
        }
    }

    /// Table rows in ascending reliability order
    pub fn entries(&self) -> &[ReliabilityEntry] {
        &self.entries
    }

    /// Lowest tabulated reliability (%)
    pub fn min_reliability(&self) -> f64 {
        self.entries[0].reliability_pct
    }

    /// Highest tabulated reliability (%)
    pub fn max_reliability(&self) -> f64 {
        self.entries[self.entries.len() - 1].reliability_pct
    }

    /// Returns the tabulated ZR if `reliability_pct` is a table key.
    pub fn exact(&self, reliability_pct: f64) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| (e.reliability_pct - reliability_pct).abs() <= KEY_TOLERANCE)
            .map(|e| e.zr)
    }

    /// Resolve ZR for a reliability level.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if the level is not finite or outside the table range
    /// * `InvalidInput` if the level is not tabulated under [`ReliabilityPolicy::ExactMatch`]
    pub fn resolve(&self, reliability_pct: f64, policy: ReliabilityPolicy) -> CalcResult<f64> {
        if !reliability_pct.is_finite()
            || reliability_pct < self.min_reliability() - KEY_TOLERANCE
            || reliability_pct > self.max_reliability() + KEY_TOLERANCE
        {
            return Err(CalcError::invalid_input(
                "reliability_pct",
                reliability_pct.to_string(),
                format!(
                    "Reliability must be between {}% and {}%",
                    self.min_reliability(),
                    self.max_reliability()
                ),
            ));
        }

        if let Some(zr) = self.exact(reliability_pct) {
            return Ok(zr);
        }

        match policy {
            ReliabilityPolicy::ExactMatch => Err(CalcError::invalid_input(
                "reliability_pct",
                reliability_pct.to_string(),
                "Reliability is not a tabulated level (50, 60, 70, 75, 80, 85, 90, 95, 99, 99.9)",
            )),
            ReliabilityPolicy::Interpolate => Ok(self.interpolate(reliability_pct)),
        }
    }

    /// Linear interpolation between the bracketing rows.
    ///
    /// Caller guarantees `reliability_pct` lies strictly inside the table range.
    fn interpolate(&self, reliability_pct: f64) -> f64 {
        let upper = self
            .entries
            .iter()
            .position(|e| e.reliability_pct > reliability_pct)
            .unwrap_or(self.entries.len() - 1)
            .max(1);
        let lo = self.entries[upper - 1];
        let hi = self.entries[upper];
        let t = (reliability_pct - lo.reliability_pct) / (hi.reliability_pct - lo.reliability_pct);
        let zr = lo.zr + t * (hi.zr - lo.zr);
        log::trace!(
            "Interpolated ZR {:.4} for R={}% between {}% and {}%",
            zr,
            reliability_pct,
            lo.reliability_pct,
            hi.reliability_pct
        );
        zr
    }
}

/// Resolve ZR from the AASHTO table, interpolating between rows.
pub fn resolve_zr(reliability_pct: f64) -> CalcResult<f64> {
    AASHTO_RELIABILITY.resolve(reliability_pct, ReliabilityPolicy::Interpolate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tabulated_values() {
        assert_eq!(resolve_zr(95.0).unwrap(), -1.645);
        assert_eq!(resolve_zr(50.0).unwrap(), 0.0);
        assert_eq!(resolve_zr(99.9).unwrap(), -3.090);
        assert_eq!(resolve_zr(75.0).unwrap(), -0.674);
    }

    #[test]
    fn test_table_is_monotone_and_non_positive() {
        let entries = AASHTO_RELIABILITY.entries();
        assert_eq!(entries.len(), 10);
        for pair in entries.windows(2) {
            assert!(pair[1].reliability_pct > pair[0].reliability_pct);
            assert!(pair[1].zr < pair[0].zr);
        }
        assert!(entries.iter().all(|e| e.zr <= 0.0));
    }

    #[test]
    fn test_interpolation_between_rows() {
        let zr = AASHTO_RELIABILITY
            .resolve(97.0, ReliabilityPolicy::Interpolate)
            .unwrap();
        // Halfway from 95 (-1.645) to 99 (-2.327)
        assert_abs_diff_eq!(zr, -1.986, epsilon = 1e-9);

        let zr = AASHTO_RELIABILITY
            .resolve(99.45, ReliabilityPolicy::Interpolate)
            .unwrap();
        assert_abs_diff_eq!(zr, -2.7085, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolation_is_monotone() {
        let mut previous = resolve_zr(50.0).unwrap();
        let mut r = 50.5;
        while r <= 99.9 {
            let zr = resolve_zr(r).unwrap();
            assert!(zr < previous, "ZR must decrease at R={}", r);
            assert!(zr <= 0.0);
            previous = zr;
            r += 0.5;
        }
    }

    #[test]
    fn test_exact_match_rejects_untabulated() {
        let err = AASHTO_RELIABILITY
            .resolve(93.0, ReliabilityPolicy::ExactMatch)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert_eq!(
            AASHTO_RELIABILITY
                .resolve(90.0, ReliabilityPolicy::ExactMatch)
                .unwrap(),
            -1.282
        );
    }

    #[test]
    fn test_no_silent_default() {
        // The untabulated value must never come back as the 95% deviate
        let zr = resolve_zr(93.0).unwrap();
        assert_ne!(zr, -1.645);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(resolve_zr(49.9).is_err());
        assert!(resolve_zr(99.95).is_err());
        assert!(resolve_zr(f64::NAN).is_err());
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&ReliabilityPolicy::ExactMatch).unwrap();
        assert_eq!(json, "\"ExactMatch\"");
        assert_eq!(ReliabilityPolicy::default(), ReliabilityPolicy::Interpolate);
    }
}
