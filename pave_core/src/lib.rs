//! # pave_core - Flexible Pavement Design Engine
//!
//! `pave_core` implements the AASHTO 1993 flexible pavement design check:
//! it solves the design equation for the structural number (SN) a pavement
//! needs to carry its design traffic, then compares that against the SN a
//! layered section provides. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use pave_core::{run_design, DesignInputs, DesignSettings, PavementSection};
//!
//! let report = run_design(
//!     &DesignInputs::default(),
//!     &PavementSection::default(),
//!     &DesignSettings::default(),
//! )
//! .unwrap();
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("required_sn"));
//! ```
//!
//! ## Modules
//!
//! - [`reliability`] - Reliability level to ZR lookup
//! - [`equations`] - Design equation and equation metadata
//! - [`solver`] - Bracketed bisection / Newton root finding
//! - [`calculations`] - Required SN, capacity check, design pipeline
//! - [`materials`] - Typical layer coefficients
//! - [`settings`] - Calculation-wide options
//! - [`units`] - Type-safe traffic units
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod reliability;
pub mod settings;
pub mod solver;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    check_capacity, run_design, solve_for_sn, CapacityResult, DesignInputs, DesignReport, Layer, PavementSection,
    SolverResult,
};
pub use errors::{CalcError, CalcResult};
pub use reliability::{resolve_zr, ReliabilityPolicy};
pub use settings::DesignSettings;
pub use solver::{SolverConfig, SolverMethod};
