//! # Pavement Calculations
//!
//! Each calculation follows the pattern:
//!
//! - Input parameters (JSON-serializable) with `validate()`
//! - `*Result` - calculation results (JSON-serializable)
//! - A pure function returning `Result<*Result, CalcError>`
//!
//! ## Available Calculations
//!
//! - [`structural_number`] - Required SN from design traffic
//! - [`capacity`] - Provided SN of a three-layer section vs. required SN
//! - [`design`] - Both of the above in one pipeline

pub mod capacity;
pub mod design;
pub mod structural_number;

// Re-export commonly used types
pub use capacity::{check_capacity, CapacityResult, Layer, LayerContribution, LayerPosition, PavementSection};
pub use design::{run_design, DesignReport};
pub use structural_number::{solve_for_sn, DesignInputs, SolverResult};
