//! # Pavement Design Equations
//!
//! Pure functions for the equations used in calculations. Keeping the
//! equations in one place allows verification against the design guide
//! independent of the solver and report code.
//!
//! ## Modules
//!
//! - [`aashto`] - AASHTO 1993 flexible pavement design equation
//! - [`registry`] - Equation metadata for reports
//!
//! ## Units
//!
//! - **W18**: raw 18-kip ESALs (convert from millions before evaluating)
//! - **MR**: psi
//! - **SN**: inches (dimensionless in most texts)
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures, 1993

pub mod aashto;
pub mod registry;

pub use aashto::{dlog10_w18_dsn, evaluate, log10_w18, MONOTONE_MIN_DELTA_PSI, SERVICEABILITY_SPAN};

pub use registry::{CodeReference, Equation, EquationMetadata, Variable};
