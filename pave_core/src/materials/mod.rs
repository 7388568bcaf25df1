//! # Materials Database
//!
//! Reference data for pavement layer materials.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::capacity::LayerPosition;
//! use pave_core::materials::LayerMaterial;
//!
//! for material in LayerMaterial::for_position(LayerPosition::Base) {
//!     println!("{}: a2 = {}", material, material.typical_range());
//! }
//! ```

pub mod layer_coefficients;

pub use layer_coefficients::{CoefficientRange, LayerMaterial};
