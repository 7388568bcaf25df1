//! # Layer Capacity Check
//!
//! Computes the structural number provided by a three-layer flexible
//! pavement section and compares it with the required SN.
//!
//! ```text
//! SN_provided = a1·D1 + a2·D2·m2 + a3·D3·m3
//! ```
//!
//! The surface course carries no drainage coefficient; m applies to the
//! untreated base and subbase only.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::calculations::capacity::{check_capacity, Layer, PavementSection};
//!
//! let section = PavementSection {
//!     surface: Layer::surface(0.40, 4.0),
//!     base: Layer::granular(0.14, 6.0, 1.0),
//!     subbase: Layer::granular(0.11, 8.0, 1.0),
//! };
//!
//! let result = check_capacity(3.0, &section).unwrap();
//! assert!((result.provided_sn - 3.32).abs() < 1e-9);
//! assert!(result.adequate);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::LayerMaterial;

/// Position of a layer in the pavement section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerPosition {
    /// Asphalt surface course (a1, D1)
    Surface,
    /// Base course (a2, D2, m2)
    Base,
    /// Subbase course (a3, D3, m3)
    Subbase,
}

impl LayerPosition {
    /// All positions, top to bottom
    pub const ALL: [LayerPosition; 3] = [LayerPosition::Surface, LayerPosition::Base, LayerPosition::Subbase];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerPosition::Surface => "Surface",
            LayerPosition::Base => "Base",
            LayerPosition::Subbase => "Subbase",
        }
    }

    /// Layer index used in AASHTO notation (1, 2, 3)
    pub fn index(&self) -> u8 {
        match self {
            LayerPosition::Surface => 1,
            LayerPosition::Base => 2,
            LayerPosition::Subbase => 3,
        }
    }

    /// Whether a drainage coefficient applies to this layer
    pub fn is_drained(&self) -> bool {
        !matches!(self, LayerPosition::Surface)
    }
}

impl std::fmt::Display for LayerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn default_drainage() -> f64 {
    1.0
}

/// One pavement layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer coefficient a (per inch)
    pub coefficient: f64,

    /// Layer thickness D (inches)
    pub thickness_in: f64,

    /// Drainage coefficient m (0.5 to 1.2); must stay 1.0 for the surface
    #[serde(default = "default_drainage")]
    pub drainage_factor: f64,
}

impl Layer {
    /// Surface course (no drainage coefficient)
    pub fn surface(coefficient: f64, thickness_in: f64) -> Self {
        Self {
            coefficient,
            thickness_in,
            drainage_factor: 1.0,
        }
    }

    /// Base or subbase course
    pub fn granular(coefficient: f64, thickness_in: f64, drainage_factor: f64) -> Self {
        Self {
            coefficient,
            thickness_in,
            drainage_factor,
        }
    }

    /// Validate the layer for its position.
    pub fn validate(&self, position: LayerPosition) -> CalcResult<()> {
        let field = |name: &str| format!("{}.{}", position.display_name().to_lowercase(), name);

        if !self.coefficient.is_finite() || self.coefficient <= 0.0 {
            return Err(CalcError::invalid_input(
                field("coefficient"),
                self.coefficient.to_string(),
                "Layer coefficient must be positive",
            ));
        }
        if !self.thickness_in.is_finite() || self.thickness_in < 0.0 {
            return Err(CalcError::invalid_input(
                field("thickness_in"),
                self.thickness_in.to_string(),
                "Thickness cannot be negative",
            ));
        }
        if position.is_drained() {
            if !(0.5..=1.2).contains(&self.drainage_factor) {
                return Err(CalcError::invalid_input(
                    field("drainage_factor"),
                    self.drainage_factor.to_string(),
                    "Drainage coefficient must be between 0.5 and 1.2",
                ));
            }
        } else if self.drainage_factor != 1.0 {
            return Err(CalcError::invalid_input(
                field("drainage_factor"),
                self.drainage_factor.to_string(),
                "Surface course has no drainage coefficient; leave it at 1.0",
            ));
        }
        Ok(())
    }

    /// Structural contribution a·D·m (m is 1.0 for the surface)
    pub fn contribution(&self) -> f64 {
        self.coefficient * self.thickness_in * self.drainage_factor
    }
}

/// Three-layer flexible pavement section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "surface": { "coefficient": 0.40, "thickness_in": 4.0 },
///   "base": { "coefficient": 0.14, "thickness_in": 6.0, "drainage_factor": 1.0 },
///   "subbase": { "coefficient": 0.11, "thickness_in": 8.0, "drainage_factor": 1.0 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PavementSection {
    pub surface: Layer,
    pub base: Layer,
    pub subbase: Layer,
}

impl Default for PavementSection {
    fn default() -> Self {
        Self {
            surface: Layer::surface(0.40, 4.0),
            base: Layer::granular(0.14, 6.0, 1.0),
            subbase: Layer::granular(0.11, 8.0, 1.0),
        }
    }
}

impl PavementSection {
    /// Layers top to bottom with their positions
    pub fn layers(&self) -> [(LayerPosition, &Layer); 3] {
        [
            (LayerPosition::Surface, &self.surface),
            (LayerPosition::Base, &self.base),
            (LayerPosition::Subbase, &self.subbase),
        ]
    }

    /// Validate every layer.
    pub fn validate(&self) -> CalcResult<()> {
        for (position, layer) in self.layers() {
            layer.validate(position)?;
        }
        Ok(())
    }

    /// Provided structural number a1·D1 + a2·D2·m2 + a3·D3·m3
    pub fn provided_sn(&self) -> f64 {
        self.layers().iter().map(|(_, layer)| layer.contribution()).sum()
    }

    /// Total section thickness (inches)
    pub fn total_thickness_in(&self) -> f64 {
        self.layers().iter().map(|(_, layer)| layer.thickness_in).sum()
    }
}

/// One layer's share of the provided SN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerContribution {
    pub position: LayerPosition,

    /// a·D·m for this layer
    pub contribution: f64,

    /// Share of the provided SN (%)
    pub percentage: f64,
}

/// Results from a capacity check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "provided_sn": 3.32,
///   "required_sn": 3.0,
///   "margin": 0.32,
///   "adequate": true,
///   "contributions": [
///     { "position": "Surface", "contribution": 1.6, "percentage": 48.19 },
///     { "position": "Base", "contribution": 0.84, "percentage": 25.30 },
///     { "position": "Subbase", "contribution": 0.88, "percentage": 26.51 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Provided structural number
    pub provided_sn: f64,

    /// Required structural number
    pub required_sn: f64,

    /// provided − required
    pub margin: f64,

    /// True when provided ≥ required
    pub adequate: bool,

    /// Per-layer breakdown, top to bottom
    pub contributions: Vec<LayerContribution>,
}

impl CapacityResult {
    /// Check if the section passes
    pub fn passes(&self) -> bool {
        self.adequate
    }

    /// Ratio required / provided (≤ 1.0 passes)
    pub fn unity(&self) -> f64 {
        self.required_sn / self.provided_sn
    }
}

/// Check a pavement section against a required structural number.
///
/// # Errors
///
/// * `InvalidInput` if the required SN is not finite or a layer is invalid
/// * `DivisionByZero` if the section provides no structural number, which
///   leaves the percentage breakdown undefined
pub fn check_capacity(required_sn: f64, section: &PavementSection) -> CalcResult<CapacityResult> {
    if !required_sn.is_finite() {
        return Err(CalcError::invalid_input(
            "required_sn",
            required_sn.to_string(),
            "Required structural number must be finite",
        ));
    }
    section.validate()?;

    for (position, layer) in section.layers() {
        if !LayerMaterial::is_typical(position, layer.coefficient) {
            log::warn!(
                "{} coefficient {} is outside the typical AASHTO ranges",
                position,
                layer.coefficient
            );
        }
    }

    let provided_sn = section.provided_sn();
    if provided_sn == 0.0 {
        return Err(CalcError::division_by_zero("provided_sn"));
    }
    if !provided_sn.is_finite() {
        return Err(CalcError::invalid_input(
            "provided_sn",
            provided_sn.to_string(),
            "Layer coefficients and thicknesses overflow the structural number",
        ));
    }

    let contributions = section
        .layers()
        .iter()
        .map(|(position, layer)| {
            let contribution = layer.contribution();
            LayerContribution {
                position: *position,
                contribution,
                percentage: contribution / provided_sn * 100.0,
            }
        })
        .collect();

    let margin = provided_sn - required_sn;
    log::debug!(
        "Capacity: provided SN {:.3}, required {:.3}, margin {:.3}",
        provided_sn,
        required_sn,
        margin
    );

    Ok(CapacityResult {
        provided_sn,
        required_sn,
        margin,
        adequate: provided_sn >= required_sn,
        contributions,
    })
}
