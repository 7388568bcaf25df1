//! Typical Layer Coefficients (AASHTO 1993 Part II, Section 2.3.5)
//!
//! Ranges of structural layer coefficients commonly used for surface,
//! base and subbase materials. They are guidance for picking a1, a2, a3,
//! not limits; project-specific values from resilient modulus testing
//! take precedence.

use serde::{Deserialize, Serialize};

use crate::calculations::capacity::LayerPosition;

/// Inclusive range of layer coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRange {
    pub min: f64,
    pub max: f64,
}

impl CoefficientRange {
    /// True if `coefficient` lies within the range
    pub fn contains(&self, coefficient: f64) -> bool {
        coefficient >= self.min && coefficient <= self.max
    }

    /// Midpoint of the range, a reasonable starting value
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl std::fmt::Display for CoefficientRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} - {:.2}", self.min, self.max)
    }
}

/// Pavement layer materials with tabulated typical coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerMaterial {
    /// Dense-graded hot mix asphalt surface
    HotMixAsphalt,
    /// Chip seal / surface treatment
    SurfaceTreatment,
    /// Crushed stone base
    CrushedStoneBase,
    /// Cement-treated base
    CementTreatedBase,
    /// Asphalt-treated base
    AsphaltTreatedBase,
    /// Granular subbase
    GranularSubbase,
    /// Cement-treated subbase
    CementTreatedSubbase,
    /// Lime-treated subbase
    LimeTreatedSubbase,
}

impl LayerMaterial {
    /// All materials for UI selection, grouped by layer
    pub const ALL: [LayerMaterial; 8] = [
        LayerMaterial::HotMixAsphalt,
        LayerMaterial::SurfaceTreatment,
        LayerMaterial::CrushedStoneBase,
        LayerMaterial::CementTreatedBase,
        LayerMaterial::AsphaltTreatedBase,
        LayerMaterial::GranularSubbase,
        LayerMaterial::CementTreatedSubbase,
        LayerMaterial::LimeTreatedSubbase,
    ];

    /// Layer the material is used in
    pub fn position(&self) -> LayerPosition {
        match self {
            LayerMaterial::HotMixAsphalt | LayerMaterial::SurfaceTreatment => LayerPosition::Surface,
            LayerMaterial::CrushedStoneBase
            | LayerMaterial::CementTreatedBase
            | LayerMaterial::AsphaltTreatedBase => LayerPosition::Base,
            LayerMaterial::GranularSubbase
            | LayerMaterial::CementTreatedSubbase
            | LayerMaterial::LimeTreatedSubbase => LayerPosition::Subbase,
        }
    }

    /// Typical coefficient range
    pub fn typical_range(&self) -> CoefficientRange {
        let (min, max) = match self {
            LayerMaterial::HotMixAsphalt => (0.35, 0.44),
            LayerMaterial::SurfaceTreatment => (0.20, 0.30),
            LayerMaterial::CrushedStoneBase => (0.10, 0.14),
            LayerMaterial::CementTreatedBase => (0.20, 0.28),
            LayerMaterial::AsphaltTreatedBase => (0.30, 0.40),
            LayerMaterial::GranularSubbase => (0.08, 0.12),
            LayerMaterial::CementTreatedSubbase => (0.15, 0.20),
            LayerMaterial::LimeTreatedSubbase => (0.10, 0.15),
        };
        CoefficientRange { min, max }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerMaterial::HotMixAsphalt => "Hot Mix Asphalt",
            LayerMaterial::SurfaceTreatment => "Surface Treatment",
            LayerMaterial::CrushedStoneBase => "Crushed Stone",
            LayerMaterial::CementTreatedBase => "Cement Treated",
            LayerMaterial::AsphaltTreatedBase => "Asphalt Treated",
            LayerMaterial::GranularSubbase => "Granular Subbase",
            LayerMaterial::CementTreatedSubbase => "Cement Treated",
            LayerMaterial::LimeTreatedSubbase => "Lime Treated",
        }
    }

    /// Materials tabulated for a layer position
    pub fn for_position(position: LayerPosition) -> impl Iterator<Item = LayerMaterial> {
        Self::ALL.into_iter().filter(move |m| m.position() == position)
    }

    /// True if any tabulated material for `position` covers `coefficient`
    pub fn is_typical(position: LayerPosition, coefficient: f64) -> bool {
        Self::for_position(position).any(|m| m.typical_range().contains(coefficient))
    }
}

impl std::fmt::Display for LayerMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materials_per_position() {
        assert_eq!(LayerMaterial::for_position(LayerPosition::Surface).count(), 2);
        assert_eq!(LayerMaterial::for_position(LayerPosition::Base).count(), 3);
        assert_eq!(LayerMaterial::for_position(LayerPosition::Subbase).count(), 3);
    }

    #[test]
    fn test_ranges_are_ordered() {
        for material in LayerMaterial::ALL {
            let range = material.typical_range();
            assert!(range.min > 0.0 && range.min < range.max, "{}", material);
        }
    }

    #[test]
    fn test_typical_checks() {
        assert!(LayerMaterial::is_typical(LayerPosition::Surface, 0.40));
        assert!(LayerMaterial::is_typical(LayerPosition::Base, 0.14));
        assert!(LayerMaterial::is_typical(LayerPosition::Subbase, 0.11));
        // Gap between crushed stone (0.14) and cement treated (0.20)
        assert!(!LayerMaterial::is_typical(LayerPosition::Base, 0.17));
        assert!(!LayerMaterial::is_typical(LayerPosition::Surface, 0.50));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(LayerMaterial::HotMixAsphalt.typical_range().to_string(), "0.35 - 0.44");
        assert!((LayerMaterial::CrushedStoneBase.typical_range().midpoint() - 0.12).abs() < 1e-12);
    }
}
