//! # Equation Registry
//!
//! Registry of the pavement design equations used in calculations. Each
//! equation carries its formula, code reference, and variable definitions
//! so reports can cite exactly what was evaluated.
//!
//! ## Usage
//!
//! ```rust
//! use pave_core::equations::registry::Equation;
//!
//! let meta = Equation::FlexibleDesign.metadata();
//! println!("{} ({})", meta.name, meta.reference.citation());
//! println!("{}", meta.formula);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a pavement design guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// AASHTO Guide for Design of Pavement Structures
    Aashto {
        year: u16,
        part: &'static str,
        section: &'static str,
    },
    /// Definition used by the guide, no specific section
    Definition,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Aashto { year, part, section } => {
                format!("AASHTO {} Part {}, Section {}", year, part, section)
            }
            CodeReference::Definition => "Definition".to_string(),
        }
    }
}

// ============================================================================
// Variables and Metadata
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    /// Symbol (e.g., "SN", "MR")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units, empty for dimensionless quantities
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Metadata for a design equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula: &'static str,
    /// Code reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Pavement design equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// log10(W18) as a function of SN
    FlexibleDesign,
    /// SN = a1·D1 + a2·D2·m2 + a3·D3·m3
    LayeredStructuralNumber,
    /// ΔPSI = pi − pt
    ServiceabilityLoss,
}

impl Equation {
    /// All registered equations in calculation order
    pub const ALL: [Equation; 3] = [
        Equation::ServiceabilityLoss,
        Equation::FlexibleDesign,
        Equation::LayeredStructuralNumber,
    ];

    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::FlexibleDesign => EquationMetadata {
                name: "Flexible Pavement Design Equation",
                description: "Allowable 18-kip ESALs for a given structural number",
                formula: "log10(W18) = ZR*So + 9.36*log10(SN+1) - 0.20 \
                          + log10(dPSI/(4.2-1.5)) / (0.40 + 1094/(SN+1)^5.19) \
                          + 2.32*log10(MR) - 8.07",
                reference: CodeReference::Aashto { year: 1993, part: "II", section: "3.1" },
                variables: vec![
                    Variable::new("W18", "Predicted 18-kip ESAL applications", "ESALs"),
                    Variable::new("ZR", "Standard normal deviate for reliability", ""),
                    Variable::new("So", "Combined standard error", ""),
                    Variable::new("SN", "Structural number", "in"),
                    Variable::new("dPSI", "Design serviceability loss", ""),
                    Variable::new("MR", "Subgrade resilient modulus", "psi"),
                ],
                source_function: "equations::aashto::log10_w18",
            },
            Equation::LayeredStructuralNumber => EquationMetadata {
                name: "Layered Structural Number",
                description: "Structural number provided by surface, base and subbase layers",
                formula: "SN = a1*D1 + a2*D2*m2 + a3*D3*m3",
                reference: CodeReference::Aashto { year: 1993, part: "II", section: "3.1.5" },
                variables: vec![
                    Variable::new("a1, a2, a3", "Layer coefficients", "1/in"),
                    Variable::new("D1, D2, D3", "Layer thicknesses", "in"),
                    Variable::new("m2, m3", "Drainage coefficients", ""),
                ],
                source_function: "calculations::capacity::check_capacity",
            },
            Equation::ServiceabilityLoss => EquationMetadata {
                name: "Serviceability Loss",
                description: "Loss of present serviceability index over the design period",
                formula: "dPSI = pi - pt",
                reference: CodeReference::Definition,
                variables: vec![
                    Variable::new("pi", "Initial serviceability index", ""),
                    Variable::new("pt", "Terminal serviceability index", ""),
                ],
                source_function: "calculations::structural_number::DesignInputs::delta_psi",
            },
        }
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.metadata().name)
    }
}
