//! # Unit Types
//!
//! Lightweight newtype wrappers for traffic quantities. Design traffic is
//! entered in millions of ESALs while the design equation works in raw
//! ESALs; mixing the two is an easy six-orders-of-magnitude mistake, so the
//! conversion lives in one place.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::units::{Esals, MillionEsals};
//!
//! let design = MillionEsals(5.0);
//! let raw: Esals = design.into();
//! assert_eq!(raw.0, 5_000_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// ESALs per million ESALs
pub const ESALS_PER_MILLION: f64 = 1_000_000.0;

// ============================================================================
// Traffic Units
// ============================================================================

/// Traffic in 18-kip equivalent single axle loads
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Esals(pub f64);

/// Traffic in millions of 18-kip equivalent single axle loads
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MillionEsals(pub f64);

impl From<MillionEsals> for Esals {
    fn from(m: MillionEsals) -> Self {
        Esals(m.0 * ESALS_PER_MILLION)
    }
}

impl From<Esals> for MillionEsals {
    fn from(esals: Esals) -> Self {
        MillionEsals(esals.0 / ESALS_PER_MILLION)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Esals);
impl_arithmetic!(MillionEsals);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millions_to_esals() {
        let esals: Esals = MillionEsals(2.5).into();
        assert_eq!(esals.0, 2_500_000.0);
    }

    #[test]
    fn test_esals_to_millions() {
        let m: MillionEsals = Esals(750_000.0).into();
        assert_eq!(m.0, 0.75);
    }

    #[test]
    fn test_arithmetic() {
        let a = Esals(10.0);
        let b = Esals(4.0);
        assert_eq!((a - b).value(), 6.0);
        assert_eq!((a + b).value(), 14.0);
        assert_eq!((a * 0.5).value(), 5.0);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&MillionEsals(5.0)).unwrap();
        assert_eq!(json, "5.0");
    }
}
