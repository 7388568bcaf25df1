//! # AASHTO 1993 Flexible Pavement Design Equation
//!
//! ```text
//! log10(W18) = ZR·So + 9.36·log10(SN+1) − 0.20
//!              + log10(ΔPSI / (4.2 − 1.5)) / (0.40 + 1094/(SN+1)^5.19)
//!              + 2.32·log10(MR) − 8.07
//! ```
//!
//! ## Notation
//!
//! - `SN` = Structural number of the pavement section
//! - `ZR` = Standard normal deviate for the design reliability
//! - `So` = Overall standard deviation of the traffic/performance prediction
//! - `ΔPSI` = Serviceability loss pi − pt
//! - `MR` = Effective subgrade resilient modulus (psi)
//! - `W18` = Predicted 18-kip ESAL applications (raw ESALs, not millions)
//!
//! ## Domain
//!
//! SN > −1, ΔPSI > 0, MR > 0. Evaluating outside the domain is a
//! [`CalcError::DomainError`], never a NaN.
//!
//! ## References
//!
//! - AASHTO Guide for Design of Pavement Structures (1993), Part II, Eq. 3.1.1

use std::f64::consts::LN_10;

use crate::errors::{CalcError, CalcResult};

/// Serviceability span of the AASHO Road Test (4.2 − 1.5)
pub const SERVICEABILITY_SPAN: f64 = 4.2 - 1.5;

/// Smallest serviceability loss for which W18 is strictly increasing in SN
/// over [0.1, 15]. Below about 0.16 the serviceability term dips near SN 3.
pub const MONOTONE_MIN_DELTA_PSI: f64 = 0.2;

/// Coefficient on log10(SN+1)
const SN_SLOPE: f64 = 9.36;

/// Constant following the SN term
const SN_OFFSET: f64 = 0.20;

/// Denominator constant of the serviceability term
const DENOM_BASE: f64 = 0.40;

/// Numerator of the SN-dependent denominator part
const DENOM_SCALE: f64 = 1094.0;

/// Exponent on (SN+1) in the serviceability term
const DENOM_EXPONENT: f64 = 5.19;

/// Coefficient on log10(MR)
const MR_SLOPE: f64 = 2.32;

/// Constant following the MR term
const MR_OFFSET: f64 = 8.07;

/// Validate the equation domain for a single evaluation.
fn check_domain(sn: f64, zr: f64, so: f64, delta_psi: f64, mr: f64) -> CalcResult<()> {
    if !sn.is_finite() || sn <= -1.0 {
        return Err(CalcError::domain_error("sn", sn, "SN must be greater than -1 (log10(SN+1))"));
    }
    if !delta_psi.is_finite() || delta_psi <= 0.0 {
        return Err(CalcError::domain_error(
            "delta_psi",
            delta_psi,
            "Serviceability loss must be positive (log10(ΔPSI/2.7))",
        ));
    }
    if !mr.is_finite() || mr <= 0.0 {
        return Err(CalcError::domain_error("mr", mr, "Resilient modulus must be positive (log10(MR))"));
    }
    if !zr.is_finite() {
        return Err(CalcError::domain_error("zr", zr, "ZR must be finite"));
    }
    if !so.is_finite() {
        return Err(CalcError::domain_error("so", so, "Standard deviation must be finite"));
    }
    Ok(())
}

/// Denominator of the serviceability term: 0.40 + 1094/(SN+1)^5.19
#[inline]
fn serviceability_denominator(sn: f64) -> f64 {
    DENOM_BASE + DENOM_SCALE / (sn + 1.0).powf(DENOM_EXPONENT)
}

/// Calculate log10(W18) for a given structural number.
///
/// # Errors
///
/// `DomainError` if SN ≤ −1, ΔPSI ≤ 0, MR ≤ 0, or any input is not finite.
pub fn log10_w18(sn: f64, zr: f64, so: f64, delta_psi: f64, mr: f64) -> CalcResult<f64> {
    check_domain(sn, zr, so, delta_psi, mr)?;

    let reliability_term = zr * so;
    let sn_term = SN_SLOPE * (sn + 1.0).log10() - SN_OFFSET;
    let serviceability_term = (delta_psi / SERVICEABILITY_SPAN).log10() / serviceability_denominator(sn);
    let subgrade_term = MR_SLOPE * mr.log10() - MR_OFFSET;

    Ok(reliability_term + sn_term + serviceability_term + subgrade_term)
}

/// Calculate predicted W18 (ESALs) for a given structural number.
///
/// # Example
///
/// ```rust
/// use pave_core::equations::aashto::evaluate;
///
/// let w18 = evaluate(4.53, -1.645, 0.45, 2.0, 7500.0).unwrap();
/// assert!(w18 > 4.5e6 && w18 < 5.5e6);
///
/// assert!(evaluate(4.0, -1.645, 0.45, 0.0, 7500.0).is_err());
/// ```
///
/// # Errors
///
/// `DomainError` if the inputs are outside the equation domain.
pub fn evaluate(sn: f64, zr: f64, so: f64, delta_psi: f64, mr: f64) -> CalcResult<f64> {
    let log_w18 = log10_w18(sn, zr, so, delta_psi, mr)?;
    Ok(10f64.powf(log_w18))
}

/// Derivative d(log10 W18)/dSN.
///
/// ```text
/// 9.36 / ((SN+1)·ln10) + log10(ΔPSI/2.7) · 5.19·1094·(SN+1)^−6.19 / D²
/// ```
/// where `D` is the serviceability denominator. ZR, So and MR drop out.
///
/// # Errors
///
/// `DomainError` under the same conditions as [`log10_w18`].
pub fn dlog10_w18_dsn(sn: f64, delta_psi: f64) -> CalcResult<f64> {
    check_domain(sn, 0.0, 0.0, delta_psi, 1.0)?;

    let x = sn + 1.0;
    let log_ratio = (delta_psi / SERVICEABILITY_SPAN).log10();
    let denom = serviceability_denominator(sn);
    let d_denom = -DENOM_EXPONENT * DENOM_SCALE * x.powf(-DENOM_EXPONENT - 1.0);

    Ok(SN_SLOPE / (x * LN_10) - log_ratio * d_denom / (denom * denom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const ZR: f64 = -1.645;
    const SO: f64 = 0.45;
    const DPSI: f64 = 2.0;
    const MR: f64 = 7500.0;

    #[test]
    fn test_log10_w18_hand_calculation() {
        // SN = 3.0:
        // ZR·So = -0.74025
        // 9.36·log10(4) - 0.20 = 5.43528
        // log10(2/2.7) / (0.40 + 1094/4^5.19) = -0.13033 / 1.22097 = -0.10675
        // 2.32·log10(7500) - 8.07 = 0.92014
        let expected = -0.74025 + 5.435_28 - 0.106_75 + 0.920_14;
        let actual = log10_w18(3.0, ZR, SO, DPSI, MR).unwrap();
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-3);
    }

    #[test]
    fn test_evaluate_matches_log_form() {
        let log_w = log10_w18(4.0, ZR, SO, DPSI, MR).unwrap();
        let w = evaluate(4.0, ZR, SO, DPSI, MR).unwrap();
        assert_relative_eq!(w.log10(), log_w, max_relative = 1e-12);
    }

    #[test]
    fn test_serviceability_term_vanishes_at_full_span() {
        // ΔPSI = 2.7 makes log10(ΔPSI/2.7) = 0
        let a = log10_w18(2.0, 0.0, SO, SERVICEABILITY_SPAN, MR).unwrap();
        let b = SN_SLOPE * 3.0f64.log10() - SN_OFFSET + MR_SLOPE * MR.log10() - MR_OFFSET;
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_delta_psi_is_domain_error() {
        let err = evaluate(4.0, ZR, SO, 0.0, MR).unwrap_err();
        match err {
            CalcError::DomainError { parameter, .. } => assert_eq!(parameter, "delta_psi"),
            other => panic!("expected DomainError, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_delta_psi_is_domain_error() {
        assert!(evaluate(4.0, ZR, SO, -0.5, MR).is_err());
    }

    #[test]
    fn test_sn_at_minus_one_is_domain_error() {
        assert!(matches!(
            evaluate(-1.0, ZR, SO, DPSI, MR),
            Err(CalcError::DomainError { .. })
        ));
        assert!(evaluate(-0.5, ZR, SO, DPSI, MR).is_ok());
    }

    #[test]
    fn test_non_positive_modulus_is_domain_error() {
        assert!(evaluate(4.0, ZR, SO, DPSI, 0.0).is_err());
        assert!(evaluate(4.0, ZR, SO, DPSI, -100.0).is_err());
        assert!(evaluate(4.0, ZR, SO, DPSI, f64::NAN).is_err());
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        for &sn in &[0.5, 2.0, 3.7, 6.0, 12.0] {
            for &dpsi in &[1.0, 1.7, 2.0, 3.0] {
                let h = 1e-6;
                let fd = (log10_w18(sn + h, ZR, SO, dpsi, MR).unwrap()
                    - log10_w18(sn - h, ZR, SO, dpsi, MR).unwrap())
                    / (2.0 * h);
                let analytic = dlog10_w18_dsn(sn, dpsi).unwrap();
                assert_relative_eq!(analytic, fd, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_strictly_increasing_over_bracket() {
        for &dpsi in &[1.0, 1.5, 2.0, 2.5, 3.0, 3.5] {
            for &(zr, mr) in &[(0.0, 3000.0), (-1.645, 7500.0), (-3.09, 20000.0)] {
                let mut previous = f64::NEG_INFINITY;
                for i in 0..=1000 {
                    let sn = 0.1 + 14.9 * (i as f64) / 1000.0;
                    let w = evaluate(sn, zr, SO, dpsi, mr).unwrap();
                    assert!(w > previous, "not increasing at SN={} ΔPSI={}", sn, dpsi);
                    previous = w;
                }
            }
        }
    }

    #[test]
    fn test_small_serviceability_loss_is_not_monotone() {
        let grid: Vec<f64> = (0..=1000).map(|i| 0.1 + 14.9 * (i as f64) / 1000.0).collect();
        let decreases = |dpsi: f64| {
            grid.windows(2)
                .filter(|w| {
                    evaluate(w[1], ZR, SO, dpsi, MR).unwrap() <= evaluate(w[0], ZR, SO, dpsi, MR).unwrap()
                })
                .count()
        };
        assert!(decreases(0.1) > 0);
        assert_eq!(decreases(MONOTONE_MIN_DELTA_PSI), 0);
    }

    #[test]
    fn test_pure_and_deterministic() {
        let a = evaluate(5.1, ZR, SO, DPSI, MR).unwrap();
        let b = evaluate(5.1, ZR, SO, DPSI, MR).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
