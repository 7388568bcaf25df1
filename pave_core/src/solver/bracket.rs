/// Sign of a residual.
///
/// Zero counts as positive, matching the bisection update rule
/// "residual below zero moves the low bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    /// Classifies a residual value.
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// A validated bracket around the root of an increasing residual.
///
/// The residual is negative at `low` and non-negative at `high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bracket {
    pub(super) low: f64,
    pub(super) high: f64,
}

impl Bracket {
    /// Builds a bracket if the endpoint residuals change sign.
    ///
    /// Returns `None` when both residuals share a sign, meaning the
    /// interval holds no root of an increasing function.
    pub(super) fn new(low: f64, high: f64, residual_low: f64, residual_high: f64) -> Option<Self> {
        match (Sign::of(residual_low), Sign::of(residual_high)) {
            (Sign::Negative, Sign::Positive) => Some(Self { low, high }),
            _ => None,
        }
    }

    pub(super) fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub(super) fn width(&self) -> f64 {
        self.high - self.low
    }

    /// True if `x` lies strictly between the bounds.
    pub(super) fn contains(&self, x: f64) -> bool {
        x > self.low && x < self.high
    }

    /// Replaces the bound on the side matching the residual sign at `x`.
    pub(super) fn shrink(&mut self, x: f64, residual: f64) {
        match Sign::of(residual) {
            Sign::Negative => self.low = x,
            Sign::Positive => self.high = x,
        }
    }
}
