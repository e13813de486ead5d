//! Exact rational values as emitted by the TRTS simulator.

use serde::{Deserialize, Serialize};

/// An exact `numerator/denominator` pair.
///
/// A zero denominator is the simulator's way of writing an undefined or
/// infinite ratio. Converting such a value to `f64` yields a signed infinity
/// instead of faulting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RationalValue {
    pub numerator: i64,
    pub denominator: i64,
}

impl RationalValue {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Floating point view. `n/0` maps to `+inf` for `n >= 0`, `-inf` otherwise.
    pub fn as_f64(&self) -> f64 {
        if self.denominator == 0 {
            if self.numerator >= 0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            }
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }

    /// Whether this value encodes the explicit undefined ratio.
    pub fn is_undefined(&self) -> bool {
        self.denominator == 0
    }

    /// A copy with `delta` added to the numerator.
    pub fn with_numerator_offset(&self, delta: i64) -> Self {
        Self::new(self.numerator.saturating_add(delta), self.denominator)
    }

    /// A copy with `delta` added to the denominator.
    pub fn with_denominator_offset(&self, delta: i64) -> Self {
        Self::new(self.numerator, self.denominator.saturating_add(delta))
    }

    /// Text form `n/d`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Default for RationalValue {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl std::fmt::Display for RationalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
