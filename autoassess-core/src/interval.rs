//! Closed numeric intervals used for observational and acceptable ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed interval `[lo, hi]`.
///
/// The bounds are always stored in ascending order regardless of the order
/// they were supplied in.
///
/// ```
/// use autoassess_core::interval::Interval;
///
/// let obs = Interval::new(1.2, 0.8);
/// assert_eq!(obs.lo(), 0.8);
/// assert_eq!(obs.hi(), 1.2);
/// assert!(obs.contains(1.0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// Create an interval from two bounds in any order
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { lo: b, hi: a }
        } else {
            Self { lo: a, hi: b }
        }
    }

    /// Degenerate interval holding a single value
    pub fn point(value: f64) -> Self {
        Self {
            lo: value,
            hi: value,
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Inclusive containment test
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Distance from `value` to the nearest bound.
    ///
    /// This is measured to the bounds themselves, so a value in the middle of
    /// the interval still has a positive distance.
    pub fn distance(&self, value: f64) -> f64 {
        (value - self.lo).abs().min((value - self.hi).abs())
    }

    /// Largest absolute value of either bound
    pub fn max_abs(&self) -> f64 {
        self.lo.abs().max(self.hi.abs())
    }

    /// Divide both bounds by `divisor`, re-sorting if the divisor is negative
    pub fn scaled_by(&self, divisor: f64) -> Self {
        Self::new(self.lo / divisor, self.hi / divisor)
    }
}

impl From<(f64, f64)> for Interval {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.lo, interval.hi)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
