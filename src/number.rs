use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// An `f64` with a couple of range and rounding helpers.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(pub f64);

impl Number {
    /// Whether the value lies between `a` and `b`, inclusive, in either order.
    pub fn is_between(&self, a: f64, b: f64) -> bool {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        low <= self.0 && self.0 <= high
    }

    /// Rounds to `precision` decimal places, ties to even.
    ///
    /// A negative precision rounds to tens, hundreds and so on.
    pub fn rounded(&self, precision: i32) -> Self {
        let factor = 10f64.powi(precision);
        Number((self.0 * factor).round_ties_even() / factor)
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Deref for Number {
    type Target = f64;

    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
