//! The bounded real domain membership functions are defined over

use crate::{XmuError, XmuResult};
use std::fmt;

/// An immutable closed interval [lo, hi] of the domain axis
///
/// Created once per problem setup and shared by every `XmuFunction` that
/// must be compatible for combination. Combining functions over unequal
/// universes is an error, never silently reconciled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    lo: f64,
    hi: f64,
}

impl Universe {
    /// Create a universe; rejects non-finite or reversed bounds
    pub fn new(lo: f64, hi: f64) -> XmuResult<Self> {
        if !lo.is_finite() {
            return Err(XmuError::domain("lo", format!("bound must be finite, got {}", lo)));
        }
        if !hi.is_finite() {
            return Err(XmuError::domain("hi", format!("bound must be finite, got {}", hi)));
        }
        if lo >= hi {
            return Err(XmuError::domain(
                "lo",
                format!("bounds are reversed or empty: [{}, {}]", lo, hi),
            ));
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Whether a value lies within the universe, bounds included
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
