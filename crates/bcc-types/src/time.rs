//! Chain time.
//!
//! `TimePoint` is an instant in microseconds since the Unix epoch; `Micros`
//! is a signed microsecond duration. Both are plain integers under the hood:
//! timestamps are read from the controller's pending block state, never from
//! the wall clock, so they are pure inputs rather than sources of
//! nondeterminism.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An instant, in microseconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimePoint(pub i64);

impl TimePoint {
    /// The zero instant. Doubles as "unset" in creation-time parameters.
    pub const ZERO: TimePoint = TimePoint(0);

    pub fn from_micros(us: i64) -> Self {
        TimePoint(us)
    }

    pub fn from_seconds(s: i64) -> Self {
        TimePoint(s * 1_000_000)
    }

    pub fn micros(&self) -> i64 {
        self.0
    }
}

/// A signed duration in microseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Micros(pub i64);

impl Micros {
    pub const ZERO: Micros = Micros(0);

    /// The unbounded delay used when a provided delay reaches the chain's
    /// maximum transaction delay.
    pub const MAX: Micros = Micros(i64::MAX);

    pub fn seconds(s: i64) -> Self {
        Micros(s * 1_000_000)
    }

    pub fn from_micros(us: i64) -> Self {
        Micros(us)
    }

    pub fn count(&self) -> i64 {
        self.0
    }

    pub fn as_millis(&self) -> i64 {
        self.0 / 1_000
    }
}

impl Add<Micros> for TimePoint {
    type Output = TimePoint;

    fn add(self, rhs: Micros) -> TimePoint {
        TimePoint(self.0.saturating_add(rhs.0))
    }
}

impl Sub<TimePoint> for TimePoint {
    type Output = Micros;

    fn sub(self, rhs: TimePoint) -> Micros {
        Micros(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

impl fmt::Display for Micros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}
