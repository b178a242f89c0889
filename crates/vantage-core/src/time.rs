//! Tick model.
//!
//! Time is represented as a monotonically increasing `Tick` counter — all
//! schedule arithmetic (sequence comparisons, liveness deadlines) is exact
//! integer comparison, no floating-point drift. Unlike the teacher's
//! `dt_core::time`, this crate carries no wall-clock mapping (`SimClock`):
//! spec.md's tick period is a *real-time* scheduling interval (10–100 ms,
//! spec.md §6), driven directly by `tokio::time::interval` in
//! `vantage-engine`, not a simulated-time unit that needs a
//! unix-timestamp projection.

use std::fmt;

/// An absolute tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self` (via `u64` subtraction
    /// overflow checks).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Advance to the next tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
