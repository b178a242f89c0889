//! Engine counters and gauges (spec.md §6: `Engine::Stats()` — "a snapshot
//! map of counters and gauges").
//!
//! Backed by `AtomicU64` rather than plain fields, unlike the teacher's
//! `SimObserver`-collected counters (which only ever run on the single
//! thread driving `Sim::run`): spec.md §6 lets `Stats()` be called at any
//! time from outside the tick loop (an operational endpoint, a periodic
//! print in the demo binary), concurrently with the tick thread's writes,
//! so a `Stats` handle is meant to be cloned out via `Arc` and read from
//! another task without synchronizing with the tick.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live, thread-safe simulation counters.
#[derive(Default)]
pub struct Stats {
    pub ticks_processed: AtomicU64,
    pub entities_spawned: AtomicU64,
    pub entities_removed: AtomicU64,
    pub intents_accepted: AtomicU64,
    pub intents_clamped: AtomicU64,
    pub intents_rejected: AtomicU64,
    pub corrections_emitted: AtomicU64,
    pub tick_budget_exceeded: AtomicU64,
}

/// A point-in-time read of every [`Stats`] counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub ticks_processed: u64,
    pub entities_spawned: u64,
    pub entities_removed: u64,
    pub intents_accepted: u64,
    pub intents_clamped: u64,
    pub intents_rejected: u64,
    pub corrections_emitted: u64,
    pub tick_budget_exceeded: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        if n > 0 {
            counter.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// A consistent-enough snapshot for reporting. Individual fields may
    /// be read at slightly different instants relative to one another
    /// (no cross-field atomicity), which is acceptable for the
    /// operational counters/gauges spec.md §6 describes.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ticks_processed: self.ticks_processed.load(Ordering::Relaxed),
            entities_spawned: self.entities_spawned.load(Ordering::Relaxed),
            entities_removed: self.entities_removed.load(Ordering::Relaxed),
            intents_accepted: self.intents_accepted.load(Ordering::Relaxed),
            intents_clamped: self.intents_clamped.load(Ordering::Relaxed),
            intents_rejected: self.intents_rejected.load(Ordering::Relaxed),
            corrections_emitted: self.corrections_emitted.load(Ordering::Relaxed),
            tick_budget_exceeded: self.tick_budget_exceeded.load(Ordering::Relaxed),
        }
    }
}
