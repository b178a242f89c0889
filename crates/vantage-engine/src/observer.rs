//! Tick-boundary hooks for test instrumentation and the demo binary's
//! periodic stats print (spec.md §6's `Stats()` surface).

use std::time::Duration;

use vantage_core::Tick;

use crate::engine::TickOutput;

/// Callbacks invoked from inside the tick task started by
/// [`Engine::start`][crate::Engine::start] at key points in the tick loop.
///
/// All methods have default no-op implementations, the same shape as the
/// teacher's `dt_sim::observer::SimObserver` — implementors override only
/// what they care about. Unlike `SimObserver::on_snapshot` (periodic
/// position-file writing, out of scope here per spec.md §1), `on_tick_end`
/// carries the tick's [`TickOutput`] so a caller can forward it to
/// whatever broadcast transport it owns (`vantage-net`, or nothing at all
/// in tests).
pub trait EngineObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, with everything the tick produced.
    fn on_tick_end(&mut self, _tick: Tick, _output: &TickOutput) {}

    /// Called when a tick's wall-clock duration exceeded half the
    /// configured period (spec.md §4.5: "the scheduler emits a telemetry
    /// warning but never skips phases").
    fn on_tick_budget_exceeded(&mut self, _tick: Tick, _elapsed: Duration) {}

    /// Called once after the final tick completes or a shutdown signal is
    /// observed (spec.md §5: "shutdown is cooperative... scheduler
    /// completes the in-progress tick and then invoke[s] shutdown hooks").
    fn on_shutdown(&mut self, _final_tick: Tick) {}
}

/// An [`EngineObserver`] that does nothing. Use when driving `run`/
/// `run_ticks` without needing callbacks (most tests).
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
