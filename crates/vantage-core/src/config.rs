//! Engine configuration.
//!
//! `EngineConfig` is the validated, immutable-for-the-process configuration
//! struct from spec.md §3/§6. Grounded on `dt_core::time::SimConfig`'s
//! shape (flat struct of tunables with a `validate`/derived-helper
//! convention) but populated with this spec's fields rather than the
//! teacher's (no `seed`, no `num_threads` — no stochastic behavior model or
//! Rayon parallel phase exists in this domain).
//!
//! Loading this struct from YAML/TOML/JSON is the named external
//! collaborator from spec.md §1 ("the YAML configuration loader") and is
//! out of scope here; an embedding application constructs `EngineConfig`
//! directly or via `serde` deserialization (enabled by the `serde`
//! feature) and calls [`EngineConfig::validate`] before handing it to
//! `vantage-engine`.

use crate::error::{CoreError, CoreResult};
use crate::geo::Rect;

/// Immutable-for-the-process simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Fixed timestep, in milliseconds. Bounded 10–100 ms (spec.md §6).
    pub tick_period_ms: u32,

    /// The world rectangle. Entity positions must lie within this bound
    /// except mid-tick (spec.md §3).
    pub world_bounds: Rect,

    /// Speed bound: the cap on the magnitude of any single validated
    /// intent's delta, in world-units per tick (spec.md §9's resolved
    /// reading of `maxSpeed`).
    pub max_speed: f64,

    /// Radius (world units) within which an observer is entitled to
    /// receive broadcasts about a neighbor.
    pub aoi_radius: f64,

    /// Quadtree node capacity before subdivision is attempted.
    pub quadtree_capacity: usize,

    /// Maximum quadtree subdivision depth.
    pub quadtree_max_depth: u32,

    /// Maximum number of simultaneously live entities.
    pub max_entities: usize,

    /// Bounded depth of each session's outbound broadcast queue.
    pub outbound_queue_depth: usize,

    /// Number of ticks a session may go without a heartbeat before its
    /// liveness deadline is considered missed (spec.md §5: "configurable
    /// pong/heartbeat deadline" — spec.md leaves the exact bound unnamed,
    /// so it is made an explicit config field here).
    pub heartbeat_timeout_ticks: u64,

    /// Maximum accepted inbound frame size in bytes (spec.md §6:
    /// "messages larger than a configured maximum are logged and
    /// discarded without teardown" — the maximum itself is unnamed in
    /// spec.md, so it is made an explicit config field here).
    pub max_frame_bytes: usize,
}

/// Friction factor applied to every entity's velocity once per tick, after
/// intent application (spec.md §4.4). Not configurable — spec.md states it
/// as a fixed constant.
pub const FRICTION_FACTOR: f64 = 0.95;

/// Teleport-guard multiplier on `max_speed` (spec.md §4.4, rule 3).
pub const TELEPORT_MULTIPLIER: f64 = 3.0;

impl EngineConfig {
    /// Validate every bound named in spec.md §6. Returns the first
    /// violation found.
    pub fn validate(&self) -> CoreResult<()> {
        if !(10..=100).contains(&self.tick_period_ms) {
            return Err(CoreError::Config(format!(
                "tick_period_ms must be in 10..=100, got {}",
                self.tick_period_ms
            )));
        }
        if !(10..=1000).contains(&self.max_entities) {
            return Err(CoreError::Config(format!(
                "max_entities must be in 10..=1000, got {}",
                self.max_entities
            )));
        }
        if self.world_bounds.min_x >= self.world_bounds.max_x
            || self.world_bounds.min_y >= self.world_bounds.max_y
        {
            return Err(CoreError::Config(format!(
                "world_bounds must have min < max on both axes, got {}",
                self.world_bounds
            )));
        }
        if self.max_speed <= 0.0 {
            return Err(CoreError::Config("max_speed must be > 0".into()));
        }
        if self.aoi_radius <= 0.0 {
            return Err(CoreError::Config("aoi_radius must be > 0".into()));
        }
        if self.quadtree_capacity < 1 {
            return Err(CoreError::Config("quadtree_capacity must be >= 1".into()));
        }
        if self.quadtree_max_depth < 1 {
            return Err(CoreError::Config("quadtree_max_depth must be >= 1".into()));
        }
        if self.outbound_queue_depth < 1 {
            return Err(CoreError::Config("outbound_queue_depth must be >= 1".into()));
        }
        Ok(())
    }

    /// `tick_period_ms` as a `std::time::Duration`, for use with
    /// `tokio::time::interval`.
    #[inline]
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_period_ms as u64)
    }

    /// Half the configured tick period — the tick-budget-overrun threshold
    /// from spec.md §4.5.
    #[inline]
    pub fn tick_budget(&self) -> std::time::Duration {
        self.tick_period() / 2
    }
}

#[cfg(any(test, feature = "test-support"))]
impl EngineConfig {
    /// The literal scenario configuration used throughout spec.md §8
    /// (world bounds −1000…+1000, tickPeriod 25ms, maxSpeed 5.0, aoiRadius
    /// 100).
    ///
    /// Gated behind the `test-support` feature (rather than bare
    /// `#[cfg(test)]`) so downstream crates' own test suites can depend on
    /// it too — `cfg(test)` is per-crate, so a plain `cfg(test)` gate here
    /// would be invisible from `vantage-authority`'s or `vantage-engine`'s
    /// `tests.rs`.
    pub fn test_default() -> Self {
        Self {
            tick_period_ms: 25,
            world_bounds: Rect::new(-1000.0, -1000.0, 1000.0, 1000.0),
            max_speed: 5.0,
            aoi_radius: 100.0,
            quadtree_capacity: 4,
            quadtree_max_depth: 8,
            max_entities: 1000,
            outbound_queue_depth: 2,
            heartbeat_timeout_ticks: 400, // 10s at 25ms/tick
            max_frame_bytes: 64 * 1024,
        }
    }
}
