//! Buffered client-originated movement desire (spec.md §3, "Movement Intent").

use vantage_core::{EntityId, Point};

/// One client's requested velocity change for the next tick.
///
/// `delta` is interpreted as a *velocity*, not a position offset (spec.md
/// §3: "delta X/Y (interpreted as velocity in world-units per tick, not
/// position offset)"). Buffered by `vantage-schedule` on arrival and
/// drained in ascending `sequence` order during the next tick's
/// intent-application phase (spec.md §4.5 phase 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// The entity this intent targets.
    pub entity: EntityId,

    /// Client-assigned sequence number. Must be strictly greater than the
    /// target entity's `last_sequence` to be accepted (spec.md §4.4 rule 1).
    pub sequence: u64,

    /// Requested velocity change, world-units per tick.
    pub delta: Point,

    /// Client-reported timestamp, carried through unvalidated (spec.md §3
    /// lists it as an attribute but assigns it no server-side semantics).
    pub client_timestamp: u64,
}
