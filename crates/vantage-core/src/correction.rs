//! Server-to-client resynchronization message (spec.md §4.4, §6).

use crate::geo::Point;
use crate::ids::EntityId;

/// Sent to a session whenever the entity it owns diverges from what the
/// client predicted — after a `Clamped`/`Rejected` validation result, or
/// after a forced bounds clamp during integration (spec.md §8 property 8:
/// "every Rejected or Clamped validation result produces exactly one
/// Correction... within the same tick").
///
/// Shared here, rather than owned by the crate that first produces it,
/// because `vantage-authority`, `vantage-mobility`, and `vantage-engine`
/// all construct these independently within the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Correction {
    pub entity: EntityId,
    pub correct_position: Point,
    pub correct_velocity: Point,

    /// The entity's `last_sequence` as of this Correction — `0` when the
    /// triggering intent was rejected before ever advancing it (spec.md
    /// §8 S3: "one Correction emitted with `ackSequence=0`").
    pub ack_sequence: u64,
}

impl Correction {
    pub fn new(entity: EntityId, correct_position: Point, correct_velocity: Point, ack_sequence: u64) -> Self {
        Self { entity, correct_position, correct_velocity, ack_sequence }
    }
}
