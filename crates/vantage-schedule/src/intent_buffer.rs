//! Inbound movement-intent staging (spec.md §4.5 phase 1).

use std::collections::HashMap;

use vantage_authority::MovementIntent;
use vantage_core::EntityId;

/// Holds movement intents as they arrive from sessions between tick
/// boundaries, keyed by target entity.
///
/// Grounded on `dt_schedule::wake_queue::WakeQueue`'s role (a sparse
/// collection drained once per tick, rather than scanned), simplified
/// from a tick-keyed priority queue — `WakeQueue` schedules agents to
/// wake at a computed *future* tick, but spec.md §3's Movement Intent
/// lifecycle always applies a buffered intent on the very next tick, so
/// there is only ever one pending bucket, not one per future tick.
#[derive(Default)]
pub struct IntentBuffer {
    pending: HashMap<EntityId, Vec<MovementIntent>>,
}

impl IntentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage one intent. An entity may accumulate more than one intent
    /// before the next tick drains the buffer (spec.md §4.5 phase 2:
    /// "process intents in ascending `sequence` order" — implying more
    /// than one can arrive per entity per tick).
    pub fn push(&mut self, intent: MovementIntent) {
        self.pending.entry(intent.entity).or_default().push(intent);
    }

    /// Total number of staged intents across all entities.
    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move every staged intent out of the buffer, grouped by entity and
    /// sorted ascending by `sequence` within each entity's list (spec.md
    /// §4.5 phase 1: "move all buffered movement intents out of the
    /// inbound staging area into per-entity ordered lists").
    ///
    /// The buffer is empty after this call.
    pub fn drain_all(&mut self) -> HashMap<EntityId, Vec<MovementIntent>> {
        let mut drained = std::mem::take(&mut self.pending);
        for intents in drained.values_mut() {
            intents.sort_by_key(|i| i.sequence);
        }
        drained
    }
}
