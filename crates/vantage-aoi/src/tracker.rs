//! Per-observer area-of-interest tracking.
//!
//! Grounded on the retrieval pack's grid-space AOI tracker (a `known:
//! BTreeMap<EntityId, Pos>` per observer, diffed each tick against a fresh
//! neighbor query into entered/moved/left sets) and on
//! `dt_schedule::wake_queue::WakeQueue`'s sparse, map-keyed,
//! drain-per-tick bookkeeping shape. Unlike that wake queue (keyed by
//! future tick), `AoiTracker` is keyed by observer and diffed every tick
//! against the current quadtree query rather than waiting for a future
//! wake.

use std::collections::HashMap;

use vantage_core::{EntityId, Point};

/// The result of diffing one observer's current neighbor set against its
/// remembered one (spec.md §4.3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AoiDiff {
    /// Neighbors visible this tick that were not visible last tick —
    /// a full `EntityState` broadcast is owed to the observer for each
    /// (spec.md §4.3: "the observer must be sent the full entity state").
    pub entered: Vec<EntityId>,

    /// Neighbors visible both last tick and this tick whose position
    /// changed since the position last broadcast — a `MovementDelta` is
    /// owed (spec.md §4.3: "sent a movement delta iff the position in
    /// memory differs from the current position").
    pub moved: Vec<EntityId>,

    /// Neighbors visible both last tick and this tick whose position is
    /// unchanged since the last broadcast — spec.md §4.3: "a persistent
    /// neighbor whose position has not changed produces no broadcast
    /// content for this observer."
    pub unchanged: Vec<EntityId>,

    /// Neighbors visible last tick but not this tick — an explicit
    /// `Despawn{reason:"out_of_aoi"}` is owed (spec.md §9's resolved open
    /// question).
    pub exited: Vec<EntityId>,
}

impl AoiDiff {
    /// `true` if this tick's diff owes the observer no broadcast content
    /// at all (used by the idempotence property, spec.md §8 property 6).
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.moved.is_empty() && self.exited.is_empty()
    }
}

/// Tracks, per observer, the position last broadcast for each visible
/// neighbor — spec.md §3's "AOI Memory": "mapping from observed entity id
/// to the last position broadcast to this observer".
#[derive(Default)]
pub struct AoiTracker {
    memory: HashMap<EntityId, HashMap<EntityId, Point>>,
}

impl AoiTracker {
    pub fn new() -> Self {
        Self { memory: HashMap::new() }
    }

    /// Diff `observer`'s fresh neighbor set (as just returned by a
    /// quadtree query, paired with each neighbor's *current* position)
    /// against its remembered set, classify the difference, and commit
    /// the fresh set as the new memory.
    ///
    /// Commit is atomic with respect to the returned diff: any later call
    /// sees exactly the `current` set passed here, never a partial mix
    /// with the prior tick's memory (spec.md §4.3: "a partial commit
    /// during tick processing is forbidden").
    pub fn diff_and_commit(
        &mut self,
        observer: EntityId,
        current: impl IntoIterator<Item = (EntityId, Point)>,
    ) -> AoiDiff {
        let current: HashMap<EntityId, Point> = current.into_iter().collect();
        let previous = self.memory.get(&observer);

        let mut diff = AoiDiff::default();
        for (&id, &pos) in &current {
            match previous.and_then(|p| p.get(&id)) {
                None => diff.entered.push(id),
                Some(&last_pos) if last_pos == pos => diff.unchanged.push(id),
                Some(_) => diff.moved.push(id),
            }
        }
        if let Some(prev) = previous {
            for &id in prev.keys() {
                if !current.contains_key(&id) {
                    diff.exited.push(id);
                }
            }
        }

        if current.is_empty() {
            self.memory.remove(&observer);
        } else {
            self.memory.insert(observer, current);
        }

        diff
    }

    /// Drop an observer's memory outright — called when the observer
    /// itself despawns, so a later id reuse (which never happens, per
    /// `vantage-entity`, but a stale session reconnect could still reuse
    /// the tracker) never inherits a prior observer's visibility state.
    pub fn forget(&mut self, observer: EntityId) {
        self.memory.remove(&observer);
    }

    /// `true` if no observer currently has any remembered neighbors.
    pub fn is_empty(&self) -> bool {
        self.memory.values().all(|m| m.is_empty())
    }
}
