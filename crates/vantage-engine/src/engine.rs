//! `EngineCore`: the six-phase tick (spec.md §4.5) and its async run loop.
//!
//! Grounded on `dt_sim::sim::Sim`: a struct owning every subsystem, driving
//! phase-ordered `process_tick` calls from a `run` loop. Unlike `Sim::run`
//! (loops until a configured `end_tick`, no concept of "forever"),
//! `EngineCore::run` drives a `tokio::time::interval` indefinitely until a
//! `watch::Receiver<bool>` shutdown signal fires (spec.md §4.5: "the next
//! tick fires at its scheduled time (no catch-up — ticks are not
//! queued)"; spec.md §5: "shutdown is cooperative... completes the
//! in-progress tick and then invoke[s] shutdown hooks").
//!
//! `EngineCore` itself is never shared: it is moved into the single
//! tokio task spawned by [`crate::Engine::start`] and is never touched
//! from an I/O task directly (spec.md §5's "Spatial Index... never
//! touched by I/O tasks", generalized here to the whole core — see
//! DESIGN.md for why this is a stronger guarantee than spec.md §5
//! strictly requires). External callers reach it only through the
//! channels `EngineCore::run` listens on.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use vantage_aoi::AoiTracker;
use vantage_authority::{MovementIntent, ValidationResult, Validator};
use vantage_core::{Correction, EngineConfig, EntityId, Point, SessionId, Tick};
use vantage_entity::{EntityKind, EntityStore, EntityStoreBuilder};
use vantage_mobility::MobilityEngine;
use vantage_schedule::IntentBuffer;
use vantage_spatial::{Quadtree, QuadtreeConfig};

use crate::observer::EngineObserver;
use crate::stats::Stats;

// ── Broadcast payloads (spec.md §4.5 phase 5, §6) ──────────────────────────────

/// Full state of a neighbor newly visible to an observer (spec.md §6
/// `EntityState`), sent once per AOI-enter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityState {
    pub entity: EntityId,
    pub position: Point,
    pub velocity: Point,
    pub last_update: Tick,
}

/// Position-only update for a neighbor that was already visible and has
/// moved since the last broadcast (spec.md §6: `MovementDelta` "also
/// reused server→client in broadcast for position-only updates").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementDelta {
    pub entity: EntityId,
    pub position: Point,
}

/// Why an entity is being despawned from an observer's view (spec.md §6
/// `Despawn{entityId, reason}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    /// The entity left the observer's AOI radius but is still live
    /// elsewhere in the world (spec.md §9's resolved open question).
    OutOfAoi,
    /// The entity was removed from the Entity Store entirely.
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Despawn {
    pub entity: EntityId,
    pub reason: DespawnReason,
}

/// The per-tick envelope for one observer (spec.md §6 `WorldSnapshot`).
///
/// Neighbors whose position is unchanged since the last broadcast
/// contribute nothing here (spec.md §4.3: "a persistent neighbor whose
/// position has not changed produces no broadcast content").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub entities: Vec<EntityState>,
    pub deltas: Vec<MovementDelta>,
}

impl WorldSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.deltas.is_empty()
    }
}

/// Everything owed to one observer's session at the end of a tick's AOI
/// phase: an optional `WorldSnapshot` and zero or more `Despawn` notices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObserverUpdate {
    pub session: SessionId,
    pub snapshot: WorldSnapshot,
    pub despawns: Vec<Despawn>,
}

impl ObserverUpdate {
    /// `true` if this update carries no broadcast content at all (spec.md
    /// §8 property 6: AOI idempotence — "hence no broadcast is emitted to
    /// that observer").
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty() && self.despawns.is_empty()
    }
}

/// Everything one tick produced: the AOI broadcasts (phase 5) and the
/// corrections accumulated across phases 2 and 3 (phase 6), each paired
/// with the session that owns the corrected entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutput {
    pub tick: Tick,
    pub updates: Vec<ObserverUpdate>,
    pub corrections: Vec<(SessionId, Correction)>,
}

// ── Commands from the Engine handle ────────────────────────────────────────────

/// Requests the `Engine` handle forwards into the tick task (spec.md §6's
/// `SpawnEntity`/`RemoveEntity`). Each carries a reply channel so the
/// handle's async method can await the result.
pub(crate) enum Command {
    Spawn {
        kind: EntityKind,
        type_tag: String,
        session: SessionId,
        position: Point,
        reply: oneshot::Sender<Result<EntityId, vantage_entity::EntityError>>,
    },
    Remove {
        entity: EntityId,
        reply: oneshot::Sender<Result<(), vantage_entity::EntityError>>,
    },
}

// ── EngineCore ──────────────────────────────────────────────────────────────────

/// The tick pipeline's sole owner. Constructed fresh by
/// [`crate::Engine::start`] and moved into the task it spawns.
pub(crate) struct EngineCore {
    config: EngineConfig,
    validator: Arc<dyn Validator>,
    stats: Arc<Stats>,

    store: EntityStore,
    aoi: AoiTracker,
    intents: IntentBuffer,

    current_tick: Tick,

    /// Entities removed since the last tick's AOI phase ran, so this
    /// tick's exit notices can be attributed `Removed` rather than the
    /// default `OutOfAoi` (spec.md §6: `Despawn{entityId, reason}`).
    removed_since_last_tick: Vec<EntityId>,
}

impl EngineCore {
    pub(crate) fn new(config: EngineConfig, validator: Arc<dyn Validator>, stats: Arc<Stats>) -> Self {
        let store = EntityStoreBuilder::new(config.max_entities, config.world_bounds).build();
        Self {
            config,
            validator,
            stats,
            store,
            aoi: AoiTracker::new(),
            intents: IntentBuffer::new(),
            current_tick: Tick::ZERO,
            removed_since_last_tick: Vec::new(),
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Spawn { kind, type_tag, session, position, reply } => {
                let result = self.store.spawn(kind, type_tag, session, position, self.current_tick);
                if result.is_ok() {
                    self.stats.entities_spawned.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
                let _ = reply.send(result);
            }
            Command::Remove { entity, reply } => {
                let result = self.store.remove(entity);
                if result.is_ok() {
                    self.stats.entities_removed.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                    self.aoi.forget(entity);
                    self.removed_since_last_tick.push(entity);
                }
                let _ = reply.send(result.map(|_| ()));
            }
        }
    }

    /// Run the tick pipeline's six phases once (spec.md §4.5).
    fn process_tick(&mut self, now: Tick) -> TickOutput {
        // Entities needing a resync, recorded during phase 2 as
        // `(entity, session, ack_sequence)` — the `Correction`'s
        // position/velocity are only known once phase 3 has integrated
        // motion, so construction is deferred until after that phase
        // (spec.md §8 S2: a `Correction`'s position reflects the
        // post-integration state, not the pre-integration one).
        let mut correction_acks: Vec<(EntityId, SessionId, u64)> = Vec::new();

        // ── Phase 1: drain intents ─────────────────────────────────────
        let drained = self.intents.drain_all();

        // ── Phase 2: apply intents, in ascending sequence per entity ──
        let mut touched: HashSet<EntityId> = HashSet::new();
        for (entity_id, intents) in drained {
            let Ok(entity) = self.store.get_mut(entity_id) else {
                // spec.md §7: "errors during the tick's internal
                // computation... are downgraded to telemetry and do not
                // abort the tick." A buffered intent for an entity
                // removed before this tick ran is one such case.
                debug!(?entity_id, "dropping buffered intents for removed entity");
                continue;
            };
            let mut entity_touched = false;
            for intent in intents {
                if apply_one_intent(entity, &intent, &self.config, self.validator.as_ref(), &mut correction_acks, &self.stats) {
                    entity_touched = true;
                }
            }
            if entity_touched {
                touched.insert(entity_id);
            }
        }

        // ── Phase 3: integrate motion (friction + velocity + bounds) ──
        let forced = MobilityEngine::integrate(&mut self.store, &touched, &self.config);

        let mut corrections: Vec<(SessionId, Correction)> = Vec::new();
        for (entity_id, session, ack_sequence) in correction_acks {
            if let Ok(e) = self.store.get(entity_id) {
                corrections.push((session, Correction::new(entity_id, e.position, e.velocity, ack_sequence)));
            }
        }
        for correction in forced {
            let session = self
                .store
                .get(correction.entity)
                .map(|e| e.session)
                .unwrap_or(SessionId::SENTINEL);
            corrections.push((session, correction));
        }

        // ── Phase 4: rebuild the spatial index ─────────────────────────
        let quadtree = Quadtree::build(
            self.config.world_bounds,
            QuadtreeConfig { capacity: self.config.quadtree_capacity, max_depth: self.config.quadtree_max_depth },
            self.store.position_snapshot(),
        );

        // ── Phase 5: compute AOI broadcasts ────────────────────────────
        let removed = std::mem::take(&mut self.removed_since_last_tick);
        let mut updates = Vec::new();
        let observer_ids: Vec<EntityId> = self
            .store
            .iter()
            .filter(|e| !e.session.is_sentinel())
            .map(|e| e.id)
            .collect();

        for observer_id in observer_ids {
            let Ok(observer) = self.store.get(observer_id) else { continue };
            let session = observer.session;
            let position = observer.position;

            let neighbor_ids = quadtree.query_circle(position, self.config.aoi_radius);
            let current: Vec<(EntityId, Point)> = neighbor_ids
                .into_iter()
                .filter(|&id| id != observer_id)
                .filter_map(|id| self.store.get(id).ok().map(|e| (id, e.position)))
                .collect();

            let diff = self.aoi.diff_and_commit(observer_id, current);
            if diff.is_empty() {
                continue;
            }

            let mut snapshot = WorldSnapshot::default();
            for id in &diff.entered {
                if let Ok(e) = self.store.get(*id) {
                    snapshot.entities.push(EntityState {
                        entity: *id,
                        position: e.position,
                        velocity: e.velocity,
                        last_update: now,
                    });
                }
            }
            for id in &diff.moved {
                if let Ok(e) = self.store.get(*id) {
                    snapshot.deltas.push(MovementDelta { entity: *id, position: e.position });
                }
            }
            let despawns = diff
                .exited
                .iter()
                .map(|&id| Despawn {
                    entity: id,
                    reason: if removed.contains(&id) { DespawnReason::Removed } else { DespawnReason::OutOfAoi },
                })
                .collect::<Vec<_>>();

            let update = ObserverUpdate { session, snapshot, despawns };
            if !update.is_empty() {
                updates.push(update);
            }
        }

        // ── Phase 6: emit corrections (already collected above) ───────
        self.stats.ticks_processed.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        Stats::add(&self.stats.corrections_emitted, corrections.len() as u64);

        TickOutput { tick: now, updates, corrections }
    }

    /// Drive the tick loop forever, until `shutdown_rx` reports `true`.
    pub(crate) async fn run<O: EngineObserver>(
        mut self,
        mut observer: O,
        mut shutdown_rx: watch::Receiver<bool>,
        mut cmd_rx: mpsc::Receiver<Command>,
        mut intent_rx: mpsc::UnboundedReceiver<MovementIntent>,
    ) {
        let mut ticker = tokio::time::interval(self.config.tick_period());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.current_tick;
                    observer.on_tick_start(now);

                    let started = Instant::now();
                    let output = self.process_tick(now);
                    let elapsed = started.elapsed();

                    observer.on_tick_end(now, &output);

                    if elapsed > self.config.tick_budget() {
                        warn!(tick = now.0, ?elapsed, "tick exceeded half its budget");
                        self.stats.tick_budget_exceeded.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        observer.on_tick_budget_exceeded(now, elapsed);
                    }

                    self.current_tick = now.next();
                }
                Some(cmd) = cmd_rx.recv() => {
                    self.handle_command(cmd);
                }
                Some(intent) = intent_rx.recv() => {
                    self.intents.push(intent);
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        observer.on_shutdown(self.current_tick);
    }

}

/// Apply one intent's validation outcome to `entity`. Returns `true` if
/// `entity`'s velocity was set from a validated delta (spec.md §4.4:
/// friction decay in phase 3 skips only entities with a *renewed*
/// intent this tick — a `Rejected` intent does not count as one).
fn apply_one_intent(
    entity: &mut vantage_entity::Entity,
    intent: &MovementIntent,
    config: &EngineConfig,
    validator: &dyn Validator,
    correction_acks: &mut Vec<(EntityId, SessionId, u64)>,
    stats: &Stats,
) -> bool {
    match validator.validate(entity, intent, config) {
        ValidationResult::Accepted(delta) => {
            entity.velocity = delta;
            entity.last_sequence = intent.sequence;
            Stats::incr(&stats.intents_accepted);
            true
        }
        ValidationResult::Clamped(delta) => {
            entity.velocity = delta;
            entity.last_sequence = intent.sequence;
            Stats::incr(&stats.intents_clamped);
            correction_acks.push((entity.id, entity.session, entity.last_sequence));
            true
        }
        ValidationResult::Rejected(_reason) => {
            Stats::incr(&stats.intents_rejected);
            correction_acks.push((entity.id, entity.session, entity.last_sequence));
            false
        }
    }
}
