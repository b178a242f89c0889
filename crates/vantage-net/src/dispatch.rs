//! Translates one tick's [`vantage_engine::TickOutput`] into wire
//! messages and enqueues them on each observer's outbound queue.
//!
//! Grounded on `echo-session-service::handle_message`'s fan-out over
//! `HubState.conns`, but diverging from that example's blocking
//! `tx.send(...).await` on the per-connection channel: spec.md §4.6
//! requires a bounded queue that drops the newest message rather than
//! makes the tick task wait, so every enqueue here goes through
//! [`Session::try_send`] instead.

use vantage_core::{Correction as CoreCorrection, SessionId, Tick};
use vantage_engine::{DespawnReason, Engine, TickOutput};

use crate::protocol::{self, Message, WirePoint};
use crate::session::SessionTable;

fn to_wire_point(p: vantage_core::Point) -> WirePoint {
    WirePoint { x: p.x, y: p.y }
}

fn to_wire_correction(entity: vantage_core::EntityId, correction: &CoreCorrection) -> protocol::Correction {
    protocol::Correction {
        entity_id: entity.0,
        correct_x: correction.correct_position.x,
        correct_y: correction.correct_position.y,
        correct_velocity_x: correction.correct_velocity.x,
        correct_velocity_y: correction.correct_velocity.y,
        ack_sequence: correction.ack_sequence,
    }
}

fn despawn_reason_text(reason: DespawnReason) -> &'static str {
    match reason {
        DespawnReason::OutOfAoi => "out_of_aoi",
        DespawnReason::Removed => "removed",
    }
}

/// Enqueue every message one tick's output owes to its observers,
/// dropping silently (per [`Session::try_send`]'s semantics) onto any
/// session whose outbound queue is already full.
///
/// Sessions named in `output` but no longer present in `table` (the
/// connection closed between the AOI computation and dispatch) are
/// skipped — spec.md §5 treats the outbound queue, not the tick, as the
/// synchronization point with I/O tasks.
pub fn dispatch_tick(table: &mut SessionTable, output: &TickOutput) {
    for update in &output.updates {
        let Some(session) = table.get_mut(update.session) else { continue };

        if !update.snapshot.is_empty() {
            let entities = update
                .snapshot
                .entities
                .iter()
                .map(|e| protocol::EntityState {
                    entity_id: e.entity.0,
                    position: to_wire_point(e.position),
                    velocity: to_wire_point(e.velocity),
                    rotation: heading(e.velocity),
                    last_update: e.last_update.0,
                })
                .collect();
            let deltas = update
                .snapshot
                .deltas
                .iter()
                .map(|d| protocol::MovementDelta {
                    entity_id: d.entity.0,
                    sequence: 0,
                    delta_x: d.position.x as f32,
                    delta_y: d.position.y as f32,
                    timestamp: 0,
                })
                .collect();
            session.try_send(Message::WorldSnapshot(protocol::WorldSnapshot { entities, deltas }));
        }

        for despawn in &update.despawns {
            session.try_send(Message::Despawn(protocol::Despawn {
                entity_id: despawn.entity.0,
                reason: despawn_reason_text(despawn.reason).to_string(),
            }));
        }
    }

    for (session_id, correction) in &output.corrections {
        dispatch_correction(table, *session_id, correction);
    }
}

fn dispatch_correction(table: &mut SessionTable, session_id: SessionId, correction: &CoreCorrection) {
    if session_id.is_sentinel() {
        // NPCs have no owning session to correct (spec.md §3: "NPC-like
        // entities have no owning session").
        return;
    }
    let Some(session) = table.get_mut(session_id) else { return };
    session.try_send(Message::Correction(to_wire_correction(correction.entity, correction)));
}

/// Facing angle derived from velocity, `0.0` at rest (spec.md §6's
/// `EntityState.rotation` carries no server-tracked heading of its own).
fn heading(velocity: vantage_core::Point) -> f32 {
    if velocity.x == 0.0 && velocity.y == 0.0 {
        0.0
    } else {
        (velocity.y as f32).atan2(velocity.x as f32)
    }
}

/// Tear down every session whose heartbeat deadline has passed as of
/// `now` (spec.md §4.6: "a session whose liveness deadline has expired
/// is removed; its queue is closed; its entity is despawned via the
/// Entity Store"; spec.md §5: "missed deadline causes session teardown
/// at the next tick boundary, not mid-tick" — callers invoke this once
/// per tick, after that tick's dispatch).
///
/// Dropping the returned `Session` closes its outbound queue (the
/// writer task's `recv()` returns `None` and it exits); removal from the
/// `EntityStore` happens through `engine`, same as an explicit
/// `RemoveEntity` call.
pub async fn reap_expired(table: &mut SessionTable, engine: &Engine, now: Tick, timeout_ticks: u64) {
    for session_id in table.expired(now, timeout_ticks) {
        let Some(session) = table.deregister(session_id) else { continue };
        if !session.entity.is_sentinel() {
            let _ = engine.remove_entity(session.entity).await;
        }
    }
}
