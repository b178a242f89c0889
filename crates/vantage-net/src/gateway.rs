//! Translates inbound wire [`Message`]s into calls against a running
//! [`vantage_engine::Engine`], and enqueues the immediate replies those
//! calls produce (spec.md §6's client-originated messages:
//! `SpawnRequest`, `MovementDelta`, `Heartbeat`).
//!
//! Grounded on `echo-session-service::handle_message`'s dispatch-by-variant
//! shape, adapted from that example's single in-process `HubState` to
//! calls across the channel boundary into `vantage-engine`.

use tracing::warn;

use vantage_authority::MovementIntent;
use vantage_core::{EntityId, Point, SessionId, Tick};
use vantage_engine::Engine;
use vantage_entity::EntityKind;

use crate::error::NetResult;
use crate::protocol::{self, Message};
use crate::session::SessionTable;

/// Apply one inbound message from `session` to `engine`, recording any
/// immediate reply on `table`'s outbound queue for that session.
///
/// `now` is the gateway's own notion of the current tick, used only to
/// reset the session's heartbeat deadline — the engine's tick count is
/// not synchronously observable from here (spec.md §5: the Entity Store
/// and its tick are reached only from inside the tick task).
pub async fn handle_inbound(engine: &Engine, table: &mut SessionTable, session: SessionId, now: Tick, message: Message) -> NetResult<()> {
    match message {
        Message::SpawnRequest(req) => handle_spawn(engine, table, session, req).await,
        Message::MovementDelta(delta) => handle_movement(engine, delta),
        Message::Heartbeat(hb) => {
            table.record_heartbeat(session, now);
            let _ = hb.client_id;
            Ok(())
        }
        other => {
            warn!(kind = other.kind(), ?session, "ignoring server-originated message received from a client");
            Ok(())
        }
    }
}

/// A `SpawnRequest` always arrives over a live client session, so the
/// resulting entity is always `EntityKind::Player` — `entityType` is
/// spec.md §3's opaque type-tag attribute, not a `Player`/`Npc` selector,
/// and is carried through to the entity record uninterpreted. Spec.md
/// §4.1 names exactly two spawn failure modes (`BoundsError`,
/// `CapacityError`); an arbitrary `entityType` string is not one of them.
async fn handle_spawn(engine: &Engine, table: &mut SessionTable, session: SessionId, req: protocol::SpawnRequest) -> NetResult<()> {
    let response = match engine
        .spawn_entity(EntityKind::Player, req.entity_type.clone(), session, Point::new(req.spawn_x, req.spawn_y))
        .await
    {
        Ok(entity) => {
            if let Some(s) = table.get_mut(session) {
                s.bind_entity(entity);
            }
            protocol::SpawnResponse { success: true, entity_id: entity.0, error_message: String::new(), spawn_x: req.spawn_x, spawn_y: req.spawn_y }
        }
        Err(e) => protocol::SpawnResponse { success: false, entity_id: 0, error_message: e.to_string(), spawn_x: req.spawn_x, spawn_y: req.spawn_y },
    };

    if let Some(s) = table.get_mut(session) {
        s.try_send(Message::SpawnResponse(response));
    }
    Ok(())
}

fn handle_movement(engine: &Engine, delta: protocol::MovementDelta) -> NetResult<()> {
    let intent = MovementIntent {
        entity: EntityId(delta.entity_id),
        sequence: delta.sequence,
        delta: Point::new(delta.delta_x as f64, delta.delta_y as f64),
        client_timestamp: delta.timestamp,
    };
    engine.process_movement_intent(intent).map_err(Into::into)
}
