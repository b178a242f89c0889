//! Wire message variants (spec.md §6).
//!
//! Grounded on `echo-session-proto`'s `Message` enum: a plain externally-
//! tagged `enum` of payload structs, each `#[serde(rename_all =
//! "camelCase")]` so the wire field names match spec.md §6's literal
//! casing (`entityId`, `spawnX`, …) despite this crate's own snake_case
//! struct fields.

use serde::{Deserialize, Serialize};

/// One message crossing the wire in either direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Message {
    SpawnRequest(SpawnRequest),
    SpawnResponse(SpawnResponse),
    MovementDelta(MovementDelta),
    EntityState(EntityState),
    WorldSnapshot(WorldSnapshot),
    Correction(Correction),
    Despawn(Despawn),
    Heartbeat(Heartbeat),
}

impl Message {
    /// A short tag for logging — the variant name, not the wire
    /// discriminant (which `ciborium`'s externally-tagged representation
    /// already carries on the wire itself).
    pub fn kind(&self) -> &'static str {
        match self {
            Message::SpawnRequest(_) => "SpawnRequest",
            Message::SpawnResponse(_) => "SpawnResponse",
            Message::MovementDelta(_) => "MovementDelta",
            Message::EntityState(_) => "EntityState",
            Message::WorldSnapshot(_) => "WorldSnapshot",
            Message::Correction(_) => "Correction",
            Message::Despawn(_) => "Despawn",
            Message::Heartbeat(_) => "Heartbeat",
        }
    }
}

/// Client→server: spawn a new entity (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRequest {
    pub entity_type: String,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

/// Server→client: the outcome of a [`SpawnRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpawnResponse {
    pub success: bool,
    pub entity_id: u32,
    pub error_message: String,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

/// Client→server: a requested velocity change. Also reused server→client
/// in [`WorldSnapshot::deltas`] for position-only broadcast updates
/// (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementDelta {
    pub entity_id: u32,
    pub sequence: u64,
    pub delta_x: f32,
    pub delta_y: f32,
    pub timestamp: u64,
}

/// A planar coordinate pair, as carried inside [`EntityState`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct WirePoint {
    pub x: f64,
    pub y: f64,
}

/// Server→client: full state for a neighbor newly visible in an
/// observer's AOI (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityState {
    pub entity_id: u32,
    pub position: WirePoint,
    pub velocity: WirePoint,

    /// Facing angle in radians, derived from `velocity` (`atan2(y, x)`,
    /// `0.0` at rest) — spec.md §6 names this field but assigns it no
    /// server-side semantics of its own; the engine tracks no heading
    /// distinct from velocity direction.
    pub rotation: f32,
    pub last_update: u64,
}

/// Server→client: the per-tick envelope for one observer (spec.md §6).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    pub entities: Vec<EntityState>,
    pub deltas: Vec<MovementDelta>,
}

/// Server→client: resynchronization after any Clamped/Rejected
/// validation or integration clamp (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub entity_id: u32,
    pub correct_x: f64,
    pub correct_y: f64,
    pub correct_velocity_x: f64,
    pub correct_velocity_y: f64,
    pub ack_sequence: u64,
}

/// Server→client: an entity leaving AOI or being destroyed (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Despawn {
    pub entity_id: u32,
    pub reason: String,
}

/// Either direction: resets the sender's liveness deadline (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Heartbeat {
    pub client_id: u64,
}
