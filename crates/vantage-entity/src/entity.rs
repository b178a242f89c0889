//! The entity record (spec.md §3).

use vantage_core::{EntityId, Point, SessionId, Tick};

/// What spawned and owns an entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Owned by a live client session; accepts movement intents from that
    /// session only.
    Player,
    /// Server-driven; has no owning session and accepts no client intents.
    Npc,
}

/// One entity's authoritative state, as held by `vantage-engine` between
/// ticks.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,

    /// Opaque client-assigned type tag (spec.md §3: "type tag (string)"),
    /// e.g. `"alien"` or `"vehicle"` — carried verbatim from the spawning
    /// `SpawnRequest.entityType` and otherwise uninterpreted by the core.
    /// Distinct from [`EntityKind`], which governs whether the entity
    /// accepts client movement intents at all.
    pub type_tag: String,

    /// Owning session, or `SessionId::SENTINEL` for NPCs (spec.md §3).
    pub session: SessionId,

    /// Authoritative world position, always within world bounds between
    /// ticks (spec.md §3's invariant; enforced by `vantage-mobility`).
    pub position: Point,

    /// Current velocity, world units per tick. Decays by the fixed
    /// friction factor every tick (spec.md §4.4).
    pub velocity: Point,

    /// Sequence number of the last movement intent accepted from this
    /// entity's owning session (spec.md §3: "last-applied sequence number
    /// (unsigned 64-bit)"; rejects any intent whose sequence is not
    /// strictly greater, spec.md §4.4 rule 1). Always 0 for NPCs, which
    /// receive no client intents.
    pub last_sequence: u64,

    /// The tick this entity was spawned on.
    pub spawned_at: Tick,
}

impl Entity {
    /// Construct a freshly spawned entity at rest.
    pub fn spawn(
        id: EntityId,
        kind: EntityKind,
        type_tag: String,
        session: SessionId,
        position: Point,
        tick: Tick,
    ) -> Self {
        Self {
            id,
            kind,
            type_tag,
            session,
            position,
            velocity: Point::ZERO,
            last_sequence: 0,
            spawned_at: tick,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }
}
