//! Live session bookkeeping: the table of connected clients and each
//! one's outbound queue and heartbeat deadline.
//!
//! Grounded on `echo-session-service::main`'s `HubState`/`ConnState`
//! pair, but keyed by [`SessionId`] rather than a raw connection counter
//! and carrying a `last_heartbeat` tick instead of a last-timestamp,
//! since liveness here is judged in tick units (spec.md §5).

use std::collections::HashMap;

use tokio::sync::mpsc;

use vantage_core::{EntityId, SessionId, Tick};

use crate::protocol::Message;

/// One connected client's outbound queue and liveness bookkeeping.
pub struct Session {
    pub id: SessionId,
    tx: mpsc::Sender<Message>,

    /// Bound entity id, `EntityId::SENTINEL` until a `SpawnRequest` from
    /// this session is accepted (spec.md §3 Session: "bound entity id (0
    /// until spawn acknowledged)").
    pub entity: EntityId,

    /// The tick at which this session's heartbeat deadline was last
    /// reset, either by an inbound `Heartbeat` or at registration.
    pub last_heartbeat: Tick,

    /// Count of outbound messages dropped for this session because its
    /// queue was full (spec.md §4.6: "drop counters exposed per
    /// session").
    pub dropped: u64,
}

impl Session {
    fn new(id: SessionId, tx: mpsc::Sender<Message>, registered_at: Tick) -> Self {
        Self { id, tx, entity: EntityId::SENTINEL, last_heartbeat: registered_at, dropped: 0 }
    }

    /// Record the entity this session's `SpawnRequest` was accepted for
    /// (spec.md §3 Session: "at most one live entity per session").
    pub fn bind_entity(&mut self, entity: EntityId) {
        self.entity = entity;
    }

    /// Enqueue `message` without waiting for room, dropping it and
    /// incrementing [`Session::dropped`] if the queue is already full
    /// (spec.md §4.6: "drop-newest on full; the session is not closed").
    pub fn try_send(&mut self, message: Message) {
        if let Err(mpsc::error::TrySendError::Full(_)) = self.tx.try_send(message) {
            self.dropped += 1;
        }
    }

    /// `true` if `now` is at or past this session's heartbeat deadline
    /// (spec.md §5: "a session whose heartbeat deadline has passed is
    /// disconnected").
    pub fn heartbeat_expired(&self, now: Tick, timeout_ticks: u64) -> bool {
        now.since(self.last_heartbeat) >= timeout_ticks
    }
}

/// The set of currently connected sessions, keyed by [`SessionId`].
#[derive(Default)]
pub struct SessionTable {
    sessions: HashMap<SessionId, Session>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session with a bounded outbound queue of
    /// `queue_depth` (spec.md §4.6's per-session outbound queue).
    /// Returns the receiving half the connection's writer task should
    /// drain.
    pub fn register(&mut self, id: SessionId, queue_depth: usize, registered_at: Tick) -> mpsc::Receiver<Message> {
        let (tx, rx) = mpsc::channel(queue_depth);
        self.sessions.insert(id, Session::new(id, tx, registered_at));
        rx
    }

    pub fn deregister(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Reset `id`'s heartbeat deadline to `now` (spec.md §6 `Heartbeat`:
    /// "resets the sender's liveness deadline").
    pub fn record_heartbeat(&mut self, id: SessionId, now: Tick) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.last_heartbeat = now;
        }
    }

    /// Every session whose heartbeat deadline has passed as of `now`.
    pub fn expired(&self, now: Tick, timeout_ticks: u64) -> Vec<SessionId> {
        self.sessions.values().filter(|s| s.heartbeat_expired(now, timeout_ticks)).map(|s| s.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }
}
