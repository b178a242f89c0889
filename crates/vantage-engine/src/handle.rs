//! [`Engine`]: the cloneable process-facing handle spec.md §6 names
//! ("the core exposes an `Engine` handle with `Start(ctx)`,
//! `Shutdown(ctx)`, `ProcessMovementIntent(entityId, intent)`,
//! `SpawnEntity(type, x, y, sessionId)`, `RemoveEntity(entityId)`, and
//! `Stats()`").
//!
//! `Engine` itself holds no entity state — only the channels that reach
//! the [`EngineCore`] task started by [`Engine::start`], plus the shared
//! [`Stats`] counters the running task writes into. This is the
//! structural choice DESIGN.md records for spec.md §5: rather than a
//! lock shared between I/O tasks and the tick task, the store has a
//! single owner (the tick task) and every other task reaches it only
//! through a channel.

use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use vantage_authority::{MovementIntent, Validator};
use vantage_core::{EngineConfig, EntityId, Point, SessionId};
use vantage_entity::EntityKind;

use crate::engine::{Command, EngineCore};
use crate::error::{EngineError, EngineResult};
use crate::observer::EngineObserver;
use crate::stats::{Stats, StatsSnapshot};

/// Capacity of the bounded spawn/remove command channel. Spawns and
/// removals are comparatively rare next to per-tick movement intents, so
/// a small bound is plenty; a full channel here means the caller is
/// spawning/despawning far faster than the tick loop drains commands.
const COMMAND_CHANNEL_DEPTH: usize = 256;

struct Shared {
    config: EngineConfig,
    validator: Arc<dyn Validator>,
    stats: Arc<Stats>,

    cmd_tx: mpsc::Sender<Command>,
    cmd_rx: Mutex<Option<mpsc::Receiver<Command>>>,

    intent_tx: mpsc::UnboundedSender<MovementIntent>,
    intent_rx: Mutex<Option<mpsc::UnboundedReceiver<MovementIntent>>>,

    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,

    task: Mutex<Option<JoinHandle<()>>>,
}

/// Handle to a (possibly not-yet-started) VANTAGE tick pipeline.
///
/// Cheap to clone — every clone shares the same underlying channels and
/// `Stats`. Build one via [`crate::EngineBuilder`].
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Shared>,
}

impl Engine {
    pub(crate) fn new(config: EngineConfig, validator: Arc<dyn Validator>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CHANNEL_DEPTH);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            inner: Arc::new(Shared {
                config,
                validator,
                stats: Arc::new(Stats::new()),
                cmd_tx,
                cmd_rx: Mutex::new(Some(cmd_rx)),
                intent_tx,
                intent_rx: Mutex::new(Some(intent_rx)),
                shutdown_tx,
                shutdown_rx,
                task: Mutex::new(None),
            }),
        }
    }

    /// Start the tick loop: `tokio::spawn`s a task that owns a fresh
    /// `EngineCore` and drives it at `config.tick_period_ms` until
    /// [`Engine::shutdown`] is called (spec.md §6 `Start(ctx)`).
    ///
    /// `observer` receives tick-boundary callbacks from inside that task
    /// — typically an implementation that forwards each tick's
    /// [`crate::TickOutput`] to a broadcast dispatcher.
    ///
    /// Fails with [`EngineError::AlreadyRunning`] if a tick task from a
    /// prior `start` is still running.
    pub fn start<O: EngineObserver + Send + 'static>(&self, observer: O) -> EngineResult<()> {
        let mut task_guard = self.inner.task.lock().unwrap();
        if task_guard.is_some() {
            return Err(EngineError::AlreadyRunning);
        }

        let cmd_rx = self.inner.cmd_rx.lock().unwrap().take().ok_or(EngineError::AlreadyRunning)?;
        let intent_rx = self.inner.intent_rx.lock().unwrap().take().ok_or(EngineError::AlreadyRunning)?;
        let shutdown_rx = self.inner.shutdown_rx.clone();

        let core = EngineCore::new(self.inner.config.clone(), Arc::clone(&self.inner.validator), Arc::clone(&self.inner.stats));

        *task_guard = Some(tokio::spawn(core.run(observer, shutdown_rx, cmd_rx, intent_rx)));
        Ok(())
    }

    /// Signal the tick task to stop after its in-progress tick and wait
    /// for it to exit (spec.md §6 `Shutdown(ctx)`; spec.md §5:
    /// "shutdown is cooperative... completes the in-progress tick").
    ///
    /// After this returns (`Ok`), [`Engine::start`] may be called again
    /// to start a fresh run.
    pub async fn shutdown(&self) -> EngineResult<()> {
        let task = self.inner.task.lock().unwrap().take();
        let Some(task) = task else { return Err(EngineError::NotRunning) };

        let _ = self.inner.shutdown_tx.send(true);
        task.await.map_err(|_| EngineError::TaskPanicked)
    }

    /// Buffer a movement intent for application on the next tick (spec.md
    /// §6 `ProcessMovementIntent(entityId, intent)`; spec.md §3: "appended
    /// to per-entity buffer on arrival; fully drained in the
    /// intent-application phase of the next tick").
    ///
    /// Never blocks: the channel is unbounded, matching spec.md §5's
    /// "the tick itself must not perform blocking I/O" by ensuring the
    /// *producer* side never waits on the tick either.
    pub fn process_movement_intent(&self, intent: MovementIntent) -> EngineResult<()> {
        self.inner.intent_tx.send(intent).map_err(|_| EngineError::NotRunning)
    }

    /// Spawn a new entity (spec.md §6 `SpawnEntity(type, x, y,
    /// sessionId)`). `kind` governs whether the entity accepts client
    /// movement intents (`Player`) or not (`Npc`); `type_tag` is spec.md
    /// §3's opaque "type tag (string)" attribute, carried verbatim from
    /// the caller (typically the gateway, from the wire
    /// `SpawnRequest.entityType`) without further interpretation.
    pub async fn spawn_entity(
        &self,
        kind: EntityKind,
        type_tag: impl Into<String>,
        session: SessionId,
        position: Point,
    ) -> EngineResult<EntityId> {
        let (reply, reply_rx) = oneshot::channel();
        self.inner
            .cmd_tx
            .send(Command::Spawn { kind, type_tag: type_tag.into(), session, position, reply })
            .await
            .map_err(|_| EngineError::NotRunning)?;
        reply_rx.await.map_err(|_| EngineError::NotRunning)?.map_err(EngineError::from)
    }

    /// Remove an entity outright (spec.md §6 `RemoveEntity(entityId)`;
    /// spec.md §4.6: despawn on session close).
    pub async fn remove_entity(&self, entity: EntityId) -> EngineResult<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.inner
            .cmd_tx
            .send(Command::Remove { entity, reply })
            .await
            .map_err(|_| EngineError::NotRunning)?;
        reply_rx.await.map_err(|_| EngineError::NotRunning)?.map_err(EngineError::from)
    }

    /// A point-in-time read of every counter (spec.md §6 `Stats()`:
    /// "returning a snapshot map of counters and gauges").
    ///
    /// Lock-free: reads the same `Arc<Stats>` the tick task writes into,
    /// with no round trip through the command channel.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }
}
