//! `vantage-server` — a minimal TCP binary wiring `vantage-net` and
//! `vantage-engine` into a runnable spatial simulation server.
//!
//! Grounded on `echo-session-service::main`'s accept-loop-plus-per-
//! connection-task shape (length-prefixed framing, a dedicated writer
//! task draining a per-connection `mpsc` channel), adapted from that
//! example's Unix-socket single-process hub to a TCP listener wired
//! against a tick-owned `vantage_engine::Engine` rather than an
//! in-process `HubState`. The teacher's `examples/xsmall` plays the
//! analogous role (a small runnable demonstrating the library, not
//! library surface) for session identity assignment, the YAML
//! configuration loader, and persistence/metrics emission — all named
//! as out-of-scope external collaborators in spec.md §1 — this binary
//! assigns session ids from an in-memory counter and hardcodes its
//! configuration rather than standing in a real implementation of any
//! of them.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tracing::{info, warn};

use vantage_authority::StandardValidator;
use vantage_core::{EngineConfig, Rect, SessionId, Tick};
use vantage_engine::{Engine, EngineBuilder, EngineObserver, TickOutput};
use vantage_net::codec::{read_frame, write_frame};
use vantage_net::{dispatch, gateway, SessionTable};

const LISTEN_ADDR: &str = "0.0.0.0:7667";

/// The server's fixed configuration. A real deployment loads this from
/// the YAML configuration loader spec.md §1 names as an out-of-scope
/// external collaborator; this binary hardcodes one reasonable profile
/// instead of standing in a loader for it.
fn server_config() -> EngineConfig {
    EngineConfig {
        tick_period_ms: 50,
        world_bounds: Rect::new(-1000.0, -1000.0, 1000.0, 1000.0),
        max_speed: 5.0,
        aoi_radius: 100.0,
        quadtree_capacity: 8,
        quadtree_max_depth: 8,
        max_entities: 1000,
        outbound_queue_depth: 32,
        heartbeat_timeout_ticks: 200, // 10s at 50ms/tick
        max_frame_bytes: 16 * 1024,
    }
}

/// Forwards each tick's output onto the shared session table, and keeps
/// a standalone copy of "now" for the reaper loop and the gateway's
/// heartbeat bookkeeping — the engine's own tick count is reachable
/// only from inside its tick task (spec.md §5), so this binary tracks
/// its own.
struct BroadcastObserver {
    table: Arc<Mutex<SessionTable>>,
    current_tick: Arc<AtomicU64>,
}

impl EngineObserver for BroadcastObserver {
    fn on_tick_end(&mut self, tick: Tick, output: &TickOutput) {
        self.current_tick.store(tick.0, Ordering::Relaxed);
        let table = Arc::clone(&self.table);
        let output = output.clone();
        tokio::spawn(async move {
            dispatch::dispatch_tick(&mut *table.lock().await, &output);
        });
    }

    fn on_tick_budget_exceeded(&mut self, tick: Tick, elapsed: Duration) {
        warn!(?tick, ?elapsed, "tick exceeded half its configured budget");
    }

    fn on_shutdown(&mut self, final_tick: Tick) {
        info!(?final_tick, "engine tick loop stopped");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = server_config();
    let engine = EngineBuilder::new(config.clone(), StandardValidator)
        .build()
        .context("invalid engine configuration")?;

    let table = Arc::new(Mutex::new(SessionTable::new()));
    let current_tick = Arc::new(AtomicU64::new(0));

    engine
        .start(BroadcastObserver { table: Arc::clone(&table), current_tick: Arc::clone(&current_tick) })
        .context("engine already running")?;

    tokio::spawn(reaper_loop(Arc::clone(&table), engine.clone(), config.clone(), Arc::clone(&current_tick)));

    let listener = TcpListener::bind(LISTEN_ADDR).await.with_context(|| format!("binding {LISTEN_ADDR}"))?;
    info!(addr = LISTEN_ADDR, "vantage-server listening");

    let next_session_id = Arc::new(AtomicU64::new(1)); // skip 0, reserved for SessionId::SENTINEL

    loop {
        let (stream, peer) = listener.accept().await?;
        let engine = engine.clone();
        let table = Arc::clone(&table);
        let config = config.clone();
        let current_tick = Arc::clone(&current_tick);
        let session = SessionId(next_session_id.fetch_add(1, Ordering::Relaxed));

        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, peer, session, engine, table, config, current_tick).await {
                warn!(?err, ?session, "connection handler exited with error");
            }
        });
    }
}

/// Periodically despawn sessions whose heartbeat deadline has passed
/// (spec.md §4.6, §5: "missed deadline causes session teardown at the
/// next tick boundary, not mid-tick").
async fn reaper_loop(table: Arc<Mutex<SessionTable>>, engine: Engine, config: EngineConfig, current_tick: Arc<AtomicU64>) {
    let mut interval = tokio::time::interval(config.tick_period());
    loop {
        interval.tick().await;
        let now = Tick(current_tick.load(Ordering::Relaxed));
        dispatch::reap_expired(&mut *table.lock().await, &engine, now, config.heartbeat_timeout_ticks).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    session: SessionId,
    engine: Engine,
    table: Arc<Mutex<SessionTable>>,
    config: EngineConfig,
    current_tick: Arc<AtomicU64>,
) -> Result<()> {
    info!(?session, %peer, "connection accepted");
    stream.set_nodelay(true).ok();
    let (mut reader, mut writer) = stream.into_split();

    let now = Tick(current_tick.load(Ordering::Relaxed));
    let rx = table.lock().await.register(session, config.outbound_queue_depth, now);

    let writer_task = tokio::spawn(async move { writer_loop(&mut writer, rx).await });

    let read_result = reader_loop(&mut reader, session, &engine, &table, &config, &current_tick).await;

    {
        let mut table = table.lock().await;
        if let Some(closed) = table.deregister(session) {
            if !closed.entity.is_sentinel() {
                let _ = engine.remove_entity(closed.entity).await;
            }
        }
    }
    writer_task.abort();

    info!(?session, %peer, "connection closed");
    read_result
}

async fn reader_loop<R: AsyncRead + Unpin>(
    reader: &mut R,
    session: SessionId,
    engine: &Engine,
    table: &Arc<Mutex<SessionTable>>,
    config: &EngineConfig,
    current_tick: &Arc<AtomicU64>,
) -> Result<()> {
    loop {
        let message = match read_frame(reader, config.max_frame_bytes).await {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(()), // clean EOF at a frame boundary
            Err(vantage_net::NetError::FrameTooLarge { len, max }) => {
                // spec.md §6: oversized frames are logged and discarded
                // without teardown — keep reading.
                warn!(?session, len, max, "discarded oversized inbound frame");
                continue;
            }
            Err(err) => return Err(err.into()), // transport-level read error: tear the session down
        };

        let now = Tick(current_tick.load(Ordering::Relaxed));
        let mut table = table.lock().await;
        if let Err(err) = gateway::handle_inbound(engine, &mut table, session, now, message).await {
            warn!(?session, ?err, "error handling inbound message");
        }
    }
}

async fn writer_loop<W: AsyncWrite + Unpin>(writer: &mut W, mut rx: tokio::sync::mpsc::Receiver<vantage_net::Message>) {
    while let Some(message) = rx.recv().await {
        if write_frame(writer, &message).await.is_err() {
            break;
        }
    }
}
