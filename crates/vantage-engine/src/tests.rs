//! Integration tests driving a real [`crate::Engine`] end to end, no
//! network transport involved (spec.md §8 scenarios S1–S5, property 8).
//!
//! Every test uses `#[tokio::test(start_paused = true)]` plus
//! `tokio::time::advance` to force tick boundaries deterministically,
//! rather than sleeping on wall-clock time.

use std::sync::{Arc, Mutex};

use vantage_authority::{MovementIntent, StandardValidator};
use vantage_core::{EngineConfig, Point, SessionId};
use vantage_entity::EntityKind;

use crate::builder::EngineBuilder;
use crate::engine::TickOutput;
use crate::observer::EngineObserver;

/// Collects every tick's output for later inspection, instead of acting
/// on it — the test-only stand-in for a broadcast dispatcher.
#[derive(Clone, Default)]
struct RecordingObserver {
    outputs: Arc<Mutex<Vec<TickOutput>>>,
}

impl RecordingObserver {
    fn new() -> Self {
        Self::default()
    }

    fn outputs(&self) -> Vec<TickOutput> {
        self.outputs.lock().unwrap().clone()
    }
}

impl EngineObserver for RecordingObserver {
    fn on_tick_end(&mut self, _tick: vantage_core::Tick, output: &TickOutput) {
        self.outputs.lock().unwrap().push(output.clone());
    }
}

async fn advance_one_tick(config: &EngineConfig) {
    tokio::time::advance(config.tick_period()).await;
    // Let the tick task's `select!` actually run past the now-ready
    // timer branch before the test resumes.
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn s1_mutual_aoi_visibility_after_one_tick() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    let engine = EngineBuilder::new(config.clone(), StandardValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let session1 = SessionId(1);
    let session2 = SessionId(2);
    let e1 = engine.spawn_entity(EntityKind::Player, "player", session1, Point::new(0.0, 0.0)).await.unwrap();
    let e2 = engine.spawn_entity(EntityKind::Player, "player", session2, Point::new(50.0, 0.0)).await.unwrap();

    advance_one_tick(&config).await;
    engine.shutdown().await.unwrap();

    let outputs = recorder.outputs();
    let tick_with_content = outputs.iter().find(|o| !o.updates.is_empty()).expect("one tick should carry AOI content");

    let update1 = tick_with_content.updates.iter().find(|u| u.session == session1).expect("session1 update");
    assert_eq!(update1.snapshot.entities.len(), 1);
    assert_eq!(update1.snapshot.entities[0].entity, e2);
    assert_eq!(update1.snapshot.entities[0].position, Point::new(50.0, 0.0));

    let update2 = tick_with_content.updates.iter().find(|u| u.session == session2).expect("session2 update");
    assert_eq!(update2.snapshot.entities.len(), 1);
    assert_eq!(update2.snapshot.entities[0].entity, e1);
    assert_eq!(update2.snapshot.entities[0].position, Point::new(0.0, 0.0));
}

#[tokio::test(start_paused = true)]
async fn s2_clamped_speed_produces_post_integration_correction() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    let engine = EngineBuilder::new(config.clone(), StandardValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let session = SessionId(1);
    let entity = engine.spawn_entity(EntityKind::Player, "player", session, Point::new(0.0, 0.0)).await.unwrap();

    engine
        .process_movement_intent(MovementIntent { entity, sequence: 1, delta: Point::new(10.0, 0.0), client_timestamp: 0 })
        .unwrap();

    advance_one_tick(&config).await;
    engine.shutdown().await.unwrap();

    let outputs = recorder.outputs();
    let (_, correction) = outputs
        .iter()
        .flat_map(|o| o.corrections.iter())
        .find(|(s, _)| *s == session)
        .expect("a correction should have been emitted");

    assert_eq!(correction.entity, entity);
    assert_eq!(correction.correct_position, Point::new(5.0, 0.0));
    assert_eq!(correction.ack_sequence, 1);
}

#[tokio::test(start_paused = true)]
async fn s3_teleport_rejected_entity_stays_put() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    let engine = EngineBuilder::new(config.clone(), StandardValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let session = SessionId(1);
    let entity = engine.spawn_entity(EntityKind::Player, "player", session, Point::new(0.0, 0.0)).await.unwrap();

    // max_speed = 5.0, teleport threshold = 3 * 5.0 = 15.0; 50.0 exceeds it.
    engine
        .process_movement_intent(MovementIntent { entity, sequence: 1, delta: Point::new(50.0, 0.0), client_timestamp: 0 })
        .unwrap();

    advance_one_tick(&config).await;
    engine.shutdown().await.unwrap();

    let outputs = recorder.outputs();
    let (_, correction) = outputs
        .iter()
        .flat_map(|o| o.corrections.iter())
        .find(|(s, _)| *s == session)
        .expect("a correction should have been emitted for the rejection");

    assert_eq!(correction.correct_position, Point::new(0.0, 0.0));
    assert_eq!(correction.ack_sequence, 0);
}

#[tokio::test(start_paused = true)]
async fn s4_out_of_bounds_integration_clamps_and_zeroes_velocity() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    // NoopValidator accepts the raw delta unchecked, letting this test put
    // the entity at a near-boundary velocity in one step rather than
    // needing several accepted intents to build up speed there.
    let engine = EngineBuilder::new(config.clone(), vantage_authority::NoopValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let session = SessionId(1);
    let entity = engine.spawn_entity(EntityKind::Player, "player", session, Point::new(999.0, 0.0)).await.unwrap();
    engine
        .process_movement_intent(MovementIntent { entity, sequence: 1, delta: Point::new(5.0, 0.0), client_timestamp: 0 })
        .unwrap();

    advance_one_tick(&config).await;
    engine.shutdown().await.unwrap();

    let outputs = recorder.outputs();
    let (_, correction) = outputs
        .iter()
        .flat_map(|o| o.corrections.iter())
        .find(|(s, _)| *s == session)
        .expect("bounds clamp should have emitted a correction");

    assert_eq!(correction.correct_position, Point::new(1000.0, 0.0));
    assert_eq!(correction.correct_velocity, Point::ZERO);
}

#[tokio::test(start_paused = true)]
async fn s5_aoi_enter_move_exit_despawn_sequence() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    let engine = EngineBuilder::new(config.clone(), vantage_authority::NoopValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let observer_session = SessionId(1);
    let neighbor_session = SessionId(2);
    let _observer = engine.spawn_entity(EntityKind::Player, "player", observer_session, Point::new(0.0, 0.0)).await.unwrap();
    let neighbor = engine.spawn_entity(EntityKind::Player, "player", neighbor_session, Point::new(90.0, 0.0)).await.unwrap();

    // Tick N: neighbor enters the observer's AOI (radius 100).
    advance_one_tick(&config).await;

    // Move the neighbor to (95,0): still inside, a persistent move.
    engine
        .process_movement_intent(MovementIntent { entity: neighbor, sequence: 1, delta: Point::new(5.0, 0.0), client_timestamp: 0 })
        .unwrap();
    advance_one_tick(&config).await;

    // Move the neighbor to (110,0): now outside, an AOI exit.
    engine
        .process_movement_intent(MovementIntent { entity: neighbor, sequence: 2, delta: Point::new(15.0, 0.0), client_timestamp: 0 })
        .unwrap();
    advance_one_tick(&config).await;

    // One more tick with nothing changing: no further mention of the neighbor.
    advance_one_tick(&config).await;

    engine.shutdown().await.unwrap();
    let outputs = recorder.outputs();

    let observer_updates: Vec<_> = outputs
        .iter()
        .filter_map(|o| o.updates.iter().find(|u| u.session == observer_session).cloned())
        .filter(|u| !u.is_empty())
        .collect();

    assert_eq!(observer_updates.len(), 3, "enter, move, and exit should each produce exactly one non-empty update");

    assert_eq!(observer_updates[0].snapshot.entities.len(), 1);
    assert_eq!(observer_updates[0].snapshot.entities[0].entity, neighbor);
    assert!(observer_updates[0].snapshot.deltas.is_empty());
    assert!(observer_updates[0].despawns.is_empty());

    assert!(observer_updates[1].snapshot.entities.is_empty());
    assert_eq!(observer_updates[1].snapshot.deltas.len(), 1);
    assert_eq!(observer_updates[1].snapshot.deltas[0].entity, neighbor);
    assert_eq!(observer_updates[1].snapshot.deltas[0].position, Point::new(95.0, 0.0));

    assert_eq!(observer_updates[2].despawns.len(), 1);
    assert_eq!(observer_updates[2].despawns[0].entity, neighbor);
    assert_eq!(observer_updates[2].despawns[0].reason, crate::engine::DespawnReason::OutOfAoi);
}

/// Property 8 (correction causality): every `Clamped`/`Rejected`
/// validation result produces exactly one `Correction` in the same tick
/// it occurred, for every such intent submitted concurrently.
#[tokio::test(start_paused = true)]
async fn property_8_every_clamp_or_reject_yields_one_correction_same_tick() {
    let config = EngineConfig::test_default();
    let recorder = RecordingObserver::new();
    let engine = EngineBuilder::new(config.clone(), StandardValidator).build().unwrap();
    engine.start(recorder.clone()).unwrap();

    let mut entities = Vec::new();
    for i in 0..5u64 {
        let session = SessionId(i + 1);
        let entity = engine.spawn_entity(EntityKind::Player, "player", session, Point::new(0.0, 0.0)).await.unwrap();
        entities.push((session, entity));
    }

    // Every one of these is either clamped (speed) or rejected (teleport).
    for (i, (_, entity)) in entities.iter().enumerate() {
        let dx = 10.0 + i as f64 * 20.0; // 10, 30, 50, 70, 90 — mixes clamp and teleport-reject
        engine
            .process_movement_intent(MovementIntent { entity: *entity, sequence: 1, delta: Point::new(dx, 0.0), client_timestamp: 0 })
            .unwrap();
    }

    advance_one_tick(&config).await;
    engine.shutdown().await.unwrap();

    let outputs = recorder.outputs();
    let corrections: Vec<_> = outputs.iter().flat_map(|o| o.corrections.iter()).collect();

    for (session, _) in &entities {
        let count = corrections.iter().filter(|(s, _)| s == session).count();
        assert_eq!(count, 1, "session {session:?} should have exactly one correction this tick");
    }
}

#[tokio::test(start_paused = true)]
async fn spawn_and_remove_round_trip_through_the_handle() {
    let config = EngineConfig::test_default();
    let engine = EngineBuilder::new(config.clone(), StandardValidator).build().unwrap();
    engine.start(crate::observer::NoopObserver).unwrap();

    let entity = engine.spawn_entity(EntityKind::Npc, "npc", SessionId::SENTINEL, Point::new(0.0, 0.0)).await.unwrap();
    engine.remove_entity(entity).await.unwrap();
    assert!(engine.remove_entity(entity).await.is_err(), "removing twice should fail");

    let stats = engine.stats();
    assert_eq!(stats.entities_spawned, 1);
    assert_eq!(stats.entities_removed, 1);

    engine.shutdown().await.unwrap();
}

#[tokio::test]
async fn start_twice_without_shutdown_fails() {
    let config = EngineConfig::test_default();
    let engine = EngineBuilder::new(config, StandardValidator).build().unwrap();
    engine.start(crate::observer::NoopObserver).unwrap();
    assert!(matches!(engine.start(crate::observer::NoopObserver), Err(crate::error::EngineError::AlreadyRunning)));
    engine.shutdown().await.unwrap();
}
