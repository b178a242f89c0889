//! Unit and property tests for vantage-mobility.

use std::collections::HashSet;

use proptest::prelude::*;
use vantage_core::{EngineConfig, EntityId, Point, SessionId, Tick};
use vantage_entity::{EntityKind, EntityStoreBuilder};

use crate::engine::MobilityEngine;

fn store_with_one(position: Point, velocity: Point) -> (vantage_entity::EntityStore, EntityId) {
    let config = EngineConfig::test_default();
    let mut store = EntityStoreBuilder::new(config.max_entities, config.world_bounds).build();
    let id = store
        .spawn(EntityKind::Player, "player".to_string(), SessionId(1), position, Tick::ZERO)
        .unwrap();
    store.get_mut(id).unwrap().velocity = velocity;
    (store, id)
}

/// S2 (spec.md §8): a validated delta of magnitude exactly 5.0 along +X,
/// set as velocity by the apply-intents phase and marked `touched`, lands
/// the entity at exactly (5,0) after integration — friction does not
/// apply on the tick the velocity was just set.
#[test]
fn touched_entity_integrates_at_full_velocity_no_friction() {
    let config = EngineConfig::test_default();
    let (mut store, id) = store_with_one(Point::ZERO, Point::new(5.0, 0.0));
    let touched: HashSet<EntityId> = [id].into_iter().collect();

    let corrections = MobilityEngine::integrate(&mut store, &touched, &config);

    assert!(corrections.is_empty());
    let entity = store.get(id).unwrap();
    assert!((entity.position.x - 5.0).abs() < 1e-9);
    assert_eq!(entity.position.y, 0.0);
}

#[test]
fn untouched_entity_decays_by_friction_before_integrating() {
    let config = EngineConfig::test_default();
    let (mut store, id) = store_with_one(Point::ZERO, Point::new(4.0, 0.0));

    let corrections = MobilityEngine::integrate(&mut store, &HashSet::new(), &config);

    assert!(corrections.is_empty());
    let entity = store.get(id).unwrap();
    // velocity decays to 4.0 * 0.95 = 3.8 before being added to position.
    assert!((entity.position.x - 3.8).abs() < 1e-9);
    assert!((entity.velocity.x - 3.8).abs() < 1e-9);
}

/// S4 (spec.md §8): an entity at (999,0) with velocity (5,0) from an
/// earlier accepted intent integrates to a provisional (1004,0), which
/// lies outside world bounds (max_x=1000); it is clamped to (1000,0),
/// velocity zeroed, and a Correction emitted.
#[test]
fn s4_out_of_bounds_integration_clamps_and_zeroes_velocity() {
    let config = EngineConfig::test_default();
    let (mut store, id) = store_with_one(Point::new(999.0, 0.0), Point::new(5.0, 0.0));
    let touched: HashSet<EntityId> = [id].into_iter().collect();

    let corrections = MobilityEngine::integrate(&mut store, &touched, &config);

    assert_eq!(corrections.len(), 1);
    let correction = corrections[0];
    assert_eq!(correction.entity, id);
    assert!((correction.correct_position.x - 1000.0).abs() < 1e-9);
    assert_eq!(correction.correct_velocity, Point::ZERO);

    let entity = store.get(id).unwrap();
    assert!((entity.position.x - 1000.0).abs() < 1e-9);
    assert_eq!(entity.velocity, Point::ZERO);
}

#[test]
fn entity_with_zero_velocity_never_moves_and_never_corrects() {
    let config = EngineConfig::test_default();
    let (mut store, id) = store_with_one(Point::new(10.0, 10.0), Point::ZERO);

    let corrections = MobilityEngine::integrate(&mut store, &HashSet::new(), &config);

    assert!(corrections.is_empty());
    let entity = store.get(id).unwrap();
    assert_eq!(entity.position, Point::new(10.0, 10.0));
}

proptest! {
    /// Every entity's position stays within world bounds immediately
    /// after integration, regardless of its incoming velocity (spec.md
    /// §3's world-bounds invariant, re-checked every tick by this crate
    /// independent of whatever `vantage-authority` already verified
    /// against the proposed delta).
    #[test]
    fn integration_never_leaves_an_entity_out_of_bounds(
        px in -1000.0f64..1000.0,
        py in -1000.0f64..1000.0,
        vx in -50.0f64..50.0,
        vy in -50.0f64..50.0,
        touched in any::<bool>(),
    ) {
        let config = EngineConfig::test_default();
        let (mut store, id) = store_with_one(Point::new(px, py), Point::new(vx, vy));
        let touched_set: HashSet<EntityId> = if touched { [id].into_iter().collect() } else { HashSet::new() };

        MobilityEngine::integrate(&mut store, &touched_set, &config);

        let entity = store.get(id).unwrap();
        prop_assert!(config.world_bounds.contains_closed(entity.position));
    }

    /// A clamped (out-of-bounds) integration always zeroes velocity and
    /// always emits exactly one Correction; an in-bounds integration
    /// always emits none.
    #[test]
    fn correction_emission_matches_clamp_outcome(
        px in -1000.0f64..1000.0,
        py in -1000.0f64..1000.0,
        vx in -50.0f64..50.0,
        vy in -50.0f64..50.0,
    ) {
        let config = EngineConfig::test_default();
        let (mut store, id) = store_with_one(Point::new(px, py), Point::new(vx, vy));
        let touched: HashSet<EntityId> = [id].into_iter().collect();
        let provisional = Point::new(px, py).add(Point::new(vx, vy));
        let would_clamp = !config.world_bounds.contains_closed(provisional);

        let corrections = MobilityEngine::integrate(&mut store, &touched, &config);

        prop_assert_eq!(corrections.len(), if would_clamp { 1 } else { 0 });
        if would_clamp {
            prop_assert_eq!(store.get(id).unwrap().velocity, Point::ZERO);
        }
    }
}
