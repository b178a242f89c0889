//! Unit and property tests for vantage-authority.

use proptest::prelude::*;
use vantage_core::{EngineConfig, EntityId, Point, SessionId, Tick};
use vantage_entity::{Entity, EntityKind};

use crate::intent::MovementIntent;
use crate::validator::{RejectReason, StandardValidator, Validator, ValidationResult};

fn entity_at(position: Point, last_sequence: u64) -> Entity {
    let mut e = Entity::spawn(EntityId(1), EntityKind::Player, "player".to_string(), SessionId(1), position, Tick::ZERO);
    e.last_sequence = last_sequence;
    e
}

fn intent(sequence: u64, dx: f64, dy: f64) -> MovementIntent {
    MovementIntent { entity: EntityId(1), sequence, delta: Point::new(dx, dy), client_timestamp: 0 }
}

mod scenarios {
    use super::*;

    /// S2 (spec.md §8): intent {sequence=1, dx=10, dy=0} against maxSpeed
    /// 5.0 clamps to magnitude exactly 5.0 along +X.
    #[test]
    fn s2_overspeed_intent_is_clamped_to_exactly_max_speed() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 0);
        let result = StandardValidator.validate(&entity, &intent(1, 10.0, 0.0), &config);

        match result {
            ValidationResult::Clamped(delta) => {
                assert!((delta.magnitude() - 5.0).abs() < 1e-9);
                assert!((delta.x - 5.0).abs() < 1e-9);
                assert_eq!(delta.y, 0.0);
            }
            other => panic!("expected Clamped, got {other:?}"),
        }
    }

    /// S3 (spec.md §8): dx=50 is > 3*maxSpeed(5.0)=15, so the intent is
    /// rejected as a teleport; lastSequence does not advance.
    #[test]
    fn s3_teleport_magnitude_is_rejected() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 0);
        let result = StandardValidator.validate(&entity, &intent(1, 50.0, 0.0), &config);
        assert_eq!(result, ValidationResult::Rejected(RejectReason::Teleport));
    }

    /// S4's validator-facing half: an entity already near the bound whose
    /// in-bounds-speed delta would still push it outside world bounds is
    /// clamped at the boundary (vantage-mobility's integration step
    /// re-checks this again every tick).
    #[test]
    fn bounds_clamp_keeps_provisional_position_inside_world() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::new(999.0, 0.0), 0);
        // +4 along X is within max_speed (5.0) and not a teleport, but
        // 999 + 4 = 1003 > world_bounds.max_x (1000).
        let result = StandardValidator.validate(&entity, &intent(1, 4.0, 0.0), &config);
        match result {
            ValidationResult::Clamped(delta) => {
                let landed = entity.position.add(delta);
                assert!(config.world_bounds.contains_closed(landed));
                assert!((landed.x - 1000.0).abs() < 1e-9);
            }
            other => panic!("expected Clamped, got {other:?}"),
        }
    }
}

mod sequence_rules {
    use super::*;

    #[test]
    fn stale_sequence_is_rejected() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 5);
        let result = StandardValidator.validate(&entity, &intent(5, 1.0, 0.0), &config);
        assert_eq!(result, ValidationResult::Rejected(RejectReason::StaleSequence));
    }

    #[test]
    fn sequence_equal_to_last_is_stale_not_accepted() {
        // spec.md §4.4 rule 1 uses `<=`, not `<`.
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 5);
        let result = StandardValidator.validate(&entity, &intent(5, 0.1, 0.0), &config);
        assert_eq!(result, ValidationResult::Rejected(RejectReason::StaleSequence));
    }

    #[test]
    fn rejected_result_carries_no_applied_delta() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 5);
        let result = StandardValidator.validate(&entity, &intent(5, 0.1, 0.0), &config);
        assert_eq!(result.applied_delta(), None);
        assert!(result.needs_correction());
    }

    #[test]
    fn within_bounds_low_speed_intent_is_accepted_cleanly() {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 0);
        let result = StandardValidator.validate(&entity, &intent(1, 1.0, 1.0), &config);
        assert!(matches!(result, ValidationResult::Accepted(_)));
        assert!(!result.needs_correction());
    }
}

proptest! {
    /// Property 1 (spec.md §8), one-intent slice: a strictly increasing
    /// sequence number is never rejected for staleness, regardless of
    /// `lastSequence`'s current value.
    #[test]
    fn strictly_increasing_sequence_is_never_stale(
        last_sequence in 0u64..1_000_000,
        dx in -4.0f64..4.0,
        dy in -4.0f64..4.0,
    ) {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, last_sequence);
        let result = StandardValidator.validate(
            &entity,
            &intent(last_sequence + 1, dx, dy),
            &config,
        );
        prop_assert_ne!(result, ValidationResult::Rejected(RejectReason::StaleSequence));
    }

    /// Property 3 (spec.md §8): immediately after validation, an applied
    /// delta's magnitude never exceeds `maxSpeed` by more than a small
    /// floating-point epsilon.
    #[test]
    fn applied_delta_never_exceeds_max_speed(
        dx in -50.0f64..50.0,
        dy in -50.0f64..50.0,
    ) {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 0);
        let result = StandardValidator.validate(&entity, &intent(1, dx, dy), &config);
        if let Some(delta) = result.applied_delta() {
            prop_assert!(delta.magnitude() <= config.max_speed + 1e-6);
        }
    }

    /// Any magnitude past the teleport threshold is rejected, and a
    /// rejection never proposes an applied delta.
    #[test]
    fn teleport_magnitude_is_always_rejected_with_no_applied_delta(
        dx in 15.001f64..500.0,
    ) {
        let config = EngineConfig::test_default();
        let entity = entity_at(Point::ZERO, 0);
        let result = StandardValidator.validate(&entity, &intent(1, dx, 0.0), &config);
        prop_assert_eq!(result, ValidationResult::Rejected(RejectReason::Teleport));
        prop_assert_eq!(result.applied_delta(), None);
    }
}
