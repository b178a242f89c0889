//! The `Validator` trait and the production movement-intent ruleset
//! (spec.md §4.4).

use vantage_core::config::TELEPORT_MULTIPLIER;
use vantage_core::{EngineConfig, Point, Rect};
use vantage_entity::Entity;

use crate::intent::MovementIntent;

/// Why a movement intent was rejected outright rather than applied
/// (spec.md §4.4's `Rejected` variant: "does not advance `lastSequence`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Rule 1: `intent.sequence <= entity.lastSequence`.
    StaleSequence,
    /// Rule 3: `|delta| > 3 * maxSpeed`, evaluated against the intent's
    /// *unscaled* original magnitude.
    Teleport,
}

/// Outcome of validating one movement intent against one entity's current
/// state (spec.md §4.4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationResult {
    /// Applied as-is; no correction owed.
    Accepted(Point),

    /// Applied after a speed or bounds clamp; a `Correction` carrying the
    /// post-clamp state is owed to the owning session.
    Clamped(Point),

    /// Dropped entirely; `lastSequence` does not advance, but a
    /// `Correction` resynchronizing the client to the current server
    /// state is still owed.
    Rejected(RejectReason),
}

impl ValidationResult {
    /// The delta that should actually be applied to the entity this tick,
    /// or `None` if the intent was rejected outright.
    pub fn applied_delta(&self) -> Option<Point> {
        match self {
            ValidationResult::Accepted(d) | ValidationResult::Clamped(d) => Some(*d),
            ValidationResult::Rejected(_) => None,
        }
    }

    /// `true` for any outcome other than a clean `Accepted` — i.e. the
    /// cases spec.md §4.4/§8 property 8 require a `Correction` for.
    pub fn needs_correction(&self) -> bool {
        !matches!(self, ValidationResult::Accepted(_))
    }
}

/// Pluggable movement-intent validation.
///
/// A trait purely so a test double ([`NoopValidator`]) can stand in for
/// [`StandardValidator`] — spec.md §4.4 names exactly one production
/// ruleset, mirroring `dt_behavior::BehaviorModel`'s reason for being a
/// trait (the production model is the only one that ships, but the seam
/// lets tests swap in something simpler).
pub trait Validator: Send + Sync + 'static {
    /// Validate `intent` against `entity`'s current state, using the
    /// speed/teleport/bounds thresholds in `config`.
    fn validate(
        &self,
        entity: &Entity,
        intent: &MovementIntent,
        config: &EngineConfig,
    ) -> ValidationResult;
}

/// The one production ruleset spec.md §4.4 describes, evaluated in order:
/// sequence monotonicity, speed clamp, teleport reject, bounds clamp.
pub struct StandardValidator;

impl Validator for StandardValidator {
    fn validate(
        &self,
        entity: &Entity,
        intent: &MovementIntent,
        config: &EngineConfig,
    ) -> ValidationResult {
        // Rule 1: sequence monotonicity.
        if intent.sequence <= entity.last_sequence {
            return ValidationResult::Rejected(RejectReason::StaleSequence);
        }

        let original_magnitude = intent.delta.magnitude();

        // Rule 3: teleport guard — the *unscaled* original magnitude,
        // evaluated before any speed clamp (spec.md §4.4: "using the
        // original, unscaled magnitude").
        if original_magnitude > TELEPORT_MULTIPLIER * config.max_speed {
            return ValidationResult::Rejected(RejectReason::Teleport);
        }

        // Rule 2: speed bound — uniform scale-down to exactly max_speed,
        // not a rejection at this step alone.
        let mut clamped = original_magnitude > config.max_speed;
        let mut delta = if clamped {
            intent.delta.scale(config.max_speed / original_magnitude)
        } else {
            intent.delta
        };

        // Rule 4: bounds clamp on the provisional post-apply position.
        let provisional = entity.position.add(delta);
        if !config.world_bounds.contains_closed(provisional) {
            delta = clamp_delta_to_bounds(entity.position, delta, &config.world_bounds);
            clamped = true;
        }

        if clamped {
            ValidationResult::Clamped(delta)
        } else {
            ValidationResult::Accepted(delta)
        }
    }
}

/// Scale `delta` down to the largest multiple `t ∈ [0, 1]` such that
/// `position + t * delta` stays within the closed rectangle `bounds`
/// (spec.md §4.4 rule 4: "clamp the delta to the largest scalar multiple
/// that keeps the result inside").
fn clamp_delta_to_bounds(position: Point, delta: Point, bounds: &Rect) -> Point {
    let t_x = axis_scale(position.x, delta.x, bounds.min_x, bounds.max_x);
    let t_y = axis_scale(position.y, delta.y, bounds.min_y, bounds.max_y);
    delta.scale(t_x.min(t_y).clamp(0.0, 1.0))
}

/// The largest `t ∈ [0, ∞)` such that `pos + t * d` stays within
/// `[min, max]` on one axis, given `pos` already lies within that range.
fn axis_scale(pos: f64, d: f64, min: f64, max: f64) -> f64 {
    if d == 0.0 {
        return f64::INFINITY;
    }
    let limit = if d > 0.0 { max } else { min };
    ((limit - pos) / d).max(0.0)
}

/// A [`Validator`] that always accepts the intent's raw delta, unclamped
/// and unchecked. Useful as a test double when a test wants to drive
/// movement without exercising the production ruleset — the direct
/// analogue of `dt_behavior::NoopBehavior`.
pub struct NoopValidator;

impl Validator for NoopValidator {
    fn validate(
        &self,
        _entity: &Entity,
        intent: &MovementIntent,
        _config: &EngineConfig,
    ) -> ValidationResult {
        ValidationResult::Accepted(intent.delta)
    }
}
