//! Friction decay, velocity integration, and bounds re-check (spec.md §4.4,
//! §4.5 phase 3).

use std::collections::HashSet;

use vantage_core::config::FRICTION_FACTOR;
use vantage_core::{Correction, EngineConfig, EntityId, Point, Rect};
use vantage_entity::EntityStore;

/// Advances every live entity by its current velocity once per tick.
///
/// Grounded on `dt_mobility::engine::MobilityEngine`'s role (a thin engine
/// struct wrapping store mutation, returning data for the caller to route
/// onward rather than sending it itself) — generalized from the teacher's
/// teleport-at-arrival graph routing to continuous-plane friction decay and
/// velocity integration, since entities here move freely in the plane
/// rather than along road-network edges. Zero-sized, like
/// `vantage_authority::StandardValidator`: it carries no state of its own,
/// only behavior over an `EntityStore` the caller owns.
pub struct MobilityEngine;

impl MobilityEngine {
    /// Run one tick's integration phase (spec.md §4.5 step 3) over every
    /// entity in `store`.
    ///
    /// `touched` names the entities whose velocity was already set to a
    /// freshly validated delta earlier this tick (spec.md §4.4's apply-
    /// intents phase). Every other entity's velocity decays by
    /// [`FRICTION_FACTOR`] first — spec.md §4.4: "this causes entities
    /// without renewed intents to decelerate over a small number of
    /// ticks." An entity in `touched` skips this decay for the tick its
    /// velocity was set, so its validated delta lands at full magnitude
    /// (spec.md §8 S2: intent magnitude 5.0 produces position (5,0) after
    /// integration, not `5.0 * 0.95`).
    ///
    /// Returns one [`Correction`] per entity that would have left
    /// `config.world_bounds`: its position is clamped to the nearest
    /// in-bounds point and its velocity is zeroed (spec.md §4.4: "an
    /// entity that would leave bounds is clamped to the nearest in-bounds
    /// point, its velocity zeroed, and a Correction emitted").
    pub fn integrate(
        store: &mut EntityStore,
        touched: &HashSet<EntityId>,
        config: &EngineConfig,
    ) -> Vec<Correction> {
        let mut corrections = Vec::new();

        for entity in store.iter_mut() {
            if !touched.contains(&entity.id) {
                entity.velocity = entity.velocity.scale(FRICTION_FACTOR);
            }

            let provisional = entity.position.add(entity.velocity);
            if config.world_bounds.contains_closed(provisional) {
                entity.position = provisional;
                continue;
            }

            entity.position = clamp_to_rect(provisional, &config.world_bounds);
            entity.velocity = Point::ZERO;
            corrections.push(Correction::new(
                entity.id,
                entity.position,
                entity.velocity,
                entity.last_sequence,
            ));
        }

        corrections
    }
}

/// Nearest point inside the closed rectangle `bounds` to `p`.
fn clamp_to_rect(p: Point, bounds: &Rect) -> Point {
    Point::new(
        p.x.clamp(bounds.min_x, bounds.max_x),
        p.y.clamp(bounds.min_y, bounds.max_y),
    )
}
