//! `vantage-mobility` — friction decay and velocity integration for the
//! VANTAGE spatial simulation core (spec.md §4.4's integration step,
//! spec.md §4.5 phase 3).
//!
//! # Crate layout
//!
//! | Module      | Contents                               |
//! |-------------|------------------------------------------|
//! | [`engine`]  | `MobilityEngine::integrate`             |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`   |
//!
//! # Movement model
//!
//! Unlike the teacher's teleport-at-arrival graph routing (an agent stays
//! put at a node until a computed arrival tick, then jumps), entities here
//! move continuously in the plane every tick: `vantage-authority` decides
//! what an entity's velocity should be for this tick (from a validated
//! movement intent), and this crate's [`MobilityEngine::integrate`] is the
//! one place that actually adds velocity to position, with friction decay
//! for entities that received no fresh intent and a final bounds
//! re-check independent of the one `vantage-authority` already performed
//! against the *proposed* delta (spec.md §8 S4: a previously accepted
//! velocity can still carry an entity out of bounds on a later tick with
//! no new intent at all).

pub mod engine;
pub mod error;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
