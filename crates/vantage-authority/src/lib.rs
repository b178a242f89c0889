//! `vantage-authority` — movement-intent validation (spec.md §4.4).
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |----------------|-------------------------------------------------------------|
//! | [`intent`]     | `MovementIntent`                                           |
//! | [`validator`]  | `Validator` trait, `StandardValidator`, `NoopValidator`, `ValidationResult`, `RejectReason` |
//! | [`error`]      | `AuthorityError`, `AuthorityResult<T>`                     |
//!
//! Grounded on `dt_behavior::model::BehaviorModel` (a trait existing so an
//! alternate ruleset is swappable in tests even though exactly one
//! production implementation is named) and `dt_behavior::noop::
//! NoopBehavior` (kept here as [`NoopValidator`]). Unlike the teacher's
//! two-phase intent/apply split across an entire tick, `Validator::
//! validate` is a single synchronous call per intent — spec.md §4.4's
//! rules are evaluated immediately against the entity's current state,
//! not staged for a later parallel phase (there is no per-agent
//! "decide what to do" step here; movement intents already say exactly
//! what the client wants, and the validator's job is only to check it).

pub mod error;
pub mod intent;
pub mod validator;

#[cfg(test)]
mod tests;

pub use error::{AuthorityError, AuthorityResult};
pub use intent::MovementIntent;
pub use validator::{NoopValidator, RejectReason, StandardValidator, ValidationResult, Validator};
