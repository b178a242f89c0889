//! Authority-subsystem error type.
//!
//! `Validator::validate` itself is infallible (it always returns a
//! [`crate::ValidationResult`]); this enum exists for configuration-time
//! failures of a `Validator` implementation, mirroring the teacher's
//! `dt_behavior::BehaviorError` (a single `Config` variant reserved for
//! the same purpose).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("validator configuration error: {0}")]
    Config(String),
}

pub type AuthorityResult<T> = Result<T, AuthorityError>;
