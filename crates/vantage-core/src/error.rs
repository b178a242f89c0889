//! Shared error primitives.
//!
//! Sub-crates define their own error enums and convert into `CoreError`
//! (or the reverse) via `From` impls where it keeps call sites clean; both
//! directions are acceptable.

use thiserror::Error;

use crate::EntityId;

/// The top-level error type for `vantage-core` and a common base for
/// sub-crates that don't need a richer enum of their own.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `vantage-core`.
pub type CoreResult<T> = Result<T, CoreError>;
