//! Entity-subsystem error type.

use thiserror::Error;

use vantage_core::{EntityId, Point};

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity {0} not found")]
    NotFound(EntityId),

    #[error("entity store is at capacity ({0} entities)")]
    AtCapacity(usize),

    #[error("entity id space exhausted")]
    IdSpaceExhausted,

    /// Spawn coordinates lie outside the configured world rectangle
    /// (spec.md §4.1: "create fails with `BoundsError` if spawn
    /// coordinates lie outside world bounds").
    #[error("spawn position {0} lies outside world bounds")]
    OutOfBounds(Point),
}

pub type EntityResult<T> = Result<T, EntityError>;
