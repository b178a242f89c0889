//! Spatial-subsystem error type.

use thiserror::Error;

use vantage_core::EntityId;

/// Errors produced by `vantage-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("entity {0} lies outside the quadtree's world bounds")]
    OutOfBounds(EntityId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
