//! `NetError`, aggregating codec, engine, and I/O failures — grounded on
//! `vantage_engine::error::EngineError`'s role relative to its own
//! sub-crate errors.

use thiserror::Error;

use vantage_engine::EngineError;
use vantage_entity::EntityError;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("frame decode error: {0}")]
    Decode(String),

    #[error("frame exceeds maximum size: {len} > {max}")]
    FrameTooLarge { len: usize, max: usize },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("entity error: {0}")]
    Entity(#[from] EntityError),

    #[error("unknown session: {0}")]
    UnknownSession(vantage_core::SessionId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type NetResult<T> = Result<T, NetError>;
