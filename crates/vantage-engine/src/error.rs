//! `EngineError`, aggregating every sub-crate's error via `#[from]` —
//! grounded on `dt_sim::error::SimError`'s role relative to
//! `dt_behavior::BehaviorError` et al.

use thiserror::Error;

use vantage_core::CoreError;
use vantage_entity::EntityError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("entity store error: {0}")]
    Entity(#[from] EntityError),

    /// `start` was called while a tick task is already running.
    #[error("engine is already running")]
    AlreadyRunning,

    /// A handle method was called with no running tick task to receive
    /// it — either `start` was never called or the task has already
    /// exited (spec.md §6's `Engine` handle has no synchronous way to
    /// observe this other than the call failing).
    #[error("engine is not running")]
    NotRunning,

    /// The tick task panicked instead of returning cleanly from
    /// `shutdown`.
    #[error("engine tick task terminated unexpectedly")]
    TaskPanicked,
}

pub type EngineResult<T> = Result<T, EngineError>;
