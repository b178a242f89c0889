//! `vantage-engine` — the fixed-timestep tick scheduler and `Engine`
//! handle for the VANTAGE spatial simulation core (spec.md §4.5, §6).
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|----------------------------------------------------------|
//! | [`engine`]  | `EngineCore` — the six-phase tick and its run loop       |
//! | [`handle`]  | `Engine` — the cloneable process-facing handle           |
//! | [`builder`] | `EngineBuilder`                                          |
//! | [`observer`]| `EngineObserver`, `NoopObserver`                        |
//! | [`stats`]   | `Stats`, `StatsSnapshot`                                |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                        |
//!
//! `Engine` is the direct analogue of the teacher's `dt_sim::Sim` plus
//! `dt_sim::SimBuilder`: a struct owning every subsystem (entity store,
//! spatial index, AOI tracker, validator, mobility integration, intent
//! buffer), built once and driven tick after tick. Unlike `Sim::run`,
//! which loops until a configured `end_tick`, `Engine::start` drives an
//! indefinite `tokio::time::interval` loop that stops only when
//! [`Engine::shutdown`] is called — spec.md's core is a long-running
//! server, not a bounded simulation run. `Engine` never runs a tick
//! itself; `start` hands a freshly built `EngineCore` to its own
//! `tokio::spawn`ed task, and every other `Engine` method talks to that
//! task over a channel.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vantage_authority::StandardValidator;
//! use vantage_core::EngineConfig;
//! use vantage_engine::{EngineBuilder, NoopObserver};
//!
//! let engine = EngineBuilder::new(config, StandardValidator).build()?;
//! engine.start(NoopObserver)?;
//!
//! let entity = engine.spawn_entity(EntityKind::Player, "player", session, position).await?;
//! engine.process_movement_intent(intent)?;
//!
//! engine.shutdown().await?;
//! ```

mod engine;

pub mod builder;
pub mod error;
pub mod handle;
pub mod observer;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::{Despawn, DespawnReason, EntityState, MovementDelta, ObserverUpdate, TickOutput, WorldSnapshot};
pub use error::{EngineError, EngineResult};
pub use handle::Engine;
pub use observer::{EngineObserver, NoopObserver};
pub use stats::{Stats, StatsSnapshot};
