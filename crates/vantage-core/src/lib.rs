//! `vantage-core` — foundational types for the VANTAGE spatial simulation core.
//!
//! This crate is a dependency of every other `vantage-*` crate. It has no
//! `vantage-*` dependencies and minimal external ones (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                            |
//! |------------|------------------------------------------------------|
//! | [`ids`]        | `EntityId`, `SessionId`                             |
//! | [`geo`]        | `Point`, `Rect`, distance helpers                    |
//! | [`time`]       | `Tick`                                              |
//! | [`config`]     | `EngineConfig`, validation                          |
//! | [`correction`] | `Correction`, the server→client resync message       |
//! | [`error`]      | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod correction;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use correction::Correction;
pub use error::{CoreError, CoreResult};
pub use geo::{Point, Rect};
pub use ids::{EntityId, SessionId};
pub use time::Tick;
