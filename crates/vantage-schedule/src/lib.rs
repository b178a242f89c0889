//! `vantage-schedule` — inbound movement-intent staging for the VANTAGE
//! spatial simulation core (spec.md §4.5 phase 1).
//!
//! # Crate layout
//!
//! | Module           | Contents                         |
//! |------------------|------------------------------------|
//! | [`intent_buffer`]| `IntentBuffer`                    |
//! | [`error`]        | `ScheduleError`, `ScheduleResult<T>` |
//!
//! The teacher's activity-plan/CSV-schedule domain (agents cycling
//! through home/work/leisure activities on a weekly period) has no
//! counterpart here: entities don't follow a schedule, they move exactly
//! when a session sends a movement intent. What survives is the
//! teacher's drain-per-tick shape (`dt_schedule::wake_queue::WakeQueue`),
//! generalized from "agents scheduled to wake at a future tick" to
//! "intents staged for the very next tick."

pub mod error;
pub mod intent_buffer;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use intent_buffer::IntentBuffer;
