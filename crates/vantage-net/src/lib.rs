//! `vantage-net` — wire protocol, framing, session table, and broadcast
//! dispatch for the VANTAGE spatial simulation core (spec.md §4.6, §6).
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|---------------------------------------------------------|
//! | [`protocol`]| The wire [`Message`] enum and its payload structs        |
//! | [`codec`]   | Length-prefixed CBOR framing                             |
//! | [`session`] | `Session`, `SessionTable`                                |
//! | [`dispatch`]| Translating a tick's output into per-session messages    |
//! | [`gateway`] | Translating inbound messages into `Engine` calls          |
//! | [`error`]   | `NetError`, `NetResult<T>`                               |
//!
//! This crate owns no tick loop of its own; it sits between a byte
//! transport (TCP, in `demos/vantage-server`) and a running
//! [`vantage_engine::Engine`], in both directions.

pub mod codec;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;


pub use dispatch::{dispatch_tick, reap_expired};
pub use error::{NetError, NetResult};
pub use gateway::handle_inbound;
pub use protocol::Message;
pub use session::{Session, SessionTable};
