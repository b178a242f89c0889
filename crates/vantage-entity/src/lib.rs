//! `vantage-entity` — entity record storage for the VANTAGE simulation core.
//!
//! # Crate layout
//!
//! | Module      | Contents                                         |
//! |-------------|----------------------------------------------------|
//! | [`entity`]  | `Entity` (position, velocity, sequence, kind)     |
//! | [`store`]   | `EntityStore` (id-keyed storage, monotonic ids)  |
//! | [`builder`] | `EntityStoreBuilder`                             |
//! | [`error`]   | `EntityError`, `EntityResult<T>`                 |
//!
//! Unlike the teacher's `dt-agent` (Structure-of-Arrays, feature-gated
//! fields, fixed agent population decided at load time), entities here are
//! spawned and removed continuously over the server's lifetime and ids
//! must never be reused (spec.md §4.1: "monotonically assigned... skipping
//! zero"), so storage is a `HashMap<EntityId, Entity>` behind a monotonic
//! id counter rather than a pre-sized SoA array indexed directly by id.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.   |

pub mod builder;
pub mod entity;
pub mod error;
pub mod store;


pub use builder::EntityStoreBuilder;
pub use entity::{Entity, EntityKind};
pub use error::{EntityError, EntityResult};
pub use store::EntityStore;
