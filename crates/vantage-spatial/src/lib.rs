//! `vantage-spatial` — the per-tick quadtree spatial index.
//!
//! # Crate layout
//!
//! | Module       | Contents                                       |
//! |--------------|-------------------------------------------------|
//! | [`quadtree`] | `Quadtree`, `QuadtreeBuilder`                   |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`             |
//!
//! The tree is rebuilt from scratch once per tick (spec.md §4.2 —
//! "rebuild per tick, not incrementally updated") rather than mutated
//! in place, so there is no insert/remove API surface: a fresh
//! [`Quadtree`] is built from the full entity position set each tick via
//! [`Quadtree::build`], then queried read-only via
//! [`Quadtree::query_circle`] (AOI radius lookups) or
//! [`Quadtree::query_rect`] (spec.md §4.2's `queryRect`, used by the
//! round-trip property in spec.md §8).

pub mod error;
pub mod quadtree;


pub use error::{SpatialError, SpatialResult};
pub use quadtree::{Quadtree, QuadtreeConfig};
