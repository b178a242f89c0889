//! `vantage-aoi` — per-observer area-of-interest tracking (spec.md §4.3).
//!
//! # Crate layout
//!
//! | Module      | Contents                                |
//! |-------------|-------------------------------------------|
//! | [`tracker`] | `AoiTracker`, `AoiDiff`                  |
//!
//! No teacher counterpart exists for this module (`gabemgem-rust_dt` has
//! no neighbor-visibility concept); see `DESIGN.md` for its grounding in
//! the retrieval pack's grid-space AOI tracker and in
//! `dt_schedule::wake_queue::WakeQueue`'s sparse drain-on-tick bookkeeping
//! style.
//!
//! Every public operation here is infallible (a diff against an unknown
//! observer simply starts that observer with an empty memory), so this
//! crate carries no `error` module.

pub mod tracker;


pub use tracker::{AoiDiff, AoiTracker};
