//! Fluent builder for [`EntityStore`].
//!
//! Simplified from `dt_agent::builder::AgentStoreBuilder`: there is no
//! component registry or RNG seed to thread through, just the capacity and
//! world-bounds fields carried by [`vantage_core::EngineConfig`].

use vantage_core::Rect;

use crate::store::EntityStore;

pub struct EntityStoreBuilder {
    max_entities: usize,
    world_bounds: Rect,
}

impl EntityStoreBuilder {
    pub fn new(max_entities: usize, world_bounds: Rect) -> Self {
        Self { max_entities, world_bounds }
    }

    pub fn build(self) -> EntityStore {
        EntityStore::new(self.max_entities, self.world_bounds)
    }
}
