//! Fluent builder for [`Engine`] — grounded on `dt_sim::builder::SimBuilder`.

use std::sync::Arc;

use vantage_authority::Validator;
use vantage_core::EngineConfig;

use crate::error::EngineResult;
use crate::handle::Engine;

/// Builds an [`Engine`] handle from a validated [`EngineConfig`] and a
/// [`Validator`] implementation.
///
/// The returned `Engine` is not yet running — call [`Engine::start`] to
/// spawn its tick task.
pub struct EngineBuilder {
    config: EngineConfig,
    validator: Arc<dyn Validator>,
}

impl EngineBuilder {
    /// `validator` is almost always `vantage_authority::StandardValidator`
    /// in production; tests may substitute `NoopValidator`.
    pub fn new(config: EngineConfig, validator: impl Validator + 'static) -> Self {
        Self { config, validator: Arc::new(validator) }
    }

    /// Validate `config` (spec.md §6's configuration surface bounds) and
    /// construct the handle.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;
        Ok(Engine::new(self.config, self.validator))
    }
}
