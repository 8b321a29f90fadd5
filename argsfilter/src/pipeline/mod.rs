//! The three-stage decision pipeline.
//!
//! - **`shape`**: classifies the argument list ([`Shape`])
//! - **`resolve`**: merges settings layers ([`SettingsResolver`])
//! - **`extract`**: picks the payload ([`extract_payload`])
//! - **`engine`**: applies the strategy ([`StrategyEngine`], [`ArgsFragment`])
//!
//! [`ArgsFilter`] wires them together around a shared [`ConfigStore`] and an
//! [`OverrideRegistry`].

mod engine;
mod extract;
mod resolve;
mod shape;

use std::sync::Arc;

pub use engine::{ArgsFragment, HIDDEN_MARKER, StrategyEngine, WRONG_FORMAT_MARKER};
pub use extract::extract_payload;
pub use resolve::SettingsResolver;
pub use shape::{DISPATCH_ARGS_KEY, Shape};

use crate::{
    config::{ConfigStore, OverrideRegistry},
    error::Result,
    value::Value,
};

/// Decides how a job's arguments appear in its log line.
///
/// Cheap to clone; clones share the same store and registry.
#[derive(Clone, Debug, Default)]
pub struct ArgsFilter {
    store: Arc<ConfigStore>,
    overrides: Arc<OverrideRegistry>,
}

impl ArgsFilter {
    #[must_use]
    pub fn new(store: Arc<ConfigStore>, overrides: Arc<OverrideRegistry>) -> Self {
        Self { store, overrides }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    #[must_use]
    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    /// Produces the log fragment for a job of `type_name` with `arguments`.
    ///
    /// An empty argument list yields [`ArgsFragment::Empty`]. A payload the
    /// redactor cannot handle yields [`ArgsFragment::Unfilterable`]. Errors
    /// are reserved for settings that cannot be resolved.
    pub fn filter(&self, type_name: &str, arguments: &[Value]) -> Result<ArgsFragment> {
        let Some(shape) = Shape::detect(arguments) else {
            return Ok(ArgsFragment::Empty);
        };
        tracing::trace!(job = type_name, shape = ?shape, "detected argument shape");

        let config = self.store.snapshot();
        let settings = SettingsResolver::new(&config, &self.overrides)
            .resolve(type_name, arguments, &shape)?;
        let payload = extract_payload(arguments, &shape);

        Ok(StrategyEngine::new(&settings).apply(&payload))
    }
}
