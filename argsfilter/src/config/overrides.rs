//! Per-type settings overrides.
//!
//! Hosts register an [`OverrideProvider`] for each job or dispatch-target type
//! that needs settings different from the process defaults. Lookup by an
//! unknown name yields `None`, never an error.

use std::{collections::HashMap, fmt, sync::Arc};

use super::settings::SettingsOverride;

/// Supplies the settings override for one declared type.
pub trait OverrideProvider: Send + Sync {
    fn overrides(&self) -> SettingsOverride;
}

impl OverrideProvider for SettingsOverride {
    fn overrides(&self) -> SettingsOverride {
        self.clone()
    }
}

impl<F> OverrideProvider for F
where
    F: Fn() -> SettingsOverride + Send + Sync,
{
    fn overrides(&self) -> SettingsOverride {
        self()
    }
}

/// Type name → override provider, populated at startup.
#[derive(Clone, Default)]
pub struct OverrideRegistry {
    providers: HashMap<String, Arc<dyn OverrideProvider>>,
}

impl OverrideRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` for `type_name`, replacing any previous one.
    pub fn register<P>(&mut self, type_name: impl Into<String>, provider: P)
    where
        P: OverrideProvider + 'static,
    {
        self.providers.insert(type_name.into(), Arc::new(provider));
    }

    /// Builder form of [`OverrideRegistry::register`].
    #[must_use]
    pub fn with<P>(mut self, type_name: impl Into<String>, provider: P) -> Self
    where
        P: OverrideProvider + 'static,
    {
        self.register(type_name, provider);
        self
    }

    /// Returns the override for `type_name`, if one is registered.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<SettingsOverride> {
        self.providers
            .get(type_name)
            .map(|provider| provider.overrides())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}
