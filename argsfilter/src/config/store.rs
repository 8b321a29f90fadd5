//! Process-wide default redaction policy.
//!
//! [`ConfigStore`] holds one immutable [`FilterConfig`] behind a shared
//! reference. Readers take an `Arc` snapshot; [`ConfigStore::configure`]
//! applies a batch of changes to a private copy and swaps it in, so a reader
//! sees either the whole batch or none of it.
//!
//! Share one store at the composition root rather than reaching for a global:
//!
//! ```rust
//! use std::sync::Arc;
//! use argsfilter::{ConfigStore, Strategy};
//!
//! let store = Arc::new(ConfigStore::default());
//! store.configure(|config| {
//!     config.set_strategy(Strategy::Filter);
//!     config.set_sensitive_hints(["password", "token"]);
//! });
//! assert_eq!(store.strategy(), Strategy::Filter);
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use super::{options::FilterOptions, settings::EffectiveSettings, strategy::Strategy};
use crate::{
    error::Result,
    redaction::{PARAMETER_FILTER, ParameterFilter, Redactor},
};

/// Key under which per-call overrides are read unless configured otherwise.
pub const DEFAULT_SETTINGS_KEY: &str = "active_job";

/// Field-name fragments filtered when no hints are configured.
pub const DEFAULT_SENSITIVE_HINTS: &[&str] = &[
    "passw",
    "secret",
    "token",
    "_key",
    "crypt",
    "salt",
    "certificate",
    "otp",
    "ssn",
];

// =============================================================================
// FilterConfig
// =============================================================================

/// Default policy record. Unset fields resolve to built-in defaults.
#[derive(Clone, Default)]
pub struct FilterConfig {
    strategy: Option<Strategy>,
    redactor: Option<Arc<dyn Redactor>>,
    sensitive_hints: Option<BTreeSet<String>>,
    settings_key: Option<String>,
    named_redactors: BTreeMap<String, Arc<dyn Redactor>>,
}

impl FilterConfig {
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy.unwrap_or_default()
    }

    #[must_use]
    pub fn redactor(&self) -> Arc<dyn Redactor> {
        self.redactor
            .clone()
            .unwrap_or_else(|| Arc::new(ParameterFilter::default()))
    }

    #[must_use]
    pub fn sensitive_hints(&self) -> BTreeSet<String> {
        self.sensitive_hints.clone().unwrap_or_else(|| {
            DEFAULT_SENSITIVE_HINTS
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }

    #[must_use]
    pub fn settings_key(&self) -> &str {
        self.settings_key.as_deref().unwrap_or(DEFAULT_SETTINGS_KEY)
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = Some(strategy);
    }

    pub fn set_redactor(&mut self, redactor: Arc<dyn Redactor>) {
        self.redactor = Some(redactor);
    }

    pub fn set_sensitive_hints<I, S>(&mut self, hints: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_hints = Some(hints.into_iter().map(Into::into).collect());
    }

    pub fn set_settings_key(&mut self, key: impl Into<String>) {
        self.settings_key = Some(key.into());
    }

    /// Makes `redactor` selectable by name from override mappings.
    pub fn register_redactor(&mut self, name: impl Into<String>, redactor: Arc<dyn Redactor>) {
        self.named_redactors.insert(name.into(), redactor);
    }

    /// Looks up a redactor registered under `name`.
    ///
    /// The built-in [`ParameterFilter`] answers to [`PARAMETER_FILTER`] unless
    /// that name was registered explicitly.
    #[must_use]
    pub fn named_redactor(&self, name: &str) -> Option<Arc<dyn Redactor>> {
        match self.named_redactors.get(name) {
            Some(redactor) => Some(Arc::clone(redactor)),
            None if name == PARAMETER_FILTER => Some(Arc::new(ParameterFilter::default())),
            None => None,
        }
    }

    /// Snapshots the four settings fields as the base merge layer.
    #[must_use]
    pub fn to_settings(&self) -> EffectiveSettings {
        EffectiveSettings {
            strategy: self.strategy(),
            redactor: self.redactor(),
            sensitive_hints: self.sensitive_hints(),
            settings_key: self.settings_key().to_string(),
        }
    }
}

impl fmt::Debug for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("strategy", &self.strategy)
            .field("redactor", &self.redactor.as_ref().map(|r| r.name()))
            .field("sensitive_hints", &self.sensitive_hints)
            .field("settings_key", &self.settings_key)
            .field("named_redactors", &self.named_redactors.keys())
            .finish()
    }
}

// =============================================================================
// ConfigStore
// =============================================================================

/// Shared holder of the current [`FilterConfig`].
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Arc<FilterConfig>>,
}

impl ConfigStore {
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Returns the current configuration. Later reconfiguration does not
    /// affect a snapshot already taken.
    #[must_use]
    pub fn snapshot(&self) -> Arc<FilterConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies `mutator` to a copy of the current configuration and publishes
    /// the result. Concurrent `configure` calls are serialized.
    pub fn configure<F>(&self, mutator: F)
    where
        F: FnOnce(&mut FilterConfig),
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = FilterConfig::clone(&guard);
        mutator(&mut next);
        *guard = Arc::new(next);
        tracing::debug!(config = ?*guard, "argument filter reconfigured");
    }

    /// Applies a declarative batch, e.g. one parsed from a config file.
    ///
    /// Nothing is published if any field is invalid.
    pub fn configure_from_options(&self, options: &FilterOptions) -> Result<()> {
        let current = self.snapshot();
        let layer = options.to_override(&current)?;
        self.configure(|config| {
            if let Some(strategy) = layer.strategy {
                config.set_strategy(strategy);
            }
            if let Some(redactor) = layer.redactor {
                config.set_redactor(redactor);
            }
            if let Some(hints) = layer.sensitive_hints {
                config.set_sensitive_hints(hints);
            }
            if let Some(key) = layer.settings_key {
                config.set_settings_key(key);
            }
        });
        Ok(())
    }

    /// Restores built-in defaults, dropping named redactors.
    pub fn reset(&self) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(FilterConfig::default());
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.snapshot().strategy()
    }

    #[must_use]
    pub fn redactor(&self) -> Arc<dyn Redactor> {
        self.snapshot().redactor()
    }

    #[must_use]
    pub fn sensitive_hints(&self) -> BTreeSet<String> {
        self.snapshot().sensitive_hints()
    }

    #[must_use]
    pub fn settings_key(&self) -> String {
        self.snapshot().settings_key().to_string()
    }

    /// Snapshots the current configuration as effective-settings defaults.
    #[must_use]
    pub fn to_settings(&self) -> EffectiveSettings {
        self.snapshot().to_settings()
    }
}
