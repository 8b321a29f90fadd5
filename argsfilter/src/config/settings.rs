//! Settings layers and their field-wise merge.
//!
//! Effective settings are built per job as `defaults ⊕ type override ⊕ call
//! override`. Each [`SettingsOverride`] only replaces the fields it sets, so a
//! layer that changes the strategy keeps the redactor and hints from below.

use std::{collections::BTreeSet, fmt, sync::Arc};

use super::strategy::Strategy;
use crate::redaction::Redactor;

// =============================================================================
// SettingsOverride
// =============================================================================

/// One precedence layer. Unset fields fall through to the layer below.
#[derive(Clone, Default)]
pub struct SettingsOverride {
    pub strategy: Option<Strategy>,
    pub redactor: Option<Arc<dyn Redactor>>,
    pub sensitive_hints: Option<BTreeSet<String>>,
    pub settings_key: Option<String>,
}

impl SettingsOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    #[must_use]
    pub fn with_redactor(mut self, redactor: Arc<dyn Redactor>) -> Self {
        self.redactor = Some(redactor);
        self
    }

    #[must_use]
    pub fn with_sensitive_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_hints = Some(hints.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = Some(key.into());
        self
    }

    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategy.is_none()
            && self.redactor.is_none()
            && self.sensitive_hints.is_none()
            && self.settings_key.is_none()
    }
}

impl fmt::Debug for SettingsOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsOverride")
            .field("strategy", &self.strategy)
            .field("redactor", &self.redactor.as_ref().map(|r| r.name()))
            .field("sensitive_hints", &self.sensitive_hints)
            .field("settings_key", &self.settings_key)
            .finish()
    }
}

// =============================================================================
// EffectiveSettings
// =============================================================================

/// Fully merged settings for one pipeline invocation.
#[derive(Clone)]
pub struct EffectiveSettings {
    pub strategy: Strategy,
    pub redactor: Arc<dyn Redactor>,
    pub sensitive_hints: BTreeSet<String>,
    pub settings_key: String,
}

impl EffectiveSettings {
    /// Applies `layer` on top of `self`, field by field.
    #[must_use]
    pub fn merge(mut self, layer: &SettingsOverride) -> Self {
        if let Some(strategy) = layer.strategy {
            self.strategy = strategy;
        }
        if let Some(redactor) = &layer.redactor {
            self.redactor = Arc::clone(redactor);
        }
        if let Some(hints) = &layer.sensitive_hints {
            self.sensitive_hints.clone_from(hints);
        }
        if let Some(key) = &layer.settings_key {
            self.settings_key.clone_from(key);
        }
        self
    }
}

impl fmt::Debug for EffectiveSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveSettings")
            .field("strategy", &self.strategy)
            .field("redactor", &self.redactor.name())
            .field("sensitive_hints", &self.sensitive_hints)
            .field("settings_key", &self.settings_key)
            .finish()
    }
}
