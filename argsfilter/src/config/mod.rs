//! Settings: the process-wide store, per-type overrides and merge layers.
//!
//! - **`store`**: [`ConfigStore`] and the [`FilterConfig`] record it publishes
//! - **`strategy`**: [`Strategy`] (`show`, `hide`, `filter`)
//! - **`settings`**: [`SettingsOverride`] layers merged into [`EffectiveSettings`]
//! - **`overrides`**: [`OverrideRegistry`] of per-type [`OverrideProvider`]s
//! - **`options`**: [`FilterOptions`], the serde form of a settings batch

mod options;
mod overrides;
mod settings;
mod store;
mod strategy;

pub use options::FilterOptions;
pub use overrides::{OverrideProvider, OverrideRegistry};
pub use settings::{EffectiveSettings, SettingsOverride};
pub use store::{ConfigStore, DEFAULT_SENSITIVE_HINTS, DEFAULT_SETTINGS_KEY, FilterConfig};
pub use strategy::Strategy;
