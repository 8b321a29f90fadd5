//! Declarative settings, as written in config files and override mappings.
//!
//! Override mappings embedded in job arguments can only carry data, so the
//! redactor is named rather than passed; names resolve through
//! [`FilterConfig::named_redactor`]. Both the modern and the legacy
//! `filter_`-prefixed spellings of each field are accepted.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{settings::SettingsOverride, store::FilterConfig, strategy::Strategy};
use crate::{
    error::{FilterError, Result},
    value::Value,
};

/// A batch of settings, every field optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FilterOptions {
    #[serde(default, alias = "filter_strategy")]
    pub strategy: Option<String>,
    #[serde(default, alias = "filter_keys")]
    pub sensitive_hints: Option<Vec<String>>,
    #[serde(default, alias = "filter_settings_key")]
    pub settings_key: Option<String>,
    #[serde(default, alias = "filter_class")]
    pub redactor: Option<String>,
}

impl FilterOptions {
    /// Reads options from an override mapping found under `key`.
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        serde_json::from_value(JsonValue::from(value)).map_err(|source| {
            FilterError::InvalidOverride {
                key: key.to_string(),
                source,
            }
        })
    }

    /// Converts to a merge layer.
    ///
    /// An unknown strategy is an error. An unknown redactor name is skipped
    /// with a warning, leaving the redactor of lower layers in place.
    pub fn to_override(&self, config: &FilterConfig) -> Result<SettingsOverride> {
        let strategy = self
            .strategy
            .as_deref()
            .map(str::parse::<Strategy>)
            .transpose()?;

        let redactor = self.redactor.as_deref().and_then(|name| {
            let found = config.named_redactor(name);
            if found.is_none() {
                tracing::warn!(redactor = name, "unknown redactor name ignored");
            }
            found
        });

        Ok(SettingsOverride {
            strategy,
            redactor,
            sensitive_hints: self
                .sensitive_hints
                .as_ref()
                .map(|hints| hints.iter().cloned().collect()),
            settings_key: self.settings_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let value = Value::from(json!({
            "filter_strategy": "filter",
            "filter_keys": ["password"],
            "filter_settings_key": "logging",
        }));
        let options = FilterOptions::from_value("active_job", &value).expect("valid options");
        assert_eq!(options.strategy.as_deref(), Some("filter"));
        assert_eq!(options.sensitive_hints, Some(vec!["password".to_string()]));
        assert_eq!(options.settings_key.as_deref(), Some("logging"));
    }

    #[test]
    fn ignores_unrelated_keys() {
        let value = Value::from(json!({"strategy": "hide", "queue": "mailers"}));
        let options = FilterOptions::from_value("active_job", &value).expect("valid options");
        assert_eq!(options.strategy.as_deref(), Some("hide"));
    }

    #[test]
    fn rejects_non_mapping_override() {
        let err = FilterOptions::from_value("active_job", &Value::from("show"))
            .expect_err("string override");
        assert!(matches!(err, FilterError::InvalidOverride { ref key, .. } if key == "active_job"));
    }

    #[test]
    fn rejects_wrongly_typed_field() {
        let value = Value::from(json!({"filter_keys": "password"}));
        assert!(FilterOptions::from_value("active_job", &value).is_err());
    }

    #[test]
    fn unknown_strategy_fails_conversion() {
        let options = FilterOptions {
            strategy: Some("redact".to_string()),
            ..FilterOptions::default()
        };
        let err = options
            .to_override(&FilterConfig::default())
            .expect_err("unknown strategy");
        assert!(matches!(err, FilterError::UnknownStrategy(_)));
    }

    #[test]
    fn unknown_redactor_name_is_skipped() {
        let options = FilterOptions {
            redactor: Some("Missing::Filter".to_string()),
            strategy: Some("filter".to_string()),
            ..FilterOptions::default()
        };
        let layer = options
            .to_override(&FilterConfig::default())
            .expect("valid options");
        assert!(layer.redactor.is_none());
        assert_eq!(layer.strategy, Some(Strategy::Filter));
    }

    #[test]
    fn parses_from_json_document() {
        let options: FilterOptions = serde_json::from_str(
            r#"{"strategy": "filter", "sensitive_hints": ["password", "token"], "redactor": "parameter_filter"}"#,
        )
        .expect("valid document");
        let layer = options
            .to_override(&FilterConfig::default())
            .expect("valid options");
        assert_eq!(layer.redactor.map(|r| r.name().to_string()).as_deref(), Some("parameter_filter"));
        assert_eq!(layer.sensitive_hints.map(|h| h.len()), Some(2));
    }
}
