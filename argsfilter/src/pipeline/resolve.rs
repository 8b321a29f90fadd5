//! Settings resolution.
//!
//! Merges `defaults ⊕ type override ⊕ call override` for one job:
//!
//! - the type override comes from the [`OverrideRegistry`], keyed by the job's
//!   declared type, or by the dispatch target for a delegated dispatch;
//! - the call override is the first non-blank entry under the settings key,
//!   where the key itself is read from `defaults ⊕ type override`.

use super::shape::{DISPATCH_ARGS_KEY, Shape};
use crate::{
    config::{EffectiveSettings, FilterConfig, FilterOptions, OverrideRegistry},
    error::Result,
    value::{Mapping, Value},
};

/// Produces the effective settings of one job.
#[derive(Debug, Clone, Copy)]
pub struct SettingsResolver<'a> {
    config: &'a FilterConfig,
    registry: &'a OverrideRegistry,
}

impl<'a> SettingsResolver<'a> {
    #[must_use]
    pub fn new(config: &'a FilterConfig, registry: &'a OverrideRegistry) -> Self {
        Self { config, registry }
    }

    /// Resolves the settings for a job of `type_name` with `arguments`.
    ///
    /// Fails when the call override mapping is malformed or names an unknown
    /// strategy.
    pub fn resolve(
        &self,
        type_name: &str,
        arguments: &[Value],
        shape: &Shape<'_>,
    ) -> Result<EffectiveSettings> {
        let mut settings = self.config.to_settings();

        let owner = match shape {
            Shape::DirectArguments => Some(type_name),
            Shape::DelegatedDispatch { target, .. } => *target,
        };
        match owner.and_then(|name| self.registry.get(name)) {
            Some(layer) => settings = settings.merge(&layer),
            None => tracing::trace!(owner = ?owner, "no type-level settings override"),
        }

        let key = settings.settings_key.clone();
        let Some(entry) = find_call_override(arguments, shape, &key) else {
            return Ok(settings);
        };

        let layer = FilterOptions::from_value(&key, entry)?.to_override(self.config)?;
        tracing::debug!(key = %key, layer = ?layer, "applying call-level settings override");
        Ok(settings.merge(&layer))
    }
}

/// Scans the relevant scope for the first non-blank entry under `key`.
///
/// For direct arguments the scope is every mapping in the list. For a
/// delegated dispatch it is the trailing mapping, then each mapping nested
/// under its `args`.
fn find_call_override<'a>(
    arguments: &'a [Value],
    shape: &Shape<'a>,
    key: &str,
) -> Option<&'a Value> {
    let entry_in = |mapping: &'a Mapping| mapping.get(key).filter(|value| !value.is_blank());

    match shape {
        Shape::DirectArguments => arguments
            .iter()
            .filter_map(Value::as_mapping)
            .find_map(entry_in),
        Shape::DelegatedDispatch { trailing, .. } => {
            let nested: Vec<&'a Mapping> = match trailing.get(DISPATCH_ARGS_KEY) {
                Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_mapping).collect(),
                Some(Value::Mapping(mapping)) => vec![mapping],
                _ => Vec::new(),
            };
            std::iter::once(*trailing).chain(nested).find_map(entry_in)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        config::{SettingsOverride, Strategy},
        error::FilterError,
        redaction::{ParameterFilter, Redactor, Replacement},
    };

    fn arguments(json: serde_json::Value) -> Vec<Value> {
        let Value::Sequence(items) = Value::from(json) else {
            panic!("test arguments must be a list");
        };
        items
    }

    fn resolve(
        config: &FilterConfig,
        registry: &OverrideRegistry,
        type_name: &str,
        args: &[Value],
    ) -> Result<EffectiveSettings> {
        let shape = Shape::detect(args).expect("non-empty arguments");
        SettingsResolver::new(config, registry).resolve(type_name, args, &shape)
    }

    fn hide_defaults() -> FilterConfig {
        let mut config = FilterConfig::default();
        config.set_strategy(Strategy::Hide);
        config.set_sensitive_hints(["password"]);
        config
    }

    #[test]
    fn no_overrides_yield_defaults() {
        let args = arguments(json!([{"login": "a"}]));
        let settings = resolve(&hide_defaults(), &OverrideRegistry::new(), "TestJob", &args)
            .expect("settings");
        assert_eq!(settings.strategy, Strategy::Hide);
        assert!(settings.sensitive_hints.contains("password"));
        assert_eq!(settings.settings_key, "active_job");
    }

    #[test]
    fn type_override_merges_field_wise() {
        let registry = OverrideRegistry::new().with(
            "TestJob",
            SettingsOverride::new().with_strategy(Strategy::Filter),
        );
        let args = arguments(json!([{"login": "a"}]));
        let settings = resolve(&hide_defaults(), &registry, "TestJob", &args).expect("settings");
        assert_eq!(settings.strategy, Strategy::Filter);
        assert!(settings.sensitive_hints.contains("password"));
        assert_eq!(settings.redactor.name(), "parameter_filter");
    }

    #[test]
    fn call_override_beats_type_override() {
        let registry = OverrideRegistry::new().with(
            "TestJob",
            SettingsOverride::new()
                .with_strategy(Strategy::Filter)
                .with_sensitive_hints(["token"]),
        );
        let args = arguments(json!([{"login": "a", "active_job": {"strategy": "show"}}]));
        let settings = resolve(&hide_defaults(), &registry, "TestJob", &args).expect("settings");
        assert_eq!(settings.strategy, Strategy::Show);
        assert!(settings.sensitive_hints.contains("token"));
    }

    #[test]
    fn dispatch_uses_target_type_not_job_type() {
        let registry = OverrideRegistry::new()
            .with("UserMailer", SettingsOverride::new().with_strategy(Strategy::Filter))
            .with("DeliveryJob", SettingsOverride::new().with_strategy(Strategy::Show));
        let args = arguments(json!(["UserMailer", "welcome", "deliver_now", {"args": []}]));
        let settings =
            resolve(&hide_defaults(), &registry, "DeliveryJob", &args).expect("settings");
        assert_eq!(settings.strategy, Strategy::Filter);
    }

    #[test]
    fn unresolvable_target_means_no_override() {
        let registry = OverrideRegistry::new()
            .with("DeliveryJob", SettingsOverride::new().with_strategy(Strategy::Show));
        let args = arguments(json!(["Missing::Mailer", "welcome", {"args": []}]));
        let settings =
            resolve(&hide_defaults(), &registry, "DeliveryJob", &args).expect("settings");
        assert_eq!(settings.strategy, Strategy::Hide);
    }

    #[test]
    fn type_override_relocates_settings_key() {
        let registry = OverrideRegistry::new()
            .with("TestJob", SettingsOverride::new().with_settings_key("logging"));
        let args = arguments(json!([{
            "active_job": {"strategy": "filter"},
            "logging": {"strategy": "show"},
        }]));
        let settings = resolve(&hide_defaults(), &registry, "TestJob", &args).expect("settings");
        assert_eq!(settings.strategy, Strategy::Show);
        assert_eq!(settings.settings_key, "logging");
    }

    #[test]
    fn first_non_blank_call_override_wins() {
        let args = arguments(json!([
            {"active_job": {}},
            {"active_job": {"strategy": "filter"}},
            {"active_job": {"strategy": "show"}},
        ]));
        let settings = resolve(&hide_defaults(), &OverrideRegistry::new(), "TestJob", &args)
            .expect("settings");
        assert_eq!(settings.strategy, Strategy::Filter);
    }

    #[test]
    fn dispatch_reads_override_from_trailing_and_nested_mappings() {
        let nested = arguments(json!([
            "UserMailer", "welcome", "deliver_now",
            {"args": [{"login": "a", "active_job": {"strategy": "filter"}}]},
        ]));
        let settings = resolve(&hide_defaults(), &OverrideRegistry::new(), "DeliveryJob", &nested)
            .expect("settings");
        assert_eq!(settings.strategy, Strategy::Filter);

        let trailing = arguments(json!([
            "UserMailer", "welcome", "deliver_now",
            {"args": [{"active_job": {"strategy": "filter"}}], "active_job": {"strategy": "show"}},
        ]));
        let settings =
            resolve(&hide_defaults(), &OverrideRegistry::new(), "DeliveryJob", &trailing)
                .expect("settings");
        assert_eq!(settings.strategy, Strategy::Show);
    }

    #[test]
    fn dispatch_ignores_overrides_outside_its_scope() {
        let args = arguments(json!([
            "UserMailer",
            {"active_job": {"strategy": "show"}},
            {"args": [{"login": "a"}]},
        ]));
        let settings = resolve(&hide_defaults(), &OverrideRegistry::new(), "DeliveryJob", &args)
            .expect("settings");
        assert_eq!(settings.strategy, Strategy::Hide);
    }

    #[test]
    fn call_override_selects_named_redactor() {
        let mut config = hide_defaults();
        let masked: Arc<dyn Redactor> = Arc::new(ParameterFilter::new(Replacement::keep_last(4)));
        config.register_redactor("masked", Arc::clone(&masked));
        let args = arguments(json!([{"active_job": {"filter_class": "masked"}}]));
        let settings =
            resolve(&config, &OverrideRegistry::new(), "TestJob", &args).expect("settings");
        assert!(Arc::ptr_eq(&settings.redactor, &masked));
    }

    #[test]
    fn unknown_call_strategy_is_fatal() {
        let args = arguments(json!([{"active_job": {"strategy": "scramble"}}]));
        let err = resolve(&hide_defaults(), &OverrideRegistry::new(), "TestJob", &args)
            .expect_err("unknown strategy");
        assert!(matches!(err, FilterError::UnknownStrategy(ref name) if name == "scramble"));
    }

    #[test]
    fn malformed_call_override_is_fatal() {
        let args = arguments(json!([{"active_job": "show"}]));
        let err = resolve(&hide_defaults(), &OverrideRegistry::new(), "TestJob", &args)
            .expect_err("string override");
        assert!(matches!(err, FilterError::InvalidOverride { .. }));
    }
}
