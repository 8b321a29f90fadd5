//! Strategy application and the fragments it produces.
//!
//! The engine is a per-invocation state machine: the initial state comes from
//! the effective strategy, the terminal state is one [`ArgsFragment`]. A
//! redactor type mismatch under `filter` moves to the error state, which shows
//! the raw payload behind a visible marker instead of failing the log line.

use std::fmt;

use crate::{
    config::{EffectiveSettings, Strategy},
    value::Value,
};

/// Marker text used by the `hide` strategy.
pub const HIDDEN_MARKER: &str = "[HIDDEN]";

/// Prefix of the fragment produced when a payload cannot be filtered.
pub const WRONG_FORMAT_MARKER: &str = "[ERROR: WRONG FORMAT]";

// =============================================================================
// ArgsFragment - Output appended to a job's log line
// =============================================================================

/// The argument portion of a log line.
///
/// `Display` yields the exact text to append, including its leading space;
/// [`ArgsFragment::Empty`] renders as the empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgsFragment {
    /// Nothing to log.
    Empty,
    /// Arguments withheld.
    Hidden,
    /// Payload rendered without redaction.
    Shown(String),
    /// Payload rendered after redaction.
    Filtered(String),
    /// Payload could not be filtered; the raw rendering is shown.
    Unfilterable(String),
}

impl ArgsFragment {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True for the error state reached by a malformed payload.
    #[must_use]
    pub fn is_unfilterable(&self) -> bool {
        matches!(self, Self::Unfilterable(_))
    }

    /// The rendered payload, when one was rendered.
    #[must_use]
    pub fn payload_text(&self) -> Option<&str> {
        match self {
            Self::Empty | Self::Hidden => None,
            Self::Shown(text) | Self::Filtered(text) | Self::Unfilterable(text) => Some(text),
        }
    }
}

impl fmt::Display for ArgsFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Hidden => write!(f, " WITH ARGS: {HIDDEN_MARKER}"),
            Self::Shown(text) | Self::Filtered(text) => write!(f, " WITH ARGS: {text}"),
            Self::Unfilterable(text) => write!(f, " {WRONG_FORMAT_MARKER} CANNOT FILTER ARGS: {text}"),
        }
    }
}

impl From<ArgsFragment> for String {
    fn from(fragment: ArgsFragment) -> Self {
        fragment.to_string()
    }
}

// =============================================================================
// StrategyEngine
// =============================================================================

/// Applies effective settings to an extracted payload.
#[derive(Debug, Clone, Copy)]
pub struct StrategyEngine<'a> {
    settings: &'a EffectiveSettings,
}

impl<'a> StrategyEngine<'a> {
    #[must_use]
    pub fn new(settings: &'a EffectiveSettings) -> Self {
        Self { settings }
    }

    /// Produces the fragment for `payload`.
    ///
    /// `hide` never looks at the payload. A blank payload is hidden under
    /// every strategy.
    #[must_use]
    pub fn apply(&self, payload: &Value) -> ArgsFragment {
        if self.settings.strategy == Strategy::Hide || payload.is_blank() {
            return ArgsFragment::Hidden;
        }

        match self.settings.strategy {
            Strategy::Hide => ArgsFragment::Hidden,
            Strategy::Show => ArgsFragment::Shown(payload.to_string()),
            Strategy::Filter => {
                let redactor = &self.settings.redactor;
                match redactor.redact(&self.settings.sensitive_hints, payload) {
                    Ok(filtered) => ArgsFragment::Filtered(filtered.to_string()),
                    Err(err) => {
                        tracing::warn!(
                            redactor = redactor.name(),
                            error = %err,
                            "cannot filter job arguments, logging them unfiltered"
                        );
                        ArgsFragment::Unfilterable(payload.to_string())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, sync::Arc};

    use serde_json::json;

    use super::*;
    use crate::redaction::{ParameterFilter, RedactError, Redactor};

    fn settings(strategy: Strategy) -> EffectiveSettings {
        EffectiveSettings {
            strategy,
            redactor: Arc::new(ParameterFilter::default()),
            sensitive_hints: ["password".to_string()].into(),
            settings_key: "active_job".to_string(),
        }
    }

    fn credentials() -> Value {
        Value::from(json!({"login": "a", "password": "b"}))
    }

    #[test]
    fn hide_never_renders_payload() {
        let fragment = StrategyEngine::new(&settings(Strategy::Hide)).apply(&credentials());
        assert_eq!(fragment, ArgsFragment::Hidden);
        assert_eq!(fragment.to_string(), " WITH ARGS: [HIDDEN]");
        assert_eq!(fragment.payload_text(), None);
    }

    #[test]
    fn show_renders_payload_verbatim() {
        let fragment = StrategyEngine::new(&settings(Strategy::Show)).apply(&credentials());
        assert_eq!(fragment.to_string(), r#" WITH ARGS: {login: "a", password: "b"}"#);
    }

    #[test]
    fn filter_redacts_sensitive_fields() {
        let fragment = StrategyEngine::new(&settings(Strategy::Filter)).apply(&credentials());
        assert_eq!(
            fragment.to_string(),
            r#" WITH ARGS: {login: "a", password: "[FILTERED]"}"#
        );
    }

    #[test]
    fn blank_payload_is_hidden_under_every_strategy() {
        for strategy in [Strategy::Show, Strategy::Hide, Strategy::Filter] {
            let engine_settings = settings(strategy);
            let engine = StrategyEngine::new(&engine_settings);
            assert_eq!(engine.apply(&Value::from(Vec::new())), ArgsFragment::Hidden);
            assert_eq!(engine.apply(&Value::null()), ArgsFragment::Hidden);
        }
    }

    #[test]
    fn type_mismatch_falls_back_to_raw_payload() {
        let payload = Value::from(json!(["password", "login", "phone", "full-name"]));
        let fragment = StrategyEngine::new(&settings(Strategy::Filter)).apply(&payload);
        assert!(fragment.is_unfilterable());
        assert_eq!(
            fragment.to_string(),
            r#" [ERROR: WRONG FORMAT] CANNOT FILTER ARGS: ["password", "login", "phone", "full-name"]"#
        );
    }

    #[test]
    fn custom_redactor_failures_are_recovered() {
        #[derive(Debug)]
        struct Refuses;

        impl Redactor for Refuses {
            fn redact(&self, _: &BTreeSet<String>, value: &Value) -> Result<Value, RedactError> {
                Err(RedactError::TypeMismatch { found: value.kind() })
            }
        }

        let mut engine_settings = settings(Strategy::Filter);
        engine_settings.redactor = Arc::new(Refuses);
        let fragment = StrategyEngine::new(&engine_settings).apply(&credentials());
        assert_eq!(
            fragment,
            ArgsFragment::Unfilterable(r#"{login: "a", password: "b"}"#.to_string())
        );
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert_eq!(ArgsFragment::Empty.to_string(), "");
        assert!(ArgsFragment::Empty.is_empty());
        assert_eq!(String::from(ArgsFragment::Hidden), " WITH ARGS: [HIDDEN]");
    }
}
