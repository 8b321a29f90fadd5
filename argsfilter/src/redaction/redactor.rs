//! Redaction capabilities.
//!
//! A [`Redactor`] receives the effective set of sensitive-field hints and a
//! payload, and returns a filtered copy. The pipeline treats it as a black box;
//! [`ParameterFilter`] is the built-in implementation.

use std::{collections::BTreeSet, fmt};

use super::{error::RedactError, replacement::Replacement};
use crate::value::{Mapping, Value};

/// Name under which [`ParameterFilter`] is registered by default.
pub const PARAMETER_FILTER: &str = "parameter_filter";

/// Replaces sensitive fields of a structured payload.
///
/// Implementations must not mutate their input and must be safe to share
/// across threads, since one instance serves every job in the process.
pub trait Redactor: fmt::Debug + Send + Sync {
    /// Returns a copy of `value` with every entry matching `hints` replaced.
    ///
    /// Fails with [`RedactError::TypeMismatch`] when `value` has a shape the
    /// redactor cannot introspect.
    fn redact(&self, hints: &BTreeSet<String>, value: &Value) -> Result<Value, RedactError>;

    /// A human-readable name, used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Filters mapping entries whose key contains any hint, case-insensitively.
///
/// Nested mappings are walked, including mappings inside sequences. Leaves
/// under non-matching keys pass through unchanged. The top-level payload must
/// be a mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterFilter {
    replacement: Replacement,
}

impl ParameterFilter {
    #[must_use]
    pub fn new(replacement: Replacement) -> Self {
        Self { replacement }
    }

    #[must_use]
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    fn filter_mapping(&self, hints: &[String], mapping: &Mapping) -> Mapping {
        mapping
            .iter()
            .map(|(key, value)| {
                let lowered = key.to_lowercase();
                let filtered = if hints.iter().any(|hint| lowered.contains(hint.as_str())) {
                    self.replacement.apply(value)
                } else {
                    self.filter_nested(hints, value)
                };
                (key.clone(), filtered)
            })
            .collect()
    }

    fn filter_nested(&self, hints: &[String], value: &Value) -> Value {
        match value {
            Value::Mapping(mapping) => Value::Mapping(self.filter_mapping(hints, mapping)),
            Value::Sequence(items) => Value::Sequence(
                items
                    .iter()
                    .map(|item| self.filter_nested(hints, item))
                    .collect(),
            ),
            Value::Scalar(_) | Value::Opaque(_) => value.clone(),
        }
    }
}

impl Redactor for ParameterFilter {
    fn redact(&self, hints: &BTreeSet<String>, value: &Value) -> Result<Value, RedactError> {
        let Value::Mapping(mapping) = value else {
            return Err(RedactError::TypeMismatch { found: value.kind() });
        };
        let hints: Vec<String> = hints
            .iter()
            .filter(|hint| !hint.is_empty())
            .map(|hint| hint.to_lowercase())
            .collect();
        Ok(Value::Mapping(self.filter_mapping(&hints, mapping)))
    }

    fn name(&self) -> &str {
        PARAMETER_FILTER
    }
}
