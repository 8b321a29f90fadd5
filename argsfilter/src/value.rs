//! The argument value model.
//!
//! Job arguments arrive as arbitrary structured data. This module closes that
//! space into a tagged variant ([`Value`]) so shape detection, extraction and
//! redaction can pattern-match exhaustively:
//!
//! - [`Scalar`]: nil, booleans, numbers, strings and symbols
//! - `Sequence`: ordered lists
//! - [`Mapping`]: insertion-ordered key/value maps
//! - [`OpaqueRef`]: references to objects that are rendered but never walked
//!
//! `Display` renders the canonical text form used in log fragments, e.g.
//! `{login: "a", password: "[FILTERED]"}`.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

/// Insertion-ordered mapping of string keys to values.
pub type Mapping = IndexMap<String, Value>;

// =============================================================================
// Scalar
// =============================================================================

/// A leaf value that is never traversed.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A named constant, rendered as `:name`.
    Symbol(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("nil"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Symbol(name) => write!(f, ":{name}"),
        }
    }
}

// =============================================================================
// OpaqueRef
// =============================================================================

/// A reference to a host object the pipeline cannot introspect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueRef {
    type_name: String,
    id: String,
}

impl OpaqueRef {
    #[must_use]
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{} {}>", self.type_name, self.id)
    }
}

// =============================================================================
// Value
// =============================================================================

/// One job argument, or any value nested inside one.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Opaque(OpaqueRef),
}

impl Value {
    /// The `nil` scalar.
    #[must_use]
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// A string scalar.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Str(value.into()))
    }

    /// A symbol scalar.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Symbol(name.into()))
    }

    /// Builds a mapping from key/value pairs, keeping their order.
    #[must_use]
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the text of a string or symbol scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Str(text) | Scalar::Symbol(text)) => Some(text),
            _ => None,
        }
    }

    /// `nil`, empty strings, empty sequences and empty mappings carry nothing
    /// worth logging.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Scalar(Scalar::Null) => true,
            Self::Scalar(Scalar::Str(text)) => text.trim().is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(mapping) => mapping.is_empty(),
            Self::Scalar(_) | Self::Opaque(_) => false,
        }
    }

    /// A short name for the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(Scalar::Null) => "nil",
            Self::Scalar(Scalar::Bool(_)) => "boolean",
            Self::Scalar(Scalar::Int(_) | Scalar::Float(_)) => "number",
            Self::Scalar(Scalar::Str(_)) => "string",
            Self::Scalar(Scalar::Symbol(_)) => "symbol",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Opaque(_) => "opaque reference",
        }
    }
}

fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    let body = key.trim_end_matches(['?', '!']);
    body.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => scalar.fmt(f),
            Self::Opaque(reference) => reference.fmt(f),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::Mapping(mapping) => {
                f.write_str("{")?;
                for (index, (key, value)) in mapping.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    if is_bare_key(key) {
                        write!(f, "{key}: {value}")?;
                    } else {
                        write!(f, "{key:?}: {value}")?;
                    }
                }
                f.write_str("}")
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<OpaqueRef> for Value {
    fn from(reference: OpaqueRef) -> Self {
        Self::Opaque(reference)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::null(),
            JsonValue::Bool(value) => value.into(),
            JsonValue::Number(number) => match number.as_i64() {
                Some(int) => int.into(),
                None => number.as_f64().map_or_else(Self::null, Self::from),
            },
            JsonValue::String(text) => text.into(),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(object) => Self::Mapping(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Scalar(Scalar::Null) => JsonValue::Null,
            Value::Scalar(Scalar::Bool(flag)) => JsonValue::Bool(*flag),
            Value::Scalar(Scalar::Int(int)) => JsonValue::from(*int),
            Value::Scalar(Scalar::Float(float)) => JsonValue::from(*float),
            Value::Scalar(Scalar::Str(text) | Scalar::Symbol(text)) => {
                JsonValue::String(text.clone())
            }
            Value::Sequence(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Mapping(mapping) => JsonValue::Object(
                mapping
                    .iter()
                    .map(|(key, value)| (key.clone(), JsonValue::from(value)))
                    .collect(),
            ),
            Value::Opaque(reference) => JsonValue::String(reference.to_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(Scalar::Null) => serializer.serialize_unit(),
            Self::Scalar(Scalar::Bool(flag)) => serializer.serialize_bool(*flag),
            Self::Scalar(Scalar::Int(int)) => serializer.serialize_i64(*int),
            Self::Scalar(Scalar::Float(float)) => serializer.serialize_f64(*float),
            Self::Scalar(Scalar::Str(text) | Scalar::Symbol(text)) => serializer.serialize_str(text),
            Self::Opaque(reference) => serializer.collect_str(reference),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(mapping) => {
                let mut map = serializer.serialize_map(Some(mapping.len()))?;
                for (key, value) in mapping {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
