//! Errors raised by redaction capabilities.

/// The redactor was handed a value it cannot introspect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedactError {
    #[error("cannot filter a {found}: expected a mapping of named arguments")]
    TypeMismatch { found: &'static str },
}
