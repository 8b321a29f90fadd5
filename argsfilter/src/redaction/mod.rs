//! Redaction capabilities consumed by the `filter` strategy.
//!
//! - **`redactor`**: the [`Redactor`] trait and the built-in [`ParameterFilter`]
//! - **`replacement`**: how a matched value is replaced ([`Replacement`])
//! - **`error`**: [`RedactError`], recovered by the strategy engine

mod error;
mod redactor;
mod replacement;

pub use error::RedactError;
pub use redactor::{PARAMETER_FILTER, ParameterFilter, Redactor};
pub use replacement::{FILTERED_PLACEHOLDER, MASK_CHAR, Replacement};
