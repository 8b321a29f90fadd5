//! How a sensitive value is replaced once its key matched a hint.
//!
//! The default is a fixed placeholder ([`FILTERED_PLACEHOLDER`]). Partial
//! masking keeps a few characters of string values visible, which helps
//! operators correlate log lines (e.g. the last four digits of a card) without
//! exposing the full value. Partial policies operate on Unicode scalar values.

use std::borrow::Cow;

use crate::value::{Scalar, Value};

/// Placeholder written in place of sensitive values.
pub const FILTERED_PLACEHOLDER: &str = "[FILTERED]";

/// Default character used by the masking policies.
pub const MASK_CHAR: char = '*';

/// Replacement applied to the value of a sensitive mapping entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Replace the whole value with fixed text.
    Placeholder(Cow<'static, str>),
    /// Keep `prefix` leading and `suffix` trailing characters, mask the rest.
    KeepEdges {
        prefix: usize,
        suffix: usize,
        mask_char: char,
    },
    /// Mask `prefix` leading and `suffix` trailing characters, keep the rest.
    MaskEdges {
        prefix: usize,
        suffix: usize,
        mask_char: char,
    },
}

impl Replacement {
    /// Replaces values with a custom placeholder.
    #[must_use]
    pub fn placeholder(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Keeps only the last `suffix` characters in clear text.
    #[must_use]
    pub fn keep_last(suffix: usize) -> Self {
        Self::KeepEdges {
            prefix: 0,
            suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Keeps only the first `prefix` characters in clear text.
    #[must_use]
    pub fn keep_first(prefix: usize) -> Self {
        Self::KeepEdges {
            prefix,
            suffix: 0,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks the first `prefix` characters.
    #[must_use]
    pub fn mask_first(prefix: usize) -> Self {
        Self::MaskEdges {
            prefix,
            suffix: 0,
            mask_char: MASK_CHAR,
        }
    }

    /// Overrides the masking character. No effect on placeholders.
    #[must_use]
    pub fn with_mask_char(mut self, mask: char) -> Self {
        match &mut self {
            Self::Placeholder(_) => {}
            Self::KeepEdges { mask_char, .. } | Self::MaskEdges { mask_char, .. } => {
                *mask_char = mask;
            }
        }
        self
    }

    /// Returns the replacement text for a string.
    ///
    /// Empty strings always become [`FILTERED_PLACEHOLDER`] under the masking
    /// policies so their emptiness is not revealed.
    #[must_use]
    pub fn apply_to(&self, text: &str) -> String {
        let (prefix, suffix, mask_char, keep) = match self {
            Self::Placeholder(placeholder) => return placeholder.clone().into_owned(),
            Self::KeepEdges {
                prefix,
                suffix,
                mask_char,
            } => (*prefix, *suffix, *mask_char, true),
            Self::MaskEdges {
                prefix,
                suffix,
                mask_char,
            } => (*prefix, *suffix, *mask_char, false),
        };

        let mut chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if total == 0 {
            return FILTERED_PLACEHOLDER.to_string();
        }

        let edges_cover_all = prefix.saturating_add(suffix) >= total;
        if keep {
            if !edges_cover_all {
                chars[prefix..total - suffix].fill(mask_char);
            }
        } else if edges_cover_all {
            chars.fill(mask_char);
        } else {
            chars[..prefix].fill(mask_char);
            chars[total - suffix..].fill(mask_char);
        }
        chars.into_iter().collect()
    }

    /// Replaces a whole value.
    ///
    /// Non-string scalars are masked through their rendered text. Containers
    /// and opaque references always collapse to the placeholder text.
    #[must_use]
    pub fn apply(&self, value: &Value) -> Value {
        let text = match (self, value) {
            (Self::Placeholder(placeholder), _) => placeholder.clone().into_owned(),
            (_, Value::Scalar(Scalar::Str(text))) => self.apply_to(text),
            (_, Value::Scalar(scalar)) => self.apply_to(&scalar.to_string()),
            (_, Value::Sequence(_) | Value::Mapping(_) | Value::Opaque(_)) => {
                FILTERED_PLACEHOLDER.to_string()
            }
        };
        Value::string(text)
    }
}

impl Default for Replacement {
    fn default() -> Self {
        Self::Placeholder(Cow::Borrowed(FILTERED_PLACEHOLDER))
    }
}
