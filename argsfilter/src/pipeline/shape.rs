//! Argument shape detection.
//!
//! Jobs receive arguments in one of two shapes:
//!
//! - **direct**: the argument list itself (or its sole mapping) is the payload,
//!   e.g. `[{login: "a", password: "b"}]`;
//! - **delegated dispatch**: the list names a target and carries the real
//!   payload one level deeper, e.g.
//!   `["UserMailer", "welcome", "deliver_now", {args: [{login: "a"}]}]`.
//!
//! Detection runs once per job; settings resolution and payload extraction both
//! consume the same [`Shape`] so they can never disagree.

use crate::value::{Mapping, Value};

/// Key holding the nested payload of a delegated dispatch.
pub const DISPATCH_ARGS_KEY: &str = "args";

/// Structural classification of a job's argument list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    DirectArguments,
    DelegatedDispatch {
        /// The dispatch target's type name, when the first argument names one.
        target: Option<&'a str>,
        /// The first mapping containing [`DISPATCH_ARGS_KEY`].
        trailing: &'a Mapping,
    },
}

impl<'a> Shape<'a> {
    /// Classifies `arguments`. Returns `None` for an empty list, meaning there
    /// is nothing to log.
    ///
    /// The first mapping containing `args` wins; later ones are ignored.
    #[must_use]
    pub fn detect(arguments: &'a [Value]) -> Option<Self> {
        let first = arguments.first()?;
        let trailing = arguments
            .iter()
            .filter_map(Value::as_mapping)
            .find(|mapping| mapping.contains_key(DISPATCH_ARGS_KEY));

        let shape = match trailing {
            Some(trailing) => Self::DelegatedDispatch {
                target: first.as_str(),
                trailing,
            },
            None => Self::DirectArguments,
        };
        Some(shape)
    }

    /// The nested payload of a delegated dispatch.
    #[must_use]
    pub fn dispatch_args(&self) -> Option<&'a Value> {
        match self {
            Self::DirectArguments => None,
            Self::DelegatedDispatch { trailing, .. } => trailing.get(DISPATCH_ARGS_KEY),
        }
    }

    #[must_use]
    pub fn is_dispatch(&self) -> bool {
        matches!(self, Self::DelegatedDispatch { .. })
    }
}
