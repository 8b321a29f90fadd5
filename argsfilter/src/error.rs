//! Errors that abort a single pipeline invocation.
//!
//! A malformed payload under the `filter` strategy is not an error at this
//! level: the strategy engine recovers it into a visible marker fragment.
//! Everything here means the effective settings themselves could not be
//! trusted, so no fragment is produced.

/// Fatal-to-the-invocation failures.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A strategy outside `show`, `hide` and `filter` was configured.
    #[error("invalid strategy `{0}`: expected one of show, hide, filter")]
    UnknownStrategy(String),

    /// A settings override mapping could not be read.
    #[error("invalid settings override under `{key}`: {source}")]
    InvalidOverride {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = FilterError> = std::result::Result<T, E>;
