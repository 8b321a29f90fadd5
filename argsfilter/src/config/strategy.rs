//! The three argument logging strategies.

use std::{fmt, str::FromStr};

use crate::error::FilterError;

/// How much of a job's arguments reaches the log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Render the payload as-is.
    #[default]
    Show,
    /// Replace the payload with a fixed marker.
    Hide,
    /// Render the payload after redacting sensitive fields.
    Filter,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Filter => "filter",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = FilterError;

    /// Parses `show`, `hide` or `filter`, ignoring ASCII case and a leading
    /// `:` so symbol-style values are accepted.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let name = text.trim().trim_start_matches(':');
        [Self::Show, Self::Hide, Self::Filter]
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FilterError::UnknownStrategy(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_strategies() {
        assert_eq!("show".parse::<Strategy>().ok(), Some(Strategy::Show));
        assert_eq!("HIDE".parse::<Strategy>().ok(), Some(Strategy::Hide));
        assert_eq!(":filter".parse::<Strategy>().ok(), Some(Strategy::Filter));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = "mask".parse::<Strategy>().expect_err("unknown strategy");
        assert!(matches!(err, FilterError::UnknownStrategy(ref name) if name == "mask"));
    }

    #[test]
    fn defaults_to_show() {
        assert_eq!(Strategy::default(), Strategy::Show);
    }
}
