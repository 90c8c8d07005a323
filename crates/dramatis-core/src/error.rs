use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoCharacters,
    InputUnreadable,
    InputInvalid,
    ConfigParseError,
    ConfigUnreadable,
    UnknownMetric,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoCharacters => "E1001",
            Self::InputUnreadable => "E2001",
            Self::InputInvalid => "E2002",
            Self::ConfigParseError => "E3001",
            Self::ConfigUnreadable => "E3002",
            Self::UnknownMetric => "E4001",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NoCharacters => {
                Some("Check that the extractor found character markers in the source text.")
            }
            Self::InputUnreadable => Some("Check the path and read permissions."),
            Self::InputInvalid => {
                Some("Expected a JSON object with a `characters` map and an edge source.")
            }
            Self::ConfigParseError => Some("Fix syntax in dramatis.toml and retry."),
            Self::ConfigUnreadable => {
                Some("Check the --config path, or remove it to use dramatis.toml.")
            }
            Self::UnknownMetric => Some(
                "Use degree, betweenness, closeness, eigenvector, dialogue or interaction_strength.",
            ),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced at the analysis boundary.
///
/// Graph construction and the metrics themselves never fail; these come
/// from loading input or configuration, or from being asked to analyze an
/// empty cast.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no characters to analyze")]
    NoCharacters,

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cast document {}", path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read config {}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
}

impl AnalysisError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NoCharacters => ErrorCode::NoCharacters,
            Self::Io { .. } => ErrorCode::InputUnreadable,
            Self::InvalidInput { .. } => ErrorCode::InputInvalid,
            Self::ConfigIo { .. } => ErrorCode::ConfigUnreadable,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::UnknownMetric(_) => ErrorCode::UnknownMetric,
        }
    }

    /// Remediation hint, if any.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        self.error_code().hint()
    }
}
