//! Error types for runguard
//!
//! All modules use `RunguardResult<T>` as their return type.

use crate::sanitizer::Rule;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runguard operations
pub type RunguardResult<T> = Result<T, RunguardError>;

/// All errors that can occur in runguard
#[derive(Error, Debug)]
pub enum RunguardError {
    // Validation errors
    #[error("Invalid docker run argument '{token}': {rule}")]
    InvalidArgument { token: String, rule: Rule },

    #[error("No docker run arguments given")]
    MissingInput,

    #[error("{failed} of {run} validation cases failed")]
    CasesFailed { run: usize, failed: usize },

    #[error("Invalid case file {path}: {reason}")]
    CaseFileInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Unknown config key '{key}'. Valid keys: {valid}")]
    UnknownConfigKey { key: String, valid: String },

    #[error("Invalid value for {key}: {reason}")]
    ConfigValue { key: String, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl RunguardError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid argument error for a rejected token
    pub fn invalid_argument(token: impl Into<String>, rule: Rule) -> Self {
        Self::InvalidArgument {
            token: token.into(),
            rule,
        }
    }

    /// Whether the error is a validation rejection (as opposed to a tool failure)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { rule, .. } => Some(rule.hint()),
            Self::MissingInput => Some(
                "Pass the string after --, e.g. runguard validate -- \"-m 512m\", \
                 or set INPUT_DOCKER-RUN-ARGS",
            ),
            Self::CasesFailed { .. } => {
                Some("Failing cases are listed above with the verdict they produced")
            }
            Self::ConfigInvalid { .. } => {
                Some("Fix the file, or skip it with --no-local or --config <path>")
            }
            _ => None,
        }
    }
}
