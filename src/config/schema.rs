//! Configuration schema for runguard
//!
//! Global configuration is stored at `~/.config/runguard/config.toml`; a
//! project-local `.runguard.toml` overrides individual keys.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Verdict output settings
    pub output: OutputConfig,
}

/// Text or JSON, shared by log and verdict output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format
    pub log_format: Format,

    /// Record every verdict in the audit log
    pub audit_log: bool,

    /// Audit log location (defaults to the state directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_path: Option<PathBuf>,
}

/// How verdicts are reported
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Verdict format on stdout
    pub format: Format,

    /// Write step outputs when `$GITHUB_OUTPUT` is set
    pub github_output: bool,

    /// Emit `::error::` workflow commands when running on GitHub Actions
    pub annotations: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Text,
            github_output: true,
            annotations: true,
        }
    }
}
