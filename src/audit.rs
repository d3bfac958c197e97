//! Audit logging for validation verdicts
//!
//! Appends JSON lines to `~/.local/state/runguard/audit.log` (or
//! `general.audit_path`) when `general.audit_log` is enabled.

use crate::config::{schema::Config, ConfigManager};
use crate::sanitizer::Verdict;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// File-based audit logger that appends JSON lines
pub struct AuditLog {
    enabled: bool,
    path: PathBuf,
}

impl AuditLog {
    /// Create a new audit logger from config
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.general.audit_log,
            path: config
                .general
                .audit_path
                .clone()
                .unwrap_or_else(ConfigManager::audit_log_path),
        }
    }

    /// Record a verdict for `input`
    pub async fn verdict(&self, input: &str, verdict: &Verdict) {
        let event = if verdict.is_accept() {
            "validation.accepted"
        } else {
            "validation.rejected"
        };
        let mut data = serde_json::json!({ "input": input });
        if let Verdict::Reject { token, rule } = verdict {
            data["token"] = serde_json::json!(token);
            data["rule"] = serde_json::json!(rule);
        }
        self.log(event, &data).await;
    }

    /// Log an audit event as a JSON line
    ///
    /// IO failures are logged and dropped; they never change a verdict.
    pub async fn log(&self, event: &str, data: &serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "event": event,
            "data": data,
        });

        let mut line = match serde_json::to_string(&entry) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize audit event: {}", e);
                return;
            }
        };
        line.push('\n');

        if let Err(e) = self.append(&line).await {
            warn!("Failed to write audit log {}: {}", self.path.display(), e);
        }
    }

    async fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
