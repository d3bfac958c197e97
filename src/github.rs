//! GitHub Actions output wiring
//!
//! Writes step outputs to `$GITHUB_OUTPUT` and formats `::error::` workflow
//! commands so a rejection shows up as an annotation on the run.

use crate::error::{RunguardError, RunguardResult};
use crate::sanitizer::Verdict;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Title used for rejection annotations
pub const ANNOTATION_TITLE: &str = "Invalid docker-run-args";

/// Whether we are running inside a GitHub Actions job
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Step output file (`$GITHUB_OUTPUT`)
#[derive(Debug, Clone)]
pub struct StepOutputs {
    path: PathBuf,
}

impl StepOutputs {
    /// Use the file named by `$GITHUB_OUTPUT`, if set and non-empty
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(|path| Self::with_path(PathBuf::from(path)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append `name=value` pairs
    pub async fn write(&self, outputs: &[(&str, String)]) -> RunguardResult<()> {
        let content: String = outputs
            .iter()
            .map(|(name, value)| format_output(name, value))
            .collect();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RunguardError::io(format!("opening {}", self.path.display()), e))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| RunguardError::io(format!("writing {}", self.path.display()), e))?;
        file.flush()
            .await
            .map_err(|e| RunguardError::io(format!("writing {}", self.path.display()), e))?;

        debug!("Wrote {} step outputs to {}", outputs.len(), self.path.display());
        Ok(())
    }
}

/// Step outputs describing a verdict
///
/// Accepted: `valid=true`, `args=<JSON array>`.
/// Rejected: `valid=false`, `rejected-token`, `rule`.
pub fn verdict_outputs(
    verdict: &Verdict,
    argv: &[String],
) -> RunguardResult<Vec<(&'static str, String)>> {
    Ok(match verdict {
        Verdict::Accept => vec![
            ("valid", "true".to_string()),
            ("args", serde_json::to_string(argv)?),
        ],
        Verdict::Reject { token, rule } => vec![
            ("valid", "false".to_string()),
            ("rejected-token", token.clone()),
            ("rule", rule.id().to_string()),
        ],
    })
}

/// Format one output entry, switching to the heredoc form for multi-line values
fn format_output(name: &str, value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return format!("{}={}\n", name, value);
    }

    let mut delimiter = String::from("RUNGUARD_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

/// Build an `::error title=...::message` workflow command
pub fn error_annotation(title: &str, message: &str) -> String {
    format!(
        "::error title={}::{}",
        escape_property(title),
        escape_data(message)
    )
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::{self, Rule};
    use tempfile::TempDir;

    #[test]
    fn single_line_output() {
        assert_eq!(format_output("valid", "true"), "valid=true\n");
    }

    #[test]
    fn multi_line_output_uses_heredoc() {
        assert_eq!(
            format_output("x", "a\nb"),
            "x<<RUNGUARD_EOF\na\nb\nRUNGUARD_EOF\n"
        );
    }

    #[test]
    fn heredoc_delimiter_avoids_value() {
        let out = format_output("x", "RUNGUARD_EOF\nmore");
        assert!(out.starts_with("x<<RUNGUARD_EOF_\n"));
        assert!(out.ends_with("\nRUNGUARD_EOF_\n"));
    }

    #[test]
    fn accept_outputs() {
        let argv = vec!["-m".to_string(), "512m".to_string()];
        let outputs = verdict_outputs(&Verdict::Accept, &argv).unwrap();
        assert_eq!(outputs[0], ("valid", "true".to_string()));
        assert_eq!(outputs[1], ("args", r#"["-m","512m"]"#.to_string()));
    }

    #[test]
    fn reject_outputs() {
        let outputs = verdict_outputs(&sanitizer::validate("$(id)"), &[]).unwrap();
        assert_eq!(
            outputs,
            vec![
                ("valid", "false".to_string()),
                ("rejected-token", "$(id)".to_string()),
                ("rule", Rule::CommandChaining.id().to_string()),
            ]
        );
    }

    #[test]
    fn annotation_escapes() {
        assert_eq!(
            error_annotation("a:b,c", "100%\nnext"),
            "::error title=a%3Ab%2Cc::100%25%0Anext"
        );
    }

    #[tokio::test]
    async fn writes_step_outputs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        std::fs::write(&path, "earlier=1\n").unwrap();

        let outputs = StepOutputs::with_path(path.clone());
        outputs
            .write(&[("valid", "true".to_string()), ("args", "[]".to_string())])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier=1\nvalid=true\nargs=[]\n");
    }
}
