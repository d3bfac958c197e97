//! Validate command - screen a docker run argument string

use crate::audit::AuditLog;
use crate::cli::args::ValidateArgs;
use crate::config::{Config, Format};
use crate::error::RunguardResult;
use crate::github::{self, StepOutputs};
use crate::sanitizer::{self, Verdict};
use crate::ui::{self, UiContext};
use serde_json::json;
use tracing::{info, warn};

/// Execute the validate command
pub async fn execute(args: ValidateArgs, config: &Config) -> RunguardResult<()> {
    let format = args.format.unwrap_or(config.output.format);
    let raw = args.input.resolve()?;

    let (verdict, argv) = screen(&raw, config, format == Format::Text).await?;

    match format {
        Format::Json => {
            let report = match &verdict {
                Verdict::Accept => json!({ "verdict": "accept", "args": argv }),
                reject => serde_json::to_value(reject)?,
            };
            println!("{}", serde_json::to_string(&report)?);
        }
        Format::Text => {
            if verdict.is_accept() {
                let ctx = UiContext::detect();
                ui::step_ok_detail(&ctx, "docker run arguments accepted", &token_count(argv.len()));
            }
        }
    }

    verdict.into_result()
}

/// Validate `raw` and run every side channel a verdict feeds: logging, the
/// audit log, GitHub step outputs and annotations.
///
/// Returns the verdict and, when accepted, the argument vector.
pub(crate) async fn screen(
    raw: &str,
    config: &Config,
    annotate: bool,
) -> RunguardResult<(Verdict, Vec<String>)> {
    let verdict = sanitizer::validate(raw);
    let argv: Vec<String> = if verdict.is_accept() {
        sanitizer::tokenize(raw).map(str::to_string).collect()
    } else {
        Vec::new()
    };

    match &verdict {
        Verdict::Accept => info!(tokens = argv.len(), "docker run arguments accepted"),
        Verdict::Reject { token, rule } => {
            warn!(token = %token, rule = rule.id(), "docker run arguments rejected")
        }
    }

    AuditLog::new(config).verdict(raw, &verdict).await;

    if config.output.github_output {
        if let Some(outputs) = StepOutputs::from_env() {
            outputs
                .write(&github::verdict_outputs(&verdict, &argv)?)
                .await?;
        }
    }

    if annotate && config.output.annotations && github::is_github_actions() {
        if let Verdict::Reject { token, rule } = &verdict {
            let message = format!("Rejected token '{}': {}. {}", token, rule, rule.hint());
            println!("{}", github::error_annotation(github::ANNOTATION_TITLE, &message));
        }
    }

    Ok((verdict, argv))
}

fn token_count(n: usize) -> String {
    match n {
        1 => "1 token".to_string(),
        n => format!("{} tokens", n),
    }
}
