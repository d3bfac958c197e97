//! Check command - run validation cases and report

use crate::cli::args::CheckArgs;
use crate::error::RunguardResult;
use crate::harness;
use crate::ui::{self, UiContext};

/// Execute the check command
pub async fn execute(args: CheckArgs) -> RunguardResult<()> {
    let ctx = UiContext::detect();

    let (source, cases) = match args.cases {
        Some(ref path) => (path.display().to_string(), harness::load_cases(path).await?),
        None => ("built-in".to_string(), harness::builtin_cases()),
    };

    ui::intro(&ctx, &format!("Validation cases ({})", source));
    println!();

    let summary = harness::run_cases(&cases);

    for outcome in &summary.outcomes {
        let label = format!("{:?}", outcome.case.label());
        if outcome.passed {
            ui::step_ok_detail(&ctx, &label, &outcome.actual.to_string());
        } else {
            ui::step_error_detail(
                &ctx,
                &label,
                &format!("expected {}, got {}", outcome.expected(), outcome.actual),
            );
        }
    }

    ui::section(&ctx, "Summary");
    ui::key_value(&ctx, "run", &summary.run.to_string());
    ui::key_value(&ctx, "passed", &summary.passed.to_string());
    ui::key_value(&ctx, "failed", &summary.failed.to_string());

    summary.into_result().map(|_| ())
}
