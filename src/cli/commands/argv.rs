//! Argv command - print the accepted argument vector
//!
//! The next stage reads one token per line (or per NUL with `--null`) and
//! hands them to the container runtime as separate arguments, so the string
//! is never split again by a shell.

use crate::cli::args::ArgvArgs;
use crate::config::Config;
use crate::error::{RunguardError, RunguardResult};
use std::io::Write;

/// Execute the argv command
pub async fn execute(args: ArgvArgs, config: &Config) -> RunguardResult<()> {
    let raw = args.input.resolve()?;
    let (verdict, argv) = super::validate::screen(&raw, config, true).await?;
    verdict.into_result()?;

    let terminator = if args.null { '\0' } else { '\n' };
    let mut out = std::io::stdout().lock();
    for token in &argv {
        write!(out, "{}{}", token, terminator)
            .map_err(|e| RunguardError::io("writing argument vector", e))?;
    }
    out.flush()
        .map_err(|e| RunguardError::io("writing argument vector", e))?;

    Ok(())
}
