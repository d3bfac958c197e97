//! Runguard - docker run argument screening
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use runguard::cli::{Cli, Commands};
use runguard::config::{ConfigManager, Format};
use runguard::error::{RunguardError, RunguardResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RunguardResult<()> {
    let cli = Cli::parse();

    // Completions don't need config loading
    if let Commands::Completions(args) = cli.command {
        return runguard::cli::commands::completions(args).await;
    }

    // Provisional logger from CLI flags so config loading is visible with -v
    let provisional =
        log_subscriber(cli.verbose, cli.log_format.unwrap_or_default()).set_default();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let local_config_path = if cli.no_local {
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| RunguardError::io("getting current directory", e))?;
        ConfigManager::find_local_config(&cwd)
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    drop(provisional);
    log_subscriber(cli.verbose, cli.log_format.unwrap_or(config.general.log_format)).init();

    match local_config_path {
        Some(ref path) => debug!("Using local config: {}", path.display()),
        None => debug!("No local config in use"),
    }

    // Dispatch to command
    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Validate(args) => runguard::cli::commands::validate(args, &config).await,
        Commands::Argv(args) => runguard::cli::commands::argv(args, &config).await,
        Commands::Check(args) => runguard::cli::commands::check(args).await,
        Commands::Rules => runguard::cli::commands::rules().await,
        Commands::Config(args) => {
            runguard::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// Log subscriber writing to stderr; stdout carries verdicts and argument vectors.
/// Verbosity: 0 = warn, 1 = info, 2+ = debug
fn log_subscriber(verbose: u8, format: Format) -> Box<dyn tracing::Subscriber + Send + Sync> {
    let filter = match verbose {
        0 => EnvFilter::new("runguard=warn"),
        1 => EnvFilter::new("runguard=info"),
        _ => EnvFilter::new("runguard=debug"),
    };

    match format {
        Format::Text => Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .finish(),
        ),
        Format::Json => Box::new(
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish(),
        ),
    }
}
