//! CLI argument definitions using clap derive

use crate::config::Format;
use crate::error::{RunguardError, RunguardResult};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// GitHub Actions exposes the `docker-run-args` input under this name
pub const INPUT_ENV: &str = "INPUT_DOCKER-RUN-ARGS";

/// Runguard - docker run argument screening
///
/// Rejects extra docker run flags that carry shell injection patterns
/// before they reach a container launch.
#[derive(Parser, Debug)]
#[command(name = "runguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RUNGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .runguard.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Log format (overrides general.log_format)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<Format>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a docker run argument string
    Validate(ValidateArgs),

    /// Validate and print the argument vector, one token per line
    Argv(ArgvArgs),

    /// Run validation cases and report a summary
    Check(CheckArgs),

    /// List validation rules in evaluation order
    Rules,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// The raw argument string to screen
///
/// Only accepted after `--`, so a string that starts like one of our own
/// options (`-c/x;id`) can never be consumed as that option.
#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Extra docker run flags as a single quoted string, after `--`
    /// [env: INPUT_DOCKER-RUN-ARGS]
    #[arg(last = true, value_name = "ARGS")]
    pub args: Option<String>,
}

impl InputArgs {
    /// The argument string, falling back to the Actions input variable.
    ///
    /// An empty value is still an input; only total absence is an error.
    pub fn resolve(self) -> RunguardResult<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(
        self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> RunguardResult<String> {
        match self.args {
            Some(args) => Ok(args),
            None => lookup(INPUT_ENV).ok_or(RunguardError::MissingInput),
        }
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Verdict format (overrides output.format)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

/// Arguments for the argv command
#[derive(Parser, Debug)]
pub struct ArgvArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Terminate tokens with NUL instead of newline
    #[arg(short = '0', long)]
    pub null: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// TOML case file (defaults to the built-in scenarios)
    #[arg(long)]
    pub cases: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., output.format)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
