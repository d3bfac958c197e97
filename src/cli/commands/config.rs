//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, Format};
use crate::error::{RunguardError, RunguardResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 6] = [
    "general.log_format",
    "general.audit_log",
    "general.audit_path",
    "output.format",
    "output.github_output",
    "output.annotations",
];

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    manager: &ConfigManager,
) -> RunguardResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> RunguardResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> RunguardResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn(
            &ctx,
            &format!("Config already exists at {} (use --force to overwrite)", path.display()),
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}

/// Update one key in the file at `manager.path()`, leaving other keys as saved
async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> RunguardResult<()> {
    let ctx = UiContext::detect();
    let mut config = manager.load().await?;

    apply(&mut config, key, value)?;

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> RunguardResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = parse_format(key, value)?,
        ["general", "audit_log"] => config.general.audit_log = parse_bool(key, value)?,
        ["general", "audit_path"] => {
            config.general.audit_path = (!value.is_empty()).then(|| PathBuf::from(value))
        }
        ["output", "format"] => config.output.format = parse_format(key, value)?,
        ["output", "github_output"] => config.output.github_output = parse_bool(key, value)?,
        ["output", "annotations"] => config.output.annotations = parse_bool(key, value)?,
        _ => {
            return Err(RunguardError::UnknownConfigKey {
                key: key.to_string(),
                valid: VALID_KEYS.join(", "),
            })
        }
    }

    Ok(())
}

fn parse_bool(key: &str, value: &str) -> RunguardResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(RunguardError::ConfigValue {
            key: key.to_string(),
            reason: format!("expected true or false, got '{}'", value),
        }),
    }
}

fn parse_format(key: &str, value: &str) -> RunguardResult<Format> {
    match value.to_lowercase().as_str() {
        "text" => Ok(Format::Text),
        "json" => Ok(Format::Json),
        _ => Err(RunguardError::ConfigValue {
            key: key.to_string(),
            reason: format!("expected text or json, got '{}'", value),
        }),
    }
}
