//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use socialink_core::SocialinkConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value (e.g. "ocr.language")
    Get { key: String },

    /// Set a configuration value
    Set { key: String, value: String },

    /// Show configuration file path
    Path,
}

/// Run a config subcommand against `config_path` (`--config`), or the
/// default location when none was given.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { output, force } => init_config(output.unwrap_or(path), force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn current_config(path: &Path) -> anyhow::Result<SocialinkConfig> {
    if path.exists() {
        Ok(SocialinkConfig::from_file(path)?)
    } else {
        Ok(SocialinkConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!("{} No config file found, showing defaults.", style("ℹ").blue());
    }
    println!("{}", serde_json::to_string_pretty(&current_config(path)?)?);
    Ok(())
}

fn init_config(output_path: PathBuf, force: bool) -> anyhow::Result<()> {

    if output_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    SocialinkConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(current_config(path)?)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(current_config(config_path)?)?;

    // Values that are not valid JSON are stored as strings
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let target = parents
        .into_iter()
        .flat_map(|p| p.split('.'))
        .try_fold(&mut json, |current, part| current.get_mut(part))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;

    if !target.contains_key(last) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    target.insert(last.to_string(), parsed.clone());

    let config: SocialinkConfig = serde_json::from_value(json)?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(config_path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}
