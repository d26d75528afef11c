use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use composer_manifest_config::{Config, ConfigError, ProjectPaths, CONFIG_KEYS};
use composer_manifest_logger as logger;

use crate::GlobalOpts;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show configured values and the paths they resolve to
    Show,
    /// Print the config file path
    Path,
    /// Print a single config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// Remove a config value, restoring its default
    Unset { key: String },
}

pub fn handle_config(action: Option<ConfigAction>, opts: &GlobalOpts) -> Result<()> {
    let config_path = opts.config_path();
    logger::debug(&format!("Reading config from: {}", config_path.display()));

    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Show => {
            let config = Config::load_from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            let paths = ProjectPaths::resolve(&opts.working_dir, &config);

            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                println!("  {}", "(defaults)".yellow());
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }

            println!("{}", "Resolved paths:".bold().green());
            println!("  {}: {}", "manifest".cyan(), paths.manifest.display());
            println!("  {}: {}", "installed".cyan(), paths.installed.display());
            println!("  {}: {}", "lock".cyan(), paths.lock.display());
            println!(
                "  {}: {}",
                "renovate-lock".cyan(),
                paths.renovate_lock.display()
            );
            if let Some(log_file) = &paths.log_file {
                println!("  {}: {}", "log-file".cyan(), log_file.display());
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load_from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            match config.get(&key).map_err(unknown_key)? {
                Some(value) => println!("{}", value),
                None => logger::info(&format!("{} is not set", key)),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            config
                .set(&key, value.clone())
                .map_err(unknown_key)?;
            config
                .save_to_path(&config_path)
                .with_context(|| format!("Failed to save {}", config_path.display()))?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from_path(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            config.unset(&key).map_err(unknown_key)?;
            config
                .save_to_path(&config_path)
                .with_context(|| format!("Failed to save {}", config_path.display()))?;
            logger::success(&format!("Unset {}", key));
        }
    }
    Ok(())
}

fn unknown_key(e: ConfigError) -> anyhow::Error {
    anyhow::anyhow!("{}. Supported keys: {}", e, CONFIG_KEYS.join(", "))
}
