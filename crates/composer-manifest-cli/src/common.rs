//! Common types and utilities shared across commands

use clap::Parser;
use composer_manifest_config::{Config, ConfigError, ProjectPaths};
use std::path::PathBuf;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only print warnings and errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        short = 'd',
        long = "working-dir",
        global = true,
        default_value = ".",
        help = "Project directory containing composer.json"
    )]
    pub working_dir: PathBuf,

    #[arg(
        short,
        long,
        global = true,
        help = "Config file (default: <working-dir>/composer-manifest.toml)"
    )]
    pub config: Option<PathBuf>,
}

/// Loaded configuration together with the paths it resolves to
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config_path: PathBuf,
    pub config: Config,
    pub paths: ProjectPaths,
}

impl GlobalOpts {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| Config::path(&self.working_dir))
    }

    pub fn load_context(&self) -> Result<ProjectContext, ConfigError> {
        let config_path = self.config_path();
        let config = Config::load_from_path(&config_path)?;
        let paths = ProjectPaths::resolve(&self.working_dir, &config);
        Ok(ProjectContext {
            config_path,
            config,
            paths,
        })
    }
}
