//! Configuration for composer-manifest
//!
//! An optional `composer-manifest.toml` in the project directory overrides
//! where the manifest is written and where Composer's package lists are
//! read from.

pub mod config;
pub mod project_paths;

pub use config::{Config, ConfigError, CONFIG_ENV_VAR, CONFIG_FILE_NAME, CONFIG_KEYS};
pub use project_paths::{resolve_vendor_dir, ProjectPaths};
