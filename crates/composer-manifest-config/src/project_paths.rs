//! Resolution of the files composer-manifest reads and writes
//!
//! Every configured path is relative to the project directory unless it is
//! absolute. The installed-package list lives inside Composer's vendor
//! directory, which a project may relocate through `config.vendor-dir` in
//! `composer.json`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

pub const DEFAULT_MANIFEST_PATH: &str = "composer-manifest.yaml";
pub const DEFAULT_VENDOR_DIR: &str = "vendor";
pub const DEFAULT_LOCK_PATH: &str = "composer.lock";
pub const DEFAULT_RENOVATE_LOCK_PATH: &str = "tmp/renovate/composer.lock";
pub const COMPOSER_JSON: &str = "composer.json";

#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    config: ComposerJsonConfig,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerJsonConfig {
    #[serde(default, rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

/// Vendor directory declared in `composer.json`, or `vendor`.
///
/// An unreadable or malformed `composer.json` falls back to the default.
pub fn resolve_vendor_dir(project_dir: &Path) -> PathBuf {
    let composer_json = project_dir.join(COMPOSER_JSON);
    let declared = fs::read_to_string(&composer_json)
        .ok()
        .and_then(|content| serde_json::from_str::<ComposerJson>(&content).ok())
        .and_then(|json| json.config.vendor_dir)
        .filter(|dir| !dir.trim().is_empty());

    match declared {
        Some(dir) => {
            tracing::debug!("Using vendor-dir '{}' from {:?}", dir, composer_json);
            resolve(project_dir, &dir)
        }
        None => project_dir.join(DEFAULT_VENDOR_DIR),
    }
}

fn resolve(project_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

/// Concrete file locations for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project_dir: PathBuf,
    pub manifest: PathBuf,
    pub installed: PathBuf,
    pub lock: PathBuf,
    pub renovate_lock: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl ProjectPaths {
    pub fn resolve(project_dir: &Path, config: &Config) -> Self {
        let path_or = |configured: &Option<String>, default: &str| {
            resolve(project_dir, configured.as_deref().unwrap_or(default))
        };

        let installed = match &config.installed_path {
            Some(path) => resolve(project_dir, path),
            None => resolve_vendor_dir(project_dir)
                .join("composer")
                .join("installed.json"),
        };

        ProjectPaths {
            project_dir: project_dir.to_path_buf(),
            manifest: path_or(&config.manifest_path, DEFAULT_MANIFEST_PATH),
            installed,
            lock: path_or(&config.lock_path, DEFAULT_LOCK_PATH),
            renovate_lock: path_or(&config.renovate_lock_path, DEFAULT_RENOVATE_LOCK_PATH),
            log_file: config
                .log_file
                .as_deref()
                .map(|path| resolve(project_dir, path)),
        }
    }
}
