use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "composer-manifest.toml";

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV_VAR: &str = "COMPOSER_MANIFEST_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &[
    "manifest-path",
    "installed-path",
    "lock-path",
    "renovate-lock-path",
    "log-file",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key '{0}'")]
    UnknownKey(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renovate_lock_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Config {
    /// Config file location for `project_dir`.
    ///
    /// `COMPOSER_MANIFEST_CONFIG` takes precedence when set and non-empty.
    pub fn path(project_dir: &Path) -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        project_dir.join(CONFIG_FILE_NAME)
    }

    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::path(project_dir))
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn slot(&mut self, key: &str) -> Result<&mut Option<String>, ConfigError> {
        match key {
            "manifest-path" => Ok(&mut self.manifest_path),
            "installed-path" => Ok(&mut self.installed_path),
            "lock-path" => Ok(&mut self.lock_path),
            "renovate-lock-path" => Ok(&mut self.renovate_lock_path),
            "log-file" => Ok(&mut self.log_file),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let value = match key {
            "manifest-path" => &self.manifest_path,
            "installed-path" => &self.installed_path,
            "lock-path" => &self.lock_path,
            "renovate-lock-path" => &self.renovate_lock_path,
            "log-file" => &self.log_file,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value.clone())
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        *self.slot(key)? = Some(value);
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        *self.slot(key)? = None;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values_iter().is_empty()
    }

    /// Explicitly configured values, in declaration order
    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| match self.get(key) {
                Ok(Some(value)) => Some((*key, value)),
                _ => None,
            })
            .collect()
    }
}
