//! Lifecycle hooks
//!
//! Composer notifies plugins after installs, updates and package removals.
//! Outside of Composer's plugin runtime these notifications arrive as plain
//! method calls on [`ManifestHooks`], typically from a `composer.json`
//! script or a CI step.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::errors::ManifestError;
use crate::manifest_writer::{remove_manifest, write_manifest};
use crate::package_source::{duplicate_names, LockedRepository, PackageSource};
use crate::types::Manifest;

/// Host events that regenerate the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    PostInstallCmd,
    PostUpdateCmd,
    PostPackageUninstall,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 3] = [
        LifecycleEvent::PostInstallCmd,
        LifecycleEvent::PostUpdateCmd,
        LifecycleEvent::PostPackageUninstall,
    ];

    /// Event name as Composer spells it
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::PostInstallCmd => "post-install-cmd",
            LifecycleEvent::PostUpdateCmd => "post-update-cmd",
            LifecycleEvent::PostPackageUninstall => "post-package-uninstall",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifecycleEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| format!("Unknown lifecycle event '{s}'"))
    }
}

/// Entry points that keep the manifest file in sync with the host
#[derive(Debug, Clone)]
pub struct ManifestHooks {
    manifest_path: PathBuf,
}

impl ManifestHooks {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        ManifestHooks {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Events this integration reacts to
    pub fn subscribed_events() -> &'static [LifecycleEvent] {
        &LifecycleEvent::ALL
    }

    /// Handle a host lifecycle event.
    ///
    /// All subscribed events rebuild the manifest from `source`.
    pub fn on_event<S>(&self, event: LifecycleEvent, source: &S) -> Result<Manifest, ManifestError>
    where
        S: PackageSource + ?Sized,
    {
        debug!("Handling {} with {}", event, source.describe());
        self.update_manifest(source)
    }

    /// Rewrite the manifest from the packages `source` reports
    pub fn update_manifest<S>(&self, source: &S) -> Result<Manifest, ManifestError>
    where
        S: PackageSource + ?Sized,
    {
        let records = source.package_records()?;
        for name in duplicate_names(&records) {
            debug!("Package '{}' reported more than once, keeping the last", name);
        }

        let manifest = write_manifest(&records, &self.manifest_path)?;
        info!("Composer manifest updated!");
        Ok(manifest)
    }

    /// Rewrite the manifest from a secondary lock file, e.g. one left
    /// behind by a dependency-update bot.
    ///
    /// A lock file that is missing or cannot be read means there is
    /// nothing to do and yields `Ok(None)`.
    pub fn update_manifest_from_lock(
        &self,
        lock_path: &Path,
    ) -> Result<Option<Manifest>, ManifestError> {
        let Some(repository) = LockedRepository::open_if_exists(lock_path, false) else {
            debug!("No lock file at {:?}, skipping", lock_path);
            return Ok(None);
        };

        match self.update_manifest(&repository) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(ManifestError::Read { path, source }) => {
                warn!("Cannot read {:?}: {}, skipping", path, source);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the manifest when the integration itself is uninstalled.
    ///
    /// Returns whether a file was deleted.
    pub fn uninstall(&self) -> Result<bool, ManifestError> {
        remove_manifest(&self.manifest_path)
    }
}
