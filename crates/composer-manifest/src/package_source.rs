//! Package sources feeding the manifest writer
//!
//! Composer keeps two JSON package lists on disk:
//! - `vendor/composer/installed.json`: what is currently installed
//! - `composer.lock`: the last resolved package set
//!
//! Both share the same per-package layout, so they decode into
//! [`LockedPackage`] and go through the same conversion to
//! [`PackageRecord`]s.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::ManifestError;
use crate::types::PackageRecord;
use crate::version::{
    branch_alias_target, default_branch_alias, full_pretty_version, is_dev_version, pretty_alias,
};

/// Anything that can produce the current list of packages
pub trait PackageSource {
    /// Short human-readable description used in log messages
    fn describe(&self) -> String;

    fn package_records(&self) -> Result<Vec<PackageRecord>, ManifestError>;
}

impl PackageSource for [PackageRecord] {
    fn describe(&self) -> String {
        format!("{} package record(s)", self.len())
    }

    fn package_records(&self) -> Result<Vec<PackageRecord>, ManifestError> {
        Ok(self.to_vec())
    }
}

impl PackageSource for Vec<PackageRecord> {
    fn describe(&self) -> String {
        self.as_slice().describe()
    }

    fn package_records(&self) -> Result<Vec<PackageRecord>, ManifestError> {
        Ok(self.clone())
    }
}

/// VCS checkout information of a package
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceInfo {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// One package entry as Composer stores it in its JSON files.
///
/// Every field is optional so a single malformed entry can be skipped
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LockedPackage {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub version_normalized: Option<String>,
    #[serde(default)]
    pub source: Option<SourceInfo>,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
    #[serde(default, rename = "default-branch")]
    pub default_branch: bool,
}

impl LockedPackage {
    fn is_dev(&self, pretty_version: &str) -> bool {
        is_dev_version(self.version_normalized.as_deref().unwrap_or(pretty_version))
    }

    fn source_kind(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.kind.as_deref())
    }

    fn source_reference(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.reference.as_deref())
    }

    /// Pretty alias version for this package, if any.
    ///
    /// A matching `extra.branch-alias` entry wins; otherwise a named default
    /// branch is aliased to `9999999-dev`.
    fn branch_alias(&self, pretty_version: &str) -> Option<String> {
        let declared = self
            .extra
            .as_ref()
            .and_then(|extra| extra.get("branch-alias"))
            .and_then(|aliases| aliases.as_object())
            .and_then(|aliases| {
                aliases.iter().find_map(|(source_branch, target)| {
                    branch_alias_target(pretty_version, source_branch, target.as_str()?)
                })
            });

        let normalized = match declared {
            Some(alias) => alias,
            None if self.default_branch => default_branch_alias(pretty_version)?.to_string(),
            None => return None,
        };
        Some(pretty_alias(&normalized))
    }

    /// Convert into manifest records.
    ///
    /// Returns an empty list for malformed entries. A package with a branch
    /// alias yields two records, the alias last.
    pub fn to_records(&self) -> Vec<PackageRecord> {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => {
                warn!("Skipping package entry without a name");
                return Vec::new();
            }
        };
        let Some(pretty_version) = self.version.as_deref() else {
            warn!("Skipping package '{}' without a version", name);
            return Vec::new();
        };

        let mut records = vec![PackageRecord::new(
            name,
            full_pretty_version(
                pretty_version,
                self.is_dev(pretty_version),
                self.source_kind(),
                self.source_reference(),
            ),
        )];

        if let Some(alias) = self.branch_alias(pretty_version) {
            debug!("Package '{}' is aliased as {}", name, alias);
            records.push(PackageRecord::new(
                name,
                full_pretty_version(&alias, true, self.source_kind(), self.source_reference()),
            ));
        }

        records
    }
}

fn records_from(packages: &[LockedPackage]) -> Vec<PackageRecord> {
    packages.iter().flat_map(LockedPackage::to_records).collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `installed.json` in either of the layouts Composer has used
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstalledFile {
    Composer2 {
        packages: Vec<LockedPackage>,
        #[serde(default, rename = "dev-package-names")]
        dev_package_names: Vec<String>,
    },
    Composer1(Vec<LockedPackage>),
}

/// The packages currently installed in the vendor directory
#[derive(Debug, Clone)]
pub struct InstalledRepository {
    path: PathBuf,
}

impl InstalledRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        InstalledRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PackageSource for InstalledRepository {
    fn describe(&self) -> String {
        format!("installed packages ({})", self.path.display())
    }

    fn package_records(&self) -> Result<Vec<PackageRecord>, ManifestError> {
        if !self.path.exists() {
            return Err(ManifestError::PackageListNotFound(self.path.clone()));
        }

        let packages = match read_json::<InstalledFile>(&self.path)? {
            InstalledFile::Composer2 {
                packages,
                dev_package_names,
            } => {
                debug!(
                    "Loaded {} installed package(s), {} dev",
                    packages.len(),
                    dev_package_names.len()
                );
                packages
            }
            InstalledFile::Composer1(packages) => {
                debug!("Loaded {} installed package(s)", packages.len());
                packages
            }
        };

        Ok(records_from(&packages))
    }
}

#[derive(Debug, Default, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Option<Vec<LockedPackage>>,
    #[serde(default, rename = "content-hash")]
    content_hash: Option<String>,
}

/// The resolved package set recorded in a `composer.lock` file
#[derive(Debug, Clone)]
pub struct LockedRepository {
    path: PathBuf,
    include_dev: bool,
}

impl LockedRepository {
    pub fn new(path: impl Into<PathBuf>, include_dev: bool) -> Self {
        LockedRepository {
            path: path.into(),
            include_dev,
        }
    }

    /// `None` when there is no lock file at `path`
    pub fn open_if_exists(path: impl Into<PathBuf>, include_dev: bool) -> Option<Self> {
        let path = path.into();
        path.is_file().then(|| Self::new(path, include_dev))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PackageSource for LockedRepository {
    fn describe(&self) -> String {
        format!("lock file ({})", self.path.display())
    }

    fn package_records(&self) -> Result<Vec<PackageRecord>, ManifestError> {
        let lock: LockFile = read_json(&self.path)?;
        if let Some(hash) = &lock.content_hash {
            debug!("Lock content-hash: {}", hash);
        }

        let mut records = records_from(&lock.packages);
        if self.include_dev {
            records.extend(records_from(lock.packages_dev.as_deref().unwrap_or_default()));
        }
        Ok(records)
    }
}

/// Names reported more than once, in byte order.
///
/// Diagnostics only: the writer itself tolerates duplicates.
pub fn duplicate_names(records: &[PackageRecord]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
