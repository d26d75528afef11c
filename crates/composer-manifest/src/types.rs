//! Manifest data types
//!
//! A [`Manifest`] is never kept around between runs: it is rebuilt from the
//! current package list, written, and dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::errors::ManifestError;
use crate::version::normalize_version;

/// An installed package and its full pretty version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        PackageRecord {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Version as written to the manifest (`dev-main abc` -> `dev-main:abc`)
    pub fn normalized_version(&self) -> String {
        normalize_version(&self.version)
    }
}

/// Top-level manifest document.
///
/// `BTreeMap` keeps the package names in byte order, so the serialized
/// output does not depend on the order packages were reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub packages: BTreeMap<String, String>,
}

impl Manifest {
    /// Build a manifest from package records.
    ///
    /// When the same name appears more than once, the last record wins.
    /// Records with a blank name are skipped.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PackageRecord>,
    {
        let packages = records
            .into_iter()
            .filter(|record| {
                let named = !record.name.trim().is_empty();
                if !named {
                    warn!("Skipping package record without a name ({})", record.version);
                }
                named
            })
            .map(|record| (record.name.clone(), record.normalized_version()))
            .collect();
        Manifest { packages }
    }

    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        serde_yaml::to_string(self).map_err(ManifestError::Serialize)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        serde_yaml::from_str(content).map_err(ManifestError::Deserialize)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_sorted_regardless_of_input_order() {
        let records = vec![
            PackageRecord::new("symfony/yaml", "v6.4.0"),
            PackageRecord::new("acme/core", "1.0.0"),
            PackageRecord::new("Zend/legacy", "2.0.0"),
            PackageRecord::new("acme/cli", "2.3.1"),
        ];
        let manifest = Manifest::from_records(&records);

        let keys: Vec<&str> = manifest.packages.keys().map(String::as_str).collect();
        // Byte order: uppercase sorts before lowercase
        assert_eq!(keys, ["Zend/legacy", "acme/cli", "acme/core", "symfony/yaml"]);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(Manifest::from_records(&reversed), manifest);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let records = vec![
            PackageRecord::new("acme/core", "dev-main abc"),
            PackageRecord::new("acme/other", "1.0"),
            PackageRecord::new("acme/core", "1.0.x-dev abc"),
        ];
        let manifest = Manifest::from_records(&records);

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.version_of("acme/core"), Some("1.0.x-dev:abc"));
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let records = vec![
            PackageRecord::new("", "1.0"),
            PackageRecord::new("acme/core", "2.0"),
            PackageRecord::new("   ", "3.0"),
        ];
        let manifest = Manifest::from_records(&records);

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.version_of("acme/core"), Some("2.0"));
        assert!(!manifest.to_yaml().unwrap_or_default().contains("''"));
    }

    #[test]
    fn test_empty_manifest_is_parseable() {
        let manifest = Manifest::from_records(&Vec::<PackageRecord>::new());
        assert!(manifest.is_empty());

        let yaml = manifest.to_yaml();
        assert!(yaml.is_ok(), "Failed to serialize empty manifest");
        let yaml = yaml.unwrap_or_default();
        assert!(yaml.starts_with("packages:"));

        let parsed = Manifest::from_yaml(&yaml);
        assert!(parsed.is_ok_and(|m| m.is_empty()));
    }

    #[test]
    fn test_end_to_end_example() {
        let records = [
            PackageRecord::new("b/pkg", "1.0 abc"),
            PackageRecord::new("a/pkg", "2.0"),
        ];
        let manifest = Manifest::from_records(&records);
        let yaml = manifest.to_yaml().unwrap_or_default();

        let a = yaml.find("a/pkg");
        let b = yaml.find("b/pkg");
        assert!(a.is_some() && b.is_some());
        assert!(a < b, "packages must be written in ascending order");

        let Ok(parsed) = Manifest::from_yaml(&yaml) else {
            panic!("manifest did not round-trip: {yaml}");
        };
        assert_eq!(parsed.version_of("a/pkg"), Some("2.0"));
        assert_eq!(parsed.version_of("b/pkg"), Some("1.0:abc"));
    }

    #[test]
    fn test_numeric_looking_versions_stay_strings() {
        let manifest = Manifest::from_records(&[PackageRecord::new("acme/core", "2.0")]);
        let yaml = manifest.to_yaml().unwrap_or_default();
        let parsed = Manifest::from_yaml(&yaml).unwrap_or_default();
        assert_eq!(parsed.version_of("acme/core"), Some("2.0"));
    }
}
