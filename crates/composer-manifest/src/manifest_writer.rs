//! Manifest persistence
//!
//! The manifest is regenerated wholesale on every write. Writes go through a
//! temporary file that is renamed over the target, so an interrupted write
//! leaves the previous manifest intact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::types::{Manifest, PackageRecord};

/// File name of the manifest, relative to the project directory
pub const DEFAULT_MANIFEST_FILE: &str = "composer-manifest.yaml";

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| DEFAULT_MANIFEST_FILE.into());
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);
    let result = (|| {
        let file = fs::File::create(&temp_path)?;
        let mut writer = io::BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        fs::rename(&temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Build the manifest for `records` and write it to `output_path`,
/// replacing whatever was there before.
pub fn write_manifest(
    records: &[PackageRecord],
    output_path: &Path,
) -> Result<Manifest, ManifestError> {
    let manifest = Manifest::from_records(records);
    write_to_path(&manifest, output_path)?;
    Ok(manifest)
}

/// Serialize `manifest` and write it to `output_path`
pub fn write_to_path(manifest: &Manifest, output_path: &Path) -> Result<(), ManifestError> {
    debug!("Writing manifest to {:?}", output_path);

    let yaml = manifest.to_yaml()?;
    write_atomic(output_path, &yaml)?;

    info!("Manifest written to {:?}", output_path);
    info!("Total packages: {}", manifest.len());
    Ok(())
}

/// Read a previously written manifest
pub fn read_manifest(manifest_path: &Path) -> Result<Manifest, ManifestError> {
    debug!("Reading manifest from {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path).map_err(|source| ManifestError::Read {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    Manifest::from_yaml(&content)
}

/// Delete the manifest.
///
/// Returns `Ok(false)` when there was nothing to delete.
pub fn remove_manifest(manifest_path: &Path) -> Result<bool, ManifestError> {
    match fs::remove_file(manifest_path) {
        Ok(()) => {
            info!("Removed manifest {:?}", manifest_path);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No manifest at {:?}", manifest_path);
            Ok(false)
        }
        Err(e) => Err(ManifestError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::manifest_writer::*;
    use tempfile::TempDir;

    fn sample_records() -> Vec<PackageRecord> {
        vec![
            PackageRecord::new("b/pkg", "1.0 abc"),
            PackageRecord::new("a/pkg", "2.0"),
        ]
    }

    #[test]
    fn test_write_and_read_back() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join(DEFAULT_MANIFEST_FILE);

        let written = write_manifest(&sample_records(), &manifest_path);
        assert!(written.is_ok(), "Failed to write manifest");

        let loaded = read_manifest(&manifest_path);
        assert!(loaded.is_ok(), "Failed to read manifest");
        let loaded = loaded.unwrap_or_default();
        assert_eq!(loaded.version_of("a/pkg"), Some("2.0"));
        assert_eq!(loaded.version_of("b/pkg"), Some("1.0:abc"));
        assert_eq!(Some(loaded), written.ok());
    }

    #[test]
    fn test_write_is_idempotent() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join(DEFAULT_MANIFEST_FILE);

        assert!(write_manifest(&sample_records(), &manifest_path).is_ok());
        let first = fs::read(&manifest_path).unwrap_or_default();

        let mut reordered = sample_records();
        reordered.reverse();
        assert!(write_manifest(&reordered, &manifest_path).is_ok());
        let second = fs::read(&manifest_path).unwrap_or_default();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_replaces_previous_content() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join(DEFAULT_MANIFEST_FILE);
        assert!(fs::write(&manifest_path, "packages:\n  old/pkg: '0.1'\n  z/pkg: '9'\n").is_ok());

        assert!(write_manifest(&sample_records(), &manifest_path).is_ok());

        let content = fs::read_to_string(&manifest_path).unwrap_or_default();
        assert!(!content.contains("old/pkg"));
        assert!(!content.contains("z/pkg"));
        assert!(!temp_path_for(&manifest_path).exists(), "temporary file left behind");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("nested").join("dir").join("manifest.yaml");

        assert!(write_manifest(&[], &manifest_path).is_ok());
        assert!(read_manifest(&manifest_path).is_ok_and(|m| m.is_empty()));
    }

    #[test]
    fn test_write_into_missing_location_fails() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        // A regular file where a directory is expected
        let blocker = temp_dir.path().join("blocker");
        assert!(fs::write(&blocker, "").is_ok());

        let result = write_manifest(&sample_records(), &blocker.join(DEFAULT_MANIFEST_FILE));
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }

    #[test]
    fn test_remove_manifest() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join(DEFAULT_MANIFEST_FILE);

        assert!(remove_manifest(&manifest_path).is_ok_and(|removed| !removed));

        assert!(write_manifest(&sample_records(), &manifest_path).is_ok());
        assert!(remove_manifest(&manifest_path).is_ok_and(|removed| removed));
        assert!(!manifest_path.exists());

        assert!(remove_manifest(&manifest_path).is_ok_and(|removed| !removed));
    }

    #[test]
    fn test_remove_manifest_surfaces_delete_errors() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        // A directory where the manifest file is expected
        let manifest_path = temp_dir.path().join(DEFAULT_MANIFEST_FILE);
        assert!(fs::create_dir(&manifest_path).is_ok());

        let result = remove_manifest(&manifest_path);
        assert!(matches!(result, Err(ManifestError::Io(_))));
        assert!(manifest_path.is_dir());
    }

    #[test]
    fn test_temp_path_sits_next_to_target() {
        let path = Path::new("project").join(DEFAULT_MANIFEST_FILE);
        assert_eq!(
            temp_path_for(&path),
            Path::new("project").join("composer-manifest.yaml.tmp")
        );
        assert_eq!(
            temp_path_for(Path::new(DEFAULT_MANIFEST_FILE)),
            PathBuf::from("composer-manifest.yaml.tmp")
        );
    }
}
