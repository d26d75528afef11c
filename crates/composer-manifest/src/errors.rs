use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading packages or writing the manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Failed to parse manifest: {0}")]
    Deserialize(#[source] serde_yaml::Error),

    #[error("Package list not found: {}", .0.display())]
    PackageListNotFound(PathBuf),
}
