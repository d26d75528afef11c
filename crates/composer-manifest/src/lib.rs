//! Composer manifest generation
//!
//! Builds `composer-manifest.yaml`, a sorted snapshot of every installed
//! Composer package and its resolved version:
//!
//! ```yaml
//! packages:
//!   acme/cli: 2.3.1
//!   acme/core: dev-main:0123456789abcdef0123456789abcdef01234567
//! ```
//!
//! The package list comes from Composer's own JSON files (`installed.json`
//! or `composer.lock`); resolution, locking and fetching stay with Composer.

pub mod errors;
pub mod hooks;
pub mod manifest_writer;
pub mod package_source;
pub mod types;
pub mod version;

pub use errors::ManifestError;
pub use hooks::{LifecycleEvent, ManifestHooks};
pub use manifest_writer::{
    read_manifest, remove_manifest, write_manifest, write_to_path, DEFAULT_MANIFEST_FILE,
};
pub use package_source::{InstalledRepository, LockedPackage, LockedRepository, PackageSource};
pub use types::{Manifest, PackageRecord};
