use anyhow::{Context, Result};
use composer_manifest::ManifestHooks;
use composer_manifest_logger as logger;

use crate::common::ProjectContext;

/// Rebuild the manifest from the lock file a dependency bot leaves behind.
/// Nothing happens when that lock file does not exist.
pub fn handle_renovate(context: &ProjectContext) -> Result<()> {
    let lock_path = &context.paths.renovate_lock;
    let hooks = ManifestHooks::new(&context.paths.manifest);

    let updated = hooks
        .update_manifest_from_lock(lock_path)
        .with_context(|| format!("Failed to update manifest from {}", lock_path.display()))?;

    match updated {
        Some(manifest) => {
            logger::success("Composer manifest updated!");
            logger::debug(&format!(
                "{} package(s) from {}",
                manifest.len(),
                lock_path.display()
            ));
        }
        None => {
            logger::debug(&format!(
                "No lock file at {}, manifest left untouched",
                lock_path.display()
            ));
        }
    }
    Ok(())
}
