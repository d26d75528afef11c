use anyhow::{Context, Result};
use composer_manifest::ManifestHooks;
use composer_manifest_logger as logger;

use crate::common::ProjectContext;

pub fn handle_uninstall(context: &ProjectContext) -> Result<()> {
    let manifest_path = &context.paths.manifest;
    let removed = ManifestHooks::new(manifest_path)
        .uninstall()
        .with_context(|| format!("Failed to remove {}", manifest_path.display()))?;

    if removed {
        logger::success(&format!("Removed {}", manifest_path.display()));
    } else {
        logger::debug(&format!("No manifest at {}", manifest_path.display()));
    }
    Ok(())
}
