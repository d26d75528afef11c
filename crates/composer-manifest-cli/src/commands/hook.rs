use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use composer_manifest::{
    InstalledRepository, LifecycleEvent, LockedRepository, ManifestHooks, PackageSource,
};
use composer_manifest_logger as logger;

use crate::common::ProjectContext;

/// Composer event that triggered the run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    PostInstallCmd,
    PostUpdateCmd,
    PostPackageUninstall,
}

impl From<HookEvent> for LifecycleEvent {
    fn from(event: HookEvent) -> Self {
        match event {
            HookEvent::PostInstallCmd => LifecycleEvent::PostInstallCmd,
            HookEvent::PostUpdateCmd => LifecycleEvent::PostUpdateCmd,
            HookEvent::PostPackageUninstall => LifecycleEvent::PostPackageUninstall,
        }
    }
}

/// Where the package list is read from
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// vendor/composer/installed.json
    #[default]
    Installed,
    /// composer.lock
    Lock,
}

#[derive(Args, Debug, Clone)]
pub struct HookCommand {
    /// Lifecycle event reported by Composer
    #[arg(value_enum)]
    pub event: HookEvent,

    /// Package list to read
    #[arg(long, value_enum, default_value_t = SourceKind::Installed)]
    pub source: SourceKind,

    /// Leave out packages-dev (only with --source lock)
    #[arg(long)]
    pub no_dev: bool,
}

pub fn handle_hook(cmd: HookCommand, context: &ProjectContext) -> Result<()> {
    if cmd.no_dev && cmd.source != SourceKind::Lock {
        bail!("--no-dev only applies to --source lock");
    }

    let event = LifecycleEvent::from(cmd.event);
    let hooks = ManifestHooks::new(&context.paths.manifest);

    let source: Box<dyn PackageSource> = match cmd.source {
        SourceKind::Installed => Box::new(InstalledRepository::new(&context.paths.installed)),
        SourceKind::Lock => Box::new(LockedRepository::new(&context.paths.lock, !cmd.no_dev)),
    };
    logger::debug(&format!("{} from {}", event, source.describe()));

    let manifest = hooks.on_event(event, source.as_ref()).with_context(|| {
        format!(
            "Failed to update manifest {}",
            context.paths.manifest.display()
        )
    })?;

    logger::success("Composer manifest updated!");
    logger::info(
        &format!(
            "{} package(s) written to {}",
            manifest.len(),
            context.paths.manifest.display()
        )
        .dimmed()
        .to_string(),
    );
    Ok(())
}
