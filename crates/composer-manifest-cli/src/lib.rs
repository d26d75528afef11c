//! composer-manifest CLI library - exposes commands for the binary and tests

pub mod commands;
pub mod common;

pub use common::{GlobalOpts, ProjectContext};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the `tracing` subscriber used by the library crates.
///
/// `RUST_LOG` overrides the level derived from `-q`/`-v`.
pub fn init_logging() {
    let default_filter = format!(
        "composer_manifest={}",
        composer_manifest_logger::verbosity_to_filter()
    );
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
