use anyhow::Context;
use clap::{Parser, Subcommand};
use composer_manifest_cli::{
    commands::{
        config::{self, ConfigAction},
        hook, renovate, uninstall,
    },
    init_logging, GlobalOpts,
};
use composer_manifest_logger as logger;

#[derive(Parser)]
#[command(name = "composer-manifest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Composer package manifest generator",
    long_about = "composer-manifest keeps composer-manifest.yaml, a sorted list of installed Composer packages and their versions, in sync with the project."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the manifest after a Composer lifecycle event
    Hook(hook::HookCommand),
    /// Regenerate the manifest from the dependency bot's lock file, if present
    Renovate,
    /// Remove the manifest
    Uninstall,
    /// Show or change configuration
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbose, cli.global.quiet, None) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_logging();

    let context = cli
        .global
        .load_context()
        .with_context(|| format!("Failed to load {}", cli.global.config_path().display()));
    if let Some(log_file) = context
        .as_ref()
        .ok()
        .and_then(|ctx| ctx.paths.log_file.clone())
    {
        if let Err(e) = logger::set_log_file(Some(log_file)) {
            eprintln!("Warning: Failed to open log file: {}", e);
        }
    }

    let result = match cli.command {
        Commands::Hook(cmd) => context.and_then(|ctx| hook::handle_hook(cmd, &ctx)),
        Commands::Renovate => context.and_then(|ctx| renovate::handle_renovate(&ctx)),
        Commands::Uninstall => context.and_then(|ctx| uninstall::handle_uninstall(&ctx)),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
