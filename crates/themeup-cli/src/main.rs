//! CLI entry point.
//!
//! Loads `.env` files, parses arguments, initialises logging, then hands off
//! to the composition root and the command handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use themeup_cli::error::exit_code_for;
use themeup_cli::{Cli, CliContext, Commands, OutputMode, bootstrap, handlers, load_settings};
use themeup_core::paths::env_file_path;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables: cwd first so it wins over the data root
    dotenvy::dotenv().ok();
    if let Ok(path) = env_file_path() {
        dotenvy::from_path(path).ok();
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = cli.output_mode();
    let overrides = cli.overrides();

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths and config work before the database or registry are usable
    match command {
        Commands::Paths => handlers::paths::execute(),
        Commands::Config { command } => handlers::config::execute(command, &overrides),
        Commands::Status => handlers::status::execute(&context(&overrides, output).await?).await,
        Commands::Check => handlers::check::execute(&context(&overrides, output).await?).await,
        Commands::Watch => handlers::watch::execute(&context(&overrides, output).await?).await,
        Commands::Apply(args) => {
            let ctx = context(&overrides, output).await?;
            handlers::apply::execute(&ctx, args.mode()).await
        }
        Commands::Activity { limit } => {
            let ctx = context(&overrides, output).await?;
            handlers::activity::execute(&ctx, limit).await
        }
    }
}

/// Load settings and compose the adapters.
async fn context(
    overrides: &[(&'static str, String)],
    output: OutputMode,
) -> anyhow::Result<CliContext> {
    let settings = load_settings(overrides)?;
    bootstrap(settings, output).await
}
