//! bikeshare - Interactively explore US bikeshare trip data

use bikeshare::{
    cli::{AppConfig, Cli, default_log_directive},
    data_loader::DataLoader,
    error::Result,
    shell::Shell,
};
use bikeshare_terminal::get_formatter;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Parse CLI arguments first to check for quiet flag
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("error")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_directive(&cli)))
    };

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::from_cli(&cli, is_terminal::is_terminal(io::stdout()))?;
    let loader = DataLoader::new(&config.data_dir).with_progress(config.show_progress);
    info!("Reading trip data from {}", loader.data_dir().display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), loader, get_formatter(config.json));

    shell.run()
}
