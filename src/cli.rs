//! CLI interface for bikeshare
//!
//! The explorer itself is interactive; the command line only configures
//! where data lives, how reports are rendered and how much is logged.
//!
//! # Example
//!
//! ```bash
//! # Explore files in ./data with informational logging
//! bikeshare --data-dir ./data -v
//!
//! # Machine-readable reports
//! BIKESHARE_DATA_DIR=/srv/bikeshare bikeshare --json
//! ```

use bikeshare_core::error::{BikeshareError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Interactively explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Render reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Show informational output (default shows only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Show errors only; overrides RUST_LOG
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable the loading spinner
    #[arg(long)]
    pub no_progress: bool,
}

/// Resolved, immutable runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub json: bool,
    pub show_progress: bool,
}

impl AppConfig {
    /// Resolve the configuration from parsed arguments
    ///
    /// The spinner is shown only for table output on an interactive
    /// terminal.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Config`] if the data directory does not exist.
    pub fn from_cli(cli: &Cli, stdout_is_terminal: bool) -> Result<Self> {
        if !cli.data_dir.is_dir() {
            return Err(BikeshareError::Config(format!(
                "data directory '{}' does not exist",
                cli.data_dir.display()
            )));
        }

        Ok(Self {
            data_dir: cli.data_dir.clone(),
            json: cli.json,
            show_progress: !cli.json && !cli.no_progress && stdout_is_terminal,
        })
    }
}

/// Default log directive when `RUST_LOG` is not set
pub fn default_log_directive(cli: &Cli) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.verbose {
        "bikeshare=info,bikeshare_core=info"
    } else {
        "bikeshare=warn,bikeshare_core=warn"
    }
}
