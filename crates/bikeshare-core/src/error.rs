//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bikeshare operations
///
/// Only load failures and I/O problems are fatal to a session. Invalid
/// selections are recovered by re-prompting and never reach the statistics.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The data file for a city does not exist
    #[error("No data file for {city} at {}", path.display())]
    DataFileNotFound {
        /// City whose data was requested
        city: String,
        /// Path that was looked up
        path: PathBuf,
    },

    /// A required column is absent from the header row
    #[error("Missing required column '{column}' in {}", file.display())]
    MissingColumn {
        /// The file being loaded
        file: PathBuf,
        /// Name of the missing column
        column: String,
    },

    /// Parse error with file context
    #[error("Parse error in {} at line {line}: {error}", file.display())]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// 1-based line number in the source file
        line: u64,
        /// The error message
        error: String,
    },

    /// User input outside one of the fixed vocabularies
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Interactive input ended before a value was given
    #[error("Input closed")]
    InputClosed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in bikeshare
pub type Result<T> = std::result::Result<T, BikeshareError>;
