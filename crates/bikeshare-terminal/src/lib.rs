//! Terminal output formatting for bikeshare
//!
//! This crate provides table and JSON formatters for statistic reports
//! and raw-row windows.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
