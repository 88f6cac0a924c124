//! bikeshare - Interactively explore US bikeshare trip data
//!
//! This library provides functionality to:
//! - Load per-city trip files from a data directory
//! - Narrow trips to a single month or day of the week
//! - Compute the most frequent travel times, stations and trips, trip
//!   duration totals and rider demographics
//! - Page through raw rows from an interactive shell
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{
//!     aggregation::Aggregator,
//!     data_loader::DataLoader,
//!     City, TripFilter,
//! };
//! use bikeshare_core::temporal;
//!
//! fn main() -> bikeshare::Result<()> {
//!     let loader = DataLoader::new("./data");
//!     let filter = TripFilter::month("march")?;
//!
//!     let records = filter.apply(temporal::derive(loader.load(City::Chicago)?));
//!     let report = Aggregator::run_all(&records, &filter);
//!     println!("{} trips in March", report.trip_count);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod pager;
pub mod shell;

// Re-export commonly used types
pub use bikeshare_core::{aggregation_types, error, filters, frequency, temporal, types};
pub use bikeshare_core::{BikeshareError, City, MonthName, RecordSet, Result, Trip, TripFilter};
