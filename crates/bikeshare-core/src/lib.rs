//! Core types, filters, and frequency statistics for bikeshare
//!
//! This crate provides the record-set model, error handling, the
//! temporal field deriver, the month/day filter engine and the report
//! types used by the other bikeshare crates. Everything here is pure and
//! synchronous; file access lives in the root crate.

pub mod aggregation_types;
pub mod error;
pub mod filters;
pub mod frequency;
pub mod temporal;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{BikeshareError, Result};
pub use filters::{FilterKind, TripFilter};
pub use types::{City, LoadedTrips, MonthName, OptionalColumns, RecordSet, Trip, TripRecord};
