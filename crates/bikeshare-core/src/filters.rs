//! Filtering module for trip records
//!
//! This module narrows a record set to a single month, a single day of the
//! week, or leaves it untouched. Selectors are validated when they are
//! parsed from user input; applying a selector never fails.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::filters::TripFilter;
//! use bikeshare_core::types::MonthName;
//!
//! let march: TripFilter = TripFilter::Month(MonthName::March);
//! assert_eq!(march.to_string(), "month: March");
//!
//! let tuesday = TripFilter::day("tuesday").unwrap();
//! assert_eq!(tuesday.to_string(), "day: Tuesday");
//! ```

use crate::error::{BikeshareError, Result};
use crate::temporal::weekday_name;
use crate::types::{MonthName, RecordSet, Trip};
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Which kind of filter the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Month,
    Day,
    None,
}

impl FromStr for FilterKind {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(FilterKind::Month),
            "day" => Ok(FilterKind::Day),
            "none" => Ok(FilterKind::None),
            other => Err(BikeshareError::InvalidSelection(format!(
                "'{other}' is not one of month, day, none"
            ))),
        }
    }
}

/// Temporal filter applied to a record set
///
/// `None` keeps every row; `Month` keeps rows whose derived month equals
/// the month's ordinal; `Day` keeps rows whose derived weekday matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripFilter {
    #[default]
    None,
    Month(MonthName),
    Day(Weekday),
}

impl TripFilter {
    /// Build a month filter from a month name (january..june)
    pub fn month(name: &str) -> Result<Self> {
        name.parse().map(TripFilter::Month)
    }

    /// Build a day filter from a full weekday name (monday..sunday)
    pub fn day(name: &str) -> Result<Self> {
        parse_weekday(name).map(TripFilter::Day)
    }

    /// Check if a trip passes the filter
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            TripFilter::None => true,
            TripFilter::Month(month) => trip.temporal.month == month.ordinal(),
            TripFilter::Day(day) => trip.temporal.day_of_week == *day,
        }
    }

    /// Apply the filter to a record set
    ///
    /// Retained rows keep their relative order and the optional-column
    /// schema is carried over unchanged. A filter matching nothing yields an
    /// empty set, which is not an error.
    pub fn apply(&self, records: RecordSet) -> RecordSet {
        if *self == TripFilter::None {
            return records;
        }

        let before = records.len();
        let filtered = records.retain(|trip| self.matches(trip));
        debug!(
            "Filter '{}' kept {} of {} trips",
            self,
            filtered.len(),
            before
        );
        filtered
    }
}

impl fmt::Display for TripFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripFilter::None => write!(f, "none"),
            TripFilter::Month(month) => write!(f, "month: {month}"),
            TripFilter::Day(day) => write!(f, "day: {}", weekday_name(*day)),
        }
    }
}

/// Parse a full, case-insensitive weekday name
///
/// Abbreviations are rejected so that the accepted vocabulary is exactly
/// monday..sunday.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    let wanted = s.trim();
    WEEKDAYS
        .into_iter()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            BikeshareError::InvalidSelection(format!("'{wanted}' is not a day of the week"))
        })
}
