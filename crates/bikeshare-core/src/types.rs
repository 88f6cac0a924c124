//! Core domain types for bikeshare
//!
//! This module contains the fundamental types used throughout the bikeshare
//! crates: the city and month vocabularies, raw trip records as loaded from
//! disk, and the record set that carries derived temporal fields.

use crate::error::{BikeshareError, Result};
use crate::temporal::TemporalFields;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Cities with bikeshare data available
///
/// Each city maps to exactly one source file. The mapping is fixed at
/// compile time and handed to the loader through [`City::file_name`].
///
/// # Examples
/// ```
/// use bikeshare_core::types::City;
///
/// let city: City = "New York City".parse().unwrap();
/// assert_eq!(city, City::NewYorkCity);
/// assert_eq!(city.file_name(), "new_york_city.csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every supported city, in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Name of the CSV file holding this city's trips
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Human readable name
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    /// Case-insensitive; `-` and `_` are accepted as word separators.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(BikeshareError::InvalidSelection(format!(
                "'{}' is not one of Chicago, New York City, Washington",
                s.trim()
            ))),
        }
    }
}

/// Months covered by the source data (January through June)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl MonthName {
    pub const ALL: [MonthName; 6] = [
        MonthName::January,
        MonthName::February,
        MonthName::March,
        MonthName::April,
        MonthName::May,
        MonthName::June,
    ];

    /// 1-based month number
    pub fn ordinal(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        let index = usize::try_from(ordinal.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            MonthName::January => "January",
            MonthName::February => "February",
            MonthName::March => "March",
            MonthName::April => "April",
            MonthName::May => "May",
            MonthName::June => "June",
        }
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MonthName {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                BikeshareError::InvalidSelection(format!(
                    "'{wanted}' is not a month between January and June"
                ))
            })
    }
}

/// One row of raw trip data
///
/// `start_time` is always parsed; the loader fails before a record is built
/// otherwise. Blank optional cells are `None` for that row only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Trip duration in seconds
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

/// Which optional columns the source file provides
///
/// Presence is decided from the header row and applies to every record of
/// the set. A `false` here means the column is absent, not merely blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptionalColumns {
    pub end_time: bool,
    pub gender: bool,
    pub birth_year: bool,
}

/// Loader output, before temporal fields are derived
#[derive(Debug, Clone)]
pub struct LoadedTrips {
    pub city: City,
    pub columns: OptionalColumns,
    pub records: Vec<TripRecord>,
}

/// A trip record together with its derived temporal fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(flatten)]
    pub record: TripRecord,
    #[serde(flatten)]
    pub temporal: TemporalFields,
}

/// The full or filtered collection of trips for one city
///
/// Filtering removes rows but never columns: `city` and `columns` survive
/// every filter unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    city: City,
    columns: OptionalColumns,
    trips: Vec<Trip>,
}

impl RecordSet {
    pub fn new(city: City, columns: OptionalColumns, trips: Vec<Trip>) -> Self {
        Self {
            city,
            columns,
            trips,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn columns(&self) -> OptionalColumns {
        self.columns
    }

    pub fn has_gender(&self) -> bool {
        self.columns.gender
    }

    pub fn has_birth_year(&self) -> bool {
        self.columns.birth_year
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Rows in `range`, clamped to the set
    pub fn rows(&self, range: Range<usize>) -> &[Trip] {
        let end = range.end.min(self.trips.len());
        let start = range.start.min(end);
        &self.trips[start..end]
    }

    /// Keep only the trips matching `predicate`, preserving order
    pub fn retain(mut self, mut predicate: impl FnMut(&Trip) -> bool) -> Self {
        self.trips.retain(|trip| predicate(trip));
        self
    }
}
