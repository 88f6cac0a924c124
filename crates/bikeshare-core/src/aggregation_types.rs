//! Aggregation data types for bikeshare
//!
//! Pure data structures produced by the statistic groups. "No data" and
//! "column not available" are explicit variants so that an empty filter
//! result is never confused with a real zero.

use crate::types::City;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// A statistic that may be undefined for an empty record set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measure<T> {
    Value(T),
    NoData,
}

impl<T> Measure<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Measure::Value(v) => Some(v),
            Measure::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Measure::NoData)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Measure<U> {
        match self {
            Measure::Value(v) => Measure::Value(f(v)),
            Measure::NoData => Measure::NoData,
        }
    }
}

impl<T> From<Option<T>> for Measure<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Measure::NoData, Measure::Value)
    }
}

/// A report section that depends on an optional source column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Column<T> {
    Available(T),
    NotAvailable,
}

impl<T> Column<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Column::Available(v) => Some(v),
            Column::NotAvailable => None,
        }
    }
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Measure<u32>,
    pub most_common_day: Measure<String>,
    pub most_common_hour: Measure<u32>,
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Measure<String>,
    pub most_common_end_station: Measure<String>,
    /// "<start> to <end>"
    pub most_common_trip: Measure<String>,
}

/// Sum and mean of trip durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationTotals {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub totals: Measure<DurationTotals>,
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Earliest, most recent and most common year of birth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub gender: Column<Vec<CategoryCount>>,
    pub birth_year: Column<Measure<BirthYearStats>>,
}

/// A statistic group together with how long it took to compute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    pub value: T,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn new(value: T, elapsed: Duration) -> Self {
        Self { value, elapsed }
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Everything computed for one exploration session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub city: City,
    /// Filter description, e.g. `month: March`
    pub filter: String,
    pub trip_count: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_from_option() {
        assert_eq!(Measure::from(Some(3)), Measure::Value(3));
        assert_eq!(Measure::<u32>::from(None), Measure::NoData);
        assert!(Measure::<u32>::NoData.is_no_data());
        assert_eq!(Measure::Value(2).map(|v| v * 10), Measure::Value(20));
    }

    #[test]
    fn test_no_data_serializes_without_a_number() {
        let stats = DurationStats {
            totals: Measure::NoData,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totals"]["status"], "no_data");
        assert!(json["totals"].get("value").is_none());
    }

    #[test]
    fn test_column_serialization() {
        let column: Column<Vec<CategoryCount>> = Column::NotAvailable;
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["status"], "not_available");

        let column = Column::Available(vec![CategoryCount::new("Male", 4)]);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["status"], "available");
        assert_eq!(json["value"][0]["category"], "Male");
        assert_eq!(json["value"][0]["count"], 4);
    }

    #[test]
    fn test_timed_flattens_value() {
        let timed = Timed::new(
            DurationStats {
                totals: Measure::Value(DurationTotals {
                    trip_count: 2,
                    total_seconds: 30.0,
                    mean_seconds: 15.0,
                }),
            },
            Duration::from_millis(1500),
        );
        let json = serde_json::to_value(&timed).unwrap();
        assert_eq!(json["elapsed_seconds"], 1.5);
        assert_eq!(json["totals"]["value"]["total_seconds"], 30.0);
    }
}
