//! Aggregation module for summarizing trip data
//!
//! This module computes the four statistic groups over an already filtered
//! record set: times of travel, station popularity, duration totals and
//! rider demographics. Each group is a pure function of the record set and
//! can be invoked on its own.
//!
//! # Tie-breaking
//!
//! Modes are selected with explicit rules instead of relying on map
//! iteration order:
//!
//! - **Numeric fields** (month, hour, birth year): the smallest value wins.
//! - **Text fields** (weekday, stations, trip): the value that appears first
//!   in row order wins.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{aggregation::Aggregator, data_loader::DataLoader};
//! use bikeshare_core::{filters::TripFilter, temporal, types::City};
//!
//! # fn example() -> bikeshare::Result<()> {
//! let loader = DataLoader::new("./data");
//! let records = temporal::derive(loader.load(City::Chicago)?);
//! let filter = TripFilter::month("march")?;
//! let records = filter.apply(records);
//!
//! let report = Aggregator::run_all(&records, &filter);
//! println!("{} trips", report.trip_count);
//! # Ok(())
//! # }
//! ```

use bikeshare_core::aggregation_types::{
    BirthYearStats, CategoryCount, Column, DurationStats, DurationTotals, Measure, StationStats,
    StatsReport, TimeStats, Timed, UserStats,
};
use bikeshare_core::filters::TripFilter;
use bikeshare_core::frequency::FrequencyTable;
use bikeshare_core::temporal::weekday_name;
use bikeshare_core::types::RecordSet;
use std::time::Instant;
use tracing::debug;

/// Separator used to build trip labels from station pairs
pub const TRIP_SEPARATOR: &str = " to ";

/// Main aggregation engine
///
/// Holds no state; every method reads the record set it is given and
/// returns a self-contained report.
pub struct Aggregator;

impl Aggregator {
    /// Most frequent month, day of week and start hour
    ///
    /// The three modes are computed independently over the whole set.
    pub fn time_stats(records: &RecordSet) -> TimeStats {
        let mut months = FrequencyTable::new();
        let mut days = FrequencyTable::new();
        let mut hours = FrequencyTable::new();

        for trip in records.trips() {
            months.insert(trip.temporal.month);
            days.insert(trip.temporal.day_of_week);
            hours.insert(trip.temporal.hour);
        }

        TimeStats {
            most_common_month: months.mode_smallest().copied().into(),
            most_common_day: Measure::from(days.mode_first_seen().copied())
                .map(|day| weekday_name(day).to_string()),
            most_common_hour: hours.mode_smallest().copied().into(),
        }
    }

    /// Most popular start station, end station and trip
    pub fn station_stats(records: &RecordSet) -> StationStats {
        let mut starts = FrequencyTable::new();
        let mut ends = FrequencyTable::new();
        let mut trips = FrequencyTable::new();

        for trip in records.trips() {
            let start = trip.record.start_station.as_str();
            let end = trip.record.end_station.as_str();
            starts.insert(start);
            ends.insert(end);
            trips.insert(trip_label(start, end));
        }

        StationStats {
            most_common_start_station: starts.mode_first_seen().map(|s| s.to_string()).into(),
            most_common_end_station: ends.mode_first_seen().map(|s| s.to_string()).into(),
            most_common_trip: trips.mode_first_seen().cloned().into(),
        }
    }

    /// Total and mean trip duration in seconds
    pub fn duration_stats(records: &RecordSet) -> DurationStats {
        if records.is_empty() {
            return DurationStats {
                totals: Measure::NoData,
            };
        }

        let trip_count = records.len();
        let total_seconds: f64 = records.trips().iter().map(|t| t.record.trip_duration).sum();

        DurationStats {
            totals: Measure::Value(DurationTotals {
                trip_count,
                total_seconds,
                mean_seconds: total_seconds / trip_count as f64,
            }),
        }
    }

    /// User type, gender and birth year statistics
    ///
    /// Gender and birth year sections depend on whether the source provides
    /// those columns at all, which is checked once for the set. Blank cells
    /// inside a present column are skipped.
    pub fn user_stats(records: &RecordSet) -> UserStats {
        let user_types = records
            .trips()
            .iter()
            .filter_map(|t| t.record.user_type.as_deref())
            .collect::<FrequencyTable<&str>>();

        let gender = if records.has_gender() {
            let genders = records
                .trips()
                .iter()
                .filter_map(|t| t.record.gender.as_deref())
                .collect::<FrequencyTable<&str>>();
            Column::Available(category_counts(&genders))
        } else {
            Column::NotAvailable
        };

        let birth_year = if records.has_birth_year() {
            Column::Available(birth_year_stats(records))
        } else {
            Column::NotAvailable
        };

        UserStats {
            user_types: category_counts(&user_types),
            gender,
            birth_year,
        }
    }

    /// Run all four groups in order, timing each one
    pub fn run_all(records: &RecordSet, filter: &TripFilter) -> StatsReport {
        debug!(
            "Aggregating {} trips for {} (filter: {})",
            records.len(),
            records.city(),
            filter
        );

        StatsReport {
            city: records.city(),
            filter: filter.to_string(),
            trip_count: records.len(),
            time: timed(|| Self::time_stats(records)),
            stations: timed(|| Self::station_stats(records)),
            durations: timed(|| Self::duration_stats(records)),
            users: timed(|| Self::user_stats(records)),
        }
    }
}

/// Label for a start/end station pair
pub fn trip_label(start: &str, end: &str) -> String {
    format!("{start}{TRIP_SEPARATOR}{end}")
}

fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let started = Instant::now();
    let value = f();
    Timed::new(value, started.elapsed())
}

fn category_counts(table: &FrequencyTable<&str>) -> Vec<CategoryCount> {
    table
        .counts()
        .into_iter()
        .map(|(category, count)| CategoryCount::new(*category, count))
        .collect()
}

fn birth_year_stats(records: &RecordSet) -> Measure<BirthYearStats> {
    let mut years = FrequencyTable::new();
    let mut earliest = i32::MAX;
    let mut most_recent = i32::MIN;

    for year in records.trips().iter().filter_map(|t| t.record.birth_year) {
        years.insert(year);
        earliest = earliest.min(year);
        most_recent = most_recent.max(year);
    }

    years
        .mode_smallest()
        .map(|most_common| BirthYearStats {
            earliest,
            most_recent,
            most_common: *most_common,
        })
        .into()
}
