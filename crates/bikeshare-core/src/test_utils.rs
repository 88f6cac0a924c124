//! Shared test utilities for unit tests
//!
//! Integration tests in the root crate keep their own builder in
//! `tests/common/mod.rs`, since this module only exists under `cfg(test)`.

use crate::temporal::TemporalFields;
use crate::types::{City, OptionalColumns, RecordSet, Trip, TripRecord};
use chrono::NaiveDateTime;

/// Builder for test trips with sensible defaults
pub struct TripBuilder {
    record: TripRecord,
}

impl TripBuilder {
    pub fn new() -> Self {
        Self {
            record: TripRecord {
                start_time: parse_ts("2017-01-02 08:00:00"),
                end_time: None,
                trip_duration: 600.0,
                start_station: "Station A".to_string(),
                end_station: "Station B".to_string(),
                user_type: Some("Subscriber".to_string()),
                gender: None,
                birth_year: None,
            },
        }
    }

    /// Set the start time from `YYYY-MM-DD HH:MM:SS`
    pub fn at(mut self, ts: &str) -> Self {
        self.record.start_time = parse_ts(ts);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.record.trip_duration = seconds;
        self
    }

    pub fn with_stations(mut self, start: &str, end: &str) -> Self {
        self.record.start_station = start.to_string();
        self.record.end_station = end.to_string();
        self
    }

    pub fn with_user_type(mut self, user_type: Option<&str>) -> Self {
        self.record.user_type = user_type.map(str::to_string);
        self
    }

    pub fn with_gender(mut self, gender: Option<&str>) -> Self {
        self.record.gender = gender.map(str::to_string);
        self
    }

    pub fn with_birth_year(mut self, year: Option<i32>) -> Self {
        self.record.birth_year = year;
        self
    }

    pub fn build(self) -> Trip {
        let temporal = TemporalFields::from_timestamp(&self.record.start_time);
        Trip {
            record: self.record,
            temporal,
        }
    }
}

impl Default for TripBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Record set without gender or birth year columns
pub fn record_set(city: City, trips: Vec<Trip>) -> RecordSet {
    RecordSet::new(city, OptionalColumns::default(), trips)
}

fn parse_ts(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").expect("valid test timestamp")
}
