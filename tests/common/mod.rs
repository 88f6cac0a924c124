//! Common test utilities and helpers for bikeshare tests
//!
//! This module writes city trip files into a temporary data directory so
//! tests exercise the real loader.

use bikeshare::{City, RecordSet, TripFilter, data_loader::DataLoader, temporal};
use std::fmt::Write as _;
use std::fs;
use tempfile::TempDir;

/// Header of a city file with every optional column
pub const FULL_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

/// Header of a city file without demographics (Washington's layout)
pub const BASIC_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

/// Builder for one CSV row
#[derive(Clone)]
pub struct TripRow {
    start_time: String,
    trip_duration: f64,
    start_station: String,
    end_station: String,
    user_type: String,
    gender: String,
    birth_year: String,
}

impl TripRow {
    pub fn new(start_time: &str) -> Self {
        Self {
            start_time: start_time.to_string(),
            trip_duration: 300.0,
            start_station: "Station A".to_string(),
            end_station: "Station B".to_string(),
            user_type: "Subscriber".to_string(),
            gender: String::new(),
            birth_year: String::new(),
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.trip_duration = seconds;
        self
    }

    pub fn stations(mut self, start: &str, end: &str) -> Self {
        self.start_station = start.to_string();
        self.end_station = end.to_string();
        self
    }

    pub fn user_type(mut self, user_type: &str) -> Self {
        self.user_type = user_type.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn gender(mut self, gender: &str) -> Self {
        self.gender = gender.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn birth_year(mut self, year: &str) -> Self {
        self.birth_year = year.to_string();
        self
    }

    fn to_csv(&self, index: usize, with_demographics: bool) -> String {
        let mut line = format!(
            "{index},{},{},{},{},{},{}",
            self.start_time,
            self.start_time,
            self.trip_duration,
            self.start_station,
            self.end_station,
            self.user_type
        );
        if with_demographics {
            let _ = write!(line, ",{},{}", self.gender, self.birth_year);
        }
        line
    }
}

/// Temporary data directory holding city files
pub struct TestData {
    pub dir: TempDir,
}

impl TestData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `city`'s file; demographics columns are included when requested
    pub fn write_city(&self, city: City, rows: &[TripRow], with_demographics: bool) {
        let header = if with_demographics {
            FULL_HEADER
        } else {
            BASIC_HEADER
        };
        let mut content = format!("{header}\n");
        for (i, row) in rows.iter().enumerate() {
            content.push_str(&row.to_csv(i, with_demographics));
            content.push('\n');
        }
        fs::write(self.dir.path().join(city.file_name()), content).unwrap();
    }

    pub fn loader(&self) -> DataLoader {
        DataLoader::new(self.dir.path())
    }

    /// Load, derive and filter in one step
    pub fn records(&self, city: City, filter: &TripFilter) -> RecordSet {
        let loaded = self.loader().load(city).unwrap();
        filter.apply(temporal::derive(loaded))
    }
}
