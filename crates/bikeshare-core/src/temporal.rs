//! Temporal field derivation
//!
//! Month, day of week and hour are computed once per record set, right
//! after loading and before any filter runs, so every later stage can rely
//! on them being present.

use crate::types::{LoadedTrips, RecordSet, Trip};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Serialize, Serializer};
use tracing::debug;

/// Fields derived from a trip's start timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemporalFields {
    /// 1-based month
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub day_of_week: Weekday,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl TemporalFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            day_of_week: ts.weekday(),
            hour: ts.hour(),
        }
    }
}

/// Full English weekday name, independent of locale
///
/// # Examples
/// ```
/// use bikeshare_core::temporal::weekday_name;
/// use chrono::Weekday;
///
/// assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
/// ```
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

/// Attach temporal fields to every loaded record
///
/// No rows are dropped and row order is kept.
pub fn derive(loaded: LoadedTrips) -> RecordSet {
    let LoadedTrips {
        city,
        columns,
        records,
    } = loaded;

    let trips: Vec<Trip> = records
        .into_iter()
        .map(|record| {
            let temporal = TemporalFields::from_timestamp(&record.start_time);
            Trip { record, temporal }
        })
        .collect();

    debug!("Derived temporal fields for {} trips", trips.len());
    RecordSet::new(city, columns, trips)
}
