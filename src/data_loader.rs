//! Data loader module for reading city trip files
//!
//! Each city's trips live in one CSV file inside a data directory. The
//! directory is handed to the loader explicitly; the city-to-file mapping
//! comes from [`City::file_name`].
//!
//! # File format
//!
//! The header row names the columns. `Start Time`, `Trip Duration`,
//! `Start Station`, `End Station` and `User Type` are required. `End Time`,
//! `Gender` and `Birth Year` are optional: whether they exist is decided
//! once from the header and applies to the whole record set. Any other
//! column (such as the unnamed index column) is ignored.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::data_loader::DataLoader;
//! use bikeshare_core::types::City;
//!
//! # fn example() -> bikeshare::Result<()> {
//! let loader = DataLoader::new("./data").with_progress(true);
//! let loaded = loader.load(City::Washington)?;
//! println!("{} trips, gender column: {}", loaded.records.len(), loaded.columns.gender);
//! # Ok(())
//! # }
//! ```

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::types::{City, LoadedTrips, OptionalColumns, TripRecord};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp layouts accepted in `Start Time` / `End Time`
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// How often the spinner is refreshed, in rows
const PROGRESS_STEP: u64 = 5_000;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Loader for city trip files
pub struct DataLoader {
    data_dir: PathBuf,
    show_progress: bool,
}

impl DataLoader {
    /// Create a loader reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            show_progress: false,
        }
    }

    /// Enable or disable the row-count spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `city`'s trips
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// Load every trip for `city`
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, a required column is absent, or any
    /// row has an unparsable `Start Time` or `Trip Duration`.
    pub fn load(&self, city: City) -> Result<LoadedTrips> {
        let path = self.path_for(city);
        debug!("Loading {} trips from {}", city, path.display());

        if !path.is_file() {
            return Err(BikeshareError::DataFileNotFound {
                city: city.to_string(),
                path,
            });
        }

        let file = File::open(&path)?;
        let loaded = self.load_from_reader(city, file, &path)?;
        info!("Loaded {} trips for {}", loaded.records.len(), city);
        Ok(loaded)
    }

    /// Parse trips from any CSV source
    ///
    /// `source` is only used to label errors.
    pub fn load_from_reader<R: Read>(
        &self,
        city: City,
        reader: R,
        source: &Path,
    ) -> Result<LoadedTrips> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let index = ColumnIndex::from_headers(csv_reader.headers()?, source)?;
        let columns = index.optional_columns();
        debug!(
            "Optional columns for {}: end_time={}, gender={}, birth_year={}",
            city, columns.end_time, columns.gender, columns.birth_year
        );

        let progress = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} rows read")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Loading {city} trips"));
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        });

        let mut records = Vec::new();
        let mut row = StringRecord::new();
        while csv_reader.read_record(&mut row)? {
            let line = row.position().map_or(0, |p| p.line());
            let record = index
                .parse_record(&row)
                .map_err(|error| BikeshareError::Parse {
                    file: source.to_path_buf(),
                    line,
                    error,
                })?;
            records.push(record);

            if let Some(ref pb) = progress {
                let count = records.len() as u64;
                if count % PROGRESS_STEP == 0 {
                    pb.set_position(count);
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(LoadedTrips {
            city,
            columns,
            records,
        })
    }
}

/// Positions of the known columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    start_time: usize,
    end_time: Option<usize>,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, file: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| BikeshareError::MissingColumn {
                file: file.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: find(END_TIME),
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn optional_columns(&self) -> OptionalColumns {
        OptionalColumns {
            end_time: self.end_time.is_some(),
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }

    fn parse_record(&self, row: &StringRecord) -> std::result::Result<TripRecord, String> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).filter(|value| !value.is_empty());

        let start_raw = cell(self.start_time);
        let start_time = parse_timestamp(start_raw)
            .ok_or_else(|| format!("invalid {START_TIME} '{start_raw}'"))?;

        let end_time = match optional(self.end_time) {
            Some(raw) => {
                Some(parse_timestamp(raw).ok_or_else(|| format!("invalid {END_TIME} '{raw}'"))?)
            }
            None => None,
        };

        let duration_raw = cell(self.trip_duration);
        let trip_duration = duration_raw
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| {
                format!("{TRIP_DURATION} must be a non-negative number, got '{duration_raw}'")
            })?;

        let birth_year = optional(self.birth_year).and_then(|raw| {
            let year = parse_year(raw);
            if year.is_none() {
                debug!("Ignoring unreadable {BIRTH_YEAR} '{raw}'");
            }
            year
        });

        Ok(TripRecord {
            start_time,
            end_time,
            trip_duration,
            start_station: cell(self.start_station).to_string(),
            end_station: cell(self.end_station).to_string(),
            user_type: optional(Some(self.user_type)).map(str::to_string),
            gender: optional(self.gender).map(str::to_string),
            birth_year,
        })
    }
}

/// Parse a source timestamp such as `2017-01-01 00:07:57`
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Birth years are stored as floats in some sources (`1992.0`)
///
/// Fractions are truncated. Anything that is not a finite number in `i32`
/// range reads as a blank cell.
fn parse_year(raw: &str) -> Option<i32> {
    let value = raw.parse::<f64>().ok()?.trunc();
    if !value.is_finite() || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}
