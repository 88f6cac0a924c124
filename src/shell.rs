//! Interactive exploration shell
//!
//! The shell owns the prompt loop: it asks for a city and a filter, runs
//! the load/derive/filter pipeline, prints the four statistic groups and
//! lets the user page through raw rows. Input and output are generic so a
//! session can be scripted in tests.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::data_loader::DataLoader;
//! use bikeshare::shell::Shell;
//! use bikeshare_terminal::get_formatter;
//! use std::io;
//!
//! # fn example() -> bikeshare::Result<()> {
//! let stdin = io::stdin();
//! let stdout = io::stdout();
//! let mut shell = Shell::new(
//!     stdin.lock(),
//!     stdout.lock(),
//!     DataLoader::new("./data"),
//!     get_formatter(false),
//! );
//! shell.run()?;
//! # Ok(())
//! # }
//! ```

use crate::aggregation::Aggregator;
use crate::data_loader::DataLoader;
use crate::pager::{DEFAULT_PAGE_SIZE, RowPager};
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::filters::{FilterKind, TripFilter, parse_weekday};
use bikeshare_core::temporal;
use bikeshare_core::types::{City, MonthName, RecordSet};
use bikeshare_terminal::OutputFormatter;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str = "Would you like to see data for Chicago, New York City, or Washington?";
const CITY_INVALID: &str = "Invalid input. Please choose Chicago, New York City, or Washington.";
const FILTER_PROMPT: &str =
    "Would you like to filter the data by month, day, or not at all? Type 'month', 'day', or 'none'.";
const FILTER_INVALID: &str = "Invalid input. Please choose 'month', 'day', or 'none'.";
const MONTH_PROMPT: &str = "Which month? January, February, March, April, May, or June?";
const MONTH_INVALID: &str = "Invalid input. Please choose a month from the list.";
const DAY_PROMPT: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, or Sunday?";
const DAY_INVALID: &str = "Invalid input. Please choose a day from the list.";
const NO_MATCHES: &str = "No trips match the selected filter.";
const NO_MORE_ROWS: &str = "No more rows to display.";
const RESTART_PROMPT: &str = "Would you like to restart? Enter yes or no.";

/// Prompt-driven explorer over a reader and a writer
pub struct Shell<R, W> {
    input: R,
    output: W,
    loader: DataLoader,
    formatter: Box<dyn OutputFormatter>,
    page_size: usize,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        input: R,
        output: W,
        loader: DataLoader,
        formatter: Box<dyn OutputFormatter>,
    ) -> Self {
        Self {
            input,
            output,
            loader,
            formatter,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the number of raw rows shown per window
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Run sessions until the user declines to restart
    ///
    /// Closing the input ends the program normally.
    ///
    /// # Errors
    ///
    /// Load failures and output I/O errors are returned to the caller.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.run_session() {
                Ok(true) => continue,
                Ok(false) => return Ok(()),
                Err(BikeshareError::InputClosed) => {
                    debug!("Input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One full exploration cycle; returns whether the user wants another
    pub fn run_session(&mut self) -> Result<bool> {
        let (city, filter) = self.select_filter()?;
        writeln!(self.output, "{}", "-".repeat(40))?;

        info!("Exploring {} with filter {}", city, filter);
        let loaded = self.loader.load(city)?;

        let start = Instant::now();
        let records = filter.apply(temporal::derive(loaded));
        debug!("Prepared {} trips in {:?}", records.len(), start.elapsed());

        let report = Aggregator::run_all(&records, &filter);
        writeln!(self.output, "{}", self.formatter.format_report(&report))?;

        if records.is_empty() {
            writeln!(self.output, "{NO_MATCHES}")?;
        } else {
            self.browse_rows(&records)?;
        }

        self.confirm(&format!("\n{RESTART_PROMPT}"))
    }

    /// Ask for a city, a filter type and the filter value
    pub fn select_filter(&mut self) -> Result<(City, TripFilter)> {
        writeln!(self.output, "{GREETING}")?;

        let city: City = self.prompt_until(CITY_PROMPT, CITY_INVALID)?;
        let kind: FilterKind = self.prompt_until(FILTER_PROMPT, FILTER_INVALID)?;

        let filter = match kind {
            FilterKind::Month => {
                TripFilter::Month(self.prompt_until::<MonthName>(MONTH_PROMPT, MONTH_INVALID)?)
            }
            FilterKind::Day => {
                let day = self.prompt_parsed(DAY_PROMPT, DAY_INVALID, parse_weekday)?;
                TripFilter::Day(day)
            }
            FilterKind::None => TripFilter::None,
        };

        Ok((city, filter))
    }

    /// Page through raw rows while the user keeps answering `yes`
    pub fn browse_rows(&mut self, records: &RecordSet) -> Result<()> {
        let mut pager = RowPager::new(records.len(), self.page_size);
        let mut prompt = format!(
            "\nDo you want to check the first {} rows of the dataset related to the chosen city? Enter yes or no.",
            self.page_size
        );

        while self.confirm(&prompt)? {
            let Some(window) = pager.next_window() else {
                break;
            };
            let rows = self.formatter.format_rows(
                records.rows(window.clone()),
                window.start,
                records.columns(),
            );
            writeln!(self.output, "{rows}")?;

            if pager.is_exhausted() {
                writeln!(self.output, "{NO_MORE_ROWS}")?;
                break;
            }
            prompt = format!(
                "Do you want to check another {} rows of the dataset? Enter yes or no.",
                self.page_size
            );
        }

        Ok(())
    }

    /// Read one trimmed line; end of input is [`BikeshareError::InputClosed`]
    fn prompt_line(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_until<T>(&mut self, prompt: &str, invalid: &str) -> Result<T>
    where
        T: FromStr<Err = BikeshareError>,
    {
        self.prompt_parsed(prompt, invalid, T::from_str)
    }

    /// Re-prompt until `parse` accepts the answer
    fn prompt_parsed<T>(
        &mut self,
        prompt: &str,
        invalid: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        loop {
            let answer = self.prompt_line(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("Rejected input {:?}: {}", answer, e);
                    writeln!(self.output, "{invalid}")?;
                }
            }
        }
    }

    /// Only `yes` (any case) is affirmative
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.prompt_line(prompt)?;
        Ok(answer.eq_ignore_ascii_case("yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_terminal::get_formatter;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-01-02 08:00:00,2017-01-02 08:05:00,300,A,B,Subscriber
1,2017-01-02 09:00:00,2017-01-02 09:05:00,300,A,B,Subscriber
2,2017-03-07 17:00:00,2017-03-07 17:10:00,600,C,D,Customer
3,2017-03-08 17:00:00,2017-03-08 17:10:00,600,C,D,Customer
4,2017-03-09 17:00:00,2017-03-09 17:10:00,600,C,D,Customer
5,2017-03-10 17:00:00,2017-03-10 17:10:00,600,C,D,Customer
6,2017-03-11 17:00:00,2017-03-11 17:10:00,600,C,D,Customer
";

    fn data_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("washington.csv"), WASHINGTON).unwrap();
        dir
    }

    fn run_script(dir: &TempDir, script: &str) -> (Result<()>, String) {
        let mut output = Vec::new();
        let result = {
            let mut shell = Shell::new(
                Cursor::new(script.as_bytes().to_vec()),
                &mut output,
                DataLoader::new(dir.path()),
                get_formatter(false),
            );
            shell.run()
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_full_session_without_browsing() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\nnone\nno\nno\n");

        assert!(result.is_ok());
        assert!(output.contains(GREETING));
        assert!(output.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(output.contains("Calculating User Stats..."));
        assert!(output.contains("Gender data not available for this city."));
        assert!(output.contains(RESTART_PROMPT));
    }

    #[test]
    fn test_reprompts_on_invalid_input() {
        let dir = data_dir();
        let (result, output) =
            run_script(&dir, "boston\nWashington\nweek\nmonth\njuly\nmarch\nno\nno\n");

        assert!(result.is_ok());
        assert_eq!(output.matches(CITY_INVALID).count(), 1);
        assert_eq!(output.matches(FILTER_INVALID).count(), 1);
        assert_eq!(output.matches(MONTH_INVALID).count(), 1);
        assert!(output.contains("month: March"));
    }

    #[test]
    fn test_day_abbreviation_rejected() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\nday\ntue\ntuesday\nno\nno\n");

        assert!(result.is_ok());
        assert_eq!(output.matches(DAY_INVALID).count(), 1);
        assert!(output.contains("day: Tuesday"));
    }

    #[test]
    fn test_browse_until_exhausted() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\nnone\nyes\nyes\nno\n");

        assert!(result.is_ok());
        assert!(output.contains("check the first 5 rows"));
        assert!(output.contains("check another 5 rows"));
        assert!(output.contains(NO_MORE_ROWS));
    }

    #[test]
    fn test_browse_stops_on_no() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\nnone\nyes\nno\nno\n");

        assert!(result.is_ok());
        assert!(!output.contains(NO_MORE_ROWS));
    }

    #[test]
    fn test_empty_filter_result_skips_browsing() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\nmonth\njune\nno\n");

        assert!(result.is_ok());
        assert!(output.contains(NO_MATCHES));
        assert!(!output.contains("check the first 5 rows"));
    }

    #[test]
    fn test_restart_runs_second_session() {
        let dir = data_dir();
        let script = "washington\nnone\nno\nYES\nwashington\nday\nmonday\nno\nno\n";
        let (result, output) = run_script(&dir, script);

        assert!(result.is_ok());
        assert_eq!(output.matches(GREETING).count(), 2);
        assert!(output.contains("day: Monday"));
    }

    #[test]
    fn test_input_closed_is_clean_exit() {
        let dir = data_dir();
        let (result, output) = run_script(&dir, "washington\n");

        assert!(result.is_ok());
        assert!(output.contains(FILTER_PROMPT));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = data_dir();
        let (result, _) = run_script(&dir, "chicago\nnone\n");

        assert!(matches!(
            result,
            Err(BikeshareError::DataFileNotFound { .. })
        ));
    }

    #[test]
    fn test_custom_page_size() {
        let dir = data_dir();
        let mut output = Vec::new();
        {
            let mut shell = Shell::new(
                Cursor::new(b"washington\nnone\nyes\nno\nno\n".to_vec()),
                &mut output,
                DataLoader::new(dir.path()),
                get_formatter(false),
            )
            .with_page_size(3);
            shell.run().unwrap();
        }
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("check the first 3 rows"));
    }
}
