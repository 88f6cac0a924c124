//! Output formatting module for bikeshare
//!
//! This module provides formatters for displaying statistics in different
//! formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::aggregation_types::{DurationStats, Measure, Timed};
//! use bikeshare_terminal::output::get_formatter;
//! use std::time::Duration;
//!
//! let stats = Timed::new(DurationStats { totals: Measure::NoData }, Duration::ZERO);
//!
//! let formatter = get_formatter(false);
//! assert!(formatter.format_duration_stats(&stats).contains("No data available"));
//! ```

use bikeshare_core::aggregation_types::{
    CategoryCount, Column, DurationStats, Measure, StationStats, StatsReport, TimeStats, Timed,
    UserStats,
};
use bikeshare_core::temporal::weekday_name;
use bikeshare_core::types::{MonthName, OptionalColumns, Trip};
use colored::Colorize;
use prettytable::{Row, Table, format, row};
use serde::Serialize;
use serde_json::json;

/// Text shown in place of a statistic over an empty record set
pub const NO_DATA: &str = "No data available";

/// Width of the separator line printed after each section
const SEPARATOR_WIDTH: usize = 40;

/// Station names longer than this are shortened in raw-row tables
const MAX_STATION_WIDTH: usize = 36;

/// Trait for output formatters
///
/// Each statistic group has its own method so groups can be rendered as
/// soon as they are computed. `format_report` combines all four.
pub trait OutputFormatter {
    /// Format the most frequent times of travel
    fn format_time_stats(&self, stats: &Timed<TimeStats>) -> String;

    /// Format the most popular stations and trip
    fn format_station_stats(&self, stats: &Timed<StationStats>) -> String;

    /// Format total and mean trip duration
    fn format_duration_stats(&self, stats: &Timed<DurationStats>) -> String;

    /// Format rider demographics
    fn format_user_stats(&self, stats: &Timed<UserStats>) -> String;

    /// Format a full session report
    fn format_report(&self, report: &StatsReport) -> String;

    /// Format a window of raw rows; `offset` is the index of the first row
    fn format_rows(&self, rows: &[Trip], offset: usize, columns: OptionalColumns) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format a number with thousands separators
    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Seconds as `1d 2h 3m 4s`, leading zero units dropped
    fn format_duration(seconds: f64) -> String {
        let total = seconds.round() as u64;
        let (days, rem) = (total / 86_400, total % 86_400);
        let (hours, rem) = (rem / 3_600, rem % 3_600);
        let (minutes, secs) = (rem / 60, rem % 60);

        if days > 0 {
            format!("{days}d {hours}h {minutes}m {secs}s")
        } else if hours > 0 {
            format!("{hours}h {minutes}m {secs}s")
        } else if minutes > 0 {
            format!("{minutes}m {secs}s")
        } else {
            format!("{secs}s")
        }
    }

    fn format_seconds(seconds: f64) -> String {
        format!(
            "{:.2} seconds ({})",
            seconds,
            Self::format_duration(seconds)
        )
    }

    fn format_month(month: u32) -> String {
        match MonthName::from_ordinal(month) {
            Some(name) => format!("{month} ({name})"),
            None => month.to_string(),
        }
    }

    fn measure<T>(measure: &Measure<T>, render: impl FnOnce(&T) -> String) -> String {
        measure.value().map_or_else(|| NO_DATA.to_string(), render)
    }

    fn stat_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Statistic", b -> "Value"]);
        table
    }

    fn count_table(title: &str, counts: &[CategoryCount]) -> String {
        if counts.is_empty() {
            return format!("{title}: {NO_DATA}\n");
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> title, b -> "Count"]);
        for entry in counts {
            table.add_row(row![entry.category, r -> Self::format_number(entry.count)]);
        }
        table.to_string()
    }

    fn section<T>(heading: &str, timed: &Timed<T>, body: String) -> String {
        format!(
            "\n{}\n\n{}\nThis took {:.6} seconds.\n{}\n",
            heading.bold(),
            body,
            timed.elapsed.as_secs_f64(),
            "-".repeat(SEPARATOR_WIDTH)
        )
    }

    fn truncate(text: &str) -> String {
        console::truncate_str(text, MAX_STATION_WIDTH, "...").into_owned()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableFormatter {
    fn format_time_stats(&self, stats: &Timed<TimeStats>) -> String {
        let value = &stats.value;
        let mut table = Self::stat_table();
        table.add_row(row![
            "Most common month",
            Self::measure(&value.most_common_month, |m| Self::format_month(*m))
        ]);
        table.add_row(row![
            "Most common day of week",
            Self::measure(&value.most_common_day, String::clone)
        ]);
        table.add_row(row![
            "Most common start hour",
            Self::measure(&value.most_common_hour, |h| format!("{h}:00"))
        ]);

        Self::section(
            "Calculating The Most Frequent Times of Travel...",
            stats,
            table.to_string(),
        )
    }

    fn format_station_stats(&self, stats: &Timed<StationStats>) -> String {
        let value = &stats.value;
        let mut table = Self::stat_table();
        table.add_row(row![
            "Most commonly used start station",
            Self::measure(&value.most_common_start_station, String::clone)
        ]);
        table.add_row(row![
            "Most commonly used end station",
            Self::measure(&value.most_common_end_station, String::clone)
        ]);
        table.add_row(row![
            "Most frequent trip",
            Self::measure(&value.most_common_trip, String::clone)
        ]);

        Self::section(
            "Calculating The Most Popular Stations and Trip...",
            stats,
            table.to_string(),
        )
    }

    fn format_duration_stats(&self, stats: &Timed<DurationStats>) -> String {
        let body = match &stats.value.totals {
            Measure::Value(totals) => {
                let mut table = Self::stat_table();
                table.add_row(row![
                    "Trips",
                    r -> Self::format_number(totals.trip_count)
                ]);
                table.add_row(row![
                    "Total travel time",
                    Self::format_seconds(totals.total_seconds)
                ]);
                table.add_row(row![
                    "Mean travel time",
                    Self::format_seconds(totals.mean_seconds)
                ]);
                table.to_string()
            }
            Measure::NoData => format!("{NO_DATA}: no trips match the selected filter.\n"),
        };

        Self::section("Calculating Trip Duration...", stats, body)
    }

    fn format_user_stats(&self, stats: &Timed<UserStats>) -> String {
        let value = &stats.value;
        let mut body = Self::count_table("User Type", &value.user_types);

        body.push('\n');
        match &value.gender {
            Column::Available(counts) => body.push_str(&Self::count_table("Gender", counts)),
            Column::NotAvailable => body.push_str("Gender data not available for this city.\n"),
        }

        body.push('\n');
        match &value.birth_year {
            Column::Available(Measure::Value(years)) => {
                let mut table = Self::stat_table();
                table.add_row(row!["Earliest year of birth", years.earliest]);
                table.add_row(row!["Most recent year of birth", years.most_recent]);
                table.add_row(row!["Most common year of birth", years.most_common]);
                body.push_str(&table.to_string());
            }
            Column::Available(Measure::NoData) => {
                body.push_str(&format!("Year of birth: {NO_DATA}\n"));
            }
            Column::NotAvailable => {
                body.push_str("Birth year data not available for this city.\n");
            }
        }

        Self::section("Calculating User Stats...", stats, body)
    }

    fn format_report(&self, report: &StatsReport) -> String {
        let mut output = format!(
            "\n{} ({} trips, filter: {})\n",
            report.city.display_name().bold(),
            Self::format_number(report.trip_count),
            report.filter
        );
        output.push_str(&self.format_time_stats(&report.time));
        output.push_str(&self.format_station_stats(&report.stations));
        output.push_str(&self.format_duration_stats(&report.durations));
        output.push_str(&self.format_user_stats(&report.users));
        output
    }

    fn format_rows(&self, rows: &[Trip], offset: usize, columns: OptionalColumns) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let mut titles = vec!["#", "Start Time"];
        if columns.end_time {
            titles.push("End Time");
        }
        titles.extend(["Trip Duration", "Start Station", "End Station", "User Type"]);
        if columns.gender {
            titles.push("Gender");
        }
        if columns.birth_year {
            titles.push("Birth Year");
        }
        titles.extend(["Month", "Day", "Hour"]);
        table.set_titles(Row::from(titles));

        for (i, trip) in rows.iter().enumerate() {
            let record = &trip.record;
            let mut cells = vec![
                (offset + i).to_string(),
                record.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            ];
            if columns.end_time {
                cells.push(
                    record
                        .end_time
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default(),
                );
            }
            cells.push(format!("{}", record.trip_duration));
            cells.push(Self::truncate(&record.start_station));
            cells.push(Self::truncate(&record.end_station));
            cells.push(record.user_type.clone().unwrap_or_default());
            if columns.gender {
                cells.push(record.gender.clone().unwrap_or_default());
            }
            if columns.birth_year {
                cells.push(record.birth_year.map(|y| y.to_string()).unwrap_or_default());
            }
            cells.push(trip.temporal.month.to_string());
            cells.push(weekday_name(trip.temporal.day_of_week).to_string());
            cells.push(trip.temporal.hour.to_string());
            table.add_row(Row::from(cells));
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_time_stats(&self, stats: &Timed<TimeStats>) -> String {
        Self::to_json(&json!({ "time": stats }))
    }

    fn format_station_stats(&self, stats: &Timed<StationStats>) -> String {
        Self::to_json(&json!({ "stations": stats }))
    }

    fn format_duration_stats(&self, stats: &Timed<DurationStats>) -> String {
        Self::to_json(&json!({ "durations": stats }))
    }

    fn format_user_stats(&self, stats: &Timed<UserStats>) -> String {
        Self::to_json(&json!({ "users": stats }))
    }

    fn format_report(&self, report: &StatsReport) -> String {
        Self::to_json(report)
    }

    fn format_rows(&self, rows: &[Trip], offset: usize, _columns: OptionalColumns) -> String {
        Self::to_json(&json!({
            "offset": offset,
            "rows": rows,
        }))
    }
}

/// Get the formatter for the requested output mode
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
