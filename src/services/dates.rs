//! Calendar helpers for building fetch windows.

use chrono::{FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// `[from, to]` window in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: i64,
    pub to: i64,
}

impl DateRange {
    /// From local midnight `months` before `today` to local midnight of `today`.
    ///
    /// A day missing from the shorter month clamps to its last day
    /// (31 May minus three months is 29 Feb in a leap year).
    pub fn months_back(today: NaiveDate, months: u32, offset: FixedOffset) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self {
            from: local_midnight(start, offset),
            to: local_midnight(today, offset),
        }
    }

    /// Window used for the daily pass.
    pub fn three_months(today: NaiveDate, offset: FixedOffset) -> Self {
        Self::months_back(today, 3, offset)
    }

    /// Window used for the weekly pass.
    pub fn one_year(today: NaiveDate, offset: FixedOffset) -> Self {
        Self::months_back(today, 12, offset)
    }
}

/// Epoch seconds of 00:00 on `date` in the given zone.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> i64 {
    to_timestamp(date.and_time(NaiveTime::MIN), offset)
}

/// Epoch seconds of a local wall-clock time.
pub fn to_timestamp(local: NaiveDateTime, offset: FixedOffset) -> i64 {
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| local.and_utc().timestamp())
}

/// Parse `dd/mm/yyyy` with an optional `HH:mm` or `HH:mm:ss` time.
///
/// Single-digit day, month and hour are accepted. Dates that do not exist
/// (31/02/2024) return `None`.
pub fn parse_dmy(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    let year = input.split_whitespace().next()?.rsplit('/').next()?;
    if year.len() != 4 {
        return None;
    }

    ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%d/%m/%Y")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Format as `dd/mm/yyyy`.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
