//! Resolution of configured dates into Unix timestamps.
//!
//! Two stored forms are accepted:
//!
//! - `[year, month, day, hour, minute]`, always UTC
//! - `"YYYY-MM-DD"`, midnight in the configured [`DateZone`]
//!
//! User entry goes through `DD-MM-YYYY` ([`parse_entry_date`]) and is stored
//! in the `YYYY-MM-DD` form.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::UnixTimestamp;
use crate::error::DateError;

const STORAGE_LAYOUT: &str = "YYYY-MM-DD";
const ENTRY_LAYOUT: &str = "DD-MM-YYYY";

/// Time zone applied to `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateZone {
    #[default]
    Local,
    Utc,
}

/// A configured begin or end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateSpec {
    /// `[year, month (1-based), day, hour, minute]` in UTC.
    Utc([i32; 5]),
    /// `YYYY-MM-DD` at midnight.
    Text(String),
}

impl DateSpec {
    /// Resolve to a Unix timestamp in seconds.
    pub fn resolve(&self, zone: DateZone) -> Result<UnixTimestamp, DateError> {
        match self {
            DateSpec::Utc(parts) => resolve_utc_parts(*parts),
            DateSpec::Text(text) => {
                let date = parse_storage_date(text)?;
                midnight(date, zone)
            }
        }
    }
}

impl std::fmt::Display for DateSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSpec::Utc([y, mo, d, h, mi]) => {
                write!(f, "{y:04}-{mo:02}-{d:02} {h:02}:{mi:02} UTC")
            }
            DateSpec::Text(text) => f.write_str(text),
        }
    }
}

fn resolve_utc_parts(
    [year, month, day, hour, minute]: [i32; 5],
) -> Result<UnixTimestamp, DateError> {
    let out_of_range =
        || DateError::OutOfRange(format!("[{year}, {month}, {day}, {hour}, {minute}]"));
    let to_u32 = |v: i32| u32::try_from(v).map_err(|_| out_of_range());

    let date =
        NaiveDate::from_ymd_opt(year, to_u32(month)?, to_u32(day)?).ok_or_else(out_of_range)?;
    let time =
        NaiveTime::from_hms_opt(to_u32(hour)?, to_u32(minute)?, 0).ok_or_else(out_of_range)?;
    Ok(NaiveDateTime::new(date, time).and_utc().timestamp())
}

fn midnight(date: NaiveDate, zone: DateZone) -> Result<UnixTimestamp, DateError> {
    let naive = date.and_time(NaiveTime::default());
    match zone {
        DateZone::Utc => Ok(naive.and_utc().timestamp()),
        DateZone::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp())
            .ok_or_else(|| DateError::Nonexistent(format!("{date} 00:00 local"))),
    }
}

/// Digits and dashes in the same positions as `layout`.
fn matches_layout(input: &str, layout: &str) -> bool {
    input.len() == layout.len()
        && input.bytes().zip(layout.bytes()).all(|(c, l)| {
            if l == b'-' {
                c == b'-'
            } else {
                c.is_ascii_digit()
            }
        })
}

fn build_date(input: &str, year: &str, month: &str, day: &str) -> Result<NaiveDate, DateError> {
    let parse = |s: &str| s.parse::<u32>().map_err(|_| DateError::OutOfRange(input.to_string()));
    let year = i32::try_from(parse(year)?).map_err(|_| DateError::OutOfRange(input.to_string()))?;
    NaiveDate::from_ymd_opt(year, parse(month)?, parse(day)?)
        .ok_or_else(|| DateError::OutOfRange(input.to_string()))
}

/// Parse a stored `YYYY-MM-DD` date.
pub fn parse_storage_date(input: &str) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    if !matches_layout(input, STORAGE_LAYOUT) {
        return Err(DateError::InvalidFormat {
            input: input.to_string(),
            expected: STORAGE_LAYOUT,
        });
    }
    build_date(input, &input[0..4], &input[5..7], &input[8..10])
}

/// Parse a user-entered `DD-MM-YYYY` date, rejecting impossible days such
/// as `31-02-2024`.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate, DateError> {
    let input = input.trim();
    if !matches_layout(input, ENTRY_LAYOUT) {
        return Err(DateError::InvalidFormat {
            input: input.to_string(),
            expected: ENTRY_LAYOUT,
        });
    }
    build_date(input, &input[6..10], &input[3..5], &input[0..2])
}

/// `DD-MM-YYYY` entry to `YYYY-MM-DD` storage form.
pub fn to_storage_format(entry: &str) -> Result<String, DateError> {
    Ok(parse_entry_date(entry)?.format("%Y-%m-%d").to_string())
}

/// `YYYY-MM-DD` storage form back to `DD-MM-YYYY` for display.
pub fn from_storage_format(stored: &str) -> Result<String, DateError> {
    Ok(parse_storage_date(stored)?.format("%d-%m-%Y").to_string())
}

/// Current wall-clock time in whole seconds.
pub fn now_timestamp() -> UnixTimestamp {
    Utc::now().timestamp()
}
