use std::ops::Index;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use toml::value::{Datetime, Offset};

use crate::error::DateError;

/// Wall clock offset used for `YYYY-MM-DD HH:mm` dates when none is configured (UTC+5:30).
pub const DEFAULT_LOCAL_OFFSET: &str = "+05:30";

/// A date as written in the front matter, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// `pubDate = "2024-03-01 10:00"`
    Text(String),
    /// `pubDate = 2024-03-01T10:00:00+05:30`
    Native(Datetime),
}

impl<'de> Deserialize<'de> for DateInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
    {
        use serde::de::Error;
        match toml::Value::deserialize(deserializer)? {
            toml::Value::String(text) => Ok(DateInput::Text(text)),
            toml::Value::Datetime(dt) => Ok(DateInput::Native(dt)),
            other => Err(Error::custom(format!(
                "expected a date string or a date, found {}", other.type_str()))),
        }
    }
}

/// Turns any accepted date representation into a canonical timestamp.
pub fn normalize(input: &DateInput, local_offset: &FixedOffset) -> Result<DateTime<Utc>, DateError> {
    match input {
        DateInput::Text(text) => parse_local_date_time(text, local_offset),
        DateInput::Native(dt) => from_native(dt),
    }
}

/// Parses `YYYY-MM-DD HH:mm` as wall clock time at `local_offset`.
///
/// The text is rewritten to RFC 3339 (`YYYY-MM-DDTHH:mm:00+05:30`) before parsing,
/// so out of range values such as month 13 or hour 24 are rejected.
pub fn parse_local_date_time(text: &str, local_offset: &FixedOffset) -> Result<DateTime<Utc>, DateError> {
    lazy_static! {
        static ref LOCAL_DATE_TIME: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").unwrap();
    }

    if !LOCAL_DATE_TIME.is_match(text) {
        return Err(DateError::Pattern(text.to_string()));
    }

    let rfc3339 = format!("{}:00{}", text.replacen(' ', "T", 1), local_offset);
    DateTime::parse_from_rfc3339(&rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DateError::Calendar(text.to_string()))
}

/// Native TOML dates keep their instant. Values without an offset are read as UTC
/// and a bare date is midnight UTC.
fn from_native(value: &Datetime) -> Result<DateTime<Utc>, DateError> {
    let raw = value.to_string();
    let calendar_error = || DateError::Calendar(raw.clone());

    let date = value.date.ok_or_else(|| DateError::MissingDate(raw.clone()))?;
    let date = NaiveDate::from_ymd_opt(date.year as i32, date.month as u32, date.day as u32)
        .ok_or_else(calendar_error)?;

    let time = match value.time {
        Some(t) => NaiveTime::from_hms_nano_opt(t.hour as u32, t.minute as u32, t.second as u32, t.nanosecond)
            .ok_or_else(calendar_error)?,
        None => NaiveTime::MIN,
    };

    let offset_secs = match value.offset {
        None | Some(Offset::Z) => 0,
        Some(Offset::Custom { minutes }) => minutes as i32 * 60,
    };
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(calendar_error)?;

    offset.from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(calendar_error)
}

/// Parses `+HH:MM` / `-HH:MM`.
pub fn parse_offset(text: &str) -> Option<FixedOffset> {
    lazy_static! {
        static ref OFFSET: Regex = Regex::new(r"^([+-])(\d{2}):(\d{2})$").unwrap();
    }

    let caps = OFFSET.captures(text.trim())?;
    let hours: i32 = caps.index(2).parse().ok()?;
    let minutes: i32 = caps.index(3).parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    let secs = hours * 3600 + minutes * 60;
    match caps.index(1) {
        "-" => FixedOffset::west_opt(secs),
        _ => FixedOffset::east_opt(secs),
    }
}

/// Formats a timestamp back into `YYYY-MM-DD HH:mm` at `local_offset`.
pub fn format_local_date_time(date_time: &DateTime<Utc>, local_offset: &FixedOffset) -> String {
    date_time.with_timezone(local_offset).format("%Y-%m-%d %H:%M").to_string()
}
