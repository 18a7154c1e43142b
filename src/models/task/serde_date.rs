//! Serde adapter storing calendar dates as timestamps.
//!
//! Dates are written as RFC 3339 timestamps at local midnight. Reading
//! accepts any RFC 3339 timestamp (taken in local time), a naive
//! `YYYY-MM-DDTHH:MM:SS` timestamp, or a plain `YYYY-MM-DD` date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let local_midnight = date
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest());

    match local_midnight {
        Some(timestamp) => serializer.serialize_str(&timestamp.to_rfc3339()),
        // Midnight skipped by a DST change; the plain date reads back the same
        None => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date value '{}'", raw)))
}

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
