//! Raw schedule records from upstream providers.
//!
//! A [`DaySchedule`] is the provider-agnostic shape of one day's prayer
//! timings as they come from an upstream API, before normalization into
//! calendar events. Timestamps are local wall-clock times in the region's
//! timezone; the raw provider structures are discarded after parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ProviderError, ProviderResult};

/// One prayer timing within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTime {
    /// The prayer label as the provider spells it, lowercased.
    pub name: String,
    /// Local wall-clock time of the prayer.
    pub at: NaiveDateTime,
}

/// A single day's schedule from an upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    /// The Gregorian date the timings belong to.
    pub date: NaiveDate,
    /// The day's prayer timings, in provider order.
    pub timings: Vec<PrayerTime>,
}

impl DaySchedule {
    /// Creates an empty schedule for the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            timings: Vec::new(),
        }
    }

    /// Builder: append one timing.
    pub fn with_timing(mut self, name: impl Into<String>, at: NaiveDateTime) -> Self {
        self.timings.push(PrayerTime {
            name: name.into().to_lowercase(),
            at,
        });
        self
    }
}

/// Parses an upstream timestamp string into a local wall-clock time.
///
/// Providers disagree on format: Aladhan sends RFC 3339 with an offset
/// (already in the requested timezone), Izaachen sends naive local
/// timestamps. Trailing annotations like `" (CET)"` are ignored.
pub fn parse_local_timestamp(raw: &str) -> ProviderResult<NaiveDateTime> {
    let token = raw.split_whitespace().next().unwrap_or(raw);

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(token, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }

    Err(ProviderError::invalid_response(format!(
        "unparseable timestamp {raw:?}"
    )))
}

/// Parses an upstream Gregorian date string.
///
/// Accepts ISO dates, day-first dates ("07-08-2025", Aladhan's spelling),
/// and full timestamps (only the date part is kept).
pub fn parse_gregorian_date(raw: &str) -> ProviderResult<NaiveDate> {
    let token = raw.split_whitespace().next().unwrap_or(raw);
    let token = token.split('T').next().unwrap_or(token);

    for format in ["%Y-%m-%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            return Ok(date);
        }
    }

    Err(ProviderError::invalid_response(format!(
        "unparseable date {raw:?}"
    )))
}
