//! The canonical calendar event built from one prayer timing.

use chrono::{Duration, NaiveDateTime};
use chrono_tz::Tz;

use crate::time::round_up_to_next_minute;

/// Wire format for event timestamps: local wall-clock time, no offset.
/// The timezone travels as a separate field on the event payload.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A prayer calendar event in canonical form.
///
/// Start and end are local wall-clock times in `timezone`, both rounded up
/// to whole-minute boundaries. `end` is derived from the raw start plus a
/// fixed duration, so a 05:07:33 start with a 15-minute duration yields
/// 05:08:00 / 05:23:00.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerEvent {
    /// Display label, possibly region-prefixed (e.g. "MA - Fajr").
    pub summary: String,
    /// Event start, minute-aligned.
    pub start: NaiveDateTime,
    /// Event end, minute-aligned, strictly after `start`.
    pub end: NaiveDateTime,
    /// IANA timezone the wall-clock times are expressed in.
    pub timezone: Tz,
}

impl PrayerEvent {
    /// Builds an event from a raw prayer timestamp and a fixed duration.
    ///
    /// # Panics
    ///
    /// Panics if the duration is not positive (the rounded end would not be
    /// after the rounded start).
    pub fn build(
        summary: impl Into<String>,
        start: NaiveDateTime,
        timezone: Tz,
        duration: Duration,
    ) -> Self {
        let end = round_up_to_next_minute(start + duration);
        let start = round_up_to_next_minute(start);
        assert!(start < end, "event duration must be positive");

        Self {
            summary: summary.into(),
            start,
            end,
            timezone,
        }
    }

    /// The start timestamp formatted for the calendar wire payload.
    pub fn start_string(&self) -> String {
        self.start.format(DATE_TIME_FORMAT).to_string()
    }

    /// The end timestamp formatted for the calendar wire payload.
    pub fn end_string(&self) -> String {
        self.end.format(DATE_TIME_FORMAT).to_string()
    }
}
