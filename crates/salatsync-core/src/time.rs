//! Time helpers for the month-replace pipeline.
//!
//! This module provides [`round_up_to_next_minute`] for snapping prayer
//! timestamps to whole-minute boundaries, and [`MonthWindow`] for the
//! half-open interval covering one calendar month in a given timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Rounds a timestamp up to the next whole minute.
///
/// Timestamps already on a minute boundary (zero seconds, zero sub-second
/// component) are returned unchanged; everything else advances to the start
/// of the following minute.
pub fn round_up_to_next_minute(dt: chrono::NaiveDateTime) -> chrono::NaiveDateTime {
    if dt.second() == 0 && dt.nanosecond() == 0 {
        return dt;
    }

    (dt + Duration::minutes(1))
        .with_second(0)
        .expect("valid time")
        .with_nanosecond(0)
        .expect("valid time")
}

/// The half-open interval `[start, end)` covering one calendar month in a
/// given timezone.
///
/// `start` is the first instant of the month at local midnight; `end` is the
/// first instant of the following month. The window is used both to filter
/// upstream schedules and to scope event deletion on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    /// First instant of the month (inclusive).
    pub start: DateTime<Tz>,
    /// First instant of the following month (exclusive).
    pub end: DateTime<Tz>,
}

impl MonthWindow {
    /// Creates the window for the month containing `now` in `tz`.
    ///
    /// The reference instant is taken explicitly so callers (and tests) can
    /// inject a fixed clock; see [`MonthWindow::current`] for the wall-clock
    /// convenience.
    pub fn containing(now: DateTime<Utc>, tz: Tz) -> Self {
        let local = now.with_timezone(&tz);

        let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1).expect("valid date");
        let next_first = if local.month() == 12 {
            NaiveDate::from_ymd_opt(local.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(local.year(), local.month() + 1, 1)
        }
        .expect("valid date");

        let start = tz
            .from_local_datetime(&first.and_hms_opt(0, 0, 0).expect("valid time"))
            .single()
            .expect("unambiguous local time");
        let end = tz
            .from_local_datetime(&next_first.and_hms_opt(0, 0, 0).expect("valid time"))
            .single()
            .expect("unambiguous local time");

        Self { start, end }
    }

    /// Creates the window for the current month in `tz`.
    pub fn current(tz: Tz) -> Self {
        Self::containing(Utc::now(), tz)
    }

    /// The year of the covered month.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The covered month (1-12).
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// Checks if an instant falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if a calendar date falls within the covered month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}
