//! DaySchedule to PrayerEvent conversion pipeline.
//!
//! This stage reconciles the providers' vocabularies: timings outside the
//! region's tracked set are dropped, alternate labels are mapped to their
//! canonical names, and the display summary gets the region prefix where
//! one is configured.

use chrono::Duration;
use chrono_tz::Tz;

use salatsync_core::{PrayerEvent, canonical_name, display_label};

use crate::schedule::DaySchedule;

/// Region-specific settings for the normalization stage.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// The prayer labels to keep, lowercase, in the provider's spelling.
    pub tracked: Vec<String>,
    /// Prefix for event summaries (e.g. "MA" -> "MA - Fajr").
    pub summary_prefix: Option<String>,
    /// Timezone the events' wall-clock times are expressed in.
    pub timezone: Tz,
    /// Fixed event duration.
    pub event_duration: Duration,
}

/// Converts fetched day schedules into canonical calendar events.
///
/// Emits one event per tracked prayer per day, preserving day order.
pub fn schedule_to_events(days: &[DaySchedule], opts: &NormalizeOptions) -> Vec<PrayerEvent> {
    let mut events = Vec::new();

    for day in days {
        for timing in &day.timings {
            if !opts.tracked.iter().any(|t| t == &timing.name) {
                continue;
            }

            let label = display_label(canonical_name(&timing.name));
            let summary = match opts.summary_prefix {
                Some(ref prefix) => format!("{} - {}", prefix, label),
                None => label,
            };

            events.push(PrayerEvent::build(
                summary,
                timing.at,
                opts.timezone,
                opts.event_duration,
            ));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn opts(tracked: &[&str], prefix: Option<&str>) -> NormalizeOptions {
        NormalizeOptions {
            tracked: tracked.iter().map(|s| s.to_string()).collect(),
            summary_prefix: prefix.map(String::from),
            timezone: chrono_tz::Europe::Berlin,
            event_duration: Duration::minutes(15),
        }
    }

    #[test]
    fn maps_alternate_labels_to_canonical_summaries() {
        let days = [DaySchedule::new(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap())
            .with_timing("zuhr", naive("2025-08-07T13:38:02"))
            .with_timing("ishaa", naive("2025-08-07T22:49:12"))];

        let events = schedule_to_events(&days, &opts(&["zuhr", "ishaa"], None));

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Dhuhr");
        assert_eq!(events[1].summary, "Isha");
        assert_eq!(events[0].start, naive("2025-08-07T13:39:00"));
    }

    #[test]
    fn untracked_timings_are_dropped() {
        let days = [DaySchedule::new(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap())
            .with_timing("fajr", naive("2025-08-07T05:04:00"))
            .with_timing("sunrise", naive("2025-08-07T06:39:00"))
            .with_timing("midnight", naive("2025-08-08T00:47:00"))];

        let events = schedule_to_events(
            &days,
            &opts(&["fajr", "dhuhr", "asr", "maghrib", "isha"], None),
        );

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Fajr");
    }

    #[test]
    fn summary_prefix_is_applied() {
        let days = [DaySchedule::new(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap())
            .with_timing("fajr", naive("2025-08-07T05:04:00"))];

        let events = schedule_to_events(&days, &opts(&["fajr"], Some("MA")));
        assert_eq!(events[0].summary, "MA - Fajr");
    }

    #[test]
    fn one_event_per_tracked_prayer_per_day() {
        let tracked = ["fajr", "zuhr", "assr", "maghrib", "ishaa"];
        let days: Vec<DaySchedule> = (7..9)
            .map(|d| {
                let mut day = DaySchedule::new(NaiveDate::from_ymd_opt(2025, 8, d).unwrap());
                for (i, name) in tracked.iter().enumerate() {
                    day = day.with_timing(
                        *name,
                        naive(&format!("2025-08-{:02}T{:02}:00:00", d, 5 + i * 3)),
                    );
                }
                day
            })
            .collect();

        let events = schedule_to_events(&days, &opts(&tracked, None));
        assert_eq!(events.len(), 10);
    }
}
