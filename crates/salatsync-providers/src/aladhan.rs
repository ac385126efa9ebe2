//! Aladhan prayer-times provider (Morocco).
//!
//! GET API: the URL path embeds year and zero-padded month, so the response
//! is already scoped to the requested month and is trusted as such. With
//! `iso8601=true` the `timings` map carries full RFC 3339 timestamps in the
//! requested timezone.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, MonthQuery, ScheduleProvider};
use crate::schedule::{DaySchedule, parse_gregorian_date, parse_local_timestamp};

/// Base URL for the Aladhan monthly-calendar API.
const API_BASE: &str = "https://api.aladhan.com/v1/calendar";

/// Calculation method code for Morocco (Ministère des Habous).
pub const METHOD_MOROCCO: u32 = 21;

/// Aladhan prayer-times client.
#[derive(Debug)]
pub struct AladhanProvider {
    http_client: reqwest::Client,
    method: u32,
}

impl AladhanProvider {
    /// Creates a new provider with the given request timeout and
    /// calculation-method code.
    pub fn new(timeout: Duration, method: u32) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            method,
        }
    }

    async fn fetch(&self, query: MonthQuery) -> ProviderResult<Vec<DaySchedule>> {
        let url = format!("{}/{}/{:02}", API_BASE, query.year, query.month);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("method", self.method.to_string()),
                ("iso8601", "true".to_string()),
                ("timezonestring", query.timezone.name().to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::upstream(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let calendar: CalendarResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        let mut days = Vec::new();
        for entry in calendar.data {
            let mut day = DaySchedule::new(parse_gregorian_date(&entry.date.gregorian.date)?);
            for (name, raw) in &entry.timings {
                day = day.with_timing(name.as_str(), parse_local_timestamp(raw)?);
            }
            days.push(day);
        }

        debug!("fetched {} days for {}-{:02}", days.len(), query.year, query.month);
        Ok(days)
    }
}

impl ScheduleProvider for AladhanProvider {
    fn name(&self) -> &str {
        "aladhan"
    }

    fn fetch_month(&self, query: MonthQuery) -> BoxFuture<'_, ProviderResult<Vec<DaySchedule>>> {
        Box::pin(async move {
            self.fetch(query)
                .await
                .map_err(|e| e.with_provider("aladhan"))
        })
    }
}

/// Response from the monthly-calendar endpoint.
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(default)]
    data: Vec<DayEntry>,
}

/// One day of the monthly calendar.
#[derive(Debug, Deserialize)]
struct DayEntry {
    timings: BTreeMap<String, String>,
    date: EntryDate,
}

#[derive(Debug, Deserialize)]
struct EntryDate {
    gregorian: GregorianDate,
}

#[derive(Debug, Deserialize)]
struct GregorianDate {
    /// Day-first date string, e.g. "07-08-2025".
    date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const RESPONSE: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": [
            {
                "timings": {
                    "Fajr": "2025-08-07T05:04:00+01:00",
                    "Sunrise": "2025-08-07T06:39:00+01:00",
                    "Dhuhr": "2025-08-07T13:38:00+01:00",
                    "Asr": "2025-08-07T17:16:00+01:00",
                    "Maghrib": "2025-08-07T20:30:00+01:00",
                    "Isha": "2025-08-07T21:53:00+01:00",
                    "Midnight": "2025-08-08T00:47:00+01:00"
                },
                "date": {
                    "readable": "07 Aug 2025",
                    "gregorian": { "date": "07-08-2025" }
                }
            }
        ]
    }"#;

    #[test]
    fn parse_calendar_response() {
        let calendar: CalendarResponse = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(calendar.data.len(), 1);
        assert_eq!(calendar.data[0].date.gregorian.date, "07-08-2025");
        assert_eq!(
            calendar.data[0].timings["Fajr"],
            "2025-08-07T05:04:00+01:00"
        );
    }

    #[test]
    fn days_keep_all_timings_with_lowercased_names() {
        // Mirror the fetch() conversion without the HTTP round trip; the
        // vocabulary filter happens later, at normalization.
        let calendar: CalendarResponse = serde_json::from_str(RESPONSE).unwrap();
        let entry = &calendar.data[0];

        let mut day = DaySchedule::new(parse_gregorian_date(&entry.date.gregorian.date).unwrap());
        for (name, raw) in &entry.timings {
            day = day.with_timing(name.as_str(), parse_local_timestamp(raw).unwrap());
        }

        assert_eq!(day.date, NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
        assert_eq!(day.timings.len(), 7);
        assert!(day.timings.iter().any(|t| t.name == "fajr"));
        assert!(day.timings.iter().any(|t| t.name == "midnight"));
    }

    #[test]
    fn empty_data_parses_to_no_days() {
        let calendar: CalendarResponse = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert!(calendar.data.is_empty());
    }
}
