//! Izaachen prayer-times provider (Germany).
//!
//! POST API: the request body carries the computation-method tuning the
//! deployment uses, plus coordinates and the target year. The response is a
//! whole-year calendar; records are filtered down to the requested month by
//! their embedded Gregorian date.

use std::time::Duration;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, MonthQuery, ScheduleProvider};
use crate::schedule::{DaySchedule, parse_gregorian_date, parse_local_timestamp};

/// Base URL for the Izaachen prayer-times API.
const API_URL: &str = "https://prayer-times-api.izaachen.de";

/// The prayer fields this provider reports, in canonical day order.
const PRAYER_FIELDS: [&str; 5] = ["fajr", "zuhr", "assr", "maghrib", "ishaa"];

/// Izaachen prayer-times client.
#[derive(Debug)]
pub struct IzaachenProvider {
    http_client: reqwest::Client,
}

impl IzaachenProvider {
    /// Creates a new provider with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { http_client }
    }

    async fn fetch(&self, query: MonthQuery) -> ProviderResult<Vec<DaySchedule>> {
        let body = CalendarRequest {
            taqdir_method: "new_method",
            natural_motion_alignment_interpolation: true,
            longest_day_check: true,
            latitude: query.latitude,
            longitude: query.longitude,
            gmt_diff_hours: 1,
            fajr_no_taqdir: false,
            observe_dst: true,
            dst_deviation: 1,
            year: query.year.to_string(),
        };

        let response = self
            .http_client
            .post(API_URL)
            .json(&body)
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
        for entry in calendar.calendar {
            let date = parse_gregorian_date(&entry.astro_data.gregorian_date)?;

            // Year-scoped API: keep only the requested month.
            if date.year() != query.year || date.month() != query.month {
                continue;
            }

            let mut day = DaySchedule::new(date);
            for (name, raw) in PRAYER_FIELDS.iter().zip(entry.astro_data.timings()) {
                day = day.with_timing(*name, parse_local_timestamp(raw)?);
            }
            days.push(day);
        }

        debug!("fetched {} days for {}-{:02}", days.len(), query.year, query.month);
        Ok(days)
    }
}

impl ScheduleProvider for IzaachenProvider {
    fn name(&self) -> &str {
        "izaachen"
    }

    fn fetch_month(&self, query: MonthQuery) -> BoxFuture<'_, ProviderResult<Vec<DaySchedule>>> {
        Box::pin(async move {
            self.fetch(query)
                .await
                .map_err(|e| e.with_provider("izaachen"))
        })
    }
}

/// Request body for the calendar endpoint.
#[derive(Debug, Serialize)]
struct CalendarRequest {
    taqdir_method: &'static str,
    natural_motion_alignment_interpolation: bool,
    longest_day_check: bool,
    latitude: f64,
    longitude: f64,
    gmt_diff_hours: i32,
    fajr_no_taqdir: bool,
    observe_dst: bool,
    dst_deviation: i32,
    year: String,
}

/// Response from the calendar endpoint.
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(default)]
    calendar: Vec<CalendarEntry>,
}

/// One daily record of the year calendar.
#[derive(Debug, Deserialize)]
struct CalendarEntry {
    astro_data: AstroData,
}

/// The astronomical data block carrying the day's prayer timestamps.
#[derive(Debug, Deserialize)]
struct AstroData {
    gregorian_date: String,
    fajr: String,
    zuhr: String,
    assr: String,
    maghrib: String,
    ishaa: String,
}

impl AstroData {
    /// The timestamp strings in the same order as [`PRAYER_FIELDS`].
    fn timings(&self) -> [&String; 5] {
        [&self.fajr, &self.zuhr, &self.assr, &self.maghrib, &self.ishaa]
    }
}
