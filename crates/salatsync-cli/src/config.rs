//! Environment-sourced configuration.
//!
//! The region set is fixed per deployment: Germany synced from Izaachen,
//! Morocco from Aladhan. Everything that varies between deployments comes
//! from the environment (a `.env` file is honored) and is validated once,
//! before any network call.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Duration;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::Level;

use crate::error::ConfigError;

/// Izaachen's prayer vocabulary, in day order.
const GERMANY_PRAYERS: &[&str] = &["fajr", "zuhr", "assr", "maghrib", "ishaa"];

/// The Aladhan timings to keep; everything else (sunrise, midnight, ...) is
/// dropped at normalization.
const MOROCCO_PRAYERS: &[&str] = &["fajr", "dhuhr", "asr", "maghrib", "isha"];

/// Which upstream API serves a region's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    /// POST API used for the Germany deployment.
    Izaachen,
    /// GET API used for the Morocco deployment.
    Aladhan,
}

/// One geographic deployment target.
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Short region tag, used in batch ids and logs.
    pub name: &'static str,
    /// Latitude of the location prayer times are computed for.
    pub latitude: f64,
    /// Longitude of the location.
    pub longitude: f64,
    /// Target Google calendar.
    pub calendar_id: String,
    /// IANA timezone of the region.
    pub timezone: Tz,
    /// Prefix for event summaries (e.g. "MA" -> "MA - Fajr").
    pub summary_prefix: Option<&'static str>,
    /// The provider's prayer labels to turn into events, lowercase.
    pub tracked_prayers: &'static [&'static str],
    /// Upstream API for this region.
    pub source: ScheduleSource,
}

/// The full startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Regions to sync, in processing order.
    pub regions: Vec<RegionConfig>,
    /// Fixed duration of every created event.
    pub event_duration: Duration,
    /// Whether an empty upstream schedule aborts the region's run.
    pub require_schedule: bool,
    /// Path to the service-account key file.
    pub service_account_file: PathBuf,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: Level,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or any value is
    /// invalid; nothing has touched the network at that point.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_raw(envy::from_env()?)
    }

    fn from_raw(raw: RawEnv) -> Result<Self, ConfigError> {
        if raw.event_duration_minutes <= 0 {
            return Err(ConfigError::EventDuration(raw.event_duration_minutes));
        }
        let log_level = Level::from_str(&raw.log_level)
            .map_err(|_| ConfigError::LogLevel(raw.log_level.clone()))?;

        let regions = vec![
            RegionConfig {
                name: "de",
                latitude: raw.latitude,
                longitude: raw.longitude,
                calendar_id: raw.calendar_id,
                timezone: parse_timezone(&raw.timezone)?,
                summary_prefix: None,
                tracked_prayers: GERMANY_PRAYERS,
                source: ScheduleSource::Izaachen,
            },
            RegionConfig {
                name: "ma",
                latitude: raw.latitude_morocco,
                longitude: raw.longitude_morocco,
                calendar_id: raw.calendar_id_morocco,
                timezone: parse_timezone(&raw.timezone_morocco)?,
                summary_prefix: Some("MA"),
                tracked_prayers: MOROCCO_PRAYERS,
                source: ScheduleSource::Aladhan,
            },
        ];

        Ok(Self {
            regions,
            event_duration: Duration::minutes(raw.event_duration_minutes),
            require_schedule: raw.require_schedule,
            service_account_file: raw.service_account_file,
            log_level,
        })
    }
}

fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    Tz::from_str(name).map_err(|message| ConfigError::Timezone {
        name: name.to_string(),
        message,
    })
}

/// The raw environment variables, as envy sees them.
#[derive(Debug, Deserialize)]
struct RawEnv {
    latitude: f64,
    longitude: f64,
    calendar_id: String,
    timezone: String,

    latitude_morocco: f64,
    longitude_morocco: f64,
    calendar_id_morocco: String,
    timezone_morocco: String,

    #[serde(default = "default_event_duration")]
    event_duration_minutes: i64,
    #[serde(default)]
    require_schedule: bool,
    #[serde(default = "default_service_account_file")]
    service_account_file: PathBuf,
    #[serde(default = "default_log_level")]
    log_level: String,
}

fn default_event_duration() -> i64 {
    15
}

fn default_service_account_file() -> PathBuf {
    PathBuf::from("service-account.json")
}

fn default_log_level() -> String {
    "error".to_string()
}
