//! ScheduleProvider trait definition.
//!
//! [`ScheduleProvider`] is the seam between the sync pipeline and the
//! region-specific upstream APIs: the orchestrator asks for one month of
//! day schedules and never sees request shapes or wire formats.

use std::future::Future;
use std::pin::Pin;

use chrono_tz::Tz;

use crate::error::ProviderResult;
use crate::schedule::DaySchedule;

/// A boxed future for async trait methods, keeping the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The month of prayer times to fetch, plus the caller's location context.
#[derive(Debug, Clone)]
pub struct MonthQuery {
    /// Target year.
    pub year: i32,
    /// Target month (1-12).
    pub month: u32,
    /// Latitude of the deployment location.
    pub latitude: f64,
    /// Longitude of the deployment location.
    pub longitude: f64,
    /// IANA timezone the returned wall-clock times should be expressed in.
    pub timezone: Tz,
}

/// An upstream source of monthly prayer-time schedules.
///
/// Implementations issue one HTTP request per fetch, surface non-success
/// statuses as errors immediately (no retries), and return per-day records
/// scoped to the requested month.
pub trait ScheduleProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "izaachen", "aladhan").
    fn name(&self) -> &str;

    /// Fetches the schedule for the queried month.
    ///
    /// An empty result is not an error at this layer; the caller decides
    /// whether it aborts the run.
    fn fetch_month(&self, query: MonthQuery) -> BoxFuture<'_, ProviderResult<Vec<DaySchedule>>>;
}
