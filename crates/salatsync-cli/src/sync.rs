//! The month-replace pipeline.
//!
//! One generic pass per region: compute the current month window, collect
//! and batch-delete every existing event in it, then fetch the upstream
//! schedule, normalize it into events, and batch-insert those. Deletion and
//! insertion are two independent batch submissions; nothing is
//! transactional.

use std::time::Duration;

use tracing::{error, info};

use salatsync_core::MonthWindow;
use salatsync_gcal::{CalendarApi, CalendarOp, run_in_batches};
use salatsync_providers::{
    AladhanProvider, IzaachenProvider, MonthQuery, NormalizeOptions, ProviderError,
    ScheduleProvider, aladhan::METHOD_MOROCCO, schedule_to_events,
};

use crate::config::{Config, RegionConfig, ScheduleSource};
use crate::error::SyncResult;

/// Request timeout for every outbound HTTP call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// What one region's run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Events found in the month window and submitted for deletion.
    pub deleted: usize,
    /// Events built from the upstream schedule and submitted for insertion.
    pub created: usize,
}

/// Per-run tunables shared by all regions.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// Fixed duration of every created event.
    pub event_duration: chrono::Duration,
    /// Whether an empty upstream schedule aborts the region's run.
    pub require_schedule: bool,
}

impl From<&Config> for SyncOptions {
    fn from(config: &Config) -> Self {
        Self {
            event_duration: config.event_duration,
            require_schedule: config.require_schedule,
        }
    }
}

/// Builds the upstream provider a region is configured for.
pub fn provider_for(region: &RegionConfig) -> Box<dyn ScheduleProvider> {
    match region.source {
        ScheduleSource::Izaachen => Box::new(IzaachenProvider::new(HTTP_TIMEOUT)),
        ScheduleSource::Aladhan => Box::new(AladhanProvider::new(HTTP_TIMEOUT, METHOD_MOROCCO)),
    }
}

/// Syncs every configured region, isolating failures per region.
///
/// Returns the number of regions that failed; per-item batch failures are
/// only logged and do not count.
pub async fn run_all(api: &dyn CalendarApi, config: &Config) -> usize {
    run_all_with(api, config, provider_for).await
}

/// [`run_all`] with an injectable provider factory (used by tests).
pub async fn run_all_with<F>(api: &dyn CalendarApi, config: &Config, provider_for: F) -> usize
where
    F: Fn(&RegionConfig) -> Box<dyn ScheduleProvider>,
{
    let opts = SyncOptions::from(config);
    let mut failed = 0;

    for region in &config.regions {
        let provider = provider_for(region);
        match replace_month_events(api, provider.as_ref(), region, &opts).await {
            Ok(outcome) => info!(
                "region {}: {} events deleted, {} created",
                region.name, outcome.deleted, outcome.created
            ),
            Err(e) => {
                error!("region {} failed: {}", region.name, e);
                failed += 1;
            }
        }
    }

    failed
}

/// Replaces one region's events for the current month.
pub async fn replace_month_events(
    api: &dyn CalendarApi,
    provider: &dyn ScheduleProvider,
    region: &RegionConfig,
    opts: &SyncOptions,
) -> SyncResult<SyncOutcome> {
    let window = MonthWindow::current(region.timezone);

    let deletes = collect_deletes(api, region, &window).await?;
    let deleted = deletes.len();
    run_in_batches(api, deletes, &delete_tag(&region.calendar_id)).await?;

    let query = MonthQuery {
        year: window.year(),
        month: window.month(),
        latitude: region.latitude,
        longitude: region.longitude,
        timezone: region.timezone,
    };
    let days = provider.fetch_month(query).await?;
    if days.is_empty() && opts.require_schedule {
        return Err(ProviderError::empty_result(format!(
            "no schedule days for {}-{:02}",
            window.year(),
            window.month()
        ))
        .with_provider(provider.name())
        .into());
    }

    let events = schedule_to_events(
        &days,
        &NormalizeOptions {
            tracked: region.tracked_prayers.iter().map(|s| s.to_string()).collect(),
            summary_prefix: region.summary_prefix.map(String::from),
            timezone: region.timezone,
            event_duration: opts.event_duration,
        },
    );
    let created = events.len();

    let inserts = events
        .into_iter()
        .map(|event| CalendarOp::Insert {
            calendar_id: region.calendar_id.clone(),
            event,
        })
        .collect();
    run_in_batches(api, inserts, &format!("create-events-{}", region.name)).await?;

    Ok(SyncOutcome { deleted, created })
}

/// Pages through the month window and collects one delete per event.
async fn collect_deletes(
    api: &dyn CalendarApi,
    region: &RegionConfig,
    window: &MonthWindow,
) -> SyncResult<Vec<CalendarOp>> {
    let mut deletes = Vec::new();
    let mut page_token = None;

    loop {
        let page = api
            .list_events_page(&region.calendar_id, window, page_token)
            .await?;

        deletes.extend(page.event_ids.into_iter().map(|event_id| {
            CalendarOp::Delete {
                calendar_id: region.calendar_id.clone(),
                event_id,
            }
        }));

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(deletes)
}

fn delete_tag(calendar_id: &str) -> String {
    let prefix: String = calendar_id.chars().take(10).collect();
    format!("delete-{}-events", prefix)
}
