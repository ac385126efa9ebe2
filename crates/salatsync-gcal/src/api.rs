//! CalendarApi trait definition.
//!
//! The calendar handle is an injected capability: the orchestrator and the
//! batch executor only ever see this trait, so they run against a fake in
//! tests and against [`crate::GoogleCalendarClient`] in production.

use std::future::Future;
use std::pin::Pin;

use salatsync_core::{MonthWindow, PrayerEvent};

use crate::error::CalendarResult;

/// A boxed future for async trait methods, keeping the trait object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A pending calendar mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarOp {
    /// Create one event on the given calendar.
    Insert {
        calendar_id: String,
        event: PrayerEvent,
    },
    /// Delete one event from the given calendar.
    Delete {
        calendar_id: String,
        event_id: String,
    },
}

/// One operation tagged with its batch request id.
///
/// The id (`{tag}-{group}-{position}`) exists for error attribution only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Request id, unique within the batch call.
    pub request_id: String,
    /// The operation to execute.
    pub op: CalendarOp,
}

/// Per-item outcome of a batch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The request id the outcome belongs to.
    pub request_id: String,
    /// HTTP status of the individual operation.
    pub status: u16,
    /// Error payload for failed operations.
    pub error: Option<String>,
}

impl BatchOutcome {
    /// Returns true if the operation succeeded.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One page of an event listing.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    /// Ids of the events on this page.
    pub event_ids: Vec<String>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// The calendar service seam.
pub trait CalendarApi: Send + Sync {
    /// Fetches one page of events within the month window.
    ///
    /// The listing expands recurring events into single instances and
    /// excludes soft-deleted items.
    fn list_events_page<'a>(
        &'a self,
        calendar_id: &'a str,
        window: &'a MonthWindow,
        page_token: Option<String>,
    ) -> BoxFuture<'a, CalendarResult<EventPage>>;

    /// Executes one group of operations as a single batch call.
    ///
    /// Returns one outcome per item; individual failures are reported in
    /// the outcomes, not as an `Err`.
    fn execute_batch<'a>(
        &'a self,
        items: &'a [BatchItem],
    ) -> BoxFuture<'a, CalendarResult<Vec<BatchOutcome>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_success_is_2xx() {
        let ok = BatchOutcome {
            request_id: "tag-1-1".to_string(),
            status: 204,
            error: None,
        };
        let gone = BatchOutcome {
            request_id: "tag-1-2".to_string(),
            status: 404,
            error: Some("Not Found".to_string()),
        };

        assert!(ok.is_success());
        assert!(!gone.is_success());
    }
}
