//! Batched execution of calendar operations.
//!
//! The calendar provider caps batch calls at 50 operations, so pending
//! mutations are chunked into fixed-size groups and submitted one group per
//! call. A failed item is logged with its request id and never stops the
//! rest of its group or later groups.

use tracing::{debug, error};

use crate::api::{BatchItem, CalendarApi, CalendarOp};
use crate::error::CalendarResult;

/// Maximum operations per batch call (provider limit).
pub const BATCH_SIZE: usize = 50;

/// Submits `ops` in groups of [`BATCH_SIZE`], preserving order.
///
/// Request ids are `{tag}-{group}-{position}`, both 1-based, and exist only
/// to attribute per-item failures in the logs.
///
/// # Errors
///
/// Only a transport-level failure of a whole batch call is an error;
/// per-item failures are logged and swallowed.
pub async fn run_in_batches(
    api: &dyn CalendarApi,
    ops: Vec<CalendarOp>,
    tag: &str,
) -> CalendarResult<()> {
    let total = ops.len();
    if total == 0 {
        return Ok(());
    }
    debug!("submitting {} operations tagged {:?}", total, tag);

    for (group_index, group) in ops.chunks(BATCH_SIZE).enumerate() {
        let items: Vec<BatchItem> = group
            .iter()
            .enumerate()
            .map(|(item_index, op)| BatchItem {
                request_id: format!("{}-{}-{}", tag, group_index + 1, item_index + 1),
                op: op.clone(),
            })
            .collect();

        for outcome in api.execute_batch(&items).await? {
            if !outcome.is_success() {
                error!(
                    "request '{}' failed ({}): {}",
                    outcome.request_id,
                    outcome.status,
                    outcome.error.as_deref().unwrap_or("no error body")
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use salatsync_core::MonthWindow;

    use crate::api::{BatchOutcome, BoxFuture, EventPage};
    use crate::error::CalendarError;

    /// Records every batch call and fails the items it is told to fail.
    struct RecordingApi {
        batches: Mutex<Vec<Vec<BatchItem>>>,
        failing_ids: Vec<String>,
    }

    impl RecordingApi {
        fn new(failing_ids: &[&str]) -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                failing_ids: failing_ids.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn recorded(&self) -> Vec<Vec<BatchItem>> {
            self.batches.lock().unwrap().clone()
        }
    }

    impl CalendarApi for RecordingApi {
        fn list_events_page<'a>(
            &'a self,
            _calendar_id: &'a str,
            _window: &'a MonthWindow,
            _page_token: Option<String>,
        ) -> BoxFuture<'a, CalendarResult<EventPage>> {
            Box::pin(async { Ok(EventPage::default()) })
        }

        fn execute_batch<'a>(
            &'a self,
            items: &'a [BatchItem],
        ) -> BoxFuture<'a, CalendarResult<Vec<BatchOutcome>>> {
            self.batches.lock().unwrap().push(items.to_vec());
            let outcomes = items
                .iter()
                .map(|item| {
                    if self.failing_ids.contains(&item.request_id) {
                        BatchOutcome {
                            request_id: item.request_id.clone(),
                            status: 404,
                            error: Some("Not Found".to_string()),
                        }
                    } else {
                        BatchOutcome {
                            request_id: item.request_id.clone(),
                            status: 200,
                            error: None,
                        }
                    }
                })
                .collect();
            Box::pin(async move { Ok(outcomes) })
        }
    }

    fn delete_ops(n: usize) -> Vec<CalendarOp> {
        (0..n)
            .map(|i| CalendarOp::Delete {
                calendar_id: "cal".to_string(),
                event_id: format!("event{}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn partitions_into_ceil_n_over_50_groups() {
        let api = RecordingApi::new(&[]);
        run_in_batches(&api, delete_ops(120), "delete-cal-event").await.unwrap();

        let batches = api.recorded();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 50);
        assert_eq!(batches[1].len(), 50);
        assert_eq!(batches[2].len(), 20);
    }

    #[tokio::test]
    async fn preserves_order_and_id_format() {
        let api = RecordingApi::new(&[]);
        run_in_batches(&api, delete_ops(60), "tag").await.unwrap();

        let batches = api.recorded();
        assert_eq!(batches[0][0].request_id, "tag-1-1");
        assert_eq!(batches[0][49].request_id, "tag-1-50");
        assert_eq!(batches[1][0].request_id, "tag-2-1");

        // Original order survives the chunking.
        let flattened: Vec<&CalendarOp> =
            batches.iter().flatten().map(|item| &item.op).collect();
        let expected = delete_ops(60);
        assert!(flattened.iter().zip(&expected).all(|(a, b)| **a == *b));
    }

    #[tokio::test]
    async fn failing_item_does_not_stop_siblings_or_later_groups() {
        let api = RecordingApi::new(&["tag-1-3"]);
        run_in_batches(&api, delete_ops(55), "tag").await.unwrap();

        // All 55 operations were still submitted, across both groups.
        let batches = api.recorded();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches.iter().map(Vec::len).sum::<usize>(), 55);
    }

    #[tokio::test]
    async fn no_operations_means_no_calls() {
        let api = RecordingApi::new(&[]);
        run_in_batches(&api, Vec::new(), "tag").await.unwrap();
        assert!(api.recorded().is_empty());
    }

    /// An API whose transport always fails.
    struct BrokenApi;

    impl CalendarApi for BrokenApi {
        fn list_events_page<'a>(
            &'a self,
            _calendar_id: &'a str,
            _window: &'a MonthWindow,
            _page_token: Option<String>,
        ) -> BoxFuture<'a, CalendarResult<EventPage>> {
            Box::pin(async { Err(CalendarError::network("down")) })
        }

        fn execute_batch<'a>(
            &'a self,
            _items: &'a [BatchItem],
        ) -> BoxFuture<'a, CalendarResult<Vec<BatchOutcome>>> {
            Box::pin(async { Err(CalendarError::network("down")) })
        }
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let err = run_in_batches(&BrokenApi, delete_ops(1), "tag").await.unwrap_err();
        assert!(matches!(err, CalendarError::Network { .. }));
    }
}
