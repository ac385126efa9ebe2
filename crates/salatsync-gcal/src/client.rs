//! Google Calendar API client.
//!
//! Low-level HTTP client for the Calendar API v3: paged event listing for a
//! month window, and batch execution of insert/delete operations over the
//! `multipart/mixed` batch endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use salatsync_core::{MonthWindow, PrayerEvent};

use crate::api::{BatchItem, BatchOutcome, BoxFuture, CalendarApi, CalendarOp, EventPage};
use crate::error::{CalendarError, CalendarResult};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// The batch endpoint; one call executes a group of operations.
const BATCH_URL: &str = "https://www.googleapis.com/batch/calendar/v3";

/// Multipart boundary for batch request bodies.
const BATCH_BOUNDARY: &str = "batch_salatsync";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new client with the given access token and request timeout.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    async fn list_page(
        &self,
        calendar_id: &str,
        window: &MonthWindow,
        page_token: Option<String>,
    ) -> CalendarResult<EventPage> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", window.start.to_rfc3339()),
                ("timeMax", window.end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("showDeleted", "false".to_string()),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CalendarError::network("request timeout")
            } else if e.is_connect() {
                CalendarError::network(format!("connection failed: {}", e))
            } else {
                CalendarError::network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CalendarError::auth("access token expired or invalid"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::api(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        let list: EventListResponse = serde_json::from_str(&body)
            .map_err(|e| CalendarError::invalid_response(format!("failed to parse response: {}", e)))?;

        let event_ids = list.items.into_iter().filter_map(|e| e.id).collect();
        Ok(EventPage {
            event_ids,
            next_page_token: list.next_page_token,
        })
    }

    async fn submit_batch(&self, items: &[BatchItem]) -> CalendarResult<Vec<BatchOutcome>> {
        let body = encode_batch_body(items);
        debug!("submitting batch of {} operations", items.len());

        let response = self
            .http_client
            .post(BATCH_URL)
            .bearer_auth(&self.access_token)
            .header(
                "Content-Type",
                format!("multipart/mixed; boundary={}", BATCH_BOUNDARY),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| CalendarError::network(format!("batch request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CalendarError::auth("access token expired or invalid"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::api(status.as_u16(), body));
        }

        let boundary = response
            .headers()
            .get("Content-Type")
            .and_then(|v| v.to_str().ok())
            .and_then(boundary_param)
            .ok_or_else(|| {
                CalendarError::invalid_response("batch response is not multipart/mixed")
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        parse_batch_response(&boundary, &body, items)
    }
}

impl CalendarApi for GoogleCalendarClient {
    fn list_events_page<'a>(
        &'a self,
        calendar_id: &'a str,
        window: &'a MonthWindow,
        page_token: Option<String>,
    ) -> BoxFuture<'a, CalendarResult<EventPage>> {
        Box::pin(async move { self.list_page(calendar_id, window, page_token).await })
    }

    fn execute_batch<'a>(
        &'a self,
        items: &'a [BatchItem],
    ) -> BoxFuture<'a, CalendarResult<Vec<BatchOutcome>>> {
        Box::pin(async move { self.submit_batch(items).await })
    }
}

/// Encodes a group of operations as a `multipart/mixed` batch body.
///
/// Each part is an `application/http` envelope whose `Content-ID` carries
/// the item's request id; the response parts echo it back prefixed with
/// `response-`.
fn encode_batch_body(items: &[BatchItem]) -> String {
    let mut body = String::new();

    for item in items {
        body.push_str(&format!("--{}\r\n", BATCH_BOUNDARY));
        body.push_str("Content-Type: application/http\r\n");
        body.push_str(&format!("Content-ID: <{}>\r\n\r\n", item.request_id));

        match &item.op {
            CalendarOp::Insert { calendar_id, event } => {
                let payload = serde_json::to_string(&EventResource::from(event))
                    .expect("event serializes");
                body.push_str(&format!(
                    "POST /calendar/v3/calendars/{}/events HTTP/1.1\r\n",
                    urlencoding::encode(calendar_id)
                ));
                body.push_str("Content-Type: application/json; charset=UTF-8\r\n\r\n");
                body.push_str(&payload);
                body.push_str("\r\n");
            }
            CalendarOp::Delete {
                calendar_id,
                event_id,
            } => {
                body.push_str(&format!(
                    "DELETE /calendar/v3/calendars/{}/events/{} HTTP/1.1\r\n\r\n",
                    urlencoding::encode(calendar_id),
                    urlencoding::encode(event_id)
                ));
            }
        }
    }

    body.push_str(&format!("--{}--\r\n", BATCH_BOUNDARY));
    body
}

/// Extracts the `boundary` parameter from a Content-Type header value.
fn boundary_param(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("boundary=")
            .map(|b| b.trim_matches('"').to_string())
    })
}

/// Parses a `multipart/mixed` batch response into per-item outcomes.
///
/// Items whose response part carries no usable `Content-ID` are matched by
/// position instead.
fn parse_batch_response(
    boundary: &str,
    body: &str,
    items: &[BatchItem],
) -> CalendarResult<Vec<BatchOutcome>> {
    let delimiter = format!("--{}", boundary);
    let mut outcomes = Vec::new();

    for (index, part) in body
        .split(delimiter.as_str())
        .skip(1)
        .filter(|p| !p.trim().is_empty() && p.trim() != "--")
        .enumerate()
    {
        let request_id = part
            .lines()
            .find_map(|line| {
                let rest = line.strip_prefix("Content-ID:")?.trim();
                Some(
                    rest.trim_matches(['<', '>'])
                        .trim_start_matches("response-")
                        .to_string(),
                )
            })
            .or_else(|| items.get(index).map(|i| i.request_id.clone()))
            .unwrap_or_else(|| format!("unknown-{}", index + 1));

        let status = part
            .lines()
            .find_map(|line| {
                let rest = line.strip_prefix("HTTP/")?;
                rest.split_whitespace().nth(1)?.parse::<u16>().ok()
            })
            .ok_or_else(|| {
                CalendarError::invalid_response("batch response part has no status line")
            })?;

        let error = if (200..300).contains(&status) {
            None
        } else {
            // Everything after the inner header block is the error payload.
            Some(
                part.split_once("\r\n\r\n")
                    .and_then(|(_, rest)| rest.split_once("\r\n\r\n"))
                    .map(|(_, payload)| payload.trim().to_string())
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            )
        };

        outcomes.push(BatchOutcome {
            request_id,
            status,
            error,
        });
    }

    if outcomes.is_empty() && !items.is_empty() {
        return Err(CalendarError::invalid_response(
            "batch response contained no parts",
        ));
    }

    Ok(outcomes)
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventListResponse {
    #[serde(default)]
    items: Vec<ApiEvent>,
    next_page_token: Option<String>,
}

/// A single event from the listing; only the id is needed for deletion.
#[derive(Debug, Deserialize)]
struct ApiEvent {
    id: Option<String>,
}

/// Wire payload for event insertion.
#[derive(Debug, Serialize, Deserialize)]
struct EventResource {
    summary: String,
    start: EventDateTime,
    end: EventDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    date_time: String,
    time_zone: String,
}

impl From<&PrayerEvent> for EventResource {
    fn from(event: &PrayerEvent) -> Self {
        Self {
            summary: event.summary.clone(),
            start: EventDateTime {
                date_time: event.start_string(),
                time_zone: event.timezone.name().to_string(),
            },
            end: EventDateTime {
                date_time: event.end_string(),
                time_zone: event.timezone.name().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, NaiveDateTime};

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn insert_item(id: &str) -> BatchItem {
        BatchItem {
            request_id: id.to_string(),
            op: CalendarOp::Insert {
                calendar_id: "cal@group.calendar.google.com".to_string(),
                event: PrayerEvent::build(
                    "Fajr",
                    naive("2025-08-07T05:07:33"),
                    chrono_tz::Europe::Berlin,
                    ChronoDuration::minutes(15),
                ),
            },
        }
    }

    fn delete_item(id: &str, event_id: &str) -> BatchItem {
        BatchItem {
            request_id: id.to_string(),
            op: CalendarOp::Delete {
                calendar_id: "cal@group.calendar.google.com".to_string(),
                event_id: event_id.to_string(),
            },
        }
    }

    #[test]
    fn parse_event_list_response() {
        let json = r#"{
            "items": [
                { "id": "event1", "summary": "Fajr" },
                { "id": "event2" }
            ],
            "nextPageToken": "token-abc"
        }"#;

        let response: EventListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.next_page_token, Some("token-abc".to_string()));
    }

    #[test]
    fn event_resource_carries_rounded_local_times() {
        let item = insert_item("create-events-de-1-1");
        let CalendarOp::Insert { ref event, .. } = item.op else {
            unreachable!()
        };

        let resource = EventResource::from(event);
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["summary"], "Fajr");
        assert_eq!(json["start"]["dateTime"], "2025-08-07T05:08:00");
        assert_eq!(json["start"]["timeZone"], "Europe/Berlin");
        assert_eq!(json["end"]["dateTime"], "2025-08-07T05:23:00");
    }

    #[test]
    fn batch_body_contains_one_part_per_item() {
        let items = [
            delete_item("delete-cal@group.-1-1", "event1"),
            insert_item("create-events-de-1-1"),
        ];

        let body = encode_batch_body(&items);

        assert_eq!(body.matches("Content-Type: application/http").count(), 2);
        assert!(body.contains("Content-ID: <delete-cal@group.-1-1>"));
        assert!(body.contains("DELETE /calendar/v3/calendars/cal%40group.calendar.google.com/events/event1 HTTP/1.1"));
        assert!(body.contains("POST /calendar/v3/calendars/cal%40group.calendar.google.com/events HTTP/1.1"));
        assert!(body.ends_with(&format!("--{}--\r\n", BATCH_BOUNDARY)));
    }

    #[test]
    fn boundary_param_extraction() {
        assert_eq!(
            boundary_param("multipart/mixed; boundary=batch_abc123"),
            Some("batch_abc123".to_string())
        );
        assert_eq!(
            boundary_param("multipart/mixed; boundary=\"quoted\""),
            Some("quoted".to_string())
        );
        assert_eq!(boundary_param("application/json"), None);
    }

    #[test]
    fn parse_batch_response_mixed_outcomes() {
        let items = [
            delete_item("tag-1-1", "event1"),
            delete_item("tag-1-2", "event2"),
        ];
        let body = "--batch_xyz\r\n\
            Content-Type: application/http\r\n\
            Content-ID: <response-tag-1-1>\r\n\
            \r\n\
            HTTP/1.1 204 No Content\r\n\
            \r\n\
            \r\n\
            --batch_xyz\r\n\
            Content-Type: application/http\r\n\
            Content-ID: <response-tag-1-2>\r\n\
            \r\n\
            HTTP/1.1 404 Not Found\r\n\
            Content-Type: application/json\r\n\
            \r\n\
            {\"error\": {\"code\": 404}}\r\n\
            --batch_xyz--\r\n";

        let outcomes = parse_batch_response("batch_xyz", body, &items).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].request_id, "tag-1-1");
        assert_eq!(outcomes[0].status, 204);
        assert!(outcomes[0].is_success());
        assert_eq!(outcomes[1].request_id, "tag-1-2");
        assert_eq!(outcomes[1].status, 404);
        assert!(outcomes[1].error.as_deref().unwrap().contains("404"));
    }

    #[test]
    fn parse_batch_response_without_content_ids_matches_by_position() {
        let items = [delete_item("tag-1-1", "event1")];
        let body = "--b\r\n\
            Content-Type: application/http\r\n\
            \r\n\
            HTTP/1.1 200 OK\r\n\
            \r\n\
            {}\r\n\
            --b--\r\n";

        let outcomes = parse_batch_response("b", body, &items).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].request_id, "tag-1-1");
    }

    #[test]
    fn empty_batch_response_is_invalid() {
        let items = [delete_item("tag-1-1", "event1")];
        let err = parse_batch_response("b", "", &items).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidResponse { .. }));
    }
}
