//! Google Calendar integration.
//!
//! This crate covers the downstream half of the pipeline: service-account
//! authentication, paged event listing for the month window, and batched
//! insert/delete execution. The [`CalendarApi`] trait is the injected
//! capability the orchestrator and [`batch::run_in_batches`] depend on, so
//! both are testable against a fake without network access.

pub mod api;
pub mod auth;
pub mod batch;
pub mod client;
pub mod error;

pub use api::{BatchItem, BatchOutcome, BoxFuture, CalendarApi, CalendarOp, EventPage};
pub use auth::{ServiceAccountAuthenticator, ServiceAccountKey, TokenInfo};
pub use batch::{BATCH_SIZE, run_in_batches};
pub use client::GoogleCalendarClient;
pub use error::{CalendarError, CalendarResult};
