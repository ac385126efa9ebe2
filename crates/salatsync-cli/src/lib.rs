//! salatsync: replaces each region's prayer events for the current month.
//!
//! The binary wires the pieces together: environment configuration, the
//! upstream schedule providers, and the Google Calendar client. The actual
//! pipeline lives in [`sync`].

pub mod config;
pub mod error;
pub mod sync;

pub use config::{Config, RegionConfig, ScheduleSource};
pub use error::{ConfigError, SyncError, SyncResult};
