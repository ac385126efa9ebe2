//! Core types: time windows, prayer names, canonical events

pub mod event;
pub mod prayer;
pub mod time;
pub mod tracing;

pub use event::{DATE_TIME_FORMAT, PrayerEvent};
pub use prayer::{canonical_name, display_label};
pub use time::{MonthWindow, round_up_to_next_minute};
pub use tracing::{TracingConfig, TracingError, init_tracing};
