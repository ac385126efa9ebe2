//! Upstream prayer-time providers.
//!
//! Each region's schedule comes from a different REST API with its own
//! request shape, field names, and prayer-name vocabulary. This crate hides
//! those differences behind the [`ScheduleProvider`] trait: every provider
//! returns plain [`DaySchedule`] records which [`normalize`] then turns into
//! canonical calendar events.

pub mod aladhan;
pub mod error;
pub mod izaachen;
pub mod normalize;
pub mod provider;
pub mod schedule;

pub use aladhan::AladhanProvider;
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use izaachen::IzaachenProvider;
pub use normalize::{NormalizeOptions, schedule_to_events};
pub use provider::{BoxFuture, MonthQuery, ScheduleProvider};
pub use schedule::{DaySchedule, PrayerTime, parse_gregorian_date, parse_local_timestamp};
