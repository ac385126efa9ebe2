//! Binary error types.

use thiserror::Error;

use salatsync_gcal::CalendarError;
use salatsync_providers::ProviderError;

/// Errors raised while building the configuration from the environment.
///
/// All of these fail fast, before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or unparseable.
    #[error("environment configuration error: {0}")]
    Env(#[from] envy::Error),

    /// A timezone name is not a known IANA identifier.
    #[error("invalid timezone {name:?}: {message}")]
    Timezone { name: String, message: String },

    /// The configured event duration is not usable.
    #[error("event duration must be positive, got {0} minutes")]
    EventDuration(i64),

    /// The configured log level is not a known level name.
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

/// Result type for the sync pipeline.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort one region's pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Fetching or decoding the upstream schedule failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A calendar call failed outside a batch item.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
