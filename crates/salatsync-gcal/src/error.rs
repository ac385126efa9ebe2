//! Calendar client error types.

use std::io;
use thiserror::Error;

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors that can occur while talking to the calendar service.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// IO error (key file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The service-account key file could not be used.
    #[error("key error: {message}")]
    Key { message: String },

    /// Token grant was rejected.
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Network error - connection failed, timeout, etc.
    #[error("network error: {message}")]
    Network { message: String },

    /// The API answered with a non-success HTTP status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API response could not be decoded.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl CalendarError {
    /// Creates a key error.
    pub fn key(message: impl Into<String>) -> Self {
        Self::Key {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an API status error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
