//! Error types for upstream schedule providers.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Network error - connection failed, timeout, DNS resolution, etc.
    Network,
    /// The upstream API answered with a non-success HTTP status.
    UpstreamRequest,
    /// Invalid response from the upstream - parse error, unexpected format.
    InvalidResponse,
    /// The upstream returned no usable schedule data.
    EmptyResult,
    /// Configuration error - missing or invalid provider settings.
    Configuration,
}

impl ProviderErrorCode {
    /// Returns a stable machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::UpstreamRequest => "upstream_request_failed",
            Self::InvalidResponse => "invalid_response",
            Self::EmptyResult => "empty_result",
            Self::Configuration => "configuration_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching or decoding an upstream schedule.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The provider that generated this error (e.g. "izaachen", "aladhan").
    provider: Option<String>,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Network, message)
    }

    /// Creates an upstream request error (non-success HTTP status).
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::UpstreamRequest, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates an empty result error.
    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::EmptyResult, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Configuration, message)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider name, if set.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display() {
        assert_eq!(
            ProviderErrorCode::UpstreamRequest.as_str(),
            "upstream_request_failed"
        );
        assert_eq!(ProviderErrorCode::EmptyResult.as_str(), "empty_result");
    }

    #[test]
    fn provider_error_creation() {
        let err = ProviderError::upstream("status 502");
        assert_eq!(err.code(), ProviderErrorCode::UpstreamRequest);
        assert_eq!(err.message(), "status 502");
        assert!(err.provider().is_none());
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::empty_result("no days in response").with_provider("aladhan");
        let display = format!("{}", err);
        assert!(display.contains("[aladhan]"));
        assert!(display.contains("empty_result"));
        assert!(display.contains("no days in response"));
    }

    #[test]
    fn provider_error_with_source() {
        use std::error::Error;
        let parse_err = "x".parse::<i32>().unwrap_err();
        let err = ProviderError::invalid_response("bad timestamp").with_source(parse_err);
        assert!(err.source().is_some());
    }
}
