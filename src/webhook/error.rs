//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level. A response with any
/// status code, including 4xx and 5xx, is not an `HttpError`.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, refused or reset
    /// connections and TLS handshake errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Short human-readable description suitable for surfacing to a user.
    ///
    /// Timeouts render as the bare word `timeout`; connection errors include
    /// the innermost cause so DNS and TLS failures stay distinguishable.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Timeout => "timeout".to_string(),
            Self::Connection(source) => {
                let mut cause: &dyn std::error::Error = source.as_ref();
                while let Some(next) = cause.source() {
                    cause = next;
                }
                format!("connection error: {cause}")
            }
            Self::InvalidUrl(reason) => format!("invalid URL: {reason}"),
        }
    }
}
