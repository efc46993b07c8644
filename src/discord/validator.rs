//! Webhook URL validation: the format check and the optional reachability probe.

use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

use crate::webhook::{HttpClient, HttpRequest};

use super::endpoint::{FormatError, WebhookEndpoint, validate_format};
use super::exchange::exchange;

/// Marker returned when a probe finds the webhook alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachable;

/// Error returned by [`WebhookValidator::probe_endpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The endpoint answered with a status other than 200.
    #[error("Webhook answered with status {status}")]
    Unreachable {
        /// The status code returned by Discord
        status: StatusCode,
    },

    /// No response was received (connection, DNS, TLS failure or timeout).
    #[error("Webhook could not be reached: {0}")]
    NetworkFailure(String),
}

impl ProbeError {
    /// Returns true when trying the same URL again later may succeed.
    ///
    /// Network failures, server errors, 408 and 429 are transient. Any other
    /// status (typically 401 or 404) means the URL itself is bad.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkFailure(_) => true,
            Self::Unreachable { status } => {
                status.is_server_error()
                    || *status == StatusCode::TOO_MANY_REQUESTS
                    || *status == StatusCode::REQUEST_TIMEOUT
            }
        }
    }
}

/// Decides whether a URL is a usable Discord webhook.
///
/// Holds only the HTTP client used for probing; it keeps no state between
/// calls.
///
/// # Example
///
/// ```
/// use hooksend::discord::WebhookValidator;
///
/// let endpoint = WebhookValidator::<()>::validate_format(
///     "https://discord.com/api/webhooks/123/token",
/// );
/// assert!(endpoint.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct WebhookValidator<H> {
    client: H,
}

impl<H> WebhookValidator<H> {
    /// Creates a validator that probes through `client`.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }

    /// Checks that `url` starts with the Discord webhook prefix.
    ///
    /// Same as the free function [`validate_format`].
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the input is empty or lacks the prefix.
    pub fn validate_format(url: &str) -> Result<WebhookEndpoint, FormatError> {
        validate_format(url)
    }
}

impl<H: HttpClient> WebhookValidator<H> {
    /// Sends a `GET` to the endpoint and expects exactly 200.
    ///
    /// A 200 means the webhook object exists right now. It does not
    /// guarantee a later `POST` will be accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Unreachable`] for any other status and
    /// [`ProbeError::NetworkFailure`] when no response arrives within
    /// `timeout` or the transport fails.
    pub async fn probe_endpoint(
        &self,
        endpoint: &WebhookEndpoint,
        timeout: Duration,
    ) -> Result<Reachable, ProbeError> {
        let url = endpoint
            .to_url()
            .map_err(|e| ProbeError::NetworkFailure(e.description()))?;

        tracing::debug!("Probing webhook {endpoint}");

        let response = exchange(&self.client, HttpRequest::get(url), timeout)
            .await
            .map_err(|e| ProbeError::NetworkFailure(e.description()))?;

        tracing::debug!("Probe of {endpoint} returned {}", response.status);

        if response.status == StatusCode::OK {
            Ok(Reachable)
        } else {
            Err(ProbeError::Unreachable {
                status: response.status,
            })
        }
    }
}
