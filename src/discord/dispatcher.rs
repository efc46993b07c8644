//! Message delivery and outcome classification.

use std::fmt;
use std::time::Duration;

use http::StatusCode;

use crate::webhook::{HttpClient, HttpRequest, HttpResponse};

use super::endpoint::WebhookEndpoint;
use super::exchange::exchange;
use super::message::{MessageError, OutboundMessage};

/// Result of one send attempt.
///
/// Produced once per call and meant to be rendered right away; it is not an
/// error type because every attempt yields exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Discord accepted the message (status 204).
    Delivered,

    /// Discord answered with any status other than 204.
    Failed {
        /// The status code returned
        status: StatusCode,
        /// The raw response body, passed through unparsed
        body: String,
    },

    /// No response was received.
    NetworkError {
        /// What went wrong; `"timeout"` when the deadline elapsed
        description: String,
    },

    /// The text was refused locally and nothing was sent.
    Rejected(MessageError),
}

impl DeliveryOutcome {
    /// Returns true only for [`DeliveryOutcome::Delivered`].
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Classifies a webhook execution response.
    ///
    /// Only 204 counts as success; 200 and other 2xx codes are failures.
    fn from_response(response: &HttpResponse) -> Self {
        if response.status == StatusCode::NO_CONTENT {
            Self::Delivered
        } else {
            Self::Failed {
                status: response.status,
                body: response.body_text_lossy(),
            }
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "Message delivered"),
            Self::Failed { status, body } if body.is_empty() => {
                write!(f, "Send failed with status {}", status.as_u16())
            }
            Self::Failed { status, body } => {
                write!(f, "Send failed with status {}: {body}", status.as_u16())
            }
            Self::NetworkError { description } => write!(f, "Send failed: {description}"),
            Self::Rejected(reason) => write!(f, "Message not sent: {reason}"),
        }
    }
}

/// Posts messages to a webhook endpoint.
///
/// One attempt per call, no retries. Recording sent messages is left to the
/// caller.
#[derive(Debug, Clone)]
pub struct MessageDispatcher<H> {
    client: H,
}

impl<H> MessageDispatcher<H> {
    /// Creates a dispatcher that sends through `client`.
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> MessageDispatcher<H> {
    /// Sends raw text, refusing it locally if it is not a valid message.
    ///
    /// Blank or over-long text yields [`DeliveryOutcome::Rejected`] without
    /// any network traffic.
    pub async fn send_text(
        &self,
        endpoint: &WebhookEndpoint,
        text: &str,
        timeout: Duration,
    ) -> DeliveryOutcome {
        match OutboundMessage::new(text) {
            Ok(message) => self.send(endpoint, &message, timeout).await,
            Err(reason) => {
                tracing::debug!("Refusing to send message: {reason}");
                DeliveryOutcome::Rejected(reason)
            }
        }
    }

    /// Posts `{"content": <message>}` to the endpoint and classifies the reply.
    pub async fn send(
        &self,
        endpoint: &WebhookEndpoint,
        message: &OutboundMessage,
        timeout: Duration,
    ) -> DeliveryOutcome {
        let url = match endpoint.to_url() {
            Ok(url) => url,
            Err(e) => {
                return DeliveryOutcome::NetworkError {
                    description: e.description(),
                };
            }
        };

        let request = Self::build_request(url, message);

        tracing::debug!(
            "Posting {} character(s) to {endpoint}",
            message.as_str().chars().count()
        );

        match exchange(&self.client, request, timeout).await {
            Ok(response) => {
                let outcome = DeliveryOutcome::from_response(&response);
                tracing::debug!("Webhook answered {}", response.status);
                outcome
            }
            Err(e) => {
                tracing::debug!("Webhook request failed: {e}");
                DeliveryOutcome::NetworkError {
                    description: e.description(),
                }
            }
        }
    }

    fn build_request(url: url::Url, message: &OutboundMessage) -> HttpRequest {
        let body = serde_json::json!({ "content": message.as_str() }).to_string();

        HttpRequest::post(url).with_json_body(body)
    }
}
