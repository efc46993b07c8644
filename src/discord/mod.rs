//! Discord webhook semantics on top of the generic [`crate::webhook`] transport.
//!
//! Two components, independent of each other:
//! - [`WebhookValidator`] checks that a URL is a Discord webhook endpoint and,
//!   optionally, that the endpoint currently answers a `GET` with 200.
//! - [`MessageDispatcher`] posts `{"content": ...}` to a validated endpoint
//!   and classifies the result into a [`DeliveryOutcome`].
//!
//! Every network call is bounded by a caller-supplied timeout. No retries are
//! performed anywhere in this module.

mod dispatcher;
mod endpoint;
mod exchange;
mod message;
mod validator;

#[cfg(test)]
mod dispatcher_tests;
#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
mod validator_tests;

pub use dispatcher::{DeliveryOutcome, MessageDispatcher};
pub use endpoint::{FormatError, WEBHOOK_PREFIX, WebhookEndpoint, validate_format};
pub use message::{MAX_MESSAGE_CHARS, MessageError, OutboundMessage};
pub use validator::{ProbeError, Reachable, WebhookValidator};
