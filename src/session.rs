//! Session context tying the validator, dispatcher, settings and history together.
//!
//! A [`Session`] replaces the ambient "current webhook URL" a desktop form
//! would keep in a global: callers pass it around explicitly. Every
//! operation takes `&mut self`, so one probe or send is in flight at a time.

use std::time::Duration;

use thiserror::Error;

use crate::discord::{
    DeliveryOutcome, FormatError, MessageDispatcher, ProbeError, WebhookEndpoint,
    WebhookValidator, validate_format,
};
use crate::history::MessageHistory;
use crate::settings::{LoadResult, SettingsStore};
use crate::webhook::HttpClient;

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

/// Where the session stands in the verify/send cycle.
///
/// `Sending` is not represented: a send borrows the session mutably, so no
/// other operation can observe it mid-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No webhook has been accepted yet.
    Unverified,
    /// A webhook endpoint is held and messages can be sent.
    Verified,
}

/// Error returned when a URL is not accepted.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The URL is not a Discord webhook URL.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The probe did not get a 200 back.
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Error returned by [`Session::send`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// No webhook endpoint has been verified yet.
    #[error("No webhook URL has been verified")]
    NotVerified,
}

/// State held for the lifetime of one user session.
#[derive(Debug)]
pub struct Session<H, S> {
    validator: WebhookValidator<H>,
    dispatcher: MessageDispatcher<H>,
    store: S,
    timeout: Duration,
    endpoint: Option<WebhookEndpoint>,
    history: MessageHistory,
}

impl<H: Clone, S> Session<H, S> {
    /// Creates a session whose validator and dispatcher share `client`.
    #[must_use]
    pub fn with_client(client: H, store: S, timeout: Duration) -> Self {
        Self::new(
            WebhookValidator::new(client.clone()),
            MessageDispatcher::new(client),
            store,
            timeout,
        )
    }
}

impl<H, S> Session<H, S> {
    /// Creates an unverified session with an empty history.
    #[must_use]
    pub const fn new(
        validator: WebhookValidator<H>,
        dispatcher: MessageDispatcher<H>,
        store: S,
        timeout: Duration,
    ) -> Self {
        Self {
            validator,
            dispatcher,
            store,
            timeout,
            endpoint: None,
            history: MessageHistory::new(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.endpoint.is_some() {
            SessionState::Verified
        } else {
            SessionState::Unverified
        }
    }

    /// Returns the verified endpoint, if any.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&WebhookEndpoint> {
        self.endpoint.as_ref()
    }

    /// Returns the messages delivered so far.
    #[must_use]
    pub const fn history(&self) -> &MessageHistory {
        &self.history
    }

    /// Returns the timeout applied to every network call.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient, S: SettingsStore> Session<H, S> {
    /// Adopts the webhook URL saved by an earlier run, if it is well formed.
    ///
    /// The stored URL is not probed again; it passed a probe before it was
    /// saved. Unreadable or malformed values are logged and ignored.
    pub fn restore(&mut self) -> Option<&WebhookEndpoint> {
        let url = match self.store.load() {
            LoadResult::Loaded(url) => url,
            LoadResult::NotFound => {
                tracing::debug!("No saved webhook URL");
                return None;
            }
            LoadResult::Corrupted { reason } => {
                tracing::warn!("Saved settings unreadable ({reason}), ignoring them");
                return None;
            }
        };

        match validate_format(&url) {
            Ok(endpoint) => {
                tracing::info!("Using saved webhook {endpoint}");
                Some(&*self.endpoint.insert(endpoint))
            }
            Err(e) => {
                tracing::warn!("Ignoring saved webhook URL: {e}");
                None
            }
        }
    }

    /// Validates `url`, optionally probes it, and makes it the session's endpoint.
    ///
    /// On success the URL is saved through the settings store; a failed save
    /// is logged but does not undo the verification. On failure the previous
    /// endpoint, if any, stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Format`] when the URL is malformed and
    /// [`VerifyError::Probe`] when probing is requested and fails.
    pub async fn verify(&mut self, url: &str, probe: bool) -> Result<&WebhookEndpoint, VerifyError> {
        let endpoint = validate_format(url)?;

        if probe {
            self.validator
                .probe_endpoint(&endpoint, self.timeout)
                .await?;
        }

        if let Err(e) = self.store.save(endpoint.as_str()).await {
            tracing::warn!("Could not save webhook URL: {e}");
        }

        tracing::info!("Webhook {endpoint} verified");
        Ok(&*self.endpoint.insert(endpoint))
    }

    /// Sends `text` to the verified endpoint.
    ///
    /// Delivered messages are appended to the history; nothing else is.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotVerified`] when no endpoint is held. Send
    /// failures are reported through the returned [`DeliveryOutcome`].
    pub async fn send(&mut self, text: &str) -> Result<DeliveryOutcome, SessionError> {
        let endpoint = self.endpoint.as_ref().ok_or(SessionError::NotVerified)?;

        let outcome = self.dispatcher.send_text(endpoint, text, self.timeout).await;

        if outcome.is_delivered() {
            self.history.record(text);
        }

        Ok(outcome)
    }
}
