//! The webhook endpoint value object and its format check.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::webhook::HttpError;

/// Every Discord incoming webhook URL starts with this prefix.
pub const WEBHOOK_PREFIX: &str = "https://discord.com/api/webhooks/";

/// Error returned when a string is not a Discord webhook URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input was empty.
    #[error("Webhook URL is empty")]
    Empty,

    /// The input does not start with [`WEBHOOK_PREFIX`].
    ///
    /// Only the scheme and host of the input are kept, since the path may
    /// carry a webhook token.
    #[error("Not a Discord webhook URL ({origin}), expected it to start with {WEBHOOK_PREFIX}")]
    MissingPrefix {
        /// `scheme://host[:port]` of the rejected input, or `unrecognized input`
        origin: String,
    },
}

/// A syntactically valid Discord webhook URL.
///
/// Holds the exact string it was built from; no trimming or
/// re-serialization happens. The only way to obtain one is through
/// [`validate_format`] (or the equivalent `FromStr`/`TryFrom` impls),
/// so every value satisfies the prefix invariant.
///
/// The URL embeds the webhook token, so `Debug` and `Display` print the
/// [`redacted`](Self::redacted) form. Use [`as_str`](Self::as_str) for the
/// real value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WebhookEndpoint {
    url: String,
}

impl WebhookEndpoint {
    /// Returns the full URL, token included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Consumes the endpoint and returns the full URL.
    #[must_use]
    pub fn into_string(self) -> String {
        self.url
    }

    /// Returns the URL with everything after the webhook id masked.
    ///
    /// `https://discord.com/api/webhooks/123/secret` becomes
    /// `https://discord.com/api/webhooks/123/***`.
    #[must_use]
    pub fn redacted(&self) -> String {
        let rest = &self.url[WEBHOOK_PREFIX.len()..];
        match rest.split_once('/') {
            Some((id, token)) if !token.is_empty() => format!("{WEBHOOK_PREFIX}{id}/***"),
            _ => self.url.clone(),
        }
    }

    /// Parses the endpoint into a [`url::Url`] for the transport layer.
    pub(crate) fn to_url(&self) -> Result<url::Url, HttpError> {
        url::Url::parse(&self.url).map_err(|e| HttpError::InvalidUrl(e.to_string()))
    }
}

impl fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WebhookEndpoint")
            .field(&self.redacted())
            .finish()
    }
}

impl fmt::Display for WebhookEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl FromStr for WebhookEndpoint {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_format(s)
    }
}

impl TryFrom<String> for WebhookEndpoint {
    type Error = FormatError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        if url.is_empty() {
            return Err(FormatError::Empty);
        }
        if !url.starts_with(WEBHOOK_PREFIX) {
            return Err(FormatError::MissingPrefix {
                origin: origin_of(&url),
            });
        }
        Ok(Self { url })
    }
}

fn origin_of(input: &str) -> String {
    match url::Url::parse(input).map(|url| url.origin()) {
        Ok(origin @ url::Origin::Tuple(..)) => origin.ascii_serialization(),
        _ => "unrecognized input".to_string(),
    }
}

/// Checks that `url` is a Discord webhook URL and wraps it.
///
/// Pure: no I/O, and the same input always yields the same result.
///
/// # Errors
///
/// Returns [`FormatError::Empty`] for an empty string and
/// [`FormatError::MissingPrefix`] when the input does not start with
/// [`WEBHOOK_PREFIX`].
pub fn validate_format(url: &str) -> Result<WebhookEndpoint, FormatError> {
    WebhookEndpoint::try_from(url.to_string())
}
