//! The outbound message value object.

use thiserror::Error;

/// Discord rejects message content longer than this many characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Error returned when message text cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// The text is empty or whitespace only.
    #[error("Message is empty")]
    Empty,

    /// The text exceeds [`MAX_MESSAGE_CHARS`].
    #[error("Message is {length} characters long, the limit is {max}")]
    TooLong {
        /// Length of the rejected text in characters
        length: usize,
        /// The limit that was exceeded
        max: usize,
    },
}

/// Message text that satisfies Discord's content rules.
///
/// Length is counted in Unicode scalar values, not bytes, so a 2000-character
/// message of multi-byte text is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    content: String,
}

impl OutboundMessage {
    /// Wraps `text` after checking it is non-blank and within the limit.
    ///
    /// The text is stored unchanged; surrounding whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Empty`] for blank text and
    /// [`MessageError::TooLong`] when it exceeds [`MAX_MESSAGE_CHARS`].
    pub fn new(text: impl Into<String>) -> Result<Self, MessageError> {
        let content = text.into();

        if content.trim().is_empty() {
            return Err(MessageError::Empty);
        }

        let length = content.chars().count();
        if length > MAX_MESSAGE_CHARS {
            return Err(MessageError::TooLong {
                length,
                max: MAX_MESSAGE_CHARS,
            });
        }

        Ok(Self { content })
    }

    /// Returns the message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Consumes the message and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.content
    }
}
