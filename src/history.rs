//! In-memory record of the messages sent during a session.

/// Messages delivered during this session, oldest first.
///
/// Append-only and unbounded; only display is limited, through
/// [`recent`](Self::recent). Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHistory {
    entries: Vec<String>,
}

impl MessageHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a sent message.
    pub fn record(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    /// Returns the last `n` entries, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Iterates over every entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been sent yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
