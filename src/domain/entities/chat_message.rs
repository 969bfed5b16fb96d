//! Chat message entity.

use chrono::{DateTime, Utc};

/// A locally-echoed chat message. The chat panel has no transport; sent
/// messages only append to the in-memory list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    author: String,
    content: String,
    sent_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(author: impl Into<String>, content: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            sent_at,
        }
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Whether the message body mentions the given username.
    #[must_use]
    pub fn mentions(&self, username: &str) -> bool {
        self.content.contains(&format!("@{username}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions() {
        let message = ChatMessage::new("me", "hey @vanshika look", DateTime::<Utc>::UNIX_EPOCH);
        assert!(message.mentions("vanshika"));
        assert!(!message.mentions("other"));
    }
}
