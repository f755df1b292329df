//! Append-only conversation transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PlaceResult;

/// One transcript entry: a user query or an assistant response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEntry {
    User {
        text: String,
        at: DateTime<Utc>,
    },
    Assistant {
        text: String,
        results: Vec<PlaceResult>,
        at: DateTime<Utc>,
    },
}

impl ConversationEntry {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            ConversationEntry::User { text, .. } | ConversationEntry::Assistant { text, .. } => {
                text
            }
        }
    }
}

/// Ordered transcript; entries are only ever appended, never reordered or
/// removed.
#[derive(Debug, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: String) {
        self.entries.push(ConversationEntry::User {
            text,
            at: Utc::now(),
        });
    }

    pub fn push_assistant(&mut self, text: String, results: Vec<PlaceResult>) {
        self.entries.push(ConversationEntry::Assistant {
            text,
            results,
            at: Utc::now(),
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_appended_in_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("cafe".to_string());
        conversation.push_assistant("Found 0 places near you".to_string(), Vec::new());
        conversation.push_user("hotel".to_string());

        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.entries()[0].text(), "cafe");
        assert_eq!(conversation.entries()[2].text(), "hotel");
        assert!(matches!(
            conversation.entries()[1],
            ConversationEntry::Assistant { .. }
        ));
    }

    #[test]
    fn test_new_conversation_is_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
    }
}
