use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
    /// Bot reply to a crisis signal, rendered with the alert styling
    Crisis,
}

/// One entry of a conversation log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub locale: Locale,
}

impl ChatMessage {
    pub fn new(author: Author, text: impl Into<String>, locale: Locale) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text: text.into(),
            timestamp: Utc::now(),
            locale,
        }
    }

    pub fn is_from_user(&self) -> bool {
        self.author == Author::User
    }
}
