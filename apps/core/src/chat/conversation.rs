//! One chat session's log and crisis-alert flag.
//!
//! Sending is split in two steps so the reply can be delivered later:
//! [`Conversation::accept_user_message`] appends the user message and decides
//! the reply, [`Conversation::deliver`] appends that reply.

use serde::Serialize;
use tracing::{debug, info};

use super::message::{Author, ChatMessage};
use super::responder::{BotReply, ResponseSelector};
use crate::error::AppError;
use crate::locale::Locale;

/// A reply that has been decided but not yet posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub reply: BotReply,
    pub locale: Locale,
}

/// Read-only view of a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub locale: Locale,
    pub messages: Vec<ChatMessage>,
    pub crisis_alert: bool,
    pub typing: bool,
}

pub struct Conversation {
    locale: Locale,
    messages: Vec<ChatMessage>,
    crisis_alert: bool,
    pending: usize,
    selector: ResponseSelector,
}

impl Conversation {
    /// Opens a conversation; its first message is the locale's greeting.
    pub fn new(selector: ResponseSelector, locale: Locale) -> Self {
        let greeting = ChatMessage::new(Author::Bot, selector.greeting(locale), locale);
        Self {
            locale,
            messages: vec![greeting],
            crisis_alert: false,
            pending: 0,
            selector,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Applies to messages sent from now on. Earlier messages keep their locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn crisis_alert_active(&self) -> bool {
        self.crisis_alert
    }

    /// True while at least one reply is waiting to be delivered.
    pub fn is_typing(&self) -> bool {
        self.pending > 0
    }

    /// Appends the user's message and decides the reply.
    ///
    /// A crisis signal raises the alert right away; it stays up until
    /// [`dismiss_crisis_alert`](Self::dismiss_crisis_alert).
    pub fn accept_user_message(&mut self, text: &str) -> Result<PendingReply, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput("chat message is empty".to_string()));
        }

        self.messages
            .push(ChatMessage::new(Author::User, text, self.locale));

        let reply = self.selector.select(text, self.locale);
        if reply.is_crisis() && !self.crisis_alert {
            info!(locale = %self.locale, "crisis alert raised");
            self.crisis_alert = true;
        }
        self.pending += 1;

        Ok(PendingReply {
            reply,
            locale: self.locale,
        })
    }

    /// Posts a previously decided reply.
    pub fn deliver(&mut self, pending: PendingReply) -> ChatMessage {
        self.pending = self.pending.saturating_sub(1);
        let message = ChatMessage::new(pending.reply.author(), pending.reply.text, pending.locale);
        debug!(author = ?message.author, "bot reply delivered");
        self.messages.push(message.clone());
        message
    }

    pub fn dismiss_crisis_alert(&mut self) {
        self.crisis_alert = false;
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            locale: self.locale,
            messages: self.messages.clone(),
            crisis_alert: self.crisis_alert,
            typing: self.is_typing(),
        }
    }
}
