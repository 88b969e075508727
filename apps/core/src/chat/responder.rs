//! Scripted reply selection.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::crisis::CrisisDetector;
use super::message::Author;
use crate::content::ContentProvider;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Crisis,
    Supportive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotReply {
    pub kind: ReplyKind,
    pub text: String,
}

impl BotReply {
    pub fn is_crisis(&self) -> bool {
        self.kind == ReplyKind::Crisis
    }

    pub fn author(&self) -> Author {
        match self.kind {
            ReplyKind::Crisis => Author::Crisis,
            ReplyKind::Supportive => Author::Bot,
        }
    }
}

/// Picks the bot reply for a user message.
///
/// Crisis messages always get the locale's fixed crisis response. Everything
/// else gets a uniformly random entry of the locale's supportive pool.
pub struct ResponseSelector {
    content: Arc<dyn ContentProvider>,
    detector: CrisisDetector,
    rng: Box<dyn RngCore + Send>,
}

impl ResponseSelector {
    pub fn new(content: Arc<dyn ContentProvider>) -> Self {
        Self::with_rng(content, Box::new(StdRng::from_entropy()))
    }

    /// Uses the given random source, e.g. a seeded `StdRng` in tests.
    pub fn with_rng(content: Arc<dyn ContentProvider>, rng: Box<dyn RngCore + Send>) -> Self {
        let detector = CrisisDetector::from_content(content.as_ref());
        Self {
            content,
            detector,
            rng,
        }
    }

    pub fn detector(&self) -> &CrisisDetector {
        &self.detector
    }

    pub fn greeting(&self, locale: Locale) -> String {
        self.content.greeting(locale).to_string()
    }

    pub fn select(&mut self, message: &str, locale: Locale) -> BotReply {
        if self.detector.detect(message, locale) {
            return BotReply {
                kind: ReplyKind::Crisis,
                text: self.content.crisis_response(locale).to_string(),
            };
        }

        BotReply {
            kind: ReplyKind::Supportive,
            text: self.supportive(locale),
        }
    }

    fn supportive(&mut self, locale: Locale) -> String {
        let pool = self.content.supportive_responses(locale);
        if pool.is_empty() {
            warn!(locale = %locale, "empty supportive pool, replying with greeting");
            return self.greeting(locale);
        }
        let index = self.rng.gen_range(0..pool.len());
        debug!(locale = %locale, index, "supportive reply selected");
        pool[index].clone()
    }
}
