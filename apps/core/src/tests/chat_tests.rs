//! Chat Module Tests
//!
//! Crisis detection against the shipped keyword lists, reply selection
//! (including a statistical uniformity check) and the conversation actor.

use crate::chat::{
    Author, Conversation, ConversationHandle, CrisisDetector, ReplyKind, ResponseSelector,
};
use crate::content::{ContentProvider, StaticContentProvider};
use crate::error::AppError;
use crate::locale::Locale;
use crate::scheduler::{ImmediateScheduler, TokioScheduler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

// ============================================================================
// Test Fixtures
// ============================================================================

fn content() -> Arc<dyn ContentProvider> {
    Arc::new(StaticContentProvider::load().expect("builtin content"))
}

fn seeded_selector(content: &Arc<dyn ContentProvider>, seed: u64) -> ResponseSelector {
    ResponseSelector::with_rng(Arc::clone(content), Box::new(StdRng::seed_from_u64(seed)))
}

fn immediate_handle(seed: u64) -> ConversationHandle {
    let content = content();
    ConversationHandle::with_selector(
        seeded_selector(&content, seed),
        Arc::new(ImmediateScheduler),
        Duration::ZERO,
        Locale::English,
    )
}

#[cfg(test)]
mod crisis_detection_tests {
    use super::*;

    #[test]
    fn test_shipped_english_keywords() {
        let detector = CrisisDetector::from_content(content().as_ref());
        let crisis = [
            "I want to end it all",
            "I've been feeling SUICIDAL lately",
            "sometimes I think everyone is better off dead without me",
            "I keep wanting to hurt myself",
        ];
        for message in crisis {
            assert!(detector.detect(message, Locale::English), "missed '{}'", message);
        }

        let calm = [
            "My exams are stressing me out",
            "I can't sleep before presentations",
            "",
        ];
        for message in calm {
            assert!(!detector.detect(message, Locale::English), "flagged '{}'", message);
        }
    }

    #[test]
    fn test_shipped_hindi_and_tamil_keywords() {
        let detector = CrisisDetector::from_content(content().as_ref());
        assert!(detector.detect("मुझे आत्महत्या के विचार आते हैं", Locale::Hindi));
        assert!(detector.detect("எனக்கு தற்கொலை எண்ணங்கள் வருகின்றன", Locale::Tamil));
        assert!(!detector.detect("मैं ठीक हूँ", Locale::Hindi));
    }

    #[test]
    fn test_detection_equals_lowercase_containment() {
        let content = content();
        let detector = CrisisDetector::from_content(content.as_ref());
        let keywords = content.crisis_keywords(Locale::English).unwrap();

        for keyword in keywords {
            let shouted = format!("well... {} ...", keyword.to_uppercase());
            assert!(detector.detect(&shouted, Locale::English));
            assert_eq!(
                detector.matched_keyword(&shouted, Locale::English),
                keywords
                    .iter()
                    .find(|k| shouted.to_lowercase().contains(k.to_lowercase().as_str()))
                    .map(String::as_str)
            );
        }
    }
}

#[cfg(test)]
mod response_selection_tests {
    use super::*;

    #[test]
    fn test_end_it_all_gets_crisis_reply_and_alert() {
        let content = content();
        let mut conversation = Conversation::new(seeded_selector(&content, 5), Locale::English);

        let pending = conversation
            .accept_user_message("I want to end it all")
            .unwrap();
        assert!(conversation.crisis_alert_active());
        assert_eq!(pending.reply.kind, ReplyKind::Crisis);
        assert_eq!(pending.reply.text, content.crisis_response(Locale::English));

        let posted = conversation.deliver(pending);
        assert_eq!(posted.author, Author::Crisis);
        assert!(conversation.crisis_alert_active());
    }

    #[test]
    fn test_non_crisis_reply_comes_from_locale_pool() {
        let content = content();
        for locale in Locale::ALL {
            let mut selector = seeded_selector(&content, 17);
            let pool = content.supportive_responses(locale);
            for _ in 0..50 {
                let reply = selector.select("I feel a bit lonely this week", locale);
                assert_eq!(reply.kind, ReplyKind::Supportive);
                assert!(pool.contains(&reply.text), "{} not in {} pool", reply.text, locale);
            }
        }
    }

    #[test]
    fn test_supportive_selection_is_uniform() {
        let content = content();
        let mut selector = seeded_selector(&content, 42);
        let pool = content.supportive_responses(Locale::English);
        let draws = 10_000;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..draws {
            let reply = selector.select("just checking in", Locale::English);
            *counts.entry(reply.text).or_default() += 1;
        }

        assert_eq!(counts.len(), pool.len());
        let expected = draws / pool.len();
        for (text, count) in &counts {
            assert!(
                count.abs_diff(expected) <= 300,
                "'{}' drawn {} times, expected about {}",
                text,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_greeting_opens_every_conversation() {
        let content = content();
        for locale in Locale::ALL {
            let conversation = Conversation::new(seeded_selector(&content, 1), locale);
            let first = &conversation.messages()[0];
            assert_eq!(first.text, content.greeting(locale));
            assert_eq!(first.author, Author::Bot);
        }
    }
}

#[cfg(test)]
mod conversation_actor_tests {
    use super::*;

    #[tokio::test]
    async fn test_crisis_message_through_actor() {
        let handle = immediate_handle(9);
        let reply = handle.send_message("I want to end it all").await.unwrap();
        assert_eq!(reply.author, Author::Crisis);

        let snapshot = handle.snapshot().await.unwrap();
        assert!(snapshot.crisis_alert);

        handle.dismiss_crisis_alert().await.unwrap();
        assert!(!handle.snapshot().await.unwrap().crisis_alert);
    }

    #[tokio::test]
    async fn test_back_to_back_messages_both_answered() {
        let handle = immediate_handle(21);
        let other = handle.clone();

        let (first, second) = tokio::join!(
            handle.send_message("first thing"),
            other.send_message("second thing")
        );
        assert!(first.is_ok());
        assert!(second.is_ok());

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.messages.len(), 5);
        let users = snapshot.messages.iter().filter(|m| m.is_from_user()).count();
        assert_eq!(users, 2);
        assert!(!snapshot.typing);
    }

    #[tokio::test]
    async fn test_typing_while_reply_is_delayed() {
        let content = content();
        let handle = ConversationHandle::with_selector(
            seeded_selector(&content, 3),
            Arc::new(TokioScheduler),
            Duration::from_millis(500),
            Locale::English,
        );

        let sender = handle.clone();
        let pending = tokio::spawn(async move { sender.send_message("hello there").await });

        sleep(Duration::from_millis(50)).await;
        let snapshot = handle.snapshot().await.unwrap();
        assert!(snapshot.typing);
        assert_eq!(snapshot.messages.len(), 2);

        let reply = pending.await.unwrap().unwrap();
        assert_eq!(reply.author, Author::Bot);
        assert!(!handle.snapshot().await.unwrap().typing);
    }

    #[tokio::test]
    async fn test_locale_switch_applies_to_next_reply() {
        let content = content();
        let handle = immediate_handle(8);
        handle.set_locale(Locale::Hindi).await.unwrap();

        let reply = handle.send_message("bahut tension hai").await.unwrap();
        assert_eq!(reply.locale, Locale::Hindi);
        assert!(content.supportive_responses(Locale::Hindi).contains(&reply.text));
    }

    #[tokio::test]
    async fn test_whitespace_message_is_invalid() {
        let handle = immediate_handle(2);
        assert!(matches!(
            handle.send_message("\n\t ").await,
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(handle.snapshot().await.unwrap().messages.len(), 1);
    }
}
