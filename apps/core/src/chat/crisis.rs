//! Keyword-based crisis detection.
//!
//! A message is a crisis signal when its lower-cased text contains any keyword
//! of the locale's list. Plain substring containment: "end it all" fires inside
//! longer sentences, and paraphrases that avoid every keyword do not fire.

use std::collections::HashMap;
use tracing::warn;

use crate::content::ContentProvider;
use crate::locale::Locale;

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: HashMap<Locale, Vec<String>>,
}

impl CrisisDetector {
    /// Builds a detector from per-locale keyword lists. Keywords are lower-cased once here.
    pub fn new(keywords: impl IntoIterator<Item = (Locale, Vec<String>)>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(locale, list)| {
                let list = list
                    .iter()
                    .map(|keyword| keyword.trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect();
                (locale, list)
            })
            .collect();
        Self { keywords }
    }

    pub fn from_content(content: &dyn ContentProvider) -> Self {
        Self::new(Locale::ALL.into_iter().filter_map(|locale| {
            content
                .crisis_keywords(locale)
                .map(|list| (locale, list.to_vec()))
        }))
    }

    /// The locale's list, or the english list when the locale's list is
    /// missing or empty. An empty list never disables detection.
    fn keywords_for(&self, locale: Locale) -> &[String] {
        match self.keywords.get(&locale) {
            Some(list) if !list.is_empty() => list,
            _ => {
                if locale != Locale::English {
                    warn!(locale = %locale, "no crisis keywords for locale, using english");
                }
                self.keywords
                    .get(&Locale::English)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
            }
        }
    }

    /// First keyword contained in `message`, if any.
    pub fn matched_keyword(&self, message: &str, locale: Locale) -> Option<&str> {
        let lowered = message.to_lowercase();
        let found = self
            .keywords_for(locale)
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(String::as_str);

        if let Some(keyword) = found {
            warn!(locale = %locale, keyword, "crisis keyword detected");
        }
        found
    }

    pub fn detect(&self, message: &str, locale: Locale) -> bool {
        self.matched_keyword(message, locale).is_some()
    }
}
