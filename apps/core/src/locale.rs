//! Locales and localized content.
//!
//! Every piece of translated content is a [`Localized`] value: a map from
//! [`Locale`] to the content for that locale. Lookups use a single fallback
//! rule (requested locale, then english). A localized value without an english
//! entry cannot be constructed, so the fallback always resolves.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::AppError;

/// Active display and matching language.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Hindi,
    Tamil,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::English, Locale::Hindi, Locale::Tamil];

    /// Returns the identifier used in fixtures and storage
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "english",
            Locale::Hindi => "hindi",
            Locale::Tamil => "tamil",
        }
    }

    /// Short badge shown next to the chat header
    pub fn badge(&self) -> &'static str {
        match self {
            Locale::English => "EN",
            Locale::Hindi => "हि",
            Locale::Tamil => "த",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Locale::English),
            "hindi" | "hi" => Ok(Locale::Hindi),
            "tamil" | "ta" => Ok(Locale::Tamil),
            other => Err(AppError::InvalidInput(format!("unknown locale '{}'", other))),
        }
    }
}

/// Content keyed by locale, with a guaranteed english entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Localized<T> {
    entries: BTreeMap<Locale, T>,
}

impl<T> Localized<T> {
    /// Builds a localized value. Fails when the english entry is missing.
    pub fn from_map(entries: BTreeMap<Locale, T>) -> Result<Self, AppError> {
        if !entries.contains_key(&Locale::English) {
            return Err(AppError::ConfigurationGap(
                "localized content has no english entry".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    /// Single-locale value, english only.
    pub fn english(value: T) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(Locale::English, value);
        Self { entries }
    }

    /// Adds or replaces the entry for `locale`.
    pub fn with(mut self, locale: Locale, value: T) -> Self {
        self.entries.insert(locale, value);
        self
    }

    /// Resolves the value for `locale`, falling back to english.
    ///
    /// A fallback is a configuration gap in shipped content and is logged.
    pub fn get(&self, locale: Locale) -> &T {
        if let Some(value) = self.entries.get(&locale) {
            return value;
        }
        warn!(locale = %locale, "missing translation, falling back to english");
        &self.entries[&Locale::English]
    }

    /// Exact lookup without fallback.
    pub fn get_exact(&self, locale: Locale) -> Option<&T> {
        self.entries.get(&locale)
    }

    /// Locales that have their own entry.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.entries.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Localized<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<Locale, T>::deserialize(deserializer)?;
        Localized::from_map(entries).map_err(serde::de::Error::custom)
    }
}

/// Flat key lookup for interface strings (`nav.dashboard`, `auth.login`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    tables: BTreeMap<Locale, BTreeMap<String, String>>,
}

impl Translations {
    /// Looks a key up: requested locale, then english, then `fallback`, then the key itself.
    pub fn t(&self, locale: Locale, key: &str, fallback: Option<&str>) -> String {
        if let Some(text) = self.lookup(locale, key) {
            return text.to_string();
        }
        if locale != Locale::English {
            if let Some(text) = self.lookup(Locale::English, key) {
                warn!(locale = %locale, key, "missing translation, falling back to english");
                return text.to_string();
            }
        }
        fallback.unwrap_or(key).to_string()
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Keys present in english but absent from `locale`.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        let Some(english) = self.tables.get(&Locale::English) else {
            return Vec::new();
        };
        let target = self.tables.get(&locale);
        english
            .keys()
            .filter(|key| target.map_or(true, |table| !table.contains_key(*key)))
            .map(String::as_str)
            .collect()
    }
}
