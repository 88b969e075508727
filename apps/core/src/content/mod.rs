//! # Content Module
//!
//! Read-only static content: the PHQ-9 questionnaire, the chatbot script,
//! resources, counselors, interface translations and the credential list.
//!
//! [`StaticContentProvider`] parses the JSON fixtures embedded in the binary
//! and validates them once at load, so a malformed fixture is reported as a
//! `ConfigurationGap` before any lookup runs.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

use crate::assessment::{BandTable, Questionnaire, MAX_SCORE};
use crate::auth::CredentialRecord;
use crate::booking::Counselor;
use crate::chat::ChatScript;
use crate::error::AppError;
use crate::locale::{Locale, Translations};
use crate::resources::Resource;

const PHQ9_JSON: &str = include_str!("../../data/phq9.json");
const CHATBOT_JSON: &str = include_str!("../../data/chatbot.json");
const RESOURCES_JSON: &str = include_str!("../../data/resources.json");
const COUNSELORS_JSON: &str = include_str!("../../data/counselors.json");
const TRANSLATIONS_JSON: &str = include_str!("../../data/translations.json");
const USERS_JSON: &str = include_str!("../../data/users.json");

pub trait ContentProvider: Send + Sync + 'static {
    fn questionnaire(&self) -> &Questionnaire;

    fn chat_script(&self) -> &ChatScript;

    fn resources(&self) -> &[Resource];

    fn counselors(&self) -> &[Counselor];

    fn translations(&self) -> &Translations;

    fn credentials(&self) -> &[CredentialRecord];

    /// Keyword list for `locale`, or `None` when the locale has no list of its own.
    fn crisis_keywords(&self, locale: Locale) -> Option<&[String]> {
        self.chat_script()
            .crisis_keywords
            .get_exact(locale)
            .map(Vec::as_slice)
    }

    fn greeting(&self, locale: Locale) -> &str {
        self.chat_script().greeting.get(locale)
    }

    fn crisis_response(&self, locale: Locale) -> &str {
        self.chat_script().crisis.get(locale)
    }

    fn supportive_responses(&self, locale: Locale) -> &[String] {
        self.chat_script().supportive.get(locale)
    }

    fn t(&self, locale: Locale, key: &str) -> String {
        self.translations().t(locale, key, None)
    }
}

#[derive(Deserialize)]
struct UsersFile {
    users: Vec<CredentialRecord>,
}

#[derive(Deserialize)]
struct ResourcesFile {
    resources: Vec<Resource>,
}

#[derive(Deserialize)]
struct CounselorsFile {
    counselors: Vec<Counselor>,
}

/// Content parsed from the embedded fixtures.
#[derive(Debug, Clone)]
pub struct StaticContentProvider {
    questionnaire: Questionnaire,
    chat_script: ChatScript,
    resources: Vec<Resource>,
    counselors: Vec<Counselor>,
    translations: Translations,
    credentials: Vec<CredentialRecord>,
}

impl StaticContentProvider {
    /// Parses and validates the built-in fixtures.
    pub fn load() -> Result<Self, AppError> {
        let provider = Self::from_parts(
            parse("phq9.json", PHQ9_JSON)?,
            parse("chatbot.json", CHATBOT_JSON)?,
            parse::<ResourcesFile>("resources.json", RESOURCES_JSON)?.resources,
            parse::<CounselorsFile>("counselors.json", COUNSELORS_JSON)?.counselors,
            parse("translations.json", TRANSLATIONS_JSON)?,
            parse::<UsersFile>("users.json", USERS_JSON)?.users,
        )?;

        info!(
            questions = provider.questionnaire.questions.len(),
            resources = provider.resources.len(),
            counselors = provider.counselors.len(),
            "static content loaded"
        );
        Ok(provider)
    }

    /// Assembles a provider from already-parsed content, running the same checks as [`load`](Self::load).
    pub fn from_parts(
        questionnaire: Questionnaire,
        chat_script: ChatScript,
        resources: Vec<Resource>,
        counselors: Vec<Counselor>,
        translations: Translations,
        credentials: Vec<CredentialRecord>,
    ) -> Result<Self, AppError> {
        questionnaire.validate()?;
        BandTable::new(questionnaire.bands.clone())?.validate_partition(0..=MAX_SCORE)?;
        chat_script.validate()?;

        for locale in Locale::ALL {
            let missing = translations.missing_keys(locale);
            if !missing.is_empty() {
                warn!(locale = %locale, missing = ?missing, "translation keys missing");
            }
        }

        Ok(Self {
            questionnaire,
            chat_script,
            resources,
            counselors,
            translations,
            credentials,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw)
        .map_err(|err| AppError::ConfigurationGap(format!("{} is malformed: {}", name, err)))
}

impl ContentProvider for StaticContentProvider {
    fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    fn chat_script(&self) -> &ChatScript {
        &self.chat_script
    }

    fn resources(&self) -> &[Resource] {
        &self.resources
    }

    fn counselors(&self) -> &[Counselor] {
        &self.counselors
    }

    fn translations(&self) -> &Translations {
        &self.translations
    }

    fn credentials(&self) -> &[CredentialRecord] {
        &self.credentials
    }
}
