//! Static PHQ-9 questionnaire content: questions, answer options, bands,
//! per-band guidance and the crisis helpline.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::severity::{SeverityBand, SeverityKey};
use crate::error::AppError;
use crate::locale::Localized;

/// Number of PHQ-9 items.
pub const QUESTION_COUNT: usize = 9;

/// Highest possible total score.
pub const MAX_SCORE: u32 = 27;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u8,
    pub prompt: Localized<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: Localized<String>,
}

/// Guidance shown for a severity band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationTemplate {
    pub headline: Localized<String>,
    pub steps: Localized<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Helpline {
    pub number: String,
    pub title: Localized<String>,
    pub message: Localized<String>,
}

/// The whole `phq9.json` fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
    pub options: Vec<AnswerOption>,
    pub bands: Vec<SeverityBand>,
    pub recommendations: HashMap<SeverityKey, RecommendationTemplate>,
    pub helpline: Helpline,
}

impl Questionnaire {
    /// Structural checks that do not depend on band coverage.
    pub fn validate(&self) -> Result<(), AppError> {
        let ids: BTreeSet<u8> = self.questions.iter().map(|q| q.id).collect();
        let expected: BTreeSet<u8> = (1..=QUESTION_COUNT as u8).collect();
        if ids != expected || self.questions.len() != QUESTION_COUNT {
            return Err(AppError::ConfigurationGap(format!(
                "questionnaire ids must be 1..={} with no repeats, found {:?}",
                QUESTION_COUNT, ids
            )));
        }

        let values: Vec<u8> = self.options.iter().map(|o| o.value).collect();
        if values != [0, 1, 2, 3] {
            return Err(AppError::ConfigurationGap(format!(
                "answer options must be 0..=3 in order, found {:?}",
                values
            )));
        }

        for key in [
            SeverityKey::Minimal,
            SeverityKey::Mild,
            SeverityKey::Moderate,
            SeverityKey::ModeratelySevere,
            SeverityKey::Severe,
        ] {
            if !self.recommendations.contains_key(&key) {
                return Err(AppError::ConfigurationGap(format!(
                    "no recommendation configured for {}",
                    key
                )));
            }
        }

        if self.helpline.number.trim().is_empty() {
            return Err(AppError::ConfigurationGap(
                "crisis helpline number is empty".to_string(),
            ));
        }

        Ok(())
    }
}
