//! PHQ-9 scoring engine.
//!
//! Turns an [`AnswerSet`] into a score, the score into a [`SeverityBand`], and
//! the band into localized guidance. All operations are pure apart from
//! [`AssessmentEngine::record_answer`], which upserts into the caller's set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::questionnaire::{
    Helpline, Questionnaire, RecommendationTemplate, MAX_SCORE,
};
use super::severity::{BandTable, SeverityBand, SeverityKey};
use crate::content::ContentProvider;
use crate::error::AppError;
use crate::locale::Locale;

/// From this score on, results carry the crisis helpline.
pub const CRISIS_SUPPORT_THRESHOLD: u32 = 15;

/// From this score on, guidance uses the "severe" wording.
pub const SEVERE_WORDING_THRESHOLD: u32 = 20;

/// From this score on, the results view offers "Get Immediate Help".
pub const IMMEDIATE_HELP_THRESHOLD: u32 = 10;

/// Question id → selected option value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<u8, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: u8) -> Option<u8> {
        self.answers.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }

    /// Sum of all recorded values.
    pub fn score(&self) -> u32 {
        self.answers.values().map(|v| u32::from(*v)).sum()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    fn upsert(&mut self, question_id: u8, value: u8) {
        self.answers.insert(question_id, value);
    }
}

/// Crisis affordance attached to high-scoring results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrisisSupport {
    pub title: String,
    pub message: String,
    pub helpline: String,
}

/// Localized guidance for a scored assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Band whose wording was used
    pub wording: SeverityKey,
    pub headline: String,
    pub steps: Vec<String>,
    pub crisis_support: Option<CrisisSupport>,
    pub immediate_help: bool,
}

/// Score, band and guidance of a submitted assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub score: u32,
    pub max_score: u32,
    pub band: SeverityBand,
    pub recommendation: Recommendation,
}

pub struct AssessmentEngine {
    question_ids: BTreeSet<u8>,
    option_values: BTreeSet<u8>,
    bands: BandTable,
    recommendations: HashMap<SeverityKey, RecommendationTemplate>,
    helpline: Helpline,
}

impl AssessmentEngine {
    /// Builds an engine from validated questionnaire content.
    pub fn new(questionnaire: &Questionnaire) -> Result<Self, AppError> {
        questionnaire.validate()?;
        Ok(Self::with_bands(
            questionnaire,
            BandTable::new(questionnaire.bands.clone())?,
        ))
    }

    /// Builds an engine with an explicit band table. Coverage of 0..=27 is not checked.
    pub fn with_bands(questionnaire: &Questionnaire, bands: BandTable) -> Self {
        Self {
            question_ids: questionnaire.questions.iter().map(|q| q.id).collect(),
            option_values: questionnaire.options.iter().map(|o| o.value).collect(),
            bands,
            recommendations: questionnaire.recommendations.clone(),
            helpline: questionnaire.helpline.clone(),
        }
    }

    pub fn from_content(content: &dyn ContentProvider) -> Result<Self, AppError> {
        Self::new(content.questionnaire())
    }

    pub fn question_count(&self) -> usize {
        self.question_ids.len()
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Records (or overwrites) the answer to one question.
    pub fn record_answer(
        &self,
        answers: &mut AnswerSet,
        question_id: u8,
        value: u8,
    ) -> Result<(), AppError> {
        if !self.question_ids.contains(&question_id) {
            return Err(AppError::InvalidInput(format!(
                "unknown question id {}",
                question_id
            )));
        }
        if !self.option_values.contains(&value) {
            return Err(AppError::InvalidInput(format!(
                "answer value {} is outside 0..=3",
                value
            )));
        }
        answers.upsert(question_id, value);
        Ok(())
    }

    pub fn compute_score(&self, answers: &AnswerSet) -> u32 {
        answers.score()
    }

    /// True iff every fixed question id has an answer.
    pub fn is_complete(&self, answers: &AnswerSet) -> bool {
        self.question_ids
            .iter()
            .all(|id| answers.get(*id).is_some())
    }

    pub fn classify_severity(&self, score: u32) -> &SeverityBand {
        self.bands.classify(score)
    }

    /// Guidance for `band` at `score`.
    ///
    /// The wording follows the score for the top two bands so that "severe" and
    /// "moderately severe" are always told apart.
    pub fn recommendation_for(
        &self,
        band: &SeverityBand,
        score: u32,
        locale: Locale,
    ) -> Recommendation {
        let wording = if score >= SEVERE_WORDING_THRESHOLD {
            SeverityKey::Severe
        } else if score >= CRISIS_SUPPORT_THRESHOLD {
            SeverityKey::ModeratelySevere
        } else {
            band.key
        };

        let (headline, steps) = match self
            .recommendations
            .get(&wording)
            .or_else(|| self.recommendations.get(&SeverityKey::Minimal))
        {
            Some(template) => (
                template.headline.get(locale).clone(),
                template.steps.get(locale).clone(),
            ),
            None => (String::new(), Vec::new()),
        };

        let crisis_support = (score >= CRISIS_SUPPORT_THRESHOLD).then(|| CrisisSupport {
            title: self.helpline.title.get(locale).clone(),
            message: self.helpline.message.get(locale).clone(),
            helpline: self.helpline.number.clone(),
        });

        Recommendation {
            wording,
            headline,
            steps,
            crisis_support,
            immediate_help: score >= IMMEDIATE_HELP_THRESHOLD,
        }
    }

    /// Scores a complete answer set.
    pub fn evaluate(
        &self,
        answers: &AnswerSet,
        locale: Locale,
    ) -> Result<AssessmentResult, AppError> {
        if !self.is_complete(answers) {
            return Err(AppError::IncompleteAssessment {
                answered: answers.len(),
                required: self.question_count(),
            });
        }

        let score = self.compute_score(answers);
        let band = self.classify_severity(score).clone();
        let recommendation = self.recommendation_for(&band, score, locale);

        Ok(AssessmentResult {
            score,
            max_score: MAX_SCORE,
            band,
            recommendation,
        })
    }
}
