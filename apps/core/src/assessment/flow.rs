//! Per-instance assessment state machine.
//!
//! `InProgress → Submitted(result)` on a complete submit; `Submitted → InProgress`
//! only through [`AssessmentFlow::retake`], which discards the answers.

use std::sync::Arc;
use tracing::{info, warn};

use super::engine::{AnswerSet, AssessmentEngine, AssessmentResult};
use crate::error::AppError;
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentState {
    InProgress,
    Submitted(AssessmentResult),
}

/// Progress bar data shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    /// Running score of the answers given so far
    pub current_score: u32,
}

impl Progress {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.answered * 100) / self.total) as u8
    }
}

pub struct AssessmentFlow {
    engine: Arc<AssessmentEngine>,
    locale: Locale,
    answers: AnswerSet,
    state: AssessmentState,
}

impl AssessmentFlow {
    /// Starts a fresh assessment with an empty answer set.
    pub fn start(engine: Arc<AssessmentEngine>, locale: Locale) -> Self {
        Self {
            engine,
            locale,
            answers: AnswerSet::new(),
            state: AssessmentState::InProgress,
        }
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.state {
            AssessmentState::Submitted(result) => Some(result),
            AssessmentState::InProgress => None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switching language keeps the answers; a submitted result is re-rendered.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        if let AssessmentState::Submitted(result) = &mut self.state {
            result.recommendation =
                self.engine
                    .recommendation_for(&result.band, result.score, locale);
        }
    }

    pub fn record_answer(&mut self, question_id: u8, value: u8) -> Result<(), AppError> {
        if matches!(self.state, AssessmentState::Submitted(_)) {
            return Err(AppError::AssessmentClosed);
        }
        self.engine
            .record_answer(&mut self.answers, question_id, value)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answers.len(),
            total: self.engine.question_count(),
            current_score: self.engine.compute_score(&self.answers),
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, AssessmentState::InProgress) && self.engine.is_complete(&self.answers)
    }

    /// Scores the answers and moves to `Submitted`. An incomplete set leaves the state untouched.
    pub fn submit(&mut self) -> Result<&AssessmentResult, AppError> {
        if matches!(self.state, AssessmentState::Submitted(_)) {
            return Err(AppError::AssessmentClosed);
        }

        let result = self.engine.evaluate(&self.answers, self.locale)?;
        info!(
            score = result.score,
            band = %result.band.key,
            "assessment submitted"
        );
        if result.recommendation.crisis_support.is_some() {
            warn!(score = result.score, "assessment score warrants crisis support");
        }

        self.state = AssessmentState::Submitted(result);
        match &self.state {
            AssessmentState::Submitted(result) => Ok(result),
            AssessmentState::InProgress => Err(AppError::AssessmentClosed),
        }
    }

    /// Discards the answers and returns to `InProgress`.
    pub fn retake(&mut self) {
        self.answers.clear();
        self.state = AssessmentState::InProgress;
    }
}
