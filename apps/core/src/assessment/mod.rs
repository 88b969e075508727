//! # Assessment Module
//!
//! PHQ-9 self-assessment: questionnaire content, scoring, severity banding,
//! recommendations and the submit/retake flow.
//!
//! ## Components
//! - `questionnaire`: Static questions, options, bands and guidance
//! - `severity`: Ordered band table and lookup
//! - `engine`: Answer recording, scoring and recommendations
//! - `flow`: Per-instance `InProgress → Submitted` state machine

pub mod engine;
pub mod flow;
pub mod questionnaire;
pub mod severity;

pub use engine::{
    AnswerSet, AssessmentEngine, AssessmentResult, CrisisSupport, Recommendation,
    CRISIS_SUPPORT_THRESHOLD, IMMEDIATE_HELP_THRESHOLD, SEVERE_WORDING_THRESHOLD,
};
pub use flow::{AssessmentFlow, AssessmentState, Progress};
pub use questionnaire::{AnswerOption, Helpline, Question, Questionnaire, MAX_SCORE, QUESTION_COUNT};
pub use severity::{BandTable, ColorTag, SeverityBand, SeverityKey};
