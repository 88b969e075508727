//! Assessment Module Tests
//!
//! Scoring and banding properties over the whole score range, the fixed
//! scenarios from the PHQ-9 screening guide, and the submit/retake flow.

use crate::assessment::{
    AnswerSet, AssessmentEngine, AssessmentFlow, AssessmentState, BandTable, ColorTag,
    SeverityBand, SeverityKey, MAX_SCORE,
};
use crate::content::{ContentProvider, StaticContentProvider};
use crate::error::AppError;
use crate::locale::{Locale, Localized};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

fn engine() -> AssessmentEngine {
    let content = StaticContentProvider::load().expect("builtin content");
    AssessmentEngine::from_content(&content).expect("engine")
}

fn answers(engine: &AssessmentEngine, values: &[(u8, u8)]) -> AnswerSet {
    let mut set = AnswerSet::new();
    for (id, value) in values {
        engine.record_answer(&mut set, *id, *value).unwrap();
    }
    set
}

fn uniform(engine: &AssessmentEngine, value: u8) -> AnswerSet {
    let values: Vec<(u8, u8)> = (1..=9).map(|id| (id, value)).collect();
    answers(engine, &values)
}

fn band(key: SeverityKey, low: u32, high: u32) -> SeverityBand {
    SeverityBand {
        key,
        range: [low, high],
        label: Localized::english(key.label().to_string()),
        color: ColorTag::Green,
    }
}

#[cfg(test)]
mod scoring_property_tests {
    use super::*;

    #[test]
    fn test_every_score_matches_exactly_one_band() {
        let engine = engine();
        for score in 0..=MAX_SCORE {
            let matching = engine
                .bands()
                .bands()
                .iter()
                .filter(|band| band.contains(score))
                .count();
            assert_eq!(matching, 1, "score {} matched {} bands", score, matching);
        }
        assert!(engine.bands().validate_partition(0..=MAX_SCORE).is_ok());
    }

    #[test]
    fn test_classification_is_monotonic() {
        let engine = engine();
        for score in 0..MAX_SCORE {
            let here = engine.classify_severity(score).key;
            let next = engine.classify_severity(score + 1).key;
            assert!(here <= next, "{} at {} but {} at {}", here, score, next, score + 1);
        }
    }

    #[test]
    fn test_band_boundaries() {
        let engine = engine();
        let expected = [
            (0, SeverityKey::Minimal),
            (4, SeverityKey::Minimal),
            (5, SeverityKey::Mild),
            (9, SeverityKey::Mild),
            (10, SeverityKey::Moderate),
            (14, SeverityKey::Moderate),
            (15, SeverityKey::ModeratelySevere),
            (19, SeverityKey::ModeratelySevere),
            (20, SeverityKey::Severe),
            (27, SeverityKey::Severe),
        ];
        for (score, key) in expected {
            assert_eq!(engine.classify_severity(score).key, key, "score {}", score);
        }
    }

    #[test]
    fn test_random_complete_sets_score_their_sum() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..500 {
            let mut ids: Vec<u8> = (1..=9).collect();
            ids.shuffle(&mut rng);

            let mut set = AnswerSet::new();
            let mut expected = 0u32;
            for (position, id) in ids.iter().enumerate() {
                assert!(!engine.is_complete(&set), "complete after {} answers", position);
                let value = rng.gen_range(0..=3u8);
                expected += u32::from(value);
                engine.record_answer(&mut set, *id, value).unwrap();
            }

            assert!(engine.is_complete(&set));
            let score = engine.compute_score(&set);
            assert_eq!(score, expected);
            assert!(score <= MAX_SCORE);
        }
    }

    #[test]
    fn test_rerecording_keeps_latest_value() {
        let engine = engine();
        let mut set = AnswerSet::new();
        engine.record_answer(&mut set, 4, 3).unwrap();
        engine.record_answer(&mut set, 4, 1).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(4), Some(1));
        assert_eq!(engine.compute_score(&set), 1);
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn test_all_threes_is_severe_with_helpline() {
        let engine = engine();
        let result = engine.evaluate(&uniform(&engine, 3), Locale::English).unwrap();

        assert_eq!(result.score, 27);
        assert_eq!(result.max_score, 27);
        assert_eq!(result.band.key, SeverityKey::Severe);

        let rec = &result.recommendation;
        assert_eq!(rec.wording, SeverityKey::Severe);
        assert!(rec.headline.contains("severe"));
        assert!(!rec.headline.contains("moderately severe"));
        let support = rec.crisis_support.as_ref().expect("crisis support");
        assert_eq!(support.helpline, "022-2754-6669");
        assert!(rec.immediate_help);
    }

    #[test]
    fn test_all_zeros_is_minimal_without_crisis_affordance() {
        let engine = engine();
        let result = engine.evaluate(&uniform(&engine, 0), Locale::English).unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.band.key, SeverityKey::Minimal);
        assert!(result.recommendation.crisis_support.is_none());
        assert!(!result.recommendation.immediate_help);
    }

    #[test]
    fn test_mixed_answers_score_seven_is_mild() {
        let engine = engine();
        let set = answers(
            &engine,
            &[
                (1, 2),
                (2, 2),
                (3, 1),
                (4, 2),
                (5, 0),
                (6, 0),
                (7, 0),
                (8, 0),
                (9, 0),
            ],
        );
        let result = engine.evaluate(&set, Locale::English).unwrap();

        assert_eq!(result.score, 7);
        assert_eq!(result.band.key, SeverityKey::Mild);
        assert_eq!(result.band.color, ColorTag::Yellow);
    }

    #[test]
    fn test_recommendation_is_localized() {
        let engine = engine();
        let set = uniform(&engine, 3);
        let english = engine.evaluate(&set, Locale::English).unwrap();
        let hindi = engine.evaluate(&set, Locale::Hindi).unwrap();

        assert_ne!(english.recommendation.headline, hindi.recommendation.headline);
        assert_eq!(
            english.recommendation.crisis_support.unwrap().helpline,
            hindi.recommendation.crisis_support.unwrap().helpline
        );
    }
}

#[cfg(test)]
mod malformed_table_tests {
    use super::*;

    fn gapped_table() -> BandTable {
        BandTable::new(vec![
            band(SeverityKey::Minimal, 0, 4),
            band(SeverityKey::Mild, 5, 9),
            band(SeverityKey::Severe, 20, 27),
        ])
        .unwrap()
    }

    #[test]
    fn test_gap_falls_back_to_minimal() {
        let table = gapped_table();
        assert!(table.lookup(12).is_none());
        assert_eq!(table.classify(12).key, SeverityKey::Minimal);
        assert!(matches!(
            table.validate_partition(0..=MAX_SCORE),
            Err(AppError::ConfigurationGap(_))
        ));
    }

    #[test]
    fn test_overlap_is_reported() {
        let table = BandTable::new(vec![
            band(SeverityKey::Minimal, 0, 5),
            band(SeverityKey::Mild, 5, 27),
        ])
        .unwrap();
        assert_eq!(table.classify(5).key, SeverityKey::Minimal);
        assert!(table.validate_partition(0..=MAX_SCORE).is_err());
    }

    #[test]
    fn test_engine_with_gapped_table_still_scores() {
        let content = StaticContentProvider::load().unwrap();
        let engine = AssessmentEngine::with_bands(content.questionnaire(), gapped_table());
        let result = engine.evaluate(&uniform(&engine, 1), Locale::English).unwrap();

        assert_eq!(result.score, 9);
        assert_eq!(result.band.key, SeverityKey::Mild);

        let result = engine.evaluate(&uniform(&engine, 2), Locale::English).unwrap();
        assert_eq!(result.score, 18);
        assert_eq!(result.band.key, SeverityKey::Minimal);
        assert!(result.recommendation.crisis_support.is_some());
    }
}

#[cfg(test)]
mod flow_tests {
    use super::*;

    fn flow() -> AssessmentFlow {
        AssessmentFlow::start(Arc::new(engine()), Locale::English)
    }

    #[test]
    fn test_incomplete_submit_keeps_state() {
        let mut flow = flow();
        for id in 1..=8 {
            flow.record_answer(id, 2).unwrap();
        }
        assert!(!flow.can_submit());

        match flow.submit() {
            Err(AppError::IncompleteAssessment { answered, required }) => {
                assert_eq!((answered, required), (8, 9));
            }
            other => panic!("expected IncompleteAssessment, got {:?}", other.map(|r| r.score)),
        }
        assert_eq!(flow.state(), &AssessmentState::InProgress);
        assert_eq!(flow.progress().remaining(), 1);
    }

    #[test]
    fn test_submitted_flow_is_closed_until_retake() {
        let mut flow = flow();
        for id in 1..=9 {
            flow.record_answer(id, 3).unwrap();
        }
        assert!(flow.can_submit());
        assert_eq!(flow.submit().unwrap().score, 27);

        assert!(matches!(flow.record_answer(1, 0), Err(AppError::AssessmentClosed)));
        assert!(matches!(flow.submit(), Err(AppError::AssessmentClosed)));
        assert!(!flow.can_submit());

        flow.retake();
        assert_eq!(flow.state(), &AssessmentState::InProgress);
        assert!(flow.answers().is_empty());
        assert!(flow.result().is_none());
        flow.record_answer(1, 0).unwrap();
    }
}
