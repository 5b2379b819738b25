//! Property tests for aggregation invariants.
//!
//! These hold for arbitrary score data, not just the conventional 1..=10
//! domain: mean × count recovers the raw sum, population variance is never
//! negative, and the tally always accounts for every response.

use std::collections::BTreeMap;

use cna_core::SurveyResponse;
use cna_stats::aggregate;
use proptest::prelude::*;

fn responses_for(code: &str, scores: &[i64]) -> Vec<SurveyResponse> {
    scores
        .iter()
        .map(|&s| SurveyResponse::new(code, s))
        .collect()
}

proptest! {
    #[test]
    fn mean_times_count_recovers_sum(scores in prop::collection::vec(-50i64..=50, 1..200)) {
        let responses = responses_for("A1", &scores);
        let stats = aggregate(&responses, scores.len() as u32, &BTreeMap::new()).unwrap();
        let s = &stats[0];

        let raw_sum: i64 = scores.iter().sum();
        let recovered = s.average_score * s.response_count as f64;
        prop_assert!((recovered - raw_sum as f64).abs() < 1e-6);
    }

    #[test]
    fn variance_is_non_negative(scores in prop::collection::vec(-50i64..=50, 1..200)) {
        let responses = responses_for("A1", &scores);
        let stats = aggregate(&responses, scores.len() as u32, &BTreeMap::new()).unwrap();
        prop_assert!(stats[0].variance >= 0.0);
    }

    #[test]
    fn tally_accounts_for_every_response(scores in prop::collection::vec(-50i64..=50, 1..200)) {
        let responses = responses_for("A1", &scores);
        let stats = aggregate(&responses, scores.len() as u32, &BTreeMap::new()).unwrap();
        prop_assert_eq!(stats[0].tally.total(), stats[0].response_count as u64);
    }

    #[test]
    fn aggregation_is_reproducible(scores in prop::collection::vec(1i64..=10, 1..100)) {
        let responses = responses_for("G5", &scores);
        let a = aggregate(&responses, 200, &BTreeMap::new()).unwrap();
        let b = aggregate(&responses, 200, &BTreeMap::new()).unwrap();
        prop_assert_eq!(a, b);
    }
}
