//! cna_stats: the item statistics aggregator (deterministic, pure).
//!
//! Inputs:
//! - `responses`: imported survey records (code + current score), any order
//! - `officer_count`: number of officers in scope, the response-rate
//!   denominator supplied by the caller (not the response count)
//! - `code_text`: code → human-readable label lookup (missing codes fall back
//!   to a label embedding the code, never an error)
//!
//! Output:
//! - one `QuestionStatistics` per distinct code, in first-encounter order
//!
//! Rules in this layer:
//! - Codes are opaque keys; no format validation (empty codes are accepted).
//! - `average_score` and `variance` are 0.0 when a code has no responses
//!   (defensive; unreachable for codes produced by observation).
//! - Modal tie-break is pinned: scan the tally 1..=10 then extra scores in
//!   first-seen order, replace only on a strictly greater count.
//! - A per-code response count above `officer_count` is a caller bug and is
//!   rejected at this boundary (`StatsError::InvalidArgument`); the import
//!   layer guarantees at most one response per officer per code.
//!
//! No RNG, no I/O. Section partitioning is a separate step
//! (`group_by_section`), keyed by the code's first character.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use cna_core::{natural_cmp, section_key, SurveyResponse};

mod tally;
pub use tally::{Tally, TallyEntry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregation errors. All variants are caller bugs, not data conditions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatsError {
    /// A documented call-boundary contract was violated.
    InvalidArgument {
        reason: &'static str,
        question_code: String,
    },
}

impl core::fmt::Display for StatsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StatsError::InvalidArgument {
                reason,
                question_code,
            } => write!(f, "invalid argument for {question_code:?}: {reason}"),
        }
    }
}

impl std::error::Error for StatsError {}

/// Statistical summary of one survey item across all responding officers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuestionStatistics {
    pub question_code: String,
    pub question_text: String,
    /// Responses observed for this code.
    pub response_count: u32,
    /// Officers in scope: the response-rate denominator. Always at least
    /// `response_count`.
    pub total_possible: u32,
    /// Arithmetic mean of observed scores; 0.0 when there are none.
    pub average_score: f64,
    /// Pinned-tie-break mode of the tally.
    pub modal_score: i64,
    /// Population variance (mean squared deviation); 0.0 when there are none.
    pub variance: f64,
    pub tally: Tally,
}

/// Aggregate survey responses into per-question statistics.
///
/// Pure function of its inputs. Output order is the first-encounter order of
/// question codes in `responses`; an empty input yields an empty output.
pub fn aggregate(
    responses: &[SurveyResponse],
    officer_count: u32,
    code_text: &BTreeMap<String, String>,
) -> Result<Vec<QuestionStatistics>, StatsError> {
    let groups = group_scores(responses);

    let mut out = Vec::with_capacity(groups.len());
    for (code, scores) in groups {
        let response_count = scores.len() as u32;
        if response_count > officer_count {
            return Err(StatsError::InvalidArgument {
                reason: "response count exceeds officer count",
                question_code: code,
            });
        }
        out.push(summarize(code, &scores, officer_count, code_text));
    }
    Ok(out)
}

/// Partition statistics by section key (first character of the code) and sort
/// each section by natural code order, so `"A2"` precedes `"A10"`.
///
/// Returned keyed by section; the caller decides display order (the map
/// iterates alphabetically by key).
pub fn group_by_section(
    stats: Vec<QuestionStatistics>,
) -> BTreeMap<char, Vec<QuestionStatistics>> {
    let mut sections: BTreeMap<char, Vec<QuestionStatistics>> = BTreeMap::new();
    for s in stats {
        sections
            .entry(section_key(&s.question_code))
            .or_default()
            .push(s);
    }
    for entries in sections.values_mut() {
        entries.sort_by(|a, b| natural_cmp(&a.question_code, &b.question_code));
    }
    sections
}

/// Collect scores per code, preserving first-encounter code order and the
/// encounter order of scores within each code.
fn group_scores(responses: &[SurveyResponse]) -> Vec<(String, Vec<i64>)> {
    let mut order: Vec<(String, Vec<i64>)> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    for r in responses {
        match index.get(&r.question_code) {
            Some(&i) => order[i].1.push(r.current_score),
            None => {
                index.insert(r.question_code.clone(), order.len());
                order.push((r.question_code.clone(), vec![r.current_score]));
            }
        }
    }
    order
}

/// Build the statistics row for one code from its collected scores.
fn summarize(
    question_code: String,
    scores: &[i64],
    officer_count: u32,
    code_text: &BTreeMap<String, String>,
) -> QuestionStatistics {
    let response_count = scores.len() as u32;

    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
    };

    let variance = if scores.is_empty() {
        0.0
    } else {
        scores
            .iter()
            .map(|&s| {
                let d = s as f64 - average_score;
                d * d
            })
            .sum::<f64>()
            / scores.len() as f64
    };

    let mut tally = Tally::seeded();
    for &s in scores {
        tally.record(s);
    }

    let question_text = code_text
        .get(&question_code)
        .cloned()
        .unwrap_or_else(|| format!("Unknown Question ({question_code})"));

    QuestionStatistics {
        modal_score: tally.modal_score(),
        question_code,
        question_text,
        response_count,
        total_possible: officer_count,
        average_score,
        variance,
        tally,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resp(code: &str, score: i64) -> SurveyResponse {
        SurveyResponse::new(code, score)
    }

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let stats = aggregate(&[], 5, &BTreeMap::new()).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn end_to_end_three_officers() {
        let responses = [resp("A1", 8), resp("A1", 6), resp("B2", 10)];
        let stats = aggregate(&responses, 3, &BTreeMap::new()).unwrap();
        assert_eq!(stats.len(), 2);

        let a1 = &stats[0];
        assert_eq!(a1.question_code, "A1");
        assert_eq!(a1.response_count, 2);
        assert_eq!(a1.total_possible, 3);
        assert_eq!(a1.average_score, 7.0);
        assert_eq!(a1.variance, 1.0);
        assert_eq!(a1.tally.count(8), 1);
        assert_eq!(a1.tally.count(6), 1);

        let b2 = &stats[1];
        assert_eq!(b2.response_count, 1);
        assert_eq!(b2.average_score, 10.0);
        assert_eq!(b2.variance, 0.0);

        let sections = group_by_section(stats);
        assert_eq!(sections[&'A'][0].question_code, "A1");
        assert_eq!(sections[&'B'][0].question_code, "B2");
    }

    #[test]
    fn modal_tie_is_deterministic() {
        let responses = [resp("C3", 7), resp("C3", 7), resp("C3", 8), resp("C3", 8)];
        for _ in 0..3 {
            let stats = aggregate(&responses, 4, &BTreeMap::new()).unwrap();
            assert_eq!(stats[0].modal_score, 7);
        }
    }

    #[test]
    fn label_lookup_with_fallback() {
        let lookup = labels(&[("A1", "Analyses policy options")]);
        let stats = aggregate(&[resp("A1", 5), resp("Z9", 5)], 2, &lookup).unwrap();
        assert_eq!(stats[0].question_text, "Analyses policy options");
        assert_eq!(stats[1].question_text, "Unknown Question (Z9)");
    }

    #[test]
    fn out_of_domain_scores_still_tallied() {
        let stats = aggregate(&[resp("A1", 15), resp("A1", -3)], 2, &BTreeMap::new()).unwrap();
        assert_eq!(stats[0].tally.count(15), 1);
        assert_eq!(stats[0].tally.count(-3), 1);
        assert_eq!(stats[0].tally.total(), 2);
    }

    #[test]
    fn section_sort_is_numeric_aware() {
        let responses = [resp("A10", 1), resp("A2", 1), resp("A1", 1)];
        let stats = aggregate(&responses, 3, &BTreeMap::new()).unwrap();
        let sections = group_by_section(stats);
        let codes: Vec<_> = sections[&'A']
            .iter()
            .map(|s| s.question_code.as_str())
            .collect();
        assert_eq!(codes, vec!["A1", "A2", "A10"]);
    }

    #[test]
    fn rejects_response_count_above_officer_count() {
        let responses = [resp("A1", 5), resp("A1", 6)];
        let err = aggregate(&responses, 1, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, StatsError::InvalidArgument { .. }));
    }

    #[test]
    fn empty_code_groups_under_fallback_key() {
        let stats = aggregate(&[resp("", 4)], 1, &BTreeMap::new()).unwrap();
        let sections = group_by_section(stats);
        assert!(sections.contains_key(&'?'));
    }
}
