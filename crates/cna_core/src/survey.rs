//! crates/cna_core/src/survey.rs
//! Imported survey records. Produced by the (external) import layer, consumed
//! by the aggregator. Immutable once constructed; no validation here, codes
//! are opaque keys and scores are unbounded by contract (1..=10 by convention).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One officer's current-skill rating of one survey item.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurveyResponse {
    /// Short alphanumeric item identifier, e.g. "A1", "G5". The leading
    /// character denotes the item's survey section.
    pub question_code: String,
    /// Self-assessed current rating. Conventionally 1..=10 inclusive; the
    /// aggregator must tolerate any value.
    pub current_score: i64,
}

impl SurveyResponse {
    pub fn new(question_code: impl Into<String>, current_score: i64) -> Self {
        Self {
            question_code: question_code.into(),
            current_score,
        }
    }
}
