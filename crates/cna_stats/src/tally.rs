//! crates/cna_stats/src/tally.rs
//! Insertion-ordered score tally.
//!
//! The tally is pre-seeded with the conventional score domain 1..=10 (zero
//! counts), and scores outside that domain append their own key in first-seen
//! order. Scan order is therefore a property of the data structure itself:
//! 1..=10 first, then extras in encounter order. The modal scan relies on
//! this: it keeps the first maximum and replaces it only on a strictly
//! greater count, which makes tie-breaking reproducible across runs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One (score, count) pair of the tally.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TallyEntry {
    pub score: i64,
    pub count: u64,
}

/// Ordered score histogram for one question code.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tally {
    entries: Vec<TallyEntry>,
}

impl Tally {
    /// New tally pre-seeded with zero counts for scores 1..=10.
    pub fn seeded() -> Self {
        Self {
            entries: (1..=10).map(|score| TallyEntry { score, count: 0 }).collect(),
        }
    }

    /// Record one observation. Out-of-domain scores get their own key,
    /// appended after the seeded range in first-seen order.
    pub fn record(&mut self, score: i64) {
        match self.entries.iter_mut().find(|e| e.score == score) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry { score, count: 1 }),
        }
    }

    /// Count recorded for `score` (0 when never observed).
    pub fn count(&self, score: i64) -> u64 {
        self.entries
            .iter()
            .find(|e| e.score == score)
            .map_or(0, |e| e.count)
    }

    /// Sum of all counts. Invariant: equals the response count of the code.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Modal score: left-to-right scan in entry order, first maximum wins,
    /// replaced only on a strictly greater count. 0 for an empty tally.
    pub fn modal_score(&self) -> i64 {
        let mut best: Option<TallyEntry> = None;
        for e in &self.entries {
            if best.map_or(true, |b| e.count > b.count) {
                best = Some(*e);
            }
        }
        best.map_or(0, |b| b.score)
    }

    /// Entries in scan order (1..=10, then extras in first-seen order).
    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }
}

impl Default for Tally {
    fn default() -> Self {
        Self::seeded()
    }
}
