//! Two-bit saturating-counter baseline.
//!
//! The classic per-address branch predictor, kept for comparison against
//! the hypervector predictor on branch traces. Each key owns a counter in
//! `0..=3`:
//!
//! ```text
//! 0 strong not-taken ─► 1 weak not-taken ─► 2 weak taken ─► 3 strong taken
//! ```
//!
//! Taken moves one state right, not-taken one state left, saturating at
//! both ends. States 2 and 3 predict taken.

use crate::harness::RunReport;
use std::collections::BTreeMap;

const STRONG_NOT_TAKEN: u8 = 0;
const WEAK_TAKEN: u8 = 2;
const STRONG_TAKEN: u8 = 3;

/// Per-key two-bit counters.
#[derive(Clone, Debug, Default)]
pub struct TwoBitPredictor<K> {
    states: BTreeMap<K, u8>,
}

impl<K: Ord> TwoBitPredictor<K> {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Predict whether `key` is taken. Unseen keys start at strong
    /// not-taken.
    pub fn predict(&mut self, key: K) -> bool {
        *self.states.entry(key).or_insert(STRONG_NOT_TAKEN) >= WEAK_TAKEN
    }

    /// Move the counter for `key` toward the actual outcome.
    pub fn update(&mut self, key: K, taken: bool) {
        let state = self.states.entry(key).or_insert(STRONG_NOT_TAKEN);
        *state = if taken {
            (*state + 1).min(STRONG_TAKEN)
        } else {
            state.saturating_sub(1)
        };
    }

    /// Current counter for `key`, if seen.
    pub fn state(&self, key: &K) -> Option<u8> {
        self.states.get(key).copied()
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Score a fresh [`TwoBitPredictor`] over `(key, taken)` pairs.
pub fn run_two_bit<K, I>(trace: I) -> RunReport<bool>
where
    K: Ord + Clone,
    I: IntoIterator<Item = (K, bool)>,
{
    let mut predictor = TwoBitPredictor::new();
    let mut report = RunReport::default();
    for (key, taken) in trace {
        let predicted = predictor.predict(key.clone());
        predictor.update(key, taken);
        report.record(predicted, &taken);
    }

    tracing::debug!(
        steps = report.steps(),
        keys = predictor.len(),
        accuracy = report.accuracy(),
        "two-bit run complete"
    );
    report
}
