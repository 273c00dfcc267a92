//! Aggregation strategies: how the per-step history vector is built.
//!
//! All strategies decode the same way; they differ only in how the bundle
//! of past grams is obtained.
//!
//! | Strategy            | Per step | Notes                                   |
//! |---------------------|----------|-----------------------------------------|
//! | `Batch`             | O(i·k·D) | re-encode and bundle every gram         |
//! | `BatchDeduplicated` | O(i·k·D) | repeated windows bundled once           |
//! | `Running`           | O(k·D)   | incremental; identical to `Batch`       |

use crate::accumulator::RunningAccumulator;
use crate::codebook::Codebook;
use crate::encoder::SequenceEncoder;
use crate::error::{HdcError, Result};
use crate::history::History;
use crate::vector::Hypervector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Aggregation strategy, chosen once when a predictor is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recompute and bundle every k-gram of the prefix on each call
    Batch,
    /// Like `Batch`, but literally repeated windows count once.
    /// Effect on accuracy is not established; opt-in only.
    BatchDeduplicated,
    /// Maintain a running accumulator, one gram per observed symbol
    #[default]
    Running,
}

/// Strategy state owned by a predictor.
#[derive(Clone, Debug)]
pub enum Aggregator {
    Batch { deduplicate: bool },
    Running(RunningAccumulator),
}

impl Aggregator {
    /// Fresh state for `strategy` over `dimensions`-component vectors.
    pub fn new(strategy: Strategy, dimensions: usize) -> Self {
        match strategy {
            Strategy::Batch => Aggregator::Batch { deduplicate: false },
            Strategy::BatchDeduplicated => Aggregator::Batch { deduplicate: true },
            Strategy::Running => Aggregator::Running(RunningAccumulator::new(dimensions)),
        }
    }

    /// The strategy tag this state was built from.
    pub fn strategy(&self) -> Strategy {
        match self {
            Aggregator::Batch { deduplicate: false } => Strategy::Batch,
            Aggregator::Batch { deduplicate: true } => Strategy::BatchDeduplicated,
            Aggregator::Running(_) => Strategy::Running,
        }
    }

    /// Accumulator state, when running.
    pub fn accumulator(&self) -> Option<&RunningAccumulator> {
        match self {
            Aggregator::Running(acc) => Some(acc),
            Aggregator::Batch { .. } => None,
        }
    }

    /// Called once after `history` has grown by one symbol.
    ///
    /// The running strategy folds in the gram ending at the new position;
    /// batch strategies keep no state.
    pub(crate) fn record<S>(
        &mut self,
        encoder: &SequenceEncoder,
        codebook: &Codebook<S>,
        history: &History<S>,
    ) -> Result<()>
    where
        S: Ord + Clone + Debug,
    {
        match self {
            Aggregator::Running(acc) if history.len() >= encoder.context_size() => {
                let gram = encoder.gram_ending_at(codebook, history, history.len())?;
                acc.add(&gram)
            }
            _ => Ok(()),
        }
    }

    /// Bundle of every k-gram in `history[0:upto]`.
    ///
    /// Fails with `InsufficientHistory` when `upto < context_size` and with
    /// `HistoryIndex` when `upto > history.len()`. The running strategy only
    /// holds the bundle for the full processed history and fails with
    /// `HistoryIndex` for any earlier prefix.
    pub fn encode_history<S>(
        &self,
        encoder: &SequenceEncoder,
        codebook: &Codebook<S>,
        history: &History<S>,
        upto: usize,
    ) -> Result<Hypervector>
    where
        S: Ord + Clone + Debug,
    {
        let k = encoder.context_size();
        if upto > history.len() {
            return Err(HdcError::HistoryIndex {
                index: upto,
                processed: history.len(),
            });
        }
        if upto < k {
            return Err(HdcError::InsufficientHistory {
                processed: upto,
                required: k,
            });
        }

        match self {
            Aggregator::Batch { deduplicate } => {
                let grams = if *deduplicate {
                    let unique: BTreeSet<&[S]> = history.windows(upto, k).collect();
                    unique
                        .into_iter()
                        .map(|w| encoder.gram(codebook, w))
                        .collect::<Result<Vec<_>>>()?
                } else {
                    history
                        .windows(upto, k)
                        .map(|w| encoder.gram(codebook, w))
                        .collect::<Result<Vec<_>>>()?
                };
                encoder.space().bundle(&grams)
            }
            Aggregator::Running(acc) => {
                if upto != history.len() {
                    return Err(HdcError::HistoryIndex {
                        index: upto,
                        processed: history.len(),
                    });
                }
                acc.threshold()
            }
        }
    }
}
