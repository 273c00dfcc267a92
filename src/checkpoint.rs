//! Checkpoint: persisted predictor state for deterministic resume.
//!
//! A checkpoint captures everything a predictor accumulates that cannot be
//! recomputed cheaply: the grounded alphabet vectors and (under the running
//! strategy) the accumulator. Together with the continuing history it is
//! enough to resume a run and reproduce every later prediction.
//!
//! # Example
//!
//! ```
//! use hdpredict::{Checkpoint, PredictorConfig, SequencePredictor};
//!
//! let config = PredictorConfig::default().with_dimension(1024).with_seed(3);
//! let mut predictor = SequencePredictor::from_config(config, ['a', 'b'])?;
//! for c in "abba".chars() {
//!     predictor.observe(c)?;
//! }
//!
//! let checkpoint = predictor.checkpoint()?;
//! let history = predictor.history().as_slice().to_vec();
//! let resumed = SequencePredictor::resume(checkpoint, history)?;
//! assert_eq!(resumed.encode_history(4)?, predictor.encode_history(4)?);
//! # Ok::<(), hdpredict::HdcError>(())
//! ```

use crate::accumulator::RunningAccumulator;
use crate::codebook::Codebook;
use crate::config::PredictorConfig;
use crate::error::{HdcError, Result};
use crate::history::History;
use crate::predictor::SequencePredictor;
use crate::space::HypervectorSpace;
use crate::strategy::{Aggregator, Strategy};
use crate::vector::Hypervector;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

/// Running accumulator state as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorState {
    pub counts: Vec<usize>,
    pub gram_count: usize,
}

/// Serializable snapshot of a [`SequencePredictor`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    pub dimension: usize,
    pub context_size: usize,
    pub strategy: Strategy,
    pub seed: u64,
    /// Grounded symbols in alphabet order
    pub alphabet: Vec<(S, Hypervector)>,
    /// Present iff `strategy` is `Running`
    pub accumulator: Option<AccumulatorState>,
    /// Number of history symbols this checkpoint covers
    pub processed: usize,
    /// Warm-up fallback draws taken so far
    pub fallback_draws: usize,
}

impl<S: Serialize> Checkpoint<S> {
    /// Persist to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl<S: DeserializeOwned> Checkpoint<S> {
    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl<S: Ord + Clone + Debug> SequencePredictor<S> {
    /// Snapshot the current state.
    ///
    /// Fails with `KeyNotFound` if an alphabet symbol has no grounded
    /// vector.
    pub fn checkpoint(&self) -> Result<Checkpoint<S>> {
        let alphabet = self
            .alphabet()
            .iter()
            .map(|s| Ok((s.clone(), self.codebook().get(s)?.clone())))
            .collect::<Result<Vec<_>>>()?;

        let accumulator = self.aggregator().accumulator().map(|acc| AccumulatorState {
            counts: acc.counts().to_vec(),
            gram_count: acc.gram_count(),
        });

        Ok(Checkpoint {
            dimension: self.space().dimension(),
            context_size: self.context_size(),
            strategy: self.strategy(),
            seed: self.seed(),
            alphabet,
            accumulator,
            processed: self.processed(),
            fallback_draws: self.fallback_draws(),
        })
    }

    /// Rebuild a predictor from `checkpoint` and the history it covers.
    ///
    /// `history` must hold exactly `checkpoint.processed` symbols, all from
    /// the checkpointed alphabet. Alphabet vectors are re-grounded, so a
    /// symbol listed twice with different vectors fails with
    /// `ReboundSymbol`.
    pub fn resume<I>(checkpoint: Checkpoint<S>, history: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let config = PredictorConfig {
            dimension: checkpoint.dimension,
            context_size: checkpoint.context_size,
            strategy: checkpoint.strategy,
            seed: Some(checkpoint.seed),
        };
        config.validate()?;

        let space = HypervectorSpace::new(config.dimension)?;
        let mut codebook = Codebook::new(space, checkpoint.seed);
        let mut symbols = Vec::new();
        for (symbol, v) in checkpoint.alphabet {
            if !codebook.has(&symbol) {
                symbols.push(symbol.clone());
            }
            codebook.ground(symbol, v)?;
        }

        let history: History<S> = history.into_iter().collect::<Vec<_>>().into();
        if history.len() != checkpoint.processed {
            return Err(HdcError::Checkpoint(format!(
                "checkpoint covers {} symbols, history has {}",
                checkpoint.processed,
                history.len()
            )));
        }
        for symbol in history.as_slice() {
            codebook.get(symbol)?;
        }

        let mut predictor = Self::assemble(config, checkpoint.seed, codebook, symbols)?;
        predictor.restore_history(history);

        match (checkpoint.strategy, checkpoint.accumulator) {
            (Strategy::Running, Some(state)) => {
                let acc = RunningAccumulator::from_parts(state.counts, state.gram_count)?;
                if acc.dimensions() != checkpoint.dimension {
                    return Err(HdcError::DimensionMismatch {
                        expected: checkpoint.dimension,
                        got: acc.dimensions(),
                    });
                }
                if acc.gram_count() != predictor.gram_count() {
                    return Err(HdcError::Checkpoint(format!(
                        "accumulator holds {} grams, history implies {}",
                        acc.gram_count(),
                        predictor.gram_count()
                    )));
                }
                *predictor.aggregator_mut() = Aggregator::Running(acc);
            }
            (Strategy::Running, None) => {
                return Err(HdcError::Checkpoint(
                    "running strategy without accumulator".to_string(),
                ));
            }
            (_, Some(_)) => {
                return Err(HdcError::Checkpoint(
                    "batch strategy with accumulator".to_string(),
                ));
            }
            (_, None) => {}
        }

        predictor.skip_fallback_draws(checkpoint.fallback_draws);

        tracing::debug!(
            processed = predictor.processed(),
            strategy = ?predictor.strategy(),
            "predictor resumed"
        );
        Ok(predictor)
    }
}
