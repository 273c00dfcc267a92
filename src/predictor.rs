//! Sequence predictor: next-symbol forecasting from k-gram history.
//!
//! # Lifecycle
//!
//! ```text
//! create ──► WARMUP (processed < k) ──► STEADY (processed >= k)
//! ```
//!
//! During warm-up the history is too short for a single k-gram, so
//! [`encode_history`](SequencePredictor::encode_history) and
//! [`make_query`](SequencePredictor::make_query) fail with
//! `InsufficientHistory` and the caller substitutes
//! [`fallback`](SequencePredictor::fallback). STEADY is terminal.
//!
//! # One step
//!
//! ```text
//! h = encode_history(n)        bundle of every k-gram seen so far
//! q = make_query(n)            last k-1 symbols, shifted one slot
//! predict(h, q)                codebook.winner_take_all(h ^ q)
//! observe(actual)              append; running strategy folds new gram
//! ```
//!
//! # Example
//!
//! ```
//! use hdpredict::{PredictorConfig, SequencePredictor, Prediction};
//!
//! let config = PredictorConfig::default().with_dimension(4096).with_seed(1);
//! let mut predictor = SequencePredictor::from_config(config, ["y", "n"])?;
//!
//! for actual in ["y", "y", "n", "y", "y", "n"] {
//!     let guess = predictor.predict_next()?;
//!     predictor.observe(actual)?;
//!     if let Prediction::Decoded(symbol) = guess {
//!         println!("predicted {symbol}, saw {actual}");
//!     }
//! }
//! # Ok::<(), hdpredict::HdcError>(())
//! ```

use crate::codebook::Codebook;
use crate::config::PredictorConfig;
use crate::encoder::SequenceEncoder;
use crate::error::{HdcError, Result};
use crate::history::History;
use crate::seeding;
use crate::space::HypervectorSpace;
use crate::strategy::{Aggregator, Strategy};
use crate::vector::Hypervector;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Where a predictor is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `context_size` symbols processed
    Warmup,
    /// At least one full k-gram available
    Steady,
}

/// Outcome of [`SequencePredictor::predict_next`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction<S> {
    /// Uniform draw from the alphabet (warm-up)
    Fallback(S),
    /// Winner-take-all decode of the history/query binding
    Decoded(S),
}

impl<S> Prediction<S> {
    /// The predicted symbol, however it was produced.
    pub fn symbol(&self) -> &S {
        match self {
            Prediction::Fallback(s) | Prediction::Decoded(s) => s,
        }
    }

    pub fn into_symbol(self) -> S {
        match self {
            Prediction::Fallback(s) | Prediction::Decoded(s) => s,
        }
    }

    /// True for warm-up draws.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Prediction::Fallback(_))
    }
}

/// k-gram sequence predictor over a grounded symbol alphabet.
///
/// Single-writer: every step depends on all previous ones, so a predictor
/// must be driven sequentially by one owner.
#[derive(Clone, Debug)]
pub struct SequencePredictor<S> {
    config: PredictorConfig,
    seed: u64,
    encoder: SequenceEncoder,
    codebook: Codebook<S>,
    /// Grounded symbols in first-seen order (fallback draws index into this)
    alphabet: Vec<S>,
    history: History<S>,
    aggregator: Aggregator,
    fallback_rng: ChaCha8Rng,
    fallback_draws: usize,
}

impl<S: Ord + Clone + Debug> SequencePredictor<S> {
    /// Build a predictor with the default (running) strategy and an
    /// entropy seed.
    pub fn create<I>(dimension: usize, context_size: usize, alphabet: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let config = PredictorConfig {
            dimension,
            context_size,
            ..PredictorConfig::default()
        };
        Self::from_config(config, alphabet)
    }

    /// Build a predictor and ground every alphabet symbol.
    ///
    /// Duplicate symbols are grounded once. An empty alphabet fails with
    /// `EmptyOperand`.
    pub fn from_config<I>(config: PredictorConfig, alphabet: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(seeding::entropy_seed);
        let space = HypervectorSpace::new(config.dimension)?;

        let mut codebook = Codebook::new(space, seed);
        let mut symbols = Vec::new();
        for symbol in alphabet {
            if !codebook.has(&symbol) {
                codebook.add(symbol.clone());
                symbols.push(symbol);
            }
        }

        let predictor = Self::assemble(config, seed, codebook, symbols)?;
        tracing::debug!(
            dimension = predictor.config.dimension,
            context_size = predictor.config.context_size,
            strategy = ?predictor.config.strategy,
            alphabet = predictor.alphabet.len(),
            seed,
            "predictor created"
        );
        Ok(predictor)
    }

    // Shared by construction and checkpoint resume.
    pub(crate) fn assemble(
        mut config: PredictorConfig,
        seed: u64,
        codebook: Codebook<S>,
        alphabet: Vec<S>,
    ) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(HdcError::EmptyOperand("alphabet"));
        }
        config.seed = Some(seed);
        let space = codebook.space();

        Ok(Self {
            encoder: SequenceEncoder::new(space, config.context_size)?,
            aggregator: Aggregator::new(config.strategy, space.dimension()),
            fallback_rng: seeding::stream(seed, seeding::FALLBACK_STREAM),
            fallback_draws: 0,
            history: History::new(),
            config,
            seed,
            codebook,
            alphabet,
        })
    }

    /// Configuration with the resolved seed filled in.
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Resolved seed for every random stream of this predictor.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The k in k-gram.
    pub fn context_size(&self) -> usize {
        self.config.context_size
    }

    pub fn strategy(&self) -> Strategy {
        self.aggregator.strategy()
    }

    pub fn space(&self) -> HypervectorSpace {
        self.encoder.space()
    }

    /// Grounded alphabet vectors.
    pub fn codebook(&self) -> &Codebook<S> {
        &self.codebook
    }

    /// Alphabet in first-seen order.
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    /// Every symbol observed so far, oldest first.
    pub fn history(&self) -> &History<S> {
        &self.history
    }

    pub(crate) fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub(crate) fn aggregator_mut(&mut self) -> &mut Aggregator {
        &mut self.aggregator
    }

    pub(crate) fn restore_history(&mut self, history: History<S>) {
        self.history = history;
    }

    pub(crate) fn fallback_draws(&self) -> usize {
        self.fallback_draws
    }

    /// Number of symbols observed so far.
    pub fn processed(&self) -> usize {
        self.history.len()
    }

    /// Number of k-grams contained in the processed history.
    pub fn gram_count(&self) -> usize {
        (self.processed() + 1).saturating_sub(self.context_size())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.processed() < self.context_size() {
            Phase::Warmup
        } else {
            Phase::Steady
        }
    }

    fn check_upto(&self, upto: usize) -> Result<()> {
        let k = self.context_size();
        let processed = self.processed();
        if processed < k {
            return Err(HdcError::InsufficientHistory {
                processed,
                required: k,
            });
        }
        if upto > processed {
            return Err(HdcError::HistoryIndex {
                index: upto,
                processed,
            });
        }
        if upto < k {
            return Err(HdcError::InsufficientHistory {
                processed: upto,
                required: k,
            });
        }
        Ok(())
    }

    /// History vector: the bundle of every k-gram in `history[0:upto]`.
    pub fn encode_history(&self, upto: usize) -> Result<Hypervector> {
        self.check_upto(upto)?;
        self.aggregator
            .encode_history(&self.encoder, &self.codebook, &self.history, upto)
    }

    /// Query vector for predicting `history[upto]`.
    pub fn make_query(&self, upto: usize) -> Result<Hypervector> {
        self.check_upto(upto)?;
        self.encoder.query(&self.codebook, &self.history, upto)
    }

    /// Decode the symbol isolated by binding history and query.
    pub fn predict(&self, history_hv: &Hypervector, query_hv: &Hypervector) -> Result<S> {
        let probe = self.space().bind(history_hv, query_hv)?;
        self.codebook.winner_take_all(&probe)
    }

    /// Append the actual next symbol.
    ///
    /// Symbols outside the alphabet fail with `KeyNotFound` and leave the
    /// predictor unchanged.
    pub fn observe(&mut self, symbol: S) -> Result<()> {
        // Validate before mutating so a rejected symbol leaves no trace
        self.codebook.get(&symbol)?;

        let was_warming = self.phase() == Phase::Warmup;
        self.history.push(symbol);
        self.aggregator
            .record(&self.encoder, &self.codebook, &self.history)?;

        tracing::trace!(
            processed = self.processed(),
            grams = self.gram_count(),
            "observed symbol"
        );
        if was_warming && self.phase() == Phase::Steady {
            tracing::debug!(processed = self.processed(), "warm-up complete");
        }
        Ok(())
    }

    /// Uniform random draw from the grounded alphabet.
    pub fn fallback(&mut self) -> S {
        let i = self.fallback_rng.gen_range(0..self.alphabet.len());
        self.fallback_draws += 1;
        self.alphabet[i].clone()
    }

    // Replays `draws` fallback draws so a resumed stream lines up.
    pub(crate) fn skip_fallback_draws(&mut self, draws: usize) {
        for _ in 0..draws {
            self.fallback();
        }
    }

    /// Predict `history[processed]`, falling back during warm-up.
    ///
    /// `InsufficientHistory` is the only error absorbed here; anything
    /// else indicates a caller bug and propagates.
    pub fn predict_next(&mut self) -> Result<Prediction<S>> {
        let upto = self.processed();
        let decoded = self
            .encode_history(upto)
            .and_then(|h| Ok((h, self.make_query(upto)?)))
            .and_then(|(h, q)| self.predict(&h, &q));

        match decoded {
            Ok(symbol) => Ok(Prediction::Decoded(symbol)),
            Err(HdcError::InsufficientHistory { .. }) => {
                Ok(Prediction::Fallback(self.fallback()))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictor(strategy: Strategy) -> SequencePredictor<&'static str> {
        let config = PredictorConfig::default()
            .with_dimension(10_000)
            .with_context_size(3)
            .with_strategy(strategy)
            .with_seed(2024);
        SequencePredictor::from_config(config, ["y", "n"]).unwrap()
    }

    #[test]
    fn test_create_grounds_alphabet() {
        let p = SequencePredictor::create(512, 2, ['a', 'b', 'a', 'c']).unwrap();
        assert_eq!(p.alphabet(), &['a', 'b', 'c']);
        assert_eq!(p.codebook().len(), 3);
        assert_eq!(p.strategy(), Strategy::Running);
        assert!(p.config().seed.is_some());
    }

    #[test]
    fn test_create_rejects_bad_input() {
        assert!(matches!(
            SequencePredictor::create(512, 1, ['a']),
            Err(HdcError::InvalidConfig(_))
        ));
        assert!(matches!(
            SequencePredictor::<char>::create(512, 2, []),
            Err(HdcError::EmptyOperand(_))
        ));
    }

    #[test]
    fn test_warmup_rejects_encode() {
        let mut p = predictor(Strategy::Running);
        assert_eq!(p.phase(), Phase::Warmup);

        p.observe("y").unwrap();
        p.observe("y").unwrap();
        assert!(matches!(
            p.encode_history(2),
            Err(HdcError::InsufficientHistory {
                processed: 2,
                required: 3
            })
        ));
        assert!(matches!(
            p.make_query(2),
            Err(HdcError::InsufficientHistory { .. })
        ));

        p.observe("n").unwrap();
        assert_eq!(p.phase(), Phase::Steady);
        assert!(p.encode_history(3).is_ok());
    }

    #[test]
    fn test_index_beyond_history() {
        let mut p = predictor(Strategy::Batch);
        for s in ["y", "y", "n"] {
            p.observe(s).unwrap();
        }
        assert!(matches!(
            p.encode_history(4),
            Err(HdcError::HistoryIndex {
                index: 4,
                processed: 3
            })
        ));
    }

    #[test]
    fn test_observe_unknown_symbol() {
        let mut p = predictor(Strategy::Running);
        assert!(matches!(p.observe("maybe"), Err(HdcError::KeyNotFound(_))));
        assert_eq!(p.processed(), 0);
    }

    #[test]
    fn test_fallback_stays_in_alphabet() {
        let mut p = predictor(Strategy::Running);
        for _ in 0..50 {
            let s = p.fallback();
            assert!(s == "y" || s == "n");
        }
    }

    #[test]
    fn test_fallback_is_seeded() {
        let mut a = predictor(Strategy::Running);
        let mut b = predictor(Strategy::Batch);
        let da: Vec<_> = (0..20).map(|_| a.fallback()).collect();
        let db: Vec<_> = (0..20).map(|_| b.fallback()).collect();
        assert_eq!(da, db);
    }

    #[test]
    fn test_predicts_repeating_pattern() {
        for strategy in [Strategy::Running, Strategy::Batch, Strategy::BatchDeduplicated] {
            let mut p = predictor(strategy);
            for s in ["y", "y", "n"] {
                assert!(p.predict_next().unwrap().is_fallback());
                p.observe(s).unwrap();
            }

            let h = p.encode_history(3).unwrap();
            let q = p.make_query(3).unwrap();
            assert_eq!(p.predict(&h, &q).unwrap(), "y", "{:?}", strategy);
        }
    }

    #[test]
    fn test_gram_count_tracks_accumulator() {
        let mut p = predictor(Strategy::Running);
        for (i, s) in ["y", "n", "y", "y", "n"].into_iter().enumerate() {
            p.observe(s).unwrap();
            let acc = p.aggregator().accumulator().unwrap().gram_count();
            assert_eq!(acc, p.gram_count(), "step {}", i);
        }
        assert_eq!(p.gram_count(), 3);
    }
}
