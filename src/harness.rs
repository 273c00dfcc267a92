//! Step-by-step evaluation driver.
//!
//! [`run`] walks a trace one symbol at a time: predict the next symbol,
//! reveal the actual one, score, observe. The cumulative accuracy after
//! every step is kept so the whole learning curve can be plotted.

use crate::config::PredictorConfig;
use crate::error::Result;
use crate::predictor::SequencePredictor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Outcome of one evaluation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport<S> {
    /// Predicted symbol at each step
    pub predictions: Vec<S>,
    /// Steps answered by the warm-up fallback
    pub fallback_steps: usize,
    /// Number of correct predictions
    pub correct: usize,
    /// `accuracies[i]` = correct / (i + 1) after step i
    pub accuracies: Vec<f64>,
}

impl<S> Default for RunReport<S> {
    fn default() -> Self {
        Self {
            predictions: Vec::new(),
            fallback_steps: 0,
            correct: 0,
            accuracies: Vec::new(),
        }
    }
}

impl<S: PartialEq> RunReport<S> {
    /// Score one step.
    pub fn record(&mut self, predicted: S, actual: &S) {
        if predicted == *actual {
            self.correct += 1;
        }
        self.predictions.push(predicted);
        self.accuracies
            .push(self.correct as f64 / self.predictions.len() as f64);
    }
}

impl<S> RunReport<S> {
    pub fn steps(&self) -> usize {
        self.predictions.len()
    }

    /// Final cumulative accuracy (0.0 for an empty run).
    pub fn accuracy(&self) -> f64 {
        self.accuracies.last().copied().unwrap_or(0.0)
    }
}

/// Drive `predictor` over `trace`, scoring each prediction before the
/// actual symbol is observed.
///
/// A symbol outside the predictor's alphabet stops the run with
/// `KeyNotFound`.
pub fn run<S, I>(predictor: &mut SequencePredictor<S>, trace: I) -> Result<RunReport<S>>
where
    S: Ord + Clone + Debug,
    I: IntoIterator<Item = S>,
{
    let mut report = RunReport::default();
    for actual in trace {
        let prediction = predictor.predict_next()?;
        if prediction.is_fallback() {
            report.fallback_steps += 1;
        }
        report.record(prediction.into_symbol(), &actual);
        predictor.observe(actual)?;
    }

    tracing::debug!(
        steps = report.steps(),
        fallback_steps = report.fallback_steps,
        accuracy = report.accuracy(),
        "run complete"
    );
    Ok(report)
}

/// Run a fresh predictor over `trace` once per context size in `ks`.
///
/// Every point shares the rest of `config`, seed included, so the curves
/// differ only in k.
pub fn sweep_context_sizes<S>(
    config: &PredictorConfig,
    alphabet: &[S],
    trace: &[S],
    ks: &[usize],
) -> Result<BTreeMap<usize, RunReport<S>>>
where
    S: Ord + Clone + Debug,
{
    let mut reports = BTreeMap::new();
    for &k in ks {
        let point = config.clone().with_context_size(k);
        let mut predictor = SequencePredictor::from_config(point, alphabet.iter().cloned())?;
        let report = run(&mut predictor, trace.iter().cloned())?;

        tracing::debug!(context_size = k, accuracy = report.accuracy(), "sweep point");
        reports.insert(k, report);
    }
    Ok(reports)
}
