//! Predictor configuration.
//!
//! Every predictor carries its own [`PredictorConfig`]; there is no shared
//! process-wide dimension, so differently sized runs never interfere.

use crate::encoder::check_context_size;
use crate::error::{HdcError, Result};
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// Configuration for a [`SequencePredictor`](crate::SequencePredictor).
///
/// # Example
///
/// ```
/// use hdpredict::{PredictorConfig, Strategy};
///
/// let config = PredictorConfig::default()
///     .with_dimension(4096)
///     .with_context_size(4)
///     .with_strategy(Strategy::Batch)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Hypervector dimension D.
    pub dimension: usize,

    /// k-gram size (at least 2).
    pub context_size: usize,

    /// How past grams are aggregated.
    pub strategy: Strategy,

    /// Seed for grounding and warm-up draws. `None` draws one from OS
    /// entropy at construction.
    pub seed: Option<u64>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            dimension: 10_000,
            context_size: 3,
            strategy: Strategy::Running,
            seed: None,
        }
    }
}

impl PredictorConfig {
    /// Set the hypervector dimension.
    #[must_use]
    pub const fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the k-gram size.
    #[must_use]
    pub const fn with_context_size(mut self, context_size: usize) -> Self {
        self.context_size = context_size;
        self
    }

    /// Set the aggregation strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for values no predictor can run with.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(HdcError::InvalidConfig(
                "dimension must be positive".to_string(),
            ));
        }
        check_context_size(self.context_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PredictorConfig::default();
        assert_eq!(config.dimension, 10_000);
        assert_eq!(config.context_size, 3);
        assert_eq!(config.strategy, Strategy::Running);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert!(PredictorConfig::default()
            .with_dimension(0)
            .validate()
            .is_err());
        assert!(PredictorConfig::default()
            .with_context_size(1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde() {
        let config = PredictorConfig::default()
            .with_strategy(Strategy::BatchDeduplicated)
            .with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"batch_deduplicated\""));
        let back: PredictorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
