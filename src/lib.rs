//! # hdpredict: hyperdimensional sequence prediction
//!
//! Hyperdimensional computing (HDC) over dense binary hypervectors, and a
//! k-gram next-symbol predictor built on top of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use hdpredict::{harness, PredictorConfig, SequencePredictor};
//!
//! let config = PredictorConfig::default().with_dimension(10_000).with_seed(42);
//! let mut predictor = SequencePredictor::from_config(config, ["taken", "not-taken"])?;
//!
//! let trace = ["taken", "taken", "not-taken"].repeat(20);
//! let report = harness::run(&mut predictor, trace)?;
//! println!("accuracy: {:.3}", report.accuracy());
//! # Ok::<(), hdpredict::HdcError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Hypervectors**: length-D vectors over {0, 1}, compared by normalized
//!   Hamming distance
//! - **Bind** (XOR): associates two vectors; self-inverse
//! - **Bundle** (majority): superposes vectors; similar to every input
//! - **Permute** (rotation): tags a vector with a position
//! - **Item memory**: nearest-neighbour cleanup over labelled vectors
//! - **Codebook**: random, stable symbol → vector grounding
//!
//! ## Prediction
//!
//! Each k-gram of the history is encoded as `⊕ ρ^j(v_j)` and bundled into
//! one history vector. Binding that with a query built from the last k-1
//! symbols leaves an approximation of the symbol that completes the gram,
//! which the codebook decodes by winner-take-all.

pub mod accumulator;
pub mod baseline;
pub mod checkpoint;
pub mod codebook;
pub mod config;
pub mod encoder;
pub mod error;
pub mod harness;
pub mod history;
pub mod item_memory;
pub mod predictor;
pub mod seeding;
pub mod space;
pub mod strategy;
pub mod vector;

// Re-exports for convenience
pub use accumulator::RunningAccumulator;
pub use baseline::TwoBitPredictor;
pub use checkpoint::{AccumulatorState, Checkpoint};
pub use codebook::Codebook;
pub use config::PredictorConfig;
pub use encoder::SequenceEncoder;
pub use error::{HdcError, Result};
pub use harness::RunReport;
pub use history::History;
pub use item_memory::ItemMemory;
pub use predictor::{Phase, Prediction, SequencePredictor};
pub use space::{HypervectorSpace, BUNDLE_TIE_BIT};
pub use strategy::{Aggregator, Strategy};
pub use vector::Hypervector;
