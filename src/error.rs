//! Error types for hdpredict.

use thiserror::Error;

/// hdpredict error types.
#[derive(Error, Debug)]
pub enum HdcError {
    /// Operand length does not match the space dimension
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// bind_all / bundle / decode over an empty operand
    #[error("Empty operand: {0}")]
    EmptyOperand(&'static str),

    /// Exact lookup on an absent key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// encode/query before a full k-gram has been processed
    #[error("Insufficient history: processed {processed}, need at least {required}")]
    InsufficientHistory { processed: usize, required: usize },

    /// Attempt to reground a codebook key with a different vector
    #[error("Symbol already grounded to a different vector: {0}")]
    ReboundSymbol(String),

    /// History index the active strategy cannot encode
    #[error("History index {index} not encodable (processed {processed})")]
    HistoryIndex { index: usize, processed: usize },

    /// Component outside {0, 1}
    #[error("Invalid component {value} at index {index}")]
    InvalidComponent { index: usize, value: u8 },

    /// Invalid predictor configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Checkpoint state inconsistent with the supplied history
    #[error("Inconsistent checkpoint: {0}")]
    Checkpoint(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while saving or loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hdpredict operations.
pub type Result<T> = std::result::Result<T, HdcError>;
