//! Error types for truncflow.
//!
//! This crate provides:
//! - [`TfError`] - Top-level error enum for every truncflow crate
//! - Domain-specific errors ([`TransformError`], [`ReaderError`])
//! - [`ProcessingStage`] for attaching context to diagnostics

use thiserror::Error;

/// Top-level error type for truncflow.
#[derive(Error, Debug)]
pub enum TfError {
    /// Transform errors (condition compilation and evaluation)
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Reader errors (config files, event input)
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TfError {
    /// Returns true if this error came from evaluating a rule condition.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::Transform(TransformError::Evaluation(_)))
    }
}

/// Transform-related errors.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Condition expression failed to compile
    #[error("Condition compilation failed: {0}")]
    Compilation(String),

    /// Condition expression failed at evaluation time
    #[error("Condition evaluation failed: {0}")]
    Evaluation(String),
}

/// Reader-related errors.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),

    /// I/O error during read or write
    #[error("I/O error: {0}")]
    Io(String),

    /// Input is not in the expected format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Processing stage for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Loading and validating rule configuration
    ConfigLoad,

    /// Parsing input events
    EventParse,

    /// Writing processed events
    EventWrite,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoad => write!(f, "ConfigLoad"),
            Self::EventParse => write!(f, "EventParse"),
            Self::EventWrite => write!(f, "EventWrite"),
        }
    }
}

/// Result type alias using TfError.
pub type Result<T> = std::result::Result<T, TfError>;
