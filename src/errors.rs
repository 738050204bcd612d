/*!
 * Error types for the pivotier application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling the external tokenizer/tagger
#[derive(Error, Debug)]
pub enum TaggerError {
    /// Error spawning or talking to the tagger process
    #[error("Tagger process failed: {0}")]
    ProcessFailed(String),

    /// Error parsing the tagger output
    #[error("Failed to parse tagger output: {0}")]
    ParseError(String),

    /// The requested language model is not available
    #[error("Unknown tagger model: {0}")]
    UnknownModel(String),

    /// The tagger cannot be replicated for per-worker use
    #[error("Tagger does not support replication: {0}")]
    ReplicationUnsupported(String),
}

/// Errors that can occur while building or filtering a pivot tree,
/// or while running the batch pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The batch request itself is inconsistent; aborts the whole batch
    /// before any document is processed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A document's declared content kind is not processable
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The document header is missing or lacks its mandatory title
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The markup could not be mapped into the closed node shapes
    #[error("Structural rewrite error: {0}")]
    StructuralRewrite(String),

    /// Error from the external tagger
    #[error("Tagger error: {0}")]
    Tagger(#[from] TaggerError),

    /// Error serializing or deserializing a pivot tree
    #[error("Pivot serialization error: {0}")]
    Serialization(String),

    /// A worker task died without producing a result
    #[error("Worker task failed: {0}")]
    Worker(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the tagger
    #[error("Tagger error: {0}")]
    Tagger(#[from] TaggerError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
