//! Error types for the canvas engine

use thiserror::Error;

/// Result type alias using CanvasEngineError
pub type Result<T> = std::result::Result<T, CanvasEngineError>;

/// Errors that can occur in the canvas engine
#[derive(Debug, Error)]
pub enum CanvasEngineError {
    /// A node template id is not present in the catalog
    #[error("Unknown node template: {0}")]
    UnknownTemplate(String),

    /// A node id does not exist in the workflow
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
