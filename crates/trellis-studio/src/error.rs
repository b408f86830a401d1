//! Error types for the studio runtime

use thiserror::Error;

/// Result type alias using StudioError
pub type Result<T> = std::result::Result<T, StudioError>;

/// Errors that can occur in the studio runtime
#[derive(Debug, Error)]
pub enum StudioError {
    /// An engine operation failed
    #[error("Engine error: {0}")]
    Engine(#[from] canvas_engine::CanvasEngineError),

    /// A workflow id is not present in the store
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A workflow could not be serialized for saving
    #[error("Failed to serialize workflow: {0}")]
    Serialize(serde_json::Error),
}
