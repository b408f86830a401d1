//! Editor events streamed to the frontend
//!
//! Events report state changes out of the engine so the display layer can
//! react without polling. The sink trait abstracts over the transport
//! (IPC channel, websocket, mpsc) so the engine stays host-agnostic.

use serde::{Deserialize, Serialize};

/// Trait for delivering editor events
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be delivered (e.g., the
    /// channel closed). Delivery failures never fail the editing
    /// operation that produced the event.
    fn send(&self, event: EditorEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn channel_closed() -> Self {
        Self {
            message: "Channel closed".to_string(),
        }
    }
}

/// Events emitted by the editor and the run collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// A node was placed on the canvas
    #[serde(rename_all = "camelCase")]
    NodeAdded {
        workflow_id: String,
        node_id: String,
    },

    /// A node was deleted, along with every connection touching it
    #[serde(rename_all = "camelCase")]
    NodeRemoved {
        workflow_id: String,
        node_id: String,
        pruned_connections: usize,
    },

    /// The single selection changed (None means nothing is selected)
    #[serde(rename_all = "camelCase")]
    SelectionChanged {
        workflow_id: String,
        node_id: Option<String>,
    },

    /// The workflow was persisted
    #[serde(rename_all = "camelCase")]
    WorkflowSaved { workflow_id: String },

    /// A run was started
    #[serde(rename_all = "camelCase")]
    RunStarted {
        workflow_id: String,
        execution_id: String,
    },

    /// A run finished
    #[serde(rename_all = "camelCase")]
    RunCompleted {
        workflow_id: String,
        execution_id: String,
    },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: EditorEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: std::sync::Mutex<Vec<EditorEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: EditorEvent) -> Result<(), EventError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
