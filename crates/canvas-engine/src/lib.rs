//! Canvas Engine - workflow graph editing for Trellis
//!
//! This crate owns everything the automation canvas displays and
//! mutates. The frontend is a thin display layer: it renders the
//! session's workflow, selection, and connection curves, and forwards
//! pointer and form input back in. It supports:
//!
//! - A workflow document model (nodes, connections, positions, config)
//! - A template catalog separating display metadata from the document
//! - Single selection and a three-state pointer drag gesture
//! - Schema-driven properties editing with minimal coercion
//! - Cubic Bezier connection geometry that tolerates dangling references
//! - Compressed snapshot-based undo/redo
//!
//! # Architecture
//!
//! [`EditorSession`] is the explicit state holder: one session per open
//! workflow, owning the document, the selection, the drag state, and the
//! undo stack. Sessions perform no I/O; persistence and the run
//! collaborator live in `trellis-studio` above this crate. State changes
//! stream out through [`EventSink`], which abstracts over the transport
//! to the display layer.
//!
//! # Example
//!
//! ```ignore
//! use canvas_engine::{EditorSession, NodeCatalog, Position, Workflow};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(NodeCatalog::new());
//! let mut session = EditorSession::new(Workflow::new("wf-1", "Lead intake"), catalog);
//!
//! let hook = session.add_node_at("webhook-trigger", Position::new(100.0, 100.0))?;
//! let chat = session.add_node("ai-chat")?;
//! session.connect(&hook, &chat)?;
//! ```

pub mod builder;
pub mod catalog;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod interaction;
pub mod properties;
pub mod types;
pub mod undo;
pub mod validation;

// Re-export key types
pub use builder::WorkflowBuilder;
pub use catalog::{NodeCatalog, NodeTemplate};
pub use editor::EditorSession;
pub use error::{CanvasEngineError, Result};
pub use events::{EditorEvent, EventError, EventSink, NullEventSink, VecEventSink};
pub use geometry::{connection_paths, ConnectionPath};
pub use interaction::DragState;
pub use properties::{PropertyControl, PropertyField};
pub use types::{Connection, NodeKind, Position, Workflow, WorkflowNode};
pub use undo::UndoStack;
pub use validation::{validate_workflow, EndpointSide, ValidationError};
