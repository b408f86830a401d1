//! Editing session over a workflow document
//!
//! The session is the single owner of everything the canvas displays:
//! the workflow, the selection, the transient drag state, and the undo
//! history. The frontend renders from it and forwards input back into
//! it; it never holds graph state of its own.
//!
//! A session lives as long as the document is open in the editor. It
//! performs no I/O; persistence is the embedder's concern.

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::catalog::NodeCatalog;
use crate::error::{CanvasEngineError, Result};
use crate::events::{EditorEvent, EventSink, NullEventSink};
use crate::interaction::DragState;
use crate::types::{
    Connection, ConnectionId, NodeId, Position, Workflow, WorkflowNode, INPUT_HANDLE, OUTPUT_HANDLE,
};
use crate::undo::UndoStack;

/// Canvas offset applied to a duplicated node
const DUPLICATE_OFFSET: f64 = 50.0;

/// Window where the first node added without an explicit position lands
const SPAWN_X_MIN: f64 = 120.0;
const SPAWN_X_MAX: f64 = 480.0;
const SPAWN_Y_MIN: f64 = 120.0;
const SPAWN_Y_MAX: f64 = 360.0;

/// Per-axis offset separating a spawned node from the previous one
const SPAWN_STEP_MIN: f64 = 40.0;
const SPAWN_STEP_MAX: f64 = 160.0;

/// Stateful editing session for one workflow
pub struct EditorSession {
    pub(crate) workflow: Workflow,
    pub(crate) catalog: Arc<NodeCatalog>,
    pub(crate) selection: Option<NodeId>,
    pub(crate) drag: DragState,
    pub(crate) undo_stack: UndoStack,
    pub(crate) events: Arc<dyn EventSink>,
}

impl EditorSession {
    /// Open a session over a workflow, with events discarded
    pub fn new(workflow: Workflow, catalog: Arc<NodeCatalog>) -> Self {
        Self::with_events(workflow, catalog, Arc::new(NullEventSink))
    }

    /// Open a session that reports changes through the given sink
    pub fn with_events(workflow: Workflow, catalog: Arc<NodeCatalog>, events: Arc<dyn EventSink>) -> Self {
        Self {
            workflow,
            catalog,
            selection: None,
            drag: DragState::Idle,
            undo_stack: UndoStack::default(),
            events,
        }
    }

    /// Cap the undo history at `limit` snapshots
    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.undo_stack = UndoStack::new(limit);
        self
    }

    /// The workflow being edited
    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// The template catalog this session instantiates from
    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    /// Id of the selected node, if any
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected node, if any
    pub fn selected_node(&self) -> Option<&WorkflowNode> {
        self.selection.as_ref().and_then(|id| self.workflow.find_node(id))
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }

    /// Close the session and hand the document back
    pub fn into_workflow(self) -> Workflow {
        self.workflow
    }

    /// Add a node from a template at a pseudo-random spawn position
    ///
    /// The position is offset from the most recently added node; the
    /// first node lands inside a fixed window.
    pub fn add_node(&mut self, template_id: &str) -> Result<NodeId> {
        let position = self.spawn_position();
        self.add_node_at(template_id, position)
    }

    /// Add a node from a template at an explicit position
    pub fn add_node_at(&mut self, template_id: &str, position: Position) -> Result<NodeId> {
        self.ensure_baseline()?;
        let node = self.catalog.instantiate(template_id, position)?;
        let id = node.id.clone();
        self.workflow.insert_node(node);
        self.undo_stack.push(&self.workflow)?;
        self.emit(EditorEvent::NodeAdded {
            workflow_id: self.workflow.id.clone(),
            node_id: id.clone(),
        });
        Ok(id)
    }

    /// Delete a node and every connection touching it
    ///
    /// Clears the selection if the deleted node was selected. Deleting an
    /// unknown id is a no-op.
    pub fn delete_node(&mut self, id: &str) -> Result<()> {
        self.ensure_baseline()?;
        let pruned = self.workflow.connections_touching(id).count();
        let Some(node) = self.workflow.remove_node(id) else {
            return Ok(());
        };
        if self.selection.as_deref() == Some(id) {
            self.set_selection(None);
        }
        if self.drag.involves(id) {
            self.drag = DragState::Idle;
        }
        self.undo_stack.push(&self.workflow)?;
        self.emit(EditorEvent::NodeRemoved {
            workflow_id: self.workflow.id.clone(),
            node_id: node.id,
            pruned_connections: pruned,
        });
        Ok(())
    }

    /// Replace a node's position
    ///
    /// No bounds are enforced and an unknown id is a no-op. Continuous
    /// calls during a drag are not individually undoable; the drag records
    /// one [`checkpoint`] when it completes.
    ///
    /// [`checkpoint`]: EditorSession::checkpoint
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.ensure_baseline()?;
        if let Some(node) = self.workflow.find_node_mut(id) {
            node.position = position;
        }
        Ok(())
    }

    /// Clone a node with a fresh identity, offset by (+50, +50)
    ///
    /// Every field except id and position is copied verbatim.
    pub fn duplicate_node(&mut self, id: &str) -> Result<NodeId> {
        self.ensure_baseline()?;
        let source = self
            .workflow
            .find_node(id)
            .ok_or_else(|| CanvasEngineError::NodeNotFound(id.to_string()))?;

        let mut copy = source.clone();
        copy.id = Uuid::new_v4().to_string();
        copy.position = copy.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
        let new_id = copy.id.clone();

        self.workflow.insert_node(copy);
        self.undo_stack.push(&self.workflow)?;
        self.emit(EditorEvent::NodeAdded {
            workflow_id: self.workflow.id.clone(),
            node_id: new_id.clone(),
        });
        Ok(new_id)
    }

    /// Select a node, or clear the selection with None
    ///
    /// Selecting an id that is not in the workflow clears the selection.
    pub fn select_node(&mut self, id: Option<&str>) {
        let next = id.and_then(|id| self.workflow.find_node(id).map(|n| n.id.clone()));
        self.set_selection(next);
    }

    /// Connect two nodes with the default handles
    ///
    /// Endpoints are not verified: the canvas tolerates dangling
    /// references and validation reports them before a save or run.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<ConnectionId> {
        self.connect_handles(source, OUTPUT_HANDLE, target, INPUT_HANDLE)
    }

    /// Connect two nodes with explicit handles
    pub fn connect_handles(
        &mut self,
        source: &str,
        source_handle: &str,
        target: &str,
        target_handle: &str,
    ) -> Result<ConnectionId> {
        self.ensure_baseline()?;
        let connection = Connection::new(Uuid::new_v4().to_string(), source, target)
            .with_handles(source_handle, target_handle);
        let id = connection.id.clone();
        self.workflow.insert_connection(connection);
        self.undo_stack.push(&self.workflow)?;
        Ok(id)
    }

    /// Remove a connection; an unknown id is a no-op
    pub fn disconnect(&mut self, connection_id: &str) -> Result<()> {
        self.ensure_baseline()?;
        if self.workflow.remove_connection(connection_id).is_some() {
            self.undo_stack.push(&self.workflow)?;
        }
        Ok(())
    }

    /// Write one key of a node's configuration
    ///
    /// Creates the config object if the node's config was not an object.
    pub fn set_config_value(&mut self, id: &str, key: &str, value: serde_json::Value) -> Result<()> {
        self.ensure_baseline()?;
        let node = self
            .workflow
            .find_node_mut(id)
            .ok_or_else(|| CanvasEngineError::NodeNotFound(id.to_string()))?;

        if !node.config.is_object() {
            node.config = serde_json::json!({});
        }
        if let Some(map) = node.config.as_object_mut() {
            map.insert(key.to_string(), value);
        }
        self.undo_stack.push(&self.workflow)
    }

    /// Rename a node
    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.ensure_baseline()?;
        let node = self
            .workflow
            .find_node_mut(id)
            .ok_or_else(|| CanvasEngineError::NodeNotFound(id.to_string()))?;
        node.name = name.into();
        self.undo_stack.push(&self.workflow)
    }

    /// Rename the workflow
    pub fn rename_workflow(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_baseline()?;
        self.workflow.name = name.into();
        self.undo_stack.push(&self.workflow)
    }

    /// Record an undo snapshot of the current state
    ///
    /// Used at the end of a drag, where individual position writes are
    /// deliberately not snapshotted.
    pub fn checkpoint(&mut self) -> Result<()> {
        self.ensure_baseline()?;
        self.undo_stack.push(&self.workflow)
    }

    /// Restore the previous snapshot
    ///
    /// Returns false when there is nothing to undo. The selection is
    /// cleared if the selected node no longer exists after the restore.
    pub fn undo(&mut self) -> Result<bool> {
        match self.undo_stack.undo() {
            Some(workflow) => {
                self.workflow = workflow?;
                self.after_restore();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Restore the next snapshot
    ///
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        match self.undo_stack.redo() {
            Some(workflow) => {
                self.workflow = workflow?;
                self.after_restore();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Swap the selection and emit when it actually changed
    pub(crate) fn set_selection(&mut self, id: Option<NodeId>) {
        if self.selection != id {
            self.selection = id;
            self.emit(EditorEvent::SelectionChanged {
                workflow_id: self.workflow.id.clone(),
                node_id: self.selection.clone(),
            });
        }
    }

    /// Push the pre-mutation state once, so the very first edit of a
    /// session can be undone back to the opening document.
    fn ensure_baseline(&mut self) -> Result<()> {
        if self.undo_stack.is_empty() {
            self.undo_stack.push(&self.workflow)?;
        }
        Ok(())
    }

    fn after_restore(&mut self) {
        self.drag = DragState::Idle;
        let stale = self
            .selection
            .as_ref()
            .is_some_and(|id| self.workflow.find_node(id).is_none());
        if stale {
            self.set_selection(None);
        }
    }

    fn emit(&self, event: EditorEvent) {
        if let Err(e) = self.events.send(event) {
            log::debug!("Dropped editor event: {}", e);
        }
    }

    /// Pseudo-random spawn position: a per-axis offset from the last
    /// node in the workflow, or a spot inside the spawn window when
    /// the canvas is empty.
    fn spawn_position(&self) -> Position {
        let mut rng = rand::rng();
        match self.workflow.nodes.last() {
            Some(prev) => Position::new(
                prev.position.x + rng.random_range(SPAWN_STEP_MIN..SPAWN_STEP_MAX),
                prev.position.y + rng.random_range(SPAWN_STEP_MIN..SPAWN_STEP_MAX),
            ),
            None => Position::new(
                rng.random_range(SPAWN_X_MIN..SPAWN_X_MAX),
                rng.random_range(SPAWN_Y_MIN..SPAWN_Y_MAX),
            ),
        }
    }
}
