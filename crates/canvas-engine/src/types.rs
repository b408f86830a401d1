//! Core types for workflow canvas documents
//!
//! These types define the structure of an automation workflow as edited
//! on the canvas: nodes with positions and configuration, and the
//! connections wiring them together.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for a connection
pub type ConnectionId = String;

/// Unique identifier for a workflow
pub type WorkflowId = String;

/// Identifier of a node template in the catalog
pub type TemplateId = String;

/// Default output handle on a node's source side
pub const OUTPUT_HANDLE: &str = "out";

/// Default input handle on a node's target side
pub const INPUT_HANDLE: &str = "in";

/// The role a node plays in a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Starts the workflow (webhook, schedule, manual)
    Trigger,
    /// Performs work (AI call, HTTP request, email)
    Action,
    /// Routes the flow based on its configuration
    Condition,
    /// Delivers or stores the final result
    Output,
}

/// Position on the canvas
///
/// Coordinates are unbounded; nodes may be dragged off the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position from coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this position translated by (dx, dy)
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A node instance placed on the canvas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// Role of the node
    pub kind: NodeKind,
    /// Display name shown on the node card
    pub name: String,
    /// Template this node was created from (display metadata such as the
    /// icon and property schema is looked up in the catalog, not stored here)
    pub template: TemplateId,
    /// Position on the canvas
    pub position: Position,
    /// Free-form configuration edited in the properties panel
    #[serde(default)]
    pub config: serde_json::Value,
}

/// A connection between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Unique identifier for this connection
    pub id: ConnectionId,
    /// Source node ID
    pub source: NodeId,
    /// Handle on the source node
    pub source_handle: String,
    /// Target node ID
    pub target: NodeId,
    /// Handle on the target node
    pub target_handle: String,
}

impl Connection {
    /// Create a connection using the default handles
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            source_handle: OUTPUT_HANDLE.to_string(),
            target: target.into(),
            target_handle: INPUT_HANDLE.to_string(),
        }
    }

    /// Override the source and target handles
    pub fn with_handles(mut self, source_handle: impl Into<String>, target_handle: impl Into<String>) -> Self {
        self.source_handle = source_handle.into();
        self.target_handle = target_handle.into();
        self
    }

    /// Check whether this connection touches the given node on either side
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A complete workflow document
///
/// Connections are owned by the workflow; a node's fan-in and fan-out are
/// derived queries rather than stored lists, so the two can never drift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Unique identifier for this workflow
    pub id: WorkflowId,
    /// Human-readable name
    pub name: String,
    /// Nodes on the canvas, in z-order (last is topmost)
    pub nodes: Vec<WorkflowNode>,
    /// Connections between nodes
    pub connections: Vec<Connection>,
}

impl Workflow {
    /// Create a new empty workflow
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Find a connection by ID
    pub fn find_connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Get connections leaving a node
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.source == node_id)
    }

    /// Get connections arriving at a node
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.target == node_id)
    }

    /// Get connections touching a node on either side
    pub fn connections_touching<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.touches(node_id))
    }

    /// Add a node to the canvas
    pub fn insert_node(&mut self, node: WorkflowNode) {
        self.nodes.push(node);
    }

    /// Remove a node and every connection referencing it
    ///
    /// Pruning covers both directions, so no dangling connection can be
    /// left behind by a delete. Returns the removed node if it existed.
    pub fn remove_node(&mut self, id: &str) -> Option<WorkflowNode> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(pos);
        self.connections.retain(|c| !c.touches(id));
        Some(node)
    }

    /// Add a connection between nodes
    pub fn insert_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Remove a connection by ID, returning it if it existed
    pub fn remove_connection(&mut self, id: &str) -> Option<Connection> {
        let pos = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_node(id: &str, kind: NodeKind) -> WorkflowNode {
        WorkflowNode {
            id: id.to_string(),
            kind,
            name: id.to_string(),
            template: "test".to_string(),
            position: Position::default(),
            config: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_queries() {
        let mut workflow = Workflow::new("wf", "Test");
        workflow.insert_node(make_node("a", NodeKind::Trigger));
        workflow.insert_node(make_node("b", NodeKind::Action));
        workflow.insert_connection(Connection::new("c1", "a", "b"));

        assert!(workflow.find_node("a").is_some());
        assert!(workflow.find_node("missing").is_none());
        assert_eq!(workflow.outgoing("a").count(), 1);
        assert_eq!(workflow.incoming("b").count(), 1);
        assert_eq!(workflow.incoming("a").count(), 0);
        assert_eq!(workflow.connections_touching("b").count(), 1);
    }

    #[test]
    fn test_remove_node_prunes_both_directions() {
        let mut workflow = Workflow::new("wf", "Test");
        workflow.insert_node(make_node("a", NodeKind::Trigger));
        workflow.insert_node(make_node("b", NodeKind::Action));
        workflow.insert_node(make_node("c", NodeKind::Output));
        workflow.insert_connection(Connection::new("c1", "a", "b"));
        workflow.insert_connection(Connection::new("c2", "b", "c"));
        workflow.insert_connection(Connection::new("c3", "a", "c"));

        let removed = workflow.remove_node("b");
        assert!(removed.is_some());
        assert_eq!(workflow.nodes.len(), 2);
        // Both the incoming and the outgoing connection of "b" are gone
        assert_eq!(workflow.connections.len(), 1);
        assert_eq!(workflow.connections[0].id, "c3");
        assert!(workflow.connections_touching("b").next().is_none());
    }

    #[test]
    fn test_remove_missing_node_is_noop() {
        let mut workflow = Workflow::new("wf", "Test");
        workflow.insert_node(make_node("a", NodeKind::Trigger));
        assert!(workflow.remove_node("missing").is_none());
        assert_eq!(workflow.nodes.len(), 1);
    }

    #[test]
    fn test_remove_connection() {
        let mut workflow = Workflow::new("wf", "Test");
        workflow.insert_node(make_node("a", NodeKind::Trigger));
        workflow.insert_node(make_node("b", NodeKind::Action));
        workflow.insert_connection(Connection::new("c1", "a", "b"));

        assert!(workflow.remove_connection("c1").is_some());
        assert!(workflow.remove_connection("c1").is_none());
        assert!(workflow.connections.is_empty());
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let node = make_node("a", NodeKind::Condition);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "condition");
        assert!(json.get("template").is_some());

        let conn = Connection::new("c1", "a", "b").with_handles("true", "in");
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["sourceHandle"], "true");
        assert_eq!(json["targetHandle"], "in");
    }
}
