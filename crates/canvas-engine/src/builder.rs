//! Fluent builder for workflow documents
//!
//! Provides a concise API for assembling workflows programmatically,
//! used heavily by tests and available to embedders.
//!
//! # Example
//!
//! ```ignore
//! let workflow = WorkflowBuilder::new("wf-1", "Lead intake")
//!     .trigger("hook", "webhook-trigger", (100.0, 100.0))
//!     .action("chat", "ai-chat", (400.0, 100.0))
//!     .with_config(serde_json::json!({"model": "gpt-4o"}))
//!     .connect("hook", "chat")
//!     .build();
//! ```

use crate::types::{Connection, NodeKind, Position, Workflow, WorkflowNode};

/// Fluent builder for constructing workflows
pub struct WorkflowBuilder {
    id: String,
    name: String,
    nodes: Vec<WorkflowNode>,
    connections: Vec<Connection>,
    connection_counter: usize,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
            connection_counter: 0,
        }
    }

    /// Add a node with an explicit kind
    ///
    /// The node's name defaults to its template id; use [`named`] to
    /// override it.
    ///
    /// [`named`]: WorkflowBuilder::named
    pub fn node(
        mut self,
        id: impl Into<String>,
        kind: NodeKind,
        template: impl Into<String>,
        position: (f64, f64),
    ) -> Self {
        let template = template.into();
        self.nodes.push(WorkflowNode {
            id: id.into(),
            kind,
            name: template.clone(),
            template,
            position: Position::new(position.0, position.1),
            config: serde_json::Value::Null,
        });
        self
    }

    /// Add a trigger node
    pub fn trigger(self, id: impl Into<String>, template: impl Into<String>, position: (f64, f64)) -> Self {
        self.node(id, NodeKind::Trigger, template, position)
    }

    /// Add an action node
    pub fn action(self, id: impl Into<String>, template: impl Into<String>, position: (f64, f64)) -> Self {
        self.node(id, NodeKind::Action, template, position)
    }

    /// Add a condition node
    pub fn condition(self, id: impl Into<String>, template: impl Into<String>, position: (f64, f64)) -> Self {
        self.node(id, NodeKind::Condition, template, position)
    }

    /// Add an output node
    pub fn output(self, id: impl Into<String>, template: impl Into<String>, position: (f64, f64)) -> Self {
        self.node(id, NodeKind::Output, template, position)
    }

    /// Set the display name of the most recently added node
    ///
    /// Must be called after a node method.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.name = name.into();
        }
        self
    }

    /// Set the configuration of the most recently added node
    ///
    /// Must be called after a node method.
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        if let Some(node) = self.nodes.last_mut() {
            node.config = config;
        }
        self
    }

    /// Connect two nodes with default handles (auto-generates the id)
    pub fn connect(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.connection_counter += 1;
        self.connections.push(Connection::new(
            format!("conn-{}", self.connection_counter),
            source,
            target,
        ));
        self
    }

    /// Connect two nodes with explicit handles (auto-generates the id)
    pub fn connect_handles(
        mut self,
        source: impl Into<String>,
        source_handle: impl Into<String>,
        target: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.connection_counter += 1;
        self.connections.push(
            Connection::new(format!("conn-{}", self.connection_counter), source, target)
                .with_handles(source_handle, target_handle),
        );
        self
    }

    /// Build the workflow
    pub fn build(self) -> Workflow {
        let mut workflow = Workflow::new(self.id, self.name);
        workflow.nodes = self.nodes;
        workflow.connections = self.connections;
        workflow
    }
}
