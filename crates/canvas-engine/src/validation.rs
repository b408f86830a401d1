//! Workflow validation
//!
//! The canvas tolerates dangling connection references while editing; the
//! renderer just skips them. Validation surfaces those findings (plus id
//! collisions and unknown templates) before a save or run. All findings
//! are collected, not just the first.
//!
//! There is deliberately no cycle check: nothing in the editor executes
//! the graph, and condition nodes may legitimately route back.

use std::collections::HashSet;

use crate::catalog::NodeCatalog;
use crate::types::Workflow;

/// Which end of a connection a finding refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSide {
    Source,
    Target,
}

impl std::fmt::Display for EndpointSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Validation finding with location context
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// A connection references a node that is not in the workflow
    DanglingEndpoint {
        connection_id: String,
        node_id: String,
        side: EndpointSide,
    },
    /// Two nodes share the same id
    DuplicateNodeId { node_id: String },
    /// Two connections share the same id
    DuplicateConnectionId { connection_id: String },
    /// A node references a template missing from the catalog
    UnknownTemplate { node_id: String, template: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingEndpoint {
                connection_id,
                node_id,
                side,
            } => write!(
                f,
                "Connection '{}' has a dangling {} endpoint '{}'",
                connection_id, side, node_id
            ),
            Self::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node id '{}'", node_id)
            }
            Self::DuplicateConnectionId { connection_id } => {
                write!(f, "Duplicate connection id '{}'", connection_id)
            }
            Self::UnknownTemplate { node_id, template } => {
                write!(f, "Node '{}' uses unknown template '{}'", node_id, template)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a workflow document
///
/// Returns all findings; an empty vector means the document is clean.
/// Pass a catalog to additionally check node templates.
pub fn validate_workflow(workflow: &Workflow, catalog: Option<&NodeCatalog>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_endpoints(workflow, &mut errors);
    check_duplicate_ids(workflow, &mut errors);

    if let Some(catalog) = catalog {
        check_templates(workflow, catalog, &mut errors);
    }

    errors
}

/// Check that every connection endpoint names an existing node
fn check_endpoints(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    let node_ids: HashSet<&str> = workflow.nodes.iter().map(|n| n.id.as_str()).collect();

    for connection in &workflow.connections {
        if !node_ids.contains(connection.source.as_str()) {
            errors.push(ValidationError::DanglingEndpoint {
                connection_id: connection.id.clone(),
                node_id: connection.source.clone(),
                side: EndpointSide::Source,
            });
        }
        if !node_ids.contains(connection.target.as_str()) {
            errors.push(ValidationError::DanglingEndpoint {
                connection_id: connection.id.clone(),
                node_id: connection.target.clone(),
                side: EndpointSide::Target,
            });
        }
    }
}

/// Check node and connection id uniqueness
fn check_duplicate_ids(workflow: &Workflow, errors: &mut Vec<ValidationError>) {
    let mut seen_nodes = HashSet::new();
    for node in &workflow.nodes {
        if !seen_nodes.insert(node.id.as_str()) {
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    let mut seen_connections = HashSet::new();
    for connection in &workflow.connections {
        if !seen_connections.insert(connection.id.as_str()) {
            errors.push(ValidationError::DuplicateConnectionId {
                connection_id: connection.id.clone(),
            });
        }
    }
}

/// Check that every node's template exists in the catalog
fn check_templates(workflow: &Workflow, catalog: &NodeCatalog, errors: &mut Vec<ValidationError>) {
    for node in &workflow.nodes {
        if !catalog.has_template(&node.template) {
            errors.push(ValidationError::UnknownTemplate {
                node_id: node.id.clone(),
                template: node.template.clone(),
            });
        }
    }
}
