//! Canvas geometry: node footprints, hit-testing, and connection curves
//!
//! Everything here is derived from the workflow document; nothing is
//! stored. The frontend draws nodes as fixed-size cards and connections
//! as cubic Bezier curves between the source's right edge and the
//! target's left edge.

use serde::Serialize;

use crate::types::{Connection, ConnectionId, Position, Workflow, WorkflowNode};

/// Width of a node card on the canvas
pub const NODE_WIDTH: f64 = 192.0;

/// Height of a node card on the canvas
pub const NODE_HEIGHT: f64 = 80.0;

/// Horizontal pull of a connection's control points
const CURVE_EXTENT: f64 = 50.0;

/// Axis-aligned bounding box of a node card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    pub min: Position,
    pub max: Position,
}

impl NodeRect {
    /// Check whether a canvas point falls inside this rect
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Bounding box of a node at its current position
pub fn node_rect(node: &WorkflowNode) -> NodeRect {
    NodeRect {
        min: node.position,
        max: node.position.offset(NODE_WIDTH, NODE_HEIGHT),
    }
}

/// Find the topmost node under a canvas point
///
/// Nodes later in the document are drawn on top, so the scan runs in
/// reverse z-order.
pub fn hit_test<'a>(workflow: &'a Workflow, point: Position) -> Option<&'a WorkflowNode> {
    workflow
        .nodes
        .iter()
        .rev()
        .find(|node| node_rect(node).contains(point))
}

/// Anchor where connections leave a node (right edge, mid height)
pub fn source_anchor(node: &WorkflowNode) -> Position {
    node.position.offset(NODE_WIDTH, NODE_HEIGHT / 2.0)
}

/// Anchor where connections enter a node (left edge, mid height)
pub fn target_anchor(node: &WorkflowNode) -> Position {
    node.position.offset(0.0, NODE_HEIGHT / 2.0)
}

/// Render data for one connection curve
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPath {
    /// Connection this path renders
    pub connection_id: ConnectionId,
    /// Curve start (source anchor)
    pub from: Position,
    /// First control point
    pub ctrl1: Position,
    /// Second control point
    pub ctrl2: Position,
    /// Curve end (target anchor)
    pub to: Position,
}

impl ConnectionPath {
    /// Emit the SVG path string for this curve
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.from.x,
            self.from.y,
            self.ctrl1.x,
            self.ctrl1.y,
            self.ctrl2.x,
            self.ctrl2.y,
            self.to.x,
            self.to.y
        )
    }
}

/// Compute the curve for one connection
///
/// Returns None when either endpoint node is missing from the workflow.
pub fn path_for(workflow: &Workflow, connection: &Connection) -> Option<ConnectionPath> {
    let source = workflow.find_node(&connection.source)?;
    let target = workflow.find_node(&connection.target)?;

    let from = source_anchor(source);
    let to = target_anchor(target);

    Some(ConnectionPath {
        connection_id: connection.id.clone(),
        from,
        ctrl1: from.offset(CURVE_EXTENT, 0.0),
        ctrl2: to.offset(-CURVE_EXTENT, 0.0),
        to,
    })
}

/// Compute curves for every drawable connection
///
/// Connections whose source or target node is missing are skipped
/// without error; the document may hold dangling references and the
/// canvas simply does not draw them.
pub fn connection_paths(workflow: &Workflow) -> Vec<ConnectionPath> {
    workflow
        .connections
        .iter()
        .filter_map(|connection| path_for(workflow, connection))
        .collect()
}
