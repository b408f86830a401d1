//! Canvas pointer interaction
//!
//! Translates raw pointer input into selection and node movement. The
//! gesture is a small state machine: pressing on a node arms a drag
//! without starting it, the first movement converts it into a drag, and
//! every further movement writes the node's position so the canvas
//! follows the pointer live. Release or leaving the canvas ends the
//! gesture where it stands; there is no cancel.

use crate::editor::EditorSession;
use crate::error::Result;
use crate::geometry;
use crate::types::{NodeId, Position};

/// State of the canvas drag gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    /// No pointer interaction in progress
    Idle,
    /// Pointer is down on a node; becomes a drag on first movement
    Armed {
        node: NodeId,
        /// Pointer position relative to the node origin at press time,
        /// kept so the node does not jump to the cursor
        grab_offset: Position,
    },
    /// Node follows the pointer; every movement writes its position
    Dragging { node: NodeId, grab_offset: Position },
}

impl DragState {
    /// Check whether this state references the given node
    pub fn involves(&self, node_id: &str) -> bool {
        match self {
            Self::Idle => false,
            Self::Armed { node, .. } | Self::Dragging { node, .. } => node == node_id,
        }
    }

    /// Check whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

impl EditorSession {
    /// Current drag state
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Check whether a node is being dragged
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer pressed at canvas coordinates
    ///
    /// On a node: select it and arm a drag. On empty canvas: clear the
    /// selection. Overlapping nodes resolve to the topmost one.
    pub fn pointer_down(&mut self, point: Position) {
        match geometry::hit_test(&self.workflow, point) {
            Some(node) => {
                let node_id = node.id.clone();
                let grab_offset = Position::new(point.x - node.position.x, point.y - node.position.y);
                self.set_selection(Some(node_id.clone()));
                self.drag = DragState::Armed {
                    node: node_id,
                    grab_offset,
                };
            }
            None => {
                self.set_selection(None);
                self.drag = DragState::Idle;
            }
        }
    }

    /// Pointer moved to canvas coordinates
    ///
    /// Arms become drags on the first movement. While dragging, the node
    /// origin tracks `point - grab_offset`; intermediate positions are
    /// written to the workflow, not batched.
    pub fn pointer_move(&mut self, point: Position) -> Result<()> {
        let (node, grab_offset) = match &self.drag {
            DragState::Idle => return Ok(()),
            DragState::Armed { node, grab_offset } | DragState::Dragging { node, grab_offset } => {
                (node.clone(), *grab_offset)
            }
        };

        self.drag = DragState::Dragging {
            node: node.clone(),
            grab_offset,
        };
        self.move_node(
            &node,
            Position::new(point.x - grab_offset.x, point.y - grab_offset.y),
        )
    }

    /// Pointer released
    ///
    /// The node stays where the last movement put it. A drag that
    /// actually moved records a single undo snapshot.
    pub fn pointer_up(&mut self) -> Result<()> {
        let was_dragging = self.drag.is_dragging();
        self.drag = DragState::Idle;
        if was_dragging {
            self.checkpoint()?;
        }
        Ok(())
    }

    /// Pointer left the canvas mid-gesture; handled like a release
    pub fn pointer_leave(&mut self) -> Result<()> {
        self.pointer_up()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeCatalog;
    use crate::types::Workflow;
    use std::sync::Arc;

    fn session_with_node_at(x: f64, y: f64) -> (EditorSession, String) {
        let catalog = Arc::new(NodeCatalog::new());
        let mut session = EditorSession::new(Workflow::new("wf", "Test"), catalog);
        let id = session
            .add_node_at("ai-chat", Position::new(x, y))
            .unwrap();
        (session, id)
    }

    #[test]
    fn test_press_selects_and_arms() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        session.pointer_down(Position::new(110.0, 105.0));

        assert_eq!(session.selection(), Some(id.as_str()));
        assert!(!session.is_dragging());
        assert!(matches!(
            session.drag_state(),
            DragState::Armed { node, grab_offset }
                if *node == id && *grab_offset == Position::new(10.0, 5.0)
        ));
    }

    #[test]
    fn test_press_on_empty_canvas_deselects() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);
        session.select_node(Some(&id));

        session.pointer_down(Position::new(900.0, 900.0));

        assert!(session.selection().is_none());
        assert_eq!(*session.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_follows_pointer_without_jump() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        // Grab 16px into the card; the origin must stay 16px behind the cursor
        session.pointer_down(Position::new(116.0, 112.0));
        session.pointer_move(Position::new(140.0, 120.0)).unwrap();

        assert!(session.is_dragging());
        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.position, Position::new(124.0, 108.0));
    }

    #[test]
    fn test_drag_is_cumulative_across_moves() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        session.pointer_down(Position::new(110.0, 110.0));
        session.pointer_move(Position::new(125.0, 104.0)).unwrap();
        session.pointer_move(Position::new(131.0, 99.0)).unwrap();
        session.pointer_move(Position::new(140.0, 100.0)).unwrap();
        session.pointer_up().unwrap();

        // Net pointer delta is (+30, -10) from the press point
        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.position, Position::new(130.0, 90.0));
        assert_eq!(*session.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_press_without_move_changes_nothing() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        session.pointer_down(Position::new(150.0, 140.0));
        session.pointer_up().unwrap();

        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.position, Position::new(100.0, 100.0));

        // No drag snapshot was recorded: the first undo unwinds the add
        // itself instead of restoring a pre-drag position
        assert!(session.undo().unwrap());
        assert!(session.workflow().nodes.is_empty());
    }

    #[test]
    fn test_pointer_leave_ends_drag_in_place() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        session.pointer_down(Position::new(110.0, 110.0));
        session.pointer_move(Position::new(160.0, 150.0)).unwrap();
        session.pointer_leave().unwrap();

        let after_leave = session.workflow().find_node(&id).unwrap().position;
        assert_eq!(after_leave, Position::new(150.0, 140.0));

        // Later movement is ignored once the gesture ended
        session.pointer_move(Position::new(400.0, 400.0)).unwrap();
        assert_eq!(
            session.workflow().find_node(&id).unwrap().position,
            after_leave
        );
    }

    #[test]
    fn test_drag_undoes_as_one_step() {
        let (mut session, id) = session_with_node_at(100.0, 100.0);

        session.pointer_down(Position::new(110.0, 110.0));
        session.pointer_move(Position::new(130.0, 130.0)).unwrap();
        session.pointer_move(Position::new(180.0, 160.0)).unwrap();
        session.pointer_up().unwrap();

        assert!(session.undo().unwrap());
        assert_eq!(
            session.workflow().find_node(&id).unwrap().position,
            Position::new(100.0, 100.0)
        );
    }

    #[test]
    fn test_overlapping_nodes_drag_topmost() {
        let (mut session, _a) = session_with_node_at(100.0, 100.0);
        let b = session
            .add_node_at("delay", Position::new(150.0, 120.0))
            .unwrap();

        session.pointer_down(Position::new(160.0, 130.0));
        session.pointer_move(Position::new(170.0, 130.0)).unwrap();

        assert_eq!(session.selection(), Some(b.as_str()));
        assert_eq!(
            session.workflow().find_node(&b).unwrap().position,
            Position::new(160.0, 120.0)
        );
    }
}
