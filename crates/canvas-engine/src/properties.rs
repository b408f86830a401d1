//! Schema-driven properties editing
//!
//! The properties panel renders one control per field of the selected
//! node's template and writes edits straight back into the node's
//! configuration. Values are stored as entered; the only coercion is
//! numeric fields parsing as f64 with invalid input defaulting to 0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::NodeCatalog;
use crate::editor::EditorSession;
use crate::error::Result;
use crate::types::{Position, WorkflowNode};

/// The widget used to edit a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyControl {
    /// Free-text input
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    /// Dropdown with a fixed option list
    ///
    /// Membership is not enforced on write; the stored value is whatever
    /// the frontend submitted.
    Select { options: Vec<String> },
    /// Numeric input, stored as a JSON number
    Number,
}

/// One editable field of a node template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyField {
    /// Key in the node's config object
    pub key: String,
    /// Human-readable label
    pub label: String,
    /// Widget to render
    pub control: PropertyControl,
}

impl PropertyField {
    /// Create a text field
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: PropertyControl::Text { placeholder: None },
        }
    }

    /// Create a text field with a placeholder
    pub fn text_with_placeholder(
        key: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: PropertyControl::Text {
                placeholder: Some(placeholder.into()),
            },
        }
    }

    /// Create a select field with the given options
    pub fn select(key: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: PropertyControl::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// Create a numeric field
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: PropertyControl::Number,
        }
    }
}

/// Canvas axis for position fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Get the property schema for a node
///
/// Returns an empty slice when the node's template is not in the catalog.
pub fn fields_for<'a>(catalog: &'a NodeCatalog, node: &WorkflowNode) -> &'a [PropertyField] {
    catalog
        .get(&node.template)
        .map(|t| t.fields.as_slice())
        .unwrap_or(&[])
}

/// Apply raw form input to one config field of a node
///
/// Text and select values are stored as entered. Numeric fields parse as
/// f64 and fall back to 0 on invalid input.
pub fn apply_field(
    session: &mut EditorSession,
    node_id: &str,
    field: &PropertyField,
    raw: &str,
) -> Result<()> {
    let value = match &field.control {
        PropertyControl::Number => Value::from(parse_number(raw)),
        _ => Value::String(raw.to_string()),
    };
    session.set_config_value(node_id, &field.key, value)
}

/// Apply raw form input to one axis of a node's position
///
/// Uses the same default-to-0 coercion as numeric config fields. Records
/// an undo snapshot, unlike the continuous position writes of a drag.
pub fn apply_position_field(
    session: &mut EditorSession,
    node_id: &str,
    axis: Axis,
    raw: &str,
) -> Result<()> {
    let value = parse_number(raw);
    let Some(node) = session.workflow().find_node(node_id) else {
        return Ok(());
    };
    let position = match axis {
        Axis::X => Position::new(value, node.position.y),
        Axis::Y => Position::new(node.position.x, value),
    };
    session.move_node(node_id, position)?;
    session.checkpoint()
}

/// Render a config value for an edit box
///
/// Strings are shown unquoted; other JSON values use their literal form.
/// A missing key renders as the empty string.
pub fn config_text(node: &WorkflowNode, key: &str) -> String {
    match node.config.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeCatalog;
    use crate::types::Workflow;
    use std::sync::Arc;

    fn session_with_node(template: &str) -> (EditorSession, String) {
        let catalog = Arc::new(NodeCatalog::new());
        let mut session = EditorSession::new(Workflow::new("wf", "Test"), catalog);
        let id = session
            .add_node_at(template, Position::new(100.0, 100.0))
            .unwrap();
        (session, id)
    }

    #[test]
    fn test_fields_for_known_template() {
        let catalog = NodeCatalog::new();
        let node = catalog
            .instantiate("webhook-trigger", Position::default())
            .unwrap();
        let fields = fields_for(&catalog, &node);
        assert!(fields.iter().any(|f| f.key == "url"));
        assert!(fields.iter().any(|f| f.key == "method"));
    }

    #[test]
    fn test_fields_for_unknown_template_is_empty() {
        let catalog = NodeCatalog::new();
        let mut node = catalog
            .instantiate("webhook-trigger", Position::default())
            .unwrap();
        node.template = "gone".to_string();
        assert!(fields_for(&catalog, &node).is_empty());
    }

    #[test]
    fn test_text_stored_as_entered() {
        let (mut session, id) = session_with_node("webhook-trigger");
        let field = PropertyField::text("url", "URL");
        apply_field(&mut session, &id, &field, "not a url at all").unwrap();

        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.config["url"], "not a url at all");
    }

    #[test]
    fn test_select_membership_not_enforced() {
        let (mut session, id) = session_with_node("webhook-trigger");
        let field = PropertyField::select("method", "Method", &["GET", "POST"]);
        apply_field(&mut session, &id, &field, "TELEPORT").unwrap();

        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.config["method"], "TELEPORT");
    }

    #[test]
    fn test_number_coercion() {
        let (mut session, id) = session_with_node("delay");
        let field = PropertyField::number("seconds", "Seconds");

        apply_field(&mut session, &id, &field, " 12.5 ").unwrap();
        assert_eq!(
            session.workflow().find_node(&id).unwrap().config["seconds"],
            12.5
        );

        apply_field(&mut session, &id, &field, "twelve").unwrap();
        assert_eq!(
            session.workflow().find_node(&id).unwrap().config["seconds"],
            0.0
        );
    }

    #[test]
    fn test_position_fields() {
        let (mut session, id) = session_with_node("ai-chat");

        apply_position_field(&mut session, &id, Axis::X, "250").unwrap();
        apply_position_field(&mut session, &id, Axis::Y, "nope").unwrap();

        let node = session.workflow().find_node(&id).unwrap();
        assert_eq!(node.position.x, 250.0);
        assert_eq!(node.position.y, 0.0);
    }

    #[test]
    fn test_position_field_unknown_node_is_noop() {
        let (mut session, _) = session_with_node("ai-chat");
        apply_position_field(&mut session, "missing", Axis::X, "10").unwrap();
    }

    #[test]
    fn test_config_text_rendering() {
        let catalog = NodeCatalog::new();
        let mut node = catalog
            .instantiate("delay", Position::default())
            .unwrap();
        node.config = serde_json::json!({"seconds": 5.0, "label": "wait"});

        assert_eq!(config_text(&node, "label"), "wait");
        assert_eq!(config_text(&node, "seconds"), "5.0");
        assert_eq!(config_text(&node, "missing"), "");
    }
}
