//! Node template catalog
//!
//! The catalog is the single source of node display metadata: labels,
//! icons, descriptions, default configuration, and the property schema
//! edited in the panel. Nodes on the canvas store only a template id and
//! look the rest up here, so presentation never leaks into the document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CanvasEngineError, Result};
use crate::properties::PropertyField;
use crate::types::{NodeKind, Position, TemplateId, WorkflowNode};

/// Definition of a node template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    /// Unique template identifier (e.g., "webhook-trigger")
    pub template_id: TemplateId,
    /// Role nodes of this template play
    pub kind: NodeKind,
    /// Human-readable label, used as the initial node name
    pub label: String,
    /// Icon key resolved by the frontend
    pub icon: String,
    /// Description for the palette tooltip
    pub description: String,
    /// Configuration cloned into new nodes
    #[serde(default)]
    pub default_config: serde_json::Value,
    /// Fields shown in the properties panel
    #[serde(default)]
    pub fields: Vec<PropertyField>,
}

/// Registry of available node templates
///
/// Stores templates keyed by id and instantiates nodes from them.
pub struct NodeCatalog {
    templates: HashMap<TemplateId, NodeTemplate>,
}

impl NodeCatalog {
    /// Create a catalog with all built-in templates registered
    pub fn new() -> Self {
        let mut templates = HashMap::new();

        // Triggers
        Self::register(&mut templates, webhook_trigger());
        Self::register(&mut templates, schedule_trigger());
        Self::register(&mut templates, manual_trigger());

        // Actions
        Self::register(&mut templates, ai_chat());
        Self::register(&mut templates, ai_image());
        Self::register(&mut templates, http_request());
        Self::register(&mut templates, send_email());
        Self::register(&mut templates, delay());

        // Conditions
        Self::register(&mut templates, branch());

        // Outputs
        Self::register(&mut templates, save_result());
        Self::register(&mut templates, notify());

        Self { templates }
    }

    /// Create an empty catalog (custom template sets, tests)
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    fn register(map: &mut HashMap<TemplateId, NodeTemplate>, template: NodeTemplate) {
        map.insert(template.template_id.clone(), template);
    }

    /// Add or replace a template
    pub fn insert(&mut self, template: NodeTemplate) {
        Self::register(&mut self.templates, template);
    }

    /// Get a template by id
    pub fn get(&self, template_id: &str) -> Option<&NodeTemplate> {
        self.templates.get(template_id)
    }

    /// Check if a template id is registered
    pub fn has_template(&self, template_id: &str) -> bool {
        self.templates.contains_key(template_id)
    }

    /// Get all registered templates
    pub fn all_templates(&self) -> Vec<&NodeTemplate> {
        self.templates.values().collect()
    }

    /// Get templates grouped by kind, for the palette
    pub fn templates_by_kind(&self) -> HashMap<NodeKind, Vec<&NodeTemplate>> {
        let mut grouped: HashMap<NodeKind, Vec<&NodeTemplate>> = HashMap::new();
        for template in self.templates.values() {
            grouped.entry(template.kind).or_default().push(template);
        }
        grouped
    }

    /// List all registered template ids
    pub fn template_ids(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Create a fresh node from a template at the given position
    ///
    /// The new node gets a UUID identity, the template's label as its name,
    /// and a clone of the template's default configuration.
    pub fn instantiate(&self, template_id: &str, position: Position) -> Result<WorkflowNode> {
        let template = self
            .get(template_id)
            .ok_or_else(|| CanvasEngineError::UnknownTemplate(template_id.to_string()))?;

        Ok(WorkflowNode {
            id: Uuid::new_v4().to_string(),
            kind: template.kind,
            name: template.label.clone(),
            template: template.template_id.clone(),
            position,
            config: template.default_config.clone(),
        })
    }
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn webhook_trigger() -> NodeTemplate {
    NodeTemplate {
        template_id: "webhook-trigger".to_string(),
        kind: NodeKind::Trigger,
        label: "Webhook Trigger".to_string(),
        icon: "webhook".to_string(),
        description: "Starts the workflow when a request hits the webhook URL".to_string(),
        default_config: serde_json::json!({"url": "", "method": "POST"}),
        fields: vec![
            PropertyField::text_with_placeholder("url", "Webhook URL", "https://hooks.example.com/..."),
            PropertyField::select("method", "Method", &["GET", "POST", "PUT", "DELETE"]),
        ],
    }
}

fn schedule_trigger() -> NodeTemplate {
    NodeTemplate {
        template_id: "schedule-trigger".to_string(),
        kind: NodeKind::Trigger,
        label: "Schedule Trigger".to_string(),
        icon: "clock".to_string(),
        description: "Starts the workflow on a cron schedule".to_string(),
        default_config: serde_json::json!({"cron": "0 9 * * *"}),
        fields: vec![PropertyField::text_with_placeholder(
            "cron",
            "Cron expression",
            "0 9 * * *",
        )],
    }
}

fn manual_trigger() -> NodeTemplate {
    NodeTemplate {
        template_id: "manual-trigger".to_string(),
        kind: NodeKind::Trigger,
        label: "Manual Trigger".to_string(),
        icon: "play".to_string(),
        description: "Starts the workflow when run by hand".to_string(),
        default_config: serde_json::json!({}),
        fields: vec![],
    }
}

fn ai_chat() -> NodeTemplate {
    NodeTemplate {
        template_id: "ai-chat".to_string(),
        kind: NodeKind::Action,
        label: "AI Chat".to_string(),
        icon: "message".to_string(),
        description: "Sends a prompt to a chat model and captures the reply".to_string(),
        default_config: serde_json::json!({"model": "gpt-4o", "prompt": ""}),
        fields: vec![
            PropertyField::select(
                "model",
                "Model",
                &["gpt-4o", "gpt-4o-mini", "llama-3.3-70b", "mistral-large"],
            ),
            PropertyField::text_with_placeholder("prompt", "Prompt", "Summarize the incoming payload"),
        ],
    }
}

fn ai_image() -> NodeTemplate {
    NodeTemplate {
        template_id: "ai-image".to_string(),
        kind: NodeKind::Action,
        label: "AI Image".to_string(),
        icon: "image".to_string(),
        description: "Generates an image from a text prompt".to_string(),
        default_config: serde_json::json!({"model": "flux-schnell", "prompt": ""}),
        fields: vec![
            PropertyField::select("model", "Model", &["flux-schnell", "sdxl"]),
            PropertyField::text("prompt", "Prompt"),
        ],
    }
}

fn http_request() -> NodeTemplate {
    NodeTemplate {
        template_id: "http-request".to_string(),
        kind: NodeKind::Action,
        label: "HTTP Request".to_string(),
        icon: "globe".to_string(),
        description: "Calls an external API".to_string(),
        default_config: serde_json::json!({"url": "", "method": "GET"}),
        fields: vec![
            PropertyField::text_with_placeholder("url", "URL", "https://api.example.com/v1/..."),
            PropertyField::select("method", "Method", &["GET", "POST", "PUT", "PATCH", "DELETE"]),
        ],
    }
}

fn send_email() -> NodeTemplate {
    NodeTemplate {
        template_id: "send-email".to_string(),
        kind: NodeKind::Action,
        label: "Send Email".to_string(),
        icon: "mail".to_string(),
        description: "Sends an email through the configured provider".to_string(),
        default_config: serde_json::json!({"to": "", "subject": ""}),
        fields: vec![
            PropertyField::text_with_placeholder("to", "To", "team@example.com"),
            PropertyField::text("subject", "Subject"),
        ],
    }
}

fn delay() -> NodeTemplate {
    NodeTemplate {
        template_id: "delay".to_string(),
        kind: NodeKind::Action,
        label: "Delay".to_string(),
        icon: "timer".to_string(),
        description: "Pauses the workflow for a fixed duration".to_string(),
        default_config: serde_json::json!({"seconds": 5.0}),
        fields: vec![PropertyField::number("seconds", "Seconds")],
    }
}

fn branch() -> NodeTemplate {
    NodeTemplate {
        template_id: "branch".to_string(),
        kind: NodeKind::Condition,
        label: "Branch".to_string(),
        icon: "git-branch".to_string(),
        description: "Routes the flow based on an expression".to_string(),
        default_config: serde_json::json!({"expression": ""}),
        fields: vec![PropertyField::text_with_placeholder(
            "expression",
            "Expression",
            "status == 200",
        )],
    }
}

fn save_result() -> NodeTemplate {
    NodeTemplate {
        template_id: "save-result".to_string(),
        kind: NodeKind::Output,
        label: "Save Result".to_string(),
        icon: "database".to_string(),
        description: "Stores the workflow result".to_string(),
        default_config: serde_json::json!({"destination": "table"}),
        fields: vec![PropertyField::select(
            "destination",
            "Destination",
            &["table", "file", "webhook"],
        )],
    }
}

fn notify() -> NodeTemplate {
    NodeTemplate {
        template_id: "notify".to_string(),
        kind: NodeKind::Output,
        label: "Notify".to_string(),
        icon: "bell".to_string(),
        description: "Posts a message to a channel".to_string(),
        default_config: serde_json::json!({"channel": "#general", "message": ""}),
        fields: vec![
            PropertyField::text("channel", "Channel"),
            PropertyField::text("message", "Message"),
        ],
    }
}
