//! Studio facade
//!
//! Wires the engine, the workflow store, and the runner together behind
//! one entry point. The studio hands out [`EditorSession`]s for editing
//! and takes them back for saving and running.

use std::sync::Arc;
use std::time::Duration;

use canvas_engine::{
    validate_workflow, EditorEvent, EditorSession, EventSink, NodeCatalog, NullEventSink, Workflow,
};
use uuid::Uuid;

use crate::config::StudioConfig;
use crate::error::{Result, StudioError};
use crate::runner::{RunSummary, SimulatedRunner, WorkflowRunner};
use crate::store::{WorkflowFile, WorkflowStore, WorkflowSummary};

/// Top-level studio runtime
pub struct Studio {
    catalog: Arc<NodeCatalog>,
    store: WorkflowStore,
    runner: Arc<dyn WorkflowRunner>,
    events: Arc<dyn EventSink>,
    config: StudioConfig,
}

impl Studio {
    /// Create a studio with events discarded
    pub fn new(config: StudioConfig) -> Self {
        Self::with_events(config, Arc::new(NullEventSink))
    }

    /// Create a studio that reports changes through the given sink
    pub fn with_events(config: StudioConfig, events: Arc<dyn EventSink>) -> Self {
        let store = match &config.workflows_dir {
            Some(dir) => WorkflowStore::with_persistence(dir),
            None => WorkflowStore::new(),
        };
        let runner = Arc::new(SimulatedRunner::with_events(
            Duration::from_millis(config.run_delay_ms),
            events.clone(),
        ));

        Self {
            catalog: Arc::new(NodeCatalog::new()),
            store,
            runner,
            events,
            config,
        }
    }

    /// The node template catalog
    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    /// The active configuration
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Load persisted workflows from disk into the store
    ///
    /// Returns the number of workflows loaded.
    pub fn load_workflows(&mut self) -> Result<usize> {
        self.store.load_from_disk()
    }

    /// Start editing a brand new workflow
    pub fn create_workflow(&self, name: impl Into<String>) -> EditorSession {
        let workflow = Workflow::new(Uuid::new_v4().to_string(), name);
        self.open_session(workflow)
    }

    /// Open a stored workflow for editing
    pub fn open_workflow(&self, id: &str) -> Result<EditorSession> {
        let file = self
            .store
            .get(id)
            .ok_or_else(|| StudioError::WorkflowNotFound(id.to_string()))?;
        Ok(self.open_session(file.workflow.clone()))
    }

    fn open_session(&self, workflow: Workflow) -> EditorSession {
        EditorSession::with_events(workflow, self.catalog.clone(), self.events.clone())
            .with_undo_limit(self.config.undo_limit)
    }

    /// Save a session's workflow into the store
    ///
    /// An existing entry keeps its creation timestamp; only the modified
    /// timestamp moves.
    pub fn save(&mut self, session: &EditorSession) -> Result<()> {
        let workflow = session.workflow().clone();
        let id = workflow.id.clone();

        let mut file = match self.store.get(&id) {
            Some(existing) => {
                let mut file = existing.clone();
                file.workflow = workflow;
                file
            }
            None => WorkflowFile::new(workflow),
        };
        file.touch();
        self.store.insert(file)?;

        log::info!("Saved workflow '{}'", id);
        self.emit(EditorEvent::WorkflowSaved { workflow_id: id });
        Ok(())
    }

    /// Run a session's workflow
    ///
    /// Validation findings are logged but do not block the run; the
    /// simulated runner has nothing that could fail on a bad graph.
    pub async fn run(&self, session: &EditorSession) -> Result<RunSummary> {
        let workflow = session.workflow();
        let findings = validate_workflow(workflow, Some(&self.catalog));
        if !findings.is_empty() {
            log::warn!(
                "Workflow '{}' has {} validation finding(s), running anyway",
                workflow.id,
                findings.len()
            );
        }
        self.runner.run(workflow).await
    }

    /// List all stored workflows
    pub fn list_workflows(&self) -> Vec<WorkflowSummary> {
        self.store.list()
    }

    /// Remove a workflow from the store and disk
    ///
    /// Returns true if the workflow existed.
    pub fn delete_workflow(&mut self, id: &str) -> Result<bool> {
        Ok(self.store.remove(id)?.is_some())
    }

    fn emit(&self, event: EditorEvent) {
        if let Err(e) = self.events.send(event) {
            log::debug!("Dropped studio event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_engine::{EventError, Position, VecEventSink};

    #[test]
    fn test_create_save_list() {
        let mut studio = Studio::new(StudioConfig::in_memory());
        let mut session = studio.create_workflow("Lead intake");
        session
            .add_node_at("webhook-trigger", Position::new(100.0, 100.0))
            .unwrap();

        studio.save(&session).unwrap();

        let list = studio.list_workflows();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Lead intake");
        assert_eq!(list[0].node_count, 1);
    }

    #[test]
    fn test_open_unknown_workflow() {
        let studio = Studio::new(StudioConfig::in_memory());
        assert!(matches!(
            studio.open_workflow("missing"),
            Err(StudioError::WorkflowNotFound(_))
        ));
    }

    #[test]
    fn test_engine_errors_convert() {
        let studio = Studio::new(StudioConfig::in_memory());
        let mut session = studio.create_workflow("Broken");

        let err = session.add_node("no-such-template").unwrap_err();
        let converted = StudioError::from(err);
        assert!(matches!(converted, StudioError::Engine(_)));
    }

    #[test]
    fn test_open_returns_saved_state() {
        let mut studio = Studio::new(StudioConfig::in_memory());
        let mut session = studio.create_workflow("Draft");
        let a = session.add_node("manual-trigger").unwrap();
        let b = session.add_node("notify").unwrap();
        session.connect(&a, &b).unwrap();
        studio.save(&session).unwrap();

        let id = session.workflow().id.clone();
        let reopened = studio.open_workflow(&id).unwrap();
        assert_eq!(reopened.workflow().nodes.len(), 2);
        assert_eq!(reopened.workflow().connections.len(), 1);
        assert!(reopened.selection().is_none());
        assert!(!reopened.can_undo());
    }

    #[test]
    fn test_resave_keeps_created_timestamp() {
        let mut studio = Studio::new(StudioConfig::in_memory());
        let mut session = studio.create_workflow("Before");
        studio.save(&session).unwrap();

        let id = session.workflow().id.clone();
        let created = studio.store.get(&id).unwrap().metadata.created.clone();

        session.rename_workflow("After").unwrap();
        studio.save(&session).unwrap();

        let file = studio.store.get(&id).unwrap();
        assert_eq!(file.metadata.created, created);
        assert_eq!(file.metadata.name, "After");
    }

    #[test]
    fn test_delete_workflow() {
        let mut studio = Studio::new(StudioConfig::in_memory());
        let session = studio.create_workflow("Doomed");
        studio.save(&session).unwrap();

        let id = session.workflow().id.clone();
        assert!(studio.delete_workflow(&id).unwrap());
        assert!(!studio.delete_workflow(&id).unwrap());
        assert!(studio.list_workflows().is_empty());
    }

    #[tokio::test]
    async fn test_run_tolerates_validation_findings() {
        let config = StudioConfig {
            run_delay_ms: 1,
            ..StudioConfig::in_memory()
        };
        let studio = Studio::new(config);

        let mut session = studio.create_workflow("Sloppy");
        let a = session.add_node("manual-trigger").unwrap();
        session.connect(&a, "never-added").unwrap();

        let summary = studio.run(&session).await.unwrap();
        assert_eq!(summary.node_count, 1);
        assert_eq!(summary.connection_count, 1);
    }

    #[tokio::test]
    async fn test_save_and_run_emit_events() {
        let sink = Arc::new(VecEventSink::new());
        let config = StudioConfig {
            run_delay_ms: 1,
            ..StudioConfig::in_memory()
        };
        let mut studio = Studio::with_events(config, sink.clone());

        let mut session = studio.create_workflow("Observed");
        session.add_node("manual-trigger").unwrap();
        studio.save(&session).unwrap();
        studio.run(&session).await.unwrap();

        let events = sink.events();
        assert!(events
            .iter()
            .any(|e| matches!(e, EditorEvent::WorkflowSaved { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, EditorEvent::RunStarted { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, EditorEvent::RunCompleted { .. })));
    }

    struct ClosedSink;

    impl EventSink for ClosedSink {
        fn send(&self, _event: EditorEvent) -> std::result::Result<(), EventError> {
            Err(EventError::channel_closed())
        }
    }

    #[tokio::test]
    async fn test_sink_errors_never_fail_save_or_run() {
        let config = StudioConfig {
            run_delay_ms: 1,
            ..StudioConfig::in_memory()
        };
        let mut studio = Studio::with_events(config, Arc::new(ClosedSink));

        let mut session = studio.create_workflow("Unheard");
        let a = session.add_node("manual-trigger").unwrap();
        let b = session.add_node("notify").unwrap();
        session.connect(&a, &b).unwrap();

        studio.save(&session).unwrap();
        let summary = studio.run(&session).await.unwrap();

        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.connection_count, 1);
        assert_eq!(studio.list_workflows().len(), 1);
    }
}
