//! Workflow run simulation
//!
//! The studio does not execute nodes. A run walks through the motions
//! the real engine will later take over: it gets an execution id, emits
//! start and completion events, and holds for a configurable delay so
//! the frontend can show progress. The [`WorkflowRunner`] trait is the
//! seam where a real executor plugs in.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use canvas_engine::{EditorEvent, EventSink, NullEventSink, Workflow};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

/// Outcome of a workflow run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub execution_id: String,
    pub workflow_id: String,
    pub node_count: usize,
    pub connection_count: usize,
    pub elapsed_ms: u64,
}

/// Executes workflows
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    /// Run a workflow to completion
    async fn run(&self, workflow: &Workflow) -> Result<RunSummary>;
}

/// Runner that simulates execution with a fixed delay
pub struct SimulatedRunner {
    delay: Duration,
    events: Arc<dyn EventSink>,
}

impl SimulatedRunner {
    /// Create a runner with events discarded
    pub fn new(delay: Duration) -> Self {
        Self::with_events(delay, Arc::new(NullEventSink))
    }

    /// Create a runner that reports run progress through the given sink
    pub fn with_events(delay: Duration, events: Arc<dyn EventSink>) -> Self {
        Self { delay, events }
    }

    fn emit(&self, event: EditorEvent) {
        if let Err(e) = self.events.send(event) {
            log::debug!("Dropped run event: {}", e);
        }
    }
}

#[async_trait]
impl WorkflowRunner for SimulatedRunner {
    async fn run(&self, workflow: &Workflow) -> Result<RunSummary> {
        let execution_id = Uuid::new_v4().to_string();
        let started = Instant::now();

        log::info!(
            "Running workflow '{}' ({} nodes, {} connections)",
            workflow.id,
            workflow.nodes.len(),
            workflow.connections.len()
        );
        self.emit(EditorEvent::RunStarted {
            workflow_id: workflow.id.clone(),
            execution_id: execution_id.clone(),
        });

        tokio::time::sleep(self.delay).await;

        self.emit(EditorEvent::RunCompleted {
            workflow_id: workflow.id.clone(),
            execution_id: execution_id.clone(),
        });
        log::info!("Workflow '{}' run {} complete", workflow.id, execution_id);

        Ok(RunSummary {
            execution_id,
            workflow_id: workflow.id.clone(),
            node_count: workflow.nodes.len(),
            connection_count: workflow.connections.len(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_engine::{VecEventSink, WorkflowBuilder};

    fn test_workflow() -> Workflow {
        WorkflowBuilder::new("wf-run", "Run me")
            .trigger("a", "manual-trigger", (0.0, 0.0))
            .action("b", "ai-chat", (300.0, 0.0))
            .connect("a", "b")
            .build()
    }

    #[tokio::test]
    async fn test_simulated_run_reports_counts() {
        let runner = SimulatedRunner::new(Duration::from_millis(10));
        let summary = runner.run(&test_workflow()).await.unwrap();

        assert_eq!(summary.workflow_id, "wf-run");
        assert_eq!(summary.node_count, 2);
        assert_eq!(summary.connection_count, 1);
        assert!(summary.elapsed_ms >= 10);
        assert!(!summary.execution_id.is_empty());
    }

    #[tokio::test]
    async fn test_simulated_run_emits_start_and_completion() {
        let sink = Arc::new(VecEventSink::new());
        let runner = SimulatedRunner::with_events(Duration::from_millis(1), sink.clone());

        let summary = runner.run(&test_workflow()).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            EditorEvent::RunStarted { execution_id, .. } if *execution_id == summary.execution_id
        ));
        assert!(matches!(
            &events[1],
            EditorEvent::RunCompleted { execution_id, .. } if *execution_id == summary.execution_id
        ));
    }

    #[tokio::test]
    async fn test_each_run_gets_fresh_execution_id() {
        let runner = SimulatedRunner::new(Duration::ZERO);
        let workflow = test_workflow();

        let a = runner.run(&workflow).await.unwrap();
        let b = runner.run(&workflow).await.unwrap();
        assert_ne!(a.execution_id, b.execution_id);
    }
}
