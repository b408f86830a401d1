//! Workflow storage with file persistence
//!
//! Keeps workflows in memory for fast access, with optional JSON file
//! persistence so the studio can reload them on startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use canvas_engine::Workflow;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudioError};

/// File format version written into every workflow file
pub const CURRENT_VERSION: &str = "1.0";

/// Descriptive metadata stored alongside a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 creation timestamp
    pub created: String,
    /// RFC 3339 timestamp of the last save
    pub modified: String,
}

/// On-disk representation of a saved workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowFile {
    pub version: String,
    pub metadata: WorkflowMetadata,
    pub workflow: Workflow,
}

impl WorkflowFile {
    /// Wrap a workflow in a fresh file with both timestamps set to now
    pub fn new(workflow: Workflow) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: CURRENT_VERSION.to_string(),
            metadata: WorkflowMetadata {
                name: workflow.name.clone(),
                description: None,
                created: now.clone(),
                modified: now,
            },
            workflow,
        }
    }

    /// Refresh the modified timestamp and mirror the workflow name
    pub fn touch(&mut self) {
        self.metadata.name = self.workflow.name.clone();
        self.metadata.modified = chrono::Utc::now().to_rfc3339();
    }
}

/// Listing entry for a stored workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub node_count: usize,
    pub modified: String,
}

/// In-memory workflow store with optional file persistence
///
/// # Example
///
/// ```ignore
/// use trellis_studio::WorkflowStore;
///
/// let mut store = WorkflowStore::with_persistence(".trellis/workflows");
/// let count = store.load_from_disk()?;
/// println!("Loaded {} workflows", count);
/// ```
#[derive(Debug, Default)]
pub struct WorkflowStore {
    /// Stored workflow files, keyed by workflow id
    files: HashMap<String, WorkflowFile>,
    /// Optional path for file persistence
    persist_path: Option<PathBuf>,
}

impl WorkflowStore {
    /// Create a new in-memory store without persistence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that persists to the given directory
    ///
    /// The directory is created on first save if it doesn't exist.
    pub fn with_persistence(path: impl AsRef<Path>) -> Self {
        Self {
            files: HashMap::new(),
            persist_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Load all workflows from the persistence directory
    ///
    /// Files that fail to parse are logged and skipped. Returns the number
    /// of workflows loaded.
    pub fn load_from_disk(&mut self) -> Result<usize> {
        let Some(ref path) = self.persist_path else {
            return Ok(0);
        };

        if !path.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.extension().is_some_and(|e| e == "json") {
                let content = std::fs::read_to_string(&file_path)?;
                match serde_json::from_str::<WorkflowFile>(&content) {
                    Ok(file) => {
                        log::info!("Loaded workflow '{}' from {:?}", file.workflow.id, file_path);
                        self.files.insert(file.workflow.id.clone(), file);
                        count += 1;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse workflow from {:?}: {}", file_path, e);
                    }
                }
            }
        }
        Ok(count)
    }

    /// Save a workflow file to disk (if persistence is enabled)
    fn save_to_disk(&self, file: &WorkflowFile) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        std::fs::create_dir_all(path)?;
        let file_path = path.join(format!("{}.json", &file.workflow.id));
        let content = serde_json::to_string_pretty(file).map_err(StudioError::Serialize)?;
        std::fs::write(&file_path, content)?;
        log::debug!("Saved workflow '{}' to {:?}", file.workflow.id, file_path);
        Ok(())
    }

    /// Delete a workflow file from disk (if persistence is enabled)
    fn delete_from_disk(&self, id: &str) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        let file_path = path.join(format!("{}.json", id));
        if file_path.exists() {
            std::fs::remove_file(&file_path)?;
            log::debug!("Deleted workflow '{}' from {:?}", id, file_path);
        }
        Ok(())
    }

    /// Get a workflow file by id
    pub fn get(&self, id: &str) -> Option<&WorkflowFile> {
        self.files.get(id)
    }

    /// Insert or update a workflow file
    ///
    /// The file is automatically persisted to disk if persistence is
    /// enabled.
    pub fn insert(&mut self, file: WorkflowFile) -> Result<()> {
        self.save_to_disk(&file)?;
        self.files.insert(file.workflow.id.clone(), file);
        Ok(())
    }

    /// Remove a workflow by id
    ///
    /// Returns the removed file if it existed.
    pub fn remove(&mut self, id: &str) -> Result<Option<WorkflowFile>> {
        self.delete_from_disk(id)?;
        Ok(self.files.remove(id))
    }

    /// List all stored workflows
    pub fn list(&self) -> Vec<WorkflowSummary> {
        self.files
            .values()
            .map(|f| WorkflowSummary {
                id: f.workflow.id.clone(),
                name: f.metadata.name.clone(),
                description: f.metadata.description.clone(),
                node_count: f.workflow.nodes.len(),
                modified: f.metadata.modified.clone(),
            })
            .collect()
    }

    /// Get all stored workflow ids
    pub fn ids(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Check if a workflow exists
    pub fn contains(&self, id: &str) -> bool {
        self.files.contains_key(id)
    }
}
