//! Trellis Studio - workflow persistence and runs
//!
//! The runtime layer above `canvas-engine`: it stores workflows as JSON
//! files, loads them back on startup, and simulates runs until a real
//! execution engine exists. The [`Studio`] facade hands out editing
//! sessions and takes them back for saving and running.
//!
//! # Example
//!
//! ```ignore
//! use trellis_studio::{Studio, StudioConfig};
//!
//! let mut studio = Studio::new(StudioConfig::default());
//! studio.load_workflows()?;
//!
//! let mut session = studio.create_workflow("Lead intake");
//! session.add_node("webhook-trigger")?;
//! studio.save(&session)?;
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod runner;
pub mod store;
pub mod studio;

// Re-export key types
pub use config::{ConfigError, StudioConfig};
pub use error::{Result, StudioError};
pub use runner::{RunSummary, SimulatedRunner, WorkflowRunner};
pub use store::{WorkflowFile, WorkflowMetadata, WorkflowStore, WorkflowSummary, CURRENT_VERSION};
pub use studio::Studio;
