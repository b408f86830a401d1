//! Studio-wide constants
//!
//! Single source of truth for configuration defaults.

/// Default values for studio configuration
pub mod defaults {
    /// Simulated run duration in milliseconds
    pub const RUN_DELAY_MS: u64 = 2000;
    /// Maximum undo snapshots kept per editing session
    pub const UNDO_LIMIT: usize = 64;
    /// Directory name for persisted workflows, under the app data dir
    pub const WORKFLOWS_DIR: &str = "workflows";
    /// Application directory name under the platform data dir
    pub const APP_DIR: &str = "trellis";
}
