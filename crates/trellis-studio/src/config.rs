//! Studio configuration storage
//!
//! Handles persistent storage of the studio's runtime settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::defaults;

/// Runtime configuration for the studio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Directory where workflows are persisted; None disables persistence
    pub workflows_dir: Option<PathBuf>,
    /// Simulated run duration in milliseconds
    #[serde(default = "default_run_delay_ms")]
    pub run_delay_ms: u64,
    /// Maximum undo snapshots kept per editing session
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,
}

fn default_run_delay_ms() -> u64 {
    defaults::RUN_DELAY_MS
}

fn default_undo_limit() -> usize {
    defaults::UNDO_LIMIT
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            workflows_dir: dirs::data_dir()
                .map(|dir| dir.join(defaults::APP_DIR).join(defaults::WORKFLOWS_DIR)),
            run_delay_ms: defaults::RUN_DELAY_MS,
            undo_limit: defaults::UNDO_LIMIT,
        }
    }
}

impl StudioConfig {
    /// Configuration with persistence disabled (tests, previews)
    pub fn in_memory() -> Self {
        Self {
            workflows_dir: None,
            ..Self::default()
        }
    }

    /// Load configuration from `config.json` in the given directory
    ///
    /// Returns the defaults when the file does not exist.
    pub async fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).await.map_err(ConfigError::Io)?;

        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to `config.json` in the given directory
    pub async fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(config_dir).await.map_err(ConfigError::Io)?;

        let config_path = config_dir.join("config.json");
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(&config_path, contents).await.map_err(ConfigError::Io)?;

        log::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = StudioConfig::load(dir.path()).await.unwrap();

        assert_eq!(config.run_delay_ms, defaults::RUN_DELAY_MS);
        assert_eq!(config.undo_limit, defaults::UNDO_LIMIT);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let config = StudioConfig {
            workflows_dir: Some(dir.path().join("flows")),
            run_delay_ms: 150,
            undo_limit: 8,
        };

        config.save(dir.path()).await.unwrap();
        let loaded = StudioConfig::load(dir.path()).await.unwrap();

        assert_eq!(loaded.workflows_dir, Some(dir.path().join("flows")));
        assert_eq!(loaded.run_delay_ms, 150);
        assert_eq!(loaded.undo_limit, 8);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(
            dir.path().join("config.json"),
            r#"{"workflows_dir": null, "run_delay_ms": 10}"#,
        )
        .await
        .unwrap();

        let loaded = StudioConfig::load(dir.path()).await.unwrap();
        assert_eq!(loaded.run_delay_ms, 10);
        assert_eq!(loaded.undo_limit, defaults::UNDO_LIMIT);
    }

    #[test]
    fn test_in_memory_disables_persistence() {
        let config = StudioConfig::in_memory();
        assert!(config.workflows_dir.is_none());
    }
}
