//! User settings for fsm-audit
//!
//! Manages preferences for graph rendering, logging, and where machine
//! definitions are read from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::AuditPaths;
use crate::error::AuditError;

/// User settings for fsm-audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Executable used to lay out and render state graphs
    #[serde(default = "default_dot_command")]
    pub dot_command: String,

    /// Graphviz node shape for states
    #[serde(default = "default_node_shape")]
    pub node_shape: String,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Machine definitions file, overriding the one in the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machines_file: Option<PathBuf>,

    /// Number of entries shown by `log` when no limit is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_dot_command() -> String {
    "dot".to_string()
}

fn default_node_shape() -> String {
    "rect".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_recent_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            dot_command: default_dot_command(),
            node_shape: default_node_shape(),
            log_level: default_log_level(),
            machines_file: None,
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AuditPaths) -> Result<Self, AuditError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AuditError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AuditError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AuditPaths) -> Result<(), AuditError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AuditError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AuditError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the machine definitions file for these settings
    pub fn machines_path(&self, paths: &AuditPaths) -> PathBuf {
        self.machines_file
            .clone()
            .unwrap_or_else(|| paths.machines_file())
    }
}
