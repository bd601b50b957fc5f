//! Project state persistence.
//!
//! Flows and the orchestrator record their progress in `MDAN-STATE.json` at
//! the project root. The file is written atomically so an interrupted run
//! never leaves a truncated snapshot behind.

use crate::error::{MdanError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Snapshot of a project's orchestration progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectState {
    /// Project name, normally the root directory name.
    pub project_name: String,

    /// Names of the phases or flow steps completed so far, in order.
    #[serde(default)]
    pub phases_completed: Vec<String>,

    /// The phase currently in progress, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,

    /// Errors collected during the last flow run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    /// Time the snapshot was last written.
    pub updated_at: DateTime<Utc>,

    /// Flow-specific fields (step outputs, consensus text, round counts).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectState {
    /// Create a fresh state for a project with nothing completed yet.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            phases_completed: Vec::new(),
            current_phase: None,
            errors: Vec::new(),
            updated_at: Utc::now(),
            extra: BTreeMap::new(),
        }
    }

    /// Load state from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MdanError::UserError(format!(
                "failed to read state file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            MdanError::UserError(format!(
                "failed to parse state file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Atomically save state as pretty-printed JSON, refreshing `updated_at`.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| MdanError::UserError(format!("failed to serialize state: {}", e)))?;
        atomic_write_file(path, &json)
    }

    /// Record a completed phase, skipping duplicates.
    pub fn complete_phase(&mut self, phase: impl Into<String>) {
        let phase = phase.into();
        if !self.phases_completed.contains(&phase) {
            self.phases_completed.push(phase);
        }
        self.current_phase = None;
    }

    /// Attach an extra flow-specific field.
    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extra.insert(key.into(), value);
    }
}
