//! Project context resolution for mdan.
//!
//! All commands that operate on an existing project use this module to
//! resolve the project root and the well-known paths inside it, so that
//! state and scaffold files are always addressed consistently.

use crate::error::{MdanError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Directory holding the installed orchestrator/agent prompts inside a project.
pub const MDAN_DIR: &str = "mdan";

/// Directory receiving generated artifacts (PRD, plans, docs).
pub const OUTPUT_DIR: &str = "mdan_output";

/// Project state file name.
pub const STATE_FILE: &str = "MDAN-STATE.json";

/// Orchestrator configuration file name.
pub const CONFIG_FILE: &str = "mdan.yaml";

/// Resolved paths for a mdan project.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Absolute path to the project root.
    pub root: PathBuf,
}

impl ProjectContext {
    /// Resolve the project context from the current working directory.
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            MdanError::UserError(format!("failed to get current working directory: {}", e))
        })?;
        Ok(Self::at(cwd))
    }

    /// Build a context rooted at a specific directory.
    pub fn at<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The project name (final path component, or "project" if unnameable).
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("project")
            .to_string()
    }

    /// Whether mdan is installed in this project.
    pub fn is_active(&self) -> bool {
        self.orchestrator_prompt_path().exists()
    }

    /// Ensure mdan is installed, returning a helpful error if not.
    pub fn ensure_active(&self) -> Result<()> {
        if !self.is_active() {
            return Err(MdanError::UserError(format!(
                "no MDAN project at {}.\n\n\
                 Run `mdan init [name]` to create one, or `mdan attach` inside an existing project.",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// Path to the installed mdan directory.
    pub fn mdan_dir(&self) -> PathBuf {
        self.root.join(MDAN_DIR)
    }

    /// Path to the installed orchestrator prompt.
    pub fn orchestrator_prompt_path(&self) -> PathBuf {
        self.mdan_dir().join("orchestrator.md")
    }

    /// Path to the installed agent prompt files.
    pub fn agents_dir(&self) -> PathBuf {
        self.mdan_dir().join("agents")
    }

    /// Path to the installed skill directories.
    pub fn skills_dir(&self) -> PathBuf {
        self.mdan_dir().join("skills")
    }

    /// Path to the generated-artifact directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// Path to the project status summary, if the orchestrator maintains one.
    pub fn status_path(&self) -> PathBuf {
        self.mdan_dir().join("STATUS.md")
    }

    /// Path to the project state snapshot.
    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    /// Path to the orchestrator configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path to the debate results snapshot.
    pub fn debate_results_path(&self) -> PathBuf {
        self.root.join("debate_results.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_are_rooted() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());

        assert!(ctx.state_path().ends_with("MDAN-STATE.json"));
        assert!(ctx.config_path().ends_with("mdan.yaml"));
        assert!(ctx.orchestrator_prompt_path().ends_with("mdan/orchestrator.md"));
        assert!(ctx.agents_dir().starts_with(temp_dir.path()));
    }

    #[test]
    fn test_project_name() {
        let ctx = ProjectContext::at("/tmp/my-app");
        assert_eq!(ctx.project_name(), "my-app");
    }

    #[test]
    fn test_is_active_false_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        assert!(!ctx.is_active());
    }

    #[test]
    fn test_is_active_after_install() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());

        std::fs::create_dir_all(ctx.mdan_dir()).unwrap();
        std::fs::write(ctx.orchestrator_prompt_path(), "# Orchestrator").unwrap();

        assert!(ctx.is_active());
        assert!(ctx.ensure_active().is_ok());
    }

    #[test]
    fn test_ensure_active_error_mentions_init() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());

        let err = ctx.ensure_active().unwrap_err();
        assert!(err.to_string().contains("mdan init"));
    }
}
