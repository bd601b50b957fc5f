//! Agent tools.
//!
//! Tools give flows and agents access to the outside world: web search via
//! Serper, SQL databases via sqlx, and sandboxed file operations under the
//! project root. The orchestrator builds a [`ToolSet`] from the project
//! configuration and feeds tool output into task prompts.

pub mod files;
pub mod search;
pub mod sql;

pub use files::FileTool;
pub use search::SearchTool;
pub use sql::SqlTool;

use crate::config::Config;
use crate::context::{OUTPUT_DIR, ProjectContext};
use crate::error::Result;

/// The tools available for a project, built from its configuration.
///
/// File operations are always available, scoped to the project root. Search
/// and SQL come online only when their credentials resolve.
pub struct ToolSet {
    pub files: FileTool,
    search: Option<SearchTool>,
    database_url: Option<String>,
}

impl ToolSet {
    /// Build the tool set from config, falling back to the environment for
    /// credentials the config leaves unset.
    pub fn from_config(config: &Config, ctx: &ProjectContext) -> Self {
        let search = config
            .resolve_serper_api_key()
            .and_then(|key| SearchTool::new(Some(key)).ok());

        Self {
            files: FileTool::new(&ctx.root),
            search,
            database_url: config.resolve_database_url(),
        }
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn has_database(&self) -> bool {
        self.database_url.is_some()
    }

    /// Connect to the configured database, if any.
    pub async fn connect_sql(&self) -> Result<Option<SqlTool>> {
        match &self.database_url {
            Some(url) => Ok(Some(SqlTool::connect(url).await?)),
            None => Ok(None),
        }
    }

    /// Run a web search for a task, formatted for prompt context.
    ///
    /// Returns None when no search tool is configured.
    pub async fn research(&self, query: &str, num_results: usize) -> Result<Option<String>> {
        match &self.search {
            Some(search) => {
                let response = search.search_web(query, num_results).await?;
                Ok(Some(SearchTool::format_results(&response, 200)))
            }
            None => Ok(None),
        }
    }

    /// Describe the project workspace for prompt context: the generated
    /// documents and, when a database is configured, its tables.
    ///
    /// Unreadable sections are omitted rather than failing the task.
    pub async fn workspace_context(&self) -> Option<String> {
        let mut sections = Vec::new();

        if let Ok(docs) = self.files.list_recursive(OUTPUT_DIR, Some("md"))
            && !docs.is_empty()
        {
            let listing = docs
                .iter()
                .map(|d| format!("- {}", d.path))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Generated documents in {}/:\n{}", OUTPUT_DIR, listing));
        }

        if let Ok(Some(sql)) = self.connect_sql().await
            && let Ok(tables) = sql.list_tables().await
            && !tables.is_empty()
        {
            sections.push(format!("Database tables: {}", tables.join(", ")));
        }

        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n\n"))
        }
    }
}
