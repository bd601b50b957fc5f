//! Orchestrator configuration for mdan.
//!
//! Configuration lives in `mdan.yaml` at the project root. Unknown fields are
//! silently ignored for forward compatibility; every field has a default so a
//! missing file yields a usable configuration.

use crate::error::{MdanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// LLM backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat-completion model name.
    pub model: String,

    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,

    /// Maximum completion tokens per task.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// Per-agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub enabled: bool,
    pub verbose: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            verbose: true,
        }
    }
}

/// Per-flow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    pub enabled: bool,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Auto-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoModeConfig {
    pub enabled: bool,
    pub save_context: bool,
}

impl Default for AutoModeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            save_context: true,
        }
    }
}

/// Top-level mdan configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM backend settings.
    pub llm: LlmConfig,

    /// SQL database connection URL (postgres:// or sqlite://).
    /// Falls back to the DATABASE_URL environment variable.
    pub database_url: Option<String>,

    /// Serper API key for web search.
    /// Falls back to the SERPER_API_KEY environment variable.
    pub serper_api_key: Option<String>,

    /// Autonomous mode settings.
    pub auto_mode: AutoModeConfig,

    /// Per-agent settings keyed by role name. Absent roles use defaults.
    pub agents: BTreeMap<String, AgentSettings>,

    /// Per-flow settings keyed by flow name. Absent flows use defaults.
    pub flows: BTreeMap<String, FlowSettings>,
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            MdanError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| MdanError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `llm.temperature` must be within [0.0, 2.0]
    /// - `llm.max_tokens` must be positive
    /// - `llm.model` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(MdanError::UserError(format!(
                "config validation failed: llm.temperature must be within [0.0, 2.0] (found {})",
                self.llm.temperature
            )));
        }

        if self.llm.max_tokens == 0 {
            return Err(MdanError::UserError(
                "config validation failed: llm.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.model.trim().is_empty() {
            return Err(MdanError::UserError(
                "config validation failed: llm.model must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether a flow is enabled. Flows absent from the config default to enabled.
    pub fn flow_enabled(&self, name: &str) -> bool {
        self.flows.get(name).map(|f| f.enabled).unwrap_or(true)
    }

    /// Whether an agent is enabled. Agents absent from the config default to enabled.
    pub fn agent_enabled(&self, name: &str) -> bool {
        self.agents.get(name).map(|a| a.enabled).unwrap_or(true)
    }

    /// Resolve the Serper API key from config or environment.
    pub fn resolve_serper_api_key(&self) -> Option<String> {
        self.serper_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("SERPER_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    /// Resolve the database URL from config or environment.
    pub fn resolve_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.model, "gpt-4o");
        assert!(!config.auto_mode.enabled);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("llm:\n  model: gpt-4o-mini\n").unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        // Unspecified fields keep defaults
        assert_eq!(config.llm.max_tokens, 4096);
    }

    #[test]
    fn test_from_yaml_unknown_fields_ignored() {
        let config = Config::from_yaml("future_option: true\nllm:\n  model: gpt-4o\n").unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_invalid_temperature_rejected() {
        let result = Config::from_yaml("llm:\n  temperature: 3.5\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let result = Config::from_yaml("llm:\n  max_tokens: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_flow_enabled_defaults_true() {
        let config = Config::default();
        assert!(config.flow_enabled("auto"));
        assert!(config.flow_enabled("discovery"));
    }

    #[test]
    fn test_flow_can_be_disabled() {
        let config = Config::from_yaml("flows:\n  debate:\n    enabled: false\n").unwrap();
        assert!(!config.flow_enabled("debate"));
        assert!(config.flow_enabled("auto"));
    }

    #[test]
    fn test_agent_can_be_disabled() {
        let config = Config::from_yaml("agents:\n  devops:\n    enabled: false\n").unwrap();
        assert!(!config.agent_enabled("devops"));
        assert!(config.agent_enabled("product"));
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(temp_dir.path().join("mdan.yaml")).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    #[serial]
    fn test_serper_key_env_fallback() {
        unsafe {
            std::env::set_var("SERPER_API_KEY", "env-key");
        }
        let config = Config::default();
        assert_eq!(config.resolve_serper_api_key().as_deref(), Some("env-key"));

        let configured = Config::from_yaml("serper_api_key: file-key\n").unwrap();
        assert_eq!(configured.resolve_serper_api_key().as_deref(), Some("file-key"));
        unsafe {
            std::env::remove_var("SERPER_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_database_url_env_fallback() {
        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
        let config = Config::default();
        assert!(config.resolve_database_url().is_none());

        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite::memory:");
        }
        assert_eq!(
            Config::default().resolve_database_url().as_deref(),
            Some("sqlite::memory:")
        );
        unsafe {
            std::env::remove_var("DATABASE_URL");
        }
    }
}
