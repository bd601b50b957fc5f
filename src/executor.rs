//! Task execution against an LLM backend.
//!
//! [`TaskExecutor`] is the seam between flow pipelines and the chat backend.
//! Flows depend only on the trait; [`OpenAiExecutor`] is the production
//! implementation and tests substitute [`StubExecutor`].

use crate::agents::{AgentSpec, TaskSpec};
use crate::config::LlmConfig;
use crate::error::{MdanError, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
};
use async_trait::async_trait;
use tracing::debug;

/// Executes a single agent task and returns its textual output.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, agent: &AgentSpec, task: &TaskSpec) -> Result<String>;
}

/// Strip secrets and noise from backend error messages before they reach
/// the user.
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your API key configuration.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if lower.contains("internal") || lower.contains("server error") {
        return "API server error. Please try again later.".to_string();
    }

    if error.len() > 300 {
        let mut end = 300;
        while !error.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...(truncated)", &error[..end])
    } else {
        error.to_string()
    }
}

/// Production executor backed by the OpenAI chat-completions API.
pub struct OpenAiExecutor {
    client: Client<OpenAIConfig>,
    llm: LlmConfig,
}

impl OpenAiExecutor {
    /// Build an executor from config. The API key comes from the
    /// OPENAI_API_KEY environment variable.
    pub fn new(llm: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            MdanError::UserError(
                "OPENAI_API_KEY is not set.\n\n\
                 Run `mdan setup` and add your key to .env, or export it in your shell."
                    .to_string(),
            )
        })?;

        let config = OpenAIConfig::new().with_api_key(api_key);
        Ok(Self {
            client: Client::with_config(config),
            llm,
        })
    }
}

#[async_trait]
impl TaskExecutor for OpenAiExecutor {
    async fn execute(&self, agent: &AgentSpec, task: &TaskSpec) -> Result<String> {
        let messages = vec![
            ChatCompletionRequestMessage::from(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(agent.system_prompt()),
                name: None,
            }),
            ChatCompletionRequestMessage::from(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(task.user_prompt()),
                name: None,
            }),
        ];

        let request = CreateChatCompletionRequest {
            model: self.llm.model.clone(),
            messages,
            max_completion_tokens: Some(self.llm.max_tokens),
            temperature: Some(self.llm.temperature),
            ..Default::default()
        };

        debug!(agent = agent.name, model = %self.llm.model, "sending task to LLM");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: async_openai::error::OpenAIError| {
                MdanError::ApiError(sanitize_api_error(&e.to_string()))
            })?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| MdanError::ApiError("no choices in response".to_string()))?;

        let content = choice.message.content.clone().unwrap_or_default();
        if content.trim().is_empty() {
            return Err(MdanError::ApiError("empty completion".to_string()));
        }

        Ok(content)
    }
}

/// Deterministic executor for tests and dry runs.
///
/// Echoes the agent name and the head of the task description, or fails for
/// agents listed in `fail_for`.
#[derive(Debug, Default)]
pub struct StubExecutor {
    pub fail_for: Vec<&'static str>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every task assigned to the named agents.
    pub fn failing_for(agents: &[&'static str]) -> Self {
        Self {
            fail_for: agents.to_vec(),
        }
    }
}

#[async_trait]
impl TaskExecutor for StubExecutor {
    async fn execute(&self, agent: &AgentSpec, task: &TaskSpec) -> Result<String> {
        if self.fail_for.contains(&agent.name) {
            return Err(MdanError::ApiError(format!(
                "stubbed failure for {}",
                agent.name
            )));
        }

        let head: String = task.description.chars().take(60).collect();
        Ok(format!("[{}] {}", agent.name, head.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentRole;

    #[test]
    fn test_sanitize_hides_auth_details() {
        let sanitized = sanitize_api_error("Invalid API key: sk-abc123");
        assert!(!sanitized.contains("sk-abc123"));
        assert!(sanitized.contains("authentication"));
    }

    #[test]
    fn test_sanitize_rate_limit() {
        let sanitized = sanitize_api_error("Rate limit reached for requests");
        assert!(sanitized.contains("rate limit"));
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long = "x".repeat(500);
        let sanitized = sanitize_api_error(&long);
        assert!(sanitized.len() < 400);
        assert!(sanitized.ends_with("...(truncated)"));
    }

    #[test]
    fn test_sanitize_passes_short_messages() {
        assert_eq!(sanitize_api_error("connection refused"), "connection refused");
    }

    #[tokio::test]
    async fn test_stub_executor_echoes_agent() {
        let executor = StubExecutor::new();
        let agent = AgentRole::Dev.spec();
        let task = TaskSpec::new("Implement the login page", "code");

        let output = executor.execute(&agent, &task).await.unwrap();
        assert!(output.starts_with("[Haytame]"));
        assert!(output.contains("Implement the login page"));
    }

    #[tokio::test]
    async fn test_stub_executor_fails_on_demand() {
        let executor = StubExecutor::failing_for(&["Khalil"]);
        let agent = AgentRole::Product.spec();
        let task = TaskSpec::new("Write a PRD", "PRD");

        let err = executor.execute(&agent, &task).await.unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::API_FAILURE);
    }
}
