//! Flow pipelines.
//!
//! A flow is a fixed, ordered sequence of agent tasks. Each step feeds its
//! output to the next; a failed step records an error and the flow continues
//! with the last successful context rather than aborting. Every flow ends by
//! writing the project state snapshot, errors or not.

pub mod auto;
pub mod build;
pub mod debate;
pub mod discovery;

pub use auto::AutoFlow;
pub use build::BuildFlow;
pub use debate::DebateFlow;
pub use discovery::DiscoveryFlow;

use crate::agents::{AgentRole, TaskSpec};
use crate::error::{MdanError, Result};
use crate::executor::TaskExecutor;
use serde::Serialize;

/// The four flow pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Auto,
    Discovery,
    Build,
    Debate,
}

impl FlowKind {
    pub fn name(&self) -> &'static str {
        match self {
            FlowKind::Auto => "auto",
            FlowKind::Discovery => "discovery",
            FlowKind::Build => "build",
            FlowKind::Debate => "debate",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FlowKind::Auto),
            "discovery" => Ok(FlowKind::Discovery),
            "build" => Ok(FlowKind::Build),
            "debate" => Ok(FlowKind::Debate),
            other => Err(MdanError::UserError(format!(
                "unknown flow '{}'. Available flows: auto, discovery, build, debate",
                other
            ))),
        }
    }
}

/// Result of one flow step.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step: String,
    pub agent: AgentRole,
    /// None when the step failed; the error text lands in the flow's error list.
    pub output: Option<String>,
}

/// Final report returned by a flow run.
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub flow: FlowKind,
    pub steps: Vec<StepResult>,
    pub errors: Vec<String>,
}

impl FlowReport {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs flow steps in order, collecting results and errors.
///
/// Failed steps never abort the run; the step's error is recorded and the
/// caller keeps the previous context.
pub(crate) struct StepRunner<'a> {
    executor: &'a dyn TaskExecutor,
    pub steps: Vec<StepResult>,
    pub errors: Vec<String>,
}

impl<'a> StepRunner<'a> {
    pub fn new(executor: &'a dyn TaskExecutor) -> Self {
        Self {
            executor,
            steps: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Execute one step. Returns the output on success, None on failure.
    pub async fn run(&mut self, step: &str, role: AgentRole, task: TaskSpec) -> Option<String> {
        let agent = role.spec();
        match self.executor.execute(&agent, &task).await {
            Ok(output) => {
                println!("  ok {} ({})", step, agent.name);
                self.steps.push(StepResult {
                    step: step.to_string(),
                    agent: role,
                    output: Some(output.clone()),
                });
                Some(output)
            }
            Err(e) => {
                println!("  failed {} ({}): {}", step, agent.name, e);
                self.errors.push(format!("{} error: {}", step, e));
                self.steps.push(StepResult {
                    step: step.to_string(),
                    agent: role,
                    output: None,
                });
                None
            }
        }
    }
}

/// Join step outputs into a context block for the next phase.
pub(crate) fn join_outputs(outputs: &[String]) -> String {
    outputs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::TaskSpec;
    use crate::executor::StubExecutor;

    #[test]
    fn test_flow_kind_parse_roundtrip() {
        for kind in [
            FlowKind::Auto,
            FlowKind::Discovery,
            FlowKind::Build,
            FlowKind::Debate,
        ] {
            assert_eq!(FlowKind::parse(kind.name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_flow_kind_parse_unknown() {
        let err = FlowKind::parse("deploy").unwrap_err();
        assert!(err.to_string().contains("unknown flow 'deploy'"));
    }

    #[tokio::test]
    async fn test_runner_records_success() {
        let executor = StubExecutor::new();
        let mut runner = StepRunner::new(&executor);

        let out = runner
            .run("create_prd", AgentRole::Product, TaskSpec::new("write", "prd"))
            .await;

        assert!(out.is_some());
        assert_eq!(runner.steps.len(), 1);
        assert!(runner.errors.is_empty());
    }

    #[tokio::test]
    async fn test_runner_collects_error_and_continues() {
        let executor = StubExecutor::failing_for(&["Khalil"]);
        let mut runner = StepRunner::new(&executor);

        let failed = runner
            .run("create_prd", AgentRole::Product, TaskSpec::new("write", "prd"))
            .await;
        let ok = runner
            .run("architecture", AgentRole::Architect, TaskSpec::new("design", "doc"))
            .await;

        assert!(failed.is_none());
        assert!(ok.is_some());
        assert_eq!(runner.errors.len(), 1);
        assert!(runner.errors[0].starts_with("create_prd error:"));
        assert_eq!(runner.steps.len(), 2);
        assert!(runner.steps[0].output.is_none());
    }
}
