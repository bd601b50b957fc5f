//! Task classification and dispatch.
//!
//! The orchestrator decides whether a task runs a flow pipeline or a single
//! agent, then executes it. Classification is a fixed ordered keyword table:
//! flow rules are checked before agent rules, and within each group rules are
//! checked top to bottom, so a given description always classifies the same
//! way.

use crate::agents::{AgentRole, TaskSpec};
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{MdanError, Result};
use crate::executor::TaskExecutor;
use crate::flows::debate::DebateReport;
use crate::flows::{AutoFlow, BuildFlow, DebateFlow, DiscoveryFlow, FlowKind, FlowReport};
use crate::skills::SkillRouter;
use crate::state::ProjectState;
use crate::tools::ToolSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Where a task was routed and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskAnalysis {
    Flow { flow: FlowKind, reason: &'static str },
    Agent { agent: AgentRole, reason: &'static str },
}

/// One task the orchestrator has executed.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub task: String,
    pub analysis: TaskAnalysis,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of executing a task through the orchestrator.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TaskOutcome {
    Flow(FlowReport),
    Debate(DebateReport),
    Agent { agent: AgentRole, result: String },
}

/// Flow classification rules, checked before agent rules.
const FLOW_RULES: &[(&[&str], FlowKind, &str)] = &[
    (
        &["auto", "autonomous", "full cycle", "complete"],
        FlowKind::Auto,
        "Task requires autonomous full-cycle development",
    ),
    (
        &["discover", "requirement", "prd", "user story"],
        FlowKind::Discovery,
        "Task requires discovery phase execution",
    ),
    (
        &["build", "implement", "develop", "code"],
        FlowKind::Build,
        "Task requires build phase execution",
    ),
    (
        &["debate", "consensus", "discuss", "decide"],
        FlowKind::Debate,
        "Task requires multi-agent debate",
    ),
];

/// Agent classification rules, in phase order.
const AGENT_RULES: &[(&[&str], AgentRole, &str)] = &[
    (
        &["prd", "requirement", "user story", "persona", "feature"],
        AgentRole::Product,
        "Task requires product management expertise",
    ),
    (
        &["architecture", "tech stack", "design", "api", "schema"],
        AgentRole::Architect,
        "Task requires architecture expertise",
    ),
    (
        &["ux", "ui", "user flow", "wireframe", "design system"],
        AgentRole::Ux,
        "Task requires UX design expertise",
    ),
    (
        &["implement", "code", "refactor", "debug", "review"],
        AgentRole::Dev,
        "Task requires development expertise",
    ),
    (
        &["test", "quality", "verify", "coverage"],
        AgentRole::Test,
        "Task requires testing expertise",
    ),
    (
        &["security", "vulnerability", "auth", "encrypt"],
        AgentRole::Security,
        "Task requires security expertise",
    ),
    (
        &["deploy", "ci/cd", "infrastructure", "cloud"],
        AgentRole::DevOps,
        "Task requires DevOps expertise",
    ),
    (
        &["document", "guide", "readme", "api doc"],
        AgentRole::Doc,
        "Task requires documentation expertise",
    ),
];

/// Routes tasks to flows or agents and executes them.
pub struct Orchestrator<'a> {
    executor: &'a dyn TaskExecutor,
    ctx: ProjectContext,
    config: Config,
    tools: ToolSet,
    auto_mode: bool,
    history: Vec<TaskRecord>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(executor: &'a dyn TaskExecutor, ctx: ProjectContext, config: Config) -> Self {
        let auto_mode = config.auto_mode.enabled;
        let tools = ToolSet::from_config(&config, &ctx);
        Self {
            executor,
            ctx,
            config,
            tools,
            auto_mode,
            history: Vec::new(),
        }
    }

    /// The tools built from this project's configuration.
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Classify a task description against the ordered rule tables.
    ///
    /// Flow rules win over agent rules; unmatched tasks default to the
    /// product agent.
    pub fn analyze_task(task_description: &str) -> TaskAnalysis {
        let task_lower = task_description.to_lowercase();

        for (keywords, flow, reason) in FLOW_RULES {
            if keywords.iter().any(|k| task_lower.contains(k)) {
                return TaskAnalysis::Flow {
                    flow: *flow,
                    reason,
                };
            }
        }

        for (keywords, agent, reason) in AGENT_RULES {
            if keywords.iter().any(|k| task_lower.contains(k)) {
                return TaskAnalysis::Agent {
                    agent: *agent,
                    reason,
                };
            }
        }

        TaskAnalysis::Agent {
            agent: AgentRole::Product,
            reason: "Default agent for general tasks",
        }
    }

    /// Classify and execute a task, recording it in the task history.
    pub async fn execute_task(&mut self, task_description: &str) -> Result<TaskOutcome> {
        let analysis = Self::analyze_task(task_description);
        debug!(?analysis, "task classified");

        self.history.push(TaskRecord {
            task: task_description.to_string(),
            analysis: analysis.clone(),
            timestamp: Utc::now(),
        });

        match analysis {
            // Debate keeps its own report shape so the consensus survives
            TaskAnalysis::Flow {
                flow: FlowKind::Debate,
                ..
            } => {
                let report = self.start_debate(task_description).await?;
                Ok(TaskOutcome::Debate(report))
            }
            TaskAnalysis::Flow { flow, .. } => {
                let report = self.execute_flow(flow, task_description).await?;
                Ok(TaskOutcome::Flow(report))
            }
            TaskAnalysis::Agent { agent, .. } => {
                let result = self.execute_agent_task(agent, task_description).await?;
                Ok(TaskOutcome::Agent { agent, result })
            }
        }
    }

    /// Run a named flow, honoring per-flow config toggles.
    pub async fn execute_flow(&self, flow: FlowKind, input: &str) -> Result<FlowReport> {
        if !self.config.flow_enabled(flow.name()) {
            return Err(MdanError::FlowError(format!(
                "flow '{}' is disabled in mdan.yaml",
                flow.name()
            )));
        }

        match flow {
            FlowKind::Auto => AutoFlow::new(self.executor, self.ctx.clone()).kickoff().await,
            FlowKind::Discovery => {
                DiscoveryFlow::new(self.executor, self.ctx.clone())
                    .kickoff(input)
                    .await
            }
            FlowKind::Build => {
                BuildFlow::new(self.executor, self.ctx.clone())
                    .kickoff(input)
                    .await
            }
            FlowKind::Debate => {
                let report = DebateFlow::new(self.executor, self.ctx.clone())
                    .kickoff(input)
                    .await?;
                Ok(report.into_flow_report())
            }
        }
    }

    /// Execute a single task with a specific agent, honoring agent toggles.
    ///
    /// If the description matches catalog skills, the task runs through the
    /// skill router instead and the per-agent results are concatenated.
    /// Disabled agents are skipped there too.
    pub async fn execute_agent_task(&self, role: AgentRole, description: &str) -> Result<String> {
        if !self.config.agent_enabled(role.name()) {
            return Err(MdanError::UserError(format!(
                "agent '{}' is disabled in mdan.yaml",
                role.name()
            )));
        }

        let mut router = SkillRouter::new(self.executor);
        let outcome = router
            .execute_skills_filtered(description, |r| self.config.agent_enabled(r.name()))
            .await?;
        if !outcome.agent_results.is_empty() {
            debug!(skills = ?outcome.detected_skills, "task routed through skills");
            let combined: Vec<String> = outcome
                .agent_results
                .into_iter()
                .map(|(agent, result)| format!("## {}\n\n{}", agent.spec().name, result))
                .collect();
            return Ok(combined.join("\n\n"));
        }

        let agent = role.spec();
        let mut description = description.to_string();
        if let Some(context) = self.tool_context(&description).await {
            description = format!("{}\n\nContext from project tools:\n{}", description, context);
        }
        let task = TaskSpec::new(description, "Task completion result");
        self.executor.execute(&agent, &task).await
    }

    /// Prompt context contributed by the tool layer: workspace documents,
    /// database tables, and web research when search is configured.
    ///
    /// Tool failures are logged and skipped; they never fail the task.
    async fn tool_context(&self, description: &str) -> Option<String> {
        let mut sections = Vec::new();

        if let Some(workspace) = self.tools.workspace_context().await {
            sections.push(workspace);
        }

        match self.tools.research(description, 5).await {
            Ok(Some(findings)) => sections.push(format!("Web research:\n{}", findings)),
            Ok(None) => {}
            Err(e) => warn!("web research failed: {}", e),
        }

        if sections.is_empty() {
            None
        } else {
            Some(sections.join("\n\n"))
        }
    }

    /// Run autonomous mode; requires auto mode enabled.
    pub async fn run_auto_mode(&self) -> Result<FlowReport> {
        if !self.auto_mode {
            return Err(MdanError::UserError(
                "auto mode is not enabled. Enable it in mdan.yaml (auto_mode.enabled: true) \
                 or pass --force."
                    .to_string(),
            ));
        }

        println!("Starting autonomous mode...");
        self.execute_flow(FlowKind::Auto, "").await
    }

    /// Start a multi-agent debate on a topic.
    pub async fn start_debate(&self, topic: &str) -> Result<crate::flows::debate::DebateReport> {
        if !self.config.flow_enabled("debate") {
            return Err(MdanError::FlowError(
                "flow 'debate' is disabled in mdan.yaml".to_string(),
            ));
        }
        DebateFlow::new(self.executor, self.ctx.clone())
            .kickoff(topic)
            .await
    }

    /// Load the saved project state, if any.
    pub fn load_state(&self) -> Result<Option<ProjectState>> {
        if self.ctx.state_path().exists() {
            Ok(Some(ProjectState::load(self.ctx.state_path())?))
        } else {
            Ok(None)
        }
    }

    /// Persist a project state snapshot atomically.
    pub fn save_state(&self, state: &mut ProjectState) -> Result<()> {
        state.save(self.ctx.state_path())
    }

    /// Tasks executed through this orchestrator, oldest first.
    pub fn history(&self) -> &[TaskRecord] {
        &self.history
    }

    pub fn enable_auto_mode(&mut self) {
        self.auto_mode = true;
    }

    pub fn disable_auto_mode(&mut self) {
        self.auto_mode = false;
    }

    pub fn is_auto_mode_enabled(&self) -> bool {
        self.auto_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::StubExecutor;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_flow_keywords_win_over_agent_keywords() {
        // "implement" is both a build-flow and a dev-agent keyword
        let analysis = Orchestrator::analyze_task("implement the login feature");
        assert_eq!(
            analysis,
            TaskAnalysis::Flow {
                flow: FlowKind::Build,
                reason: "Task requires build phase execution"
            }
        );
    }

    #[test]
    fn test_auto_flow_checked_first() {
        // Matches auto ("autonomous") and build ("build"); auto is first
        let analysis = Orchestrator::analyze_task("autonomous build of the project");
        assert!(matches!(
            analysis,
            TaskAnalysis::Flow {
                flow: FlowKind::Auto,
                ..
            }
        ));
    }

    #[test]
    fn test_agent_classification() {
        let analysis = Orchestrator::analyze_task("harden the login against vulnerability reports");
        assert!(matches!(
            analysis,
            TaskAnalysis::Agent {
                agent: AgentRole::Security,
                ..
            }
        ));
    }

    #[test]
    fn test_unmatched_task_defaults_to_product() {
        let analysis = Orchestrator::analyze_task("zzzz qqqq");
        assert_eq!(
            analysis,
            TaskAnalysis::Agent {
                agent: AgentRole::Product,
                reason: "Default agent for general tasks"
            }
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let desc = "design the api and write tests";
        assert_eq!(
            Orchestrator::analyze_task(desc),
            Orchestrator::analyze_task(desc)
        );
    }

    #[tokio::test]
    async fn test_execute_agent_task() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        let result = orch
            .execute_agent_task(AgentRole::Doc, "summarize the project")
            .await
            .unwrap();
        assert!(result.starts_with("[Amina]"));
    }

    #[tokio::test]
    async fn test_debate_task_surfaces_full_report() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let mut orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        let outcome = orch
            .execute_task("discuss tabs versus spaces")
            .await
            .unwrap();

        match outcome {
            TaskOutcome::Debate(report) => {
                // 3 core participants x 3 rounds
                assert_eq!(report.arguments.len(), 9);
                assert!(report.consensus.starts_with("[Khalil]"));
                assert!(report.errors.is_empty());
            }
            other => panic!("expected a debate outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_flow_debate_carries_rounds_as_steps() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        let report = orch
            .execute_flow(FlowKind::Debate, "monolith or microservices")
            .await
            .unwrap();

        // 9 round steps plus the consensus step
        assert_eq!(report.steps.len(), 10);
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn test_agent_task_with_skills_combines_agent_results() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        // "readme" hits the doc catalog, "wireframe" the ux catalog
        let result = orch
            .execute_agent_task(AgentRole::Doc, "draft the readme and a wireframe")
            .await
            .unwrap();
        assert!(result.contains("## Amina"));
        assert!(result.contains("## Jihane"));
    }

    #[tokio::test]
    async fn test_skill_routing_skips_disabled_agents() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let config = Config::from_yaml("agents:\n  ux:\n    enabled: false\n").unwrap();
        let orch = Orchestrator::new(&executor, ProjectContext::at(temp_dir.path()), config);

        let result = orch
            .execute_agent_task(AgentRole::Doc, "draft the readme and a wireframe")
            .await
            .unwrap();
        assert!(result.contains("## Amina"));
        assert!(!result.contains("## Jihane"));
    }

    #[tokio::test]
    async fn test_all_skill_owners_disabled_falls_back_to_plain_path() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let config =
            Config::from_yaml("agents:\n  ux:\n    enabled: false\n  doc:\n    enabled: false\n")
                .unwrap();
        let orch = Orchestrator::new(&executor, ProjectContext::at(temp_dir.path()), config);

        let result = orch
            .execute_agent_task(AgentRole::Product, "draft the readme and a wireframe")
            .await
            .unwrap();
        assert!(result.starts_with("[Khalil]"));
    }

    #[tokio::test]
    #[serial]
    async fn test_tool_context_describes_workspace() {
        unsafe {
            std::env::remove_var("SERPER_API_KEY");
            std::env::remove_var("DATABASE_URL");
        }
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        std::fs::create_dir_all(ctx.output_dir()).unwrap();
        std::fs::write(ctx.output_dir().join("PRD.md"), "# PRD").unwrap();

        let executor = StubExecutor::new();
        let orch = Orchestrator::new(&executor, ctx, Config::default());

        assert!(!orch.tools().has_search());
        let context = orch.tool_context("anything").await.unwrap();
        assert!(context.contains("PRD.md"));
    }

    #[tokio::test]
    async fn test_disabled_agent_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let config = Config::from_yaml("agents:\n  doc:\n    enabled: false\n").unwrap();
        let orch = Orchestrator::new(&executor, ProjectContext::at(temp_dir.path()), config);

        let err = orch
            .execute_agent_task(AgentRole::Doc, "summarize")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("disabled"));
    }

    #[tokio::test]
    async fn test_disabled_flow_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let config = Config::from_yaml("flows:\n  build:\n    enabled: false\n").unwrap();
        let orch = Orchestrator::new(&executor, ProjectContext::at(temp_dir.path()), config);

        let err = orch
            .execute_flow(FlowKind::Build, "the design")
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::FLOW_FAILURE);
    }

    #[tokio::test]
    async fn test_execute_task_routes_to_flow_and_records_history() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let mut orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        let outcome = orch
            .execute_task("gather requirements for the app")
            .await
            .unwrap();
        assert!(matches!(outcome, TaskOutcome::Flow(_)));

        assert_eq!(orch.history().len(), 1);
        assert_eq!(orch.history()[0].task, "gather requirements for the app");
    }

    #[tokio::test]
    async fn test_run_auto_mode_requires_enablement() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let mut orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        assert!(!orch.is_auto_mode_enabled());
        assert!(orch.run_auto_mode().await.is_err());

        orch.enable_auto_mode();
        assert!(orch.run_auto_mode().await.is_ok());

        orch.disable_auto_mode();
        assert!(!orch.is_auto_mode_enabled());
    }

    #[tokio::test]
    async fn test_load_state_none_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let executor = StubExecutor::new();
        let orch = Orchestrator::new(
            &executor,
            ProjectContext::at(temp_dir.path()),
            Config::default(),
        );

        assert!(orch.load_state().unwrap().is_none());
    }
}
