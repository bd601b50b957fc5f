//! Autonomous full-cycle flow.
//!
//! Eight phases in order: LOAD, DISCOVER, PLAN, ARCHITECT, IMPLEMENT, TEST,
//! DEPLOY, DOC. Each phase hands its combined output to the next, and the
//! final state snapshot is written whether or not steps failed.

use super::{FlowKind, FlowReport, StepRunner, join_outputs};
use crate::agents::{AgentRole, architect, dev, devops, doc, product, test};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::executor::TaskExecutor;
use crate::state::ProjectState;
use serde_json::json;
use tracing::info;

/// Phase names, in execution order.
pub const PHASES: &[&str] = &[
    "LOAD",
    "DISCOVER",
    "PLAN",
    "ARCHITECT",
    "IMPLEMENT",
    "TEST",
    "DEPLOY",
    "DOC",
];

pub struct AutoFlow<'a> {
    executor: &'a dyn TaskExecutor,
    ctx: ProjectContext,
}

impl<'a> AutoFlow<'a> {
    pub fn new(executor: &'a dyn TaskExecutor, ctx: ProjectContext) -> Self {
        Self { executor, ctx }
    }

    /// Run the full autonomous cycle.
    pub async fn kickoff(&self) -> Result<FlowReport> {
        let mut runner = StepRunner::new(self.executor);

        // LOAD: restore or initialize project state
        println!("LOAD phase: loading project context...");
        let mut state = if self.ctx.state_path().exists() {
            ProjectState::load(self.ctx.state_path())?
        } else {
            ProjectState::new(self.ctx.project_name())
        };
        let project_context = serde_json::to_string_pretty(&state)
            .unwrap_or_else(|_| self.ctx.project_name());

        // DISCOVER
        println!("DISCOVER phase: gathering requirements...");
        let mut outputs = Vec::new();
        for (step, task) in [
            (
                "create_prd",
                product::prd_task(&self.ctx.project_name(), &project_context, None),
            ),
            ("create_user_stories", product::user_stories_task(&project_context, 10)),
            ("create_personas", product::personas_task(&project_context)),
            (
                "prioritize_features",
                product::prioritize_features_task(&[project_context.clone()], None),
            ),
        ] {
            if let Some(out) = runner.run(step, AgentRole::Product, task).await {
                outputs.push(out);
            }
        }
        let discover = join_outputs(&outputs);

        // PLAN
        println!("PLAN phase: creating project plan...");
        let mut outputs = Vec::new();
        for (step, task) in [
            ("acceptance_criteria", product::acceptance_criteria_task(&discover)),
            ("project_timeline", product::project_timeline_task(&discover)),
        ] {
            if let Some(out) = runner.run(step, AgentRole::Product, task).await {
                outputs.push(out);
            }
        }
        let plan = join_outputs(&outputs);

        // ARCHITECT
        println!("ARCHITECT phase: designing system architecture...");
        let plan_items = vec![plan.clone()];
        let mut outputs = Vec::new();
        for (step, task) in [
            ("architecture", architect::architecture_task(&plan, None)),
            ("tech_stack", architect::tech_stack_task(&plan_items, None)),
            (
                "adr",
                architect::adr_task("Key architectural decisions", &plan, &plan_items),
            ),
            ("api_design", architect::api_design_task(&plan_items, None)),
            ("database_schema", architect::database_schema_task(&plan_items, None)),
        ] {
            if let Some(out) = runner.run(step, AgentRole::Architect, task).await {
                outputs.push(out);
            }
        }
        let architecture = join_outputs(&outputs);

        // IMPLEMENT
        println!("IMPLEMENT phase: implementing features...");
        let arch_items = vec![architecture.clone()];
        let mut outputs = Vec::new();
        for (step, task) in [
            (
                "implementation",
                dev::implementation_task(&architecture, &arch_items, None),
            ),
            ("refactoring", dev::refactoring_task(&architecture, &arch_items)),
            ("code_review", dev::code_review_task(&architecture, None)),
            ("write_tests", dev::test_task(&architecture, &arch_items)),
            (
                "debugging",
                dev::debugging_task("issues found during review", &architecture, None),
            ),
        ] {
            if let Some(out) = runner.run(step, AgentRole::Dev, task).await {
                outputs.push(out);
            }
        }
        let implementation = join_outputs(&outputs);

        // TEST
        println!("TEST phase: running tests...");
        let mut outputs = Vec::new();
        for (step, task) in [
            ("test_strategy", test::test_strategy_task(&implementation)),
            ("unit_tests", test::unit_tests_task(&implementation)),
            ("integration_tests", test::integration_tests_task(&implementation)),
            ("e2e_tests", test::e2e_tests_task(&implementation)),
            ("test_execution", test::test_execution_task(&implementation)),
        ] {
            if let Some(out) = runner.run(step, AgentRole::Test, task).await {
                outputs.push(out);
            }
        }
        let testing = join_outputs(&outputs);

        // DEPLOY
        println!("DEPLOY phase: setting up deployment...");
        let mut outputs = Vec::new();
        for (step, task) in [
            ("ci_cd_pipeline", devops::ci_cd_pipeline_task(&testing)),
            ("docker_setup", devops::docker_setup_task(&testing)),
            ("cloud_deployment", devops::cloud_deployment_task(&testing)),
            ("monitoring_setup", devops::monitoring_setup_task(&testing)),
            ("deployment_strategy", devops::deployment_strategy_task(&testing)),
        ] {
            if let Some(out) = runner.run(step, AgentRole::DevOps, task).await {
                outputs.push(out);
            }
        }
        let deployment = join_outputs(&outputs);

        // DOC
        println!("DOC phase: creating documentation...");
        for (step, task) in [
            ("readme", doc::readme_task(&deployment)),
            ("api_documentation", doc::api_documentation_task(&deployment)),
            ("user_guide", doc::user_guide_task(&deployment)),
            ("developer_guide", doc::developer_guide_task(&deployment)),
            (
                "architecture_documentation",
                doc::architecture_documentation_task(&deployment),
            ),
        ] {
            let _ = runner.run(step, AgentRole::Doc, task).await;
        }

        // Finalize: record all phases and persist state, errors or not
        for phase in PHASES {
            state.complete_phase(*phase);
        }
        state.current_phase = Some("COMPLETED".to_string());
        state.errors = runner.errors.clone();
        state.set_extra("flow", json!("auto"));
        state.save(self.ctx.state_path())?;

        info!(
            errors = runner.errors.len(),
            "autonomous flow completed, state saved"
        );
        println!("Autonomous flow completed. State saved to {}", self.ctx.state_path().display());

        Ok(FlowReport {
            flow: FlowKind::Auto,
            steps: runner.steps,
            errors: runner.errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::StubExecutor;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_auto_flow_runs_all_steps_and_saves_state() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::new();

        let report = AutoFlow::new(&executor, ctx.clone()).kickoff().await.unwrap();

        // 4 discover + 2 plan + 5 architect + 5 implement + 5 test + 5 deploy + 5 doc
        assert_eq!(report.steps.len(), 31);
        assert!(report.succeeded());

        let state = ProjectState::load(ctx.state_path()).unwrap();
        assert_eq!(state.phases_completed.len(), PHASES.len());
        assert_eq!(state.current_phase.as_deref(), Some("COMPLETED"));
    }

    #[tokio::test]
    async fn test_auto_flow_continues_past_failures() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::failing_for(&["Reda"]);

        let report = AutoFlow::new(&executor, ctx.clone()).kickoff().await.unwrap();

        // All 5 architect steps fail, everything else proceeds
        assert_eq!(report.errors.len(), 5);
        assert_eq!(report.steps.len(), 31);

        // State is still written, with the errors recorded
        let state = ProjectState::load(ctx.state_path()).unwrap();
        assert_eq!(state.errors.len(), 5);
        assert_eq!(state.current_phase.as_deref(), Some("COMPLETED"));
    }

    #[tokio::test]
    async fn test_auto_flow_resumes_existing_state() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());

        let mut prior = ProjectState::new("existing");
        prior.complete_phase("DISCOVER");
        prior.save(ctx.state_path()).unwrap();

        let executor = StubExecutor::new();
        AutoFlow::new(&executor, ctx.clone()).kickoff().await.unwrap();

        let state = ProjectState::load(ctx.state_path()).unwrap();
        assert_eq!(state.project_name, "existing");
        // DISCOVER is not duplicated
        assert_eq!(state.phases_completed.len(), PHASES.len());
    }
}
