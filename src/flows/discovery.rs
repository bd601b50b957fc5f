//! Discovery flow.
//!
//! Runs the DISCOVER phase as a linear pipeline: PRD, user stories, personas,
//! feature prioritization, acceptance criteria. Marks DISCOVER complete in
//! the state snapshot at the end.

use super::{FlowKind, FlowReport, StepRunner};
use crate::agents::{AgentRole, product};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::executor::TaskExecutor;
use crate::state::ProjectState;
use serde_json::json;

pub struct DiscoveryFlow<'a> {
    executor: &'a dyn TaskExecutor,
    ctx: ProjectContext,
}

impl<'a> DiscoveryFlow<'a> {
    pub fn new(executor: &'a dyn TaskExecutor, ctx: ProjectContext) -> Self {
        Self { executor, ctx }
    }

    /// Run the discovery pipeline seeded with the user's input.
    pub async fn kickoff(&self, user_input: &str) -> Result<FlowReport> {
        let mut runner = StepRunner::new(self.executor);

        println!("Discovery flow: starting from user input...");
        let mut state = if self.ctx.state_path().exists() {
            ProjectState::load(self.ctx.state_path())?
        } else {
            ProjectState::new(self.ctx.project_name())
        };
        state.current_phase = Some("DISCOVER".to_string());

        // Each step feeds the next; a failed step passes the previous context on.
        let mut context = user_input.to_string();

        let prd = runner
            .run(
                "create_prd",
                AgentRole::Product,
                product::prd_task(&self.ctx.project_name(), &context, None),
            )
            .await;
        context = prd.unwrap_or(context);

        let stories = runner
            .run(
                "create_user_stories",
                AgentRole::Product,
                product::user_stories_task(&context, 10),
            )
            .await;
        context = stories.unwrap_or(context);

        let personas = runner
            .run(
                "create_personas",
                AgentRole::Product,
                product::personas_task(&context),
            )
            .await;
        context = personas.unwrap_or(context);

        let features = runner
            .run(
                "prioritize_features",
                AgentRole::Product,
                product::prioritize_features_task(&[context.clone()], None),
            )
            .await;
        context = features.unwrap_or(context);

        runner
            .run(
                "acceptance_criteria",
                AgentRole::Product,
                product::acceptance_criteria_task(&context),
            )
            .await;

        // Finalize
        state.complete_phase("DISCOVER");
        state.errors = runner.errors.clone();
        state.set_extra("flow", json!("discovery"));
        state.save(self.ctx.state_path())?;
        println!("Discovery flow completed. State saved to {}", self.ctx.state_path().display());

        Ok(FlowReport {
            flow: FlowKind::Discovery,
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
    async fn test_discovery_flow_runs_five_steps() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::new();

        let report = DiscoveryFlow::new(&executor, ctx.clone())
            .kickoff("a recipe sharing app")
            .await
            .unwrap();

        assert_eq!(report.steps.len(), 5);
        assert_eq!(report.steps[0].step, "create_prd");
        assert!(report.succeeded());

        let state = ProjectState::load(ctx.state_path()).unwrap();
        assert!(state.phases_completed.contains(&"DISCOVER".to_string()));
        assert!(state.current_phase.is_none());
    }

    #[tokio::test]
    async fn test_discovery_flow_records_failures_but_finishes() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::failing_for(&["Khalil"]);

        let report = DiscoveryFlow::new(&executor, ctx.clone())
            .kickoff("a recipe sharing app")
            .await
            .unwrap();

        assert_eq!(report.errors.len(), 5);
        // State still written
        assert!(ctx.state_path().exists());
    }
}
