//! Build flow.
//!
//! Runs the BUILD phase as a linear pipeline: implementation, security
//! review, refactoring, code review, tests, debugging. Marks BUILD complete
//! in the state snapshot at the end.

use super::{FlowKind, FlowReport, StepRunner};
use crate::agents::{AgentRole, dev, security};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::executor::TaskExecutor;
use crate::state::ProjectState;
use serde_json::json;

pub struct BuildFlow<'a> {
    executor: &'a dyn TaskExecutor,
    ctx: ProjectContext,
}

impl<'a> BuildFlow<'a> {
    pub fn new(executor: &'a dyn TaskExecutor, ctx: ProjectContext) -> Self {
        Self { executor, ctx }
    }

    /// Run the build pipeline seeded with the design context.
    pub async fn kickoff(&self, design_context: &str) -> Result<FlowReport> {
        let mut runner = StepRunner::new(self.executor);

        println!("Build flow: starting from design context...");
        let mut state = if self.ctx.state_path().exists() {
            ProjectState::load(self.ctx.state_path())?
        } else {
            ProjectState::new(self.ctx.project_name())
        };
        state.current_phase = Some("BUILD".to_string());

        let mut context = design_context.to_string();
        let criteria = vec![context.clone()];

        let implementation = runner
            .run(
                "implement_features",
                AgentRole::Dev,
                dev::implementation_task(&context, &criteria, None),
            )
            .await;
        context = implementation.unwrap_or(context);

        let review = runner
            .run(
                "security_review",
                AgentRole::Security,
                security::security_review_task(&context),
            )
            .await;
        context = review.unwrap_or(context);

        let refactor = runner
            .run(
                "refactor_code",
                AgentRole::Dev,
                dev::refactoring_task(&context, &[String::from("findings from security review")]),
            )
            .await;
        context = refactor.unwrap_or(context);

        let code_review = runner
            .run(
                "code_review",
                AgentRole::Dev,
                dev::code_review_task(&context, None),
            )
            .await;
        context = code_review.unwrap_or(context);

        let tests = runner
            .run(
                "write_tests",
                AgentRole::Dev,
                dev::test_task(&context, &[String::from("cover the implemented features")]),
            )
            .await;
        context = tests.unwrap_or(context);

        runner
            .run(
                "debug_issues",
                AgentRole::Dev,
                dev::debugging_task("issues surfaced by tests and review", &context, None),
            )
            .await;

        // Finalize
        state.complete_phase("BUILD");
        state.errors = runner.errors.clone();
        state.set_extra("flow", json!("build"));
        state.save(self.ctx.state_path())?;
        println!("Build flow completed. State saved to {}", self.ctx.state_path().display());

        Ok(FlowReport {
            flow: FlowKind::Build,
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
    async fn test_build_flow_runs_six_steps_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::new();

        let report = BuildFlow::new(&executor, ctx.clone())
            .kickoff("the architecture document")
            .await
            .unwrap();

        let steps: Vec<_> = report.steps.iter().map(|s| s.step.as_str()).collect();
        assert_eq!(
            steps,
            vec![
                "implement_features",
                "security_review",
                "refactor_code",
                "code_review",
                "write_tests",
                "debug_issues"
            ]
        );

        let state = ProjectState::load(ctx.state_path()).unwrap();
        assert!(state.phases_completed.contains(&"BUILD".to_string()));
    }

    #[tokio::test]
    async fn test_build_flow_security_failure_does_not_block_dev_steps() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::failing_for(&["Said"]);

        let report = BuildFlow::new(&executor, ctx)
            .kickoff("the architecture document")
            .await
            .unwrap();

        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("security_review error:"));
        assert_eq!(report.steps.len(), 6);
    }
}
