//! Multi-agent debate flow.
//!
//! Three fixed rounds (initial positions, counterarguments, consensus
//! building) followed by a consensus synthesis by the product agent. The
//! participant set is chosen from the topic's keywords; product, architect,
//! and dev always take part. Results are saved to debate_results.json.

use super::{FlowKind, FlowReport, StepResult, StepRunner};
use crate::agents::{AgentRole, TaskSpec};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::executor::TaskExecutor;
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of debate rounds before consensus synthesis.
pub const MAX_ROUNDS: u32 = 3;

/// One agent's contribution in one round.
#[derive(Debug, Clone, Serialize)]
pub struct Argument {
    pub round: u32,
    pub agent: AgentRole,
    pub position: String,
}

/// Full record of a debate.
#[derive(Debug, Clone, Serialize)]
pub struct DebateReport {
    pub topic: String,
    pub participants: Vec<AgentRole>,
    pub arguments: Vec<Argument>,
    pub consensus: String,
    pub errors: Vec<String>,
    pub concluded_at: DateTime<Utc>,
}

impl DebateReport {
    /// Flatten the debate into the common flow-report shape.
    ///
    /// Each argument becomes a step named after its round, followed by the
    /// consensus synthesis step.
    pub fn into_flow_report(self) -> FlowReport {
        let mut steps: Vec<StepResult> = self
            .arguments
            .into_iter()
            .map(|arg| StepResult {
                step: format!("round{}", arg.round),
                agent: arg.agent,
                output: Some(arg.position),
            })
            .collect();
        steps.push(StepResult {
            step: "consensus".to_string(),
            agent: AgentRole::Product,
            output: Some(self.consensus),
        });

        FlowReport {
            flow: FlowKind::Debate,
            steps,
            errors: self.errors,
        }
    }
}

pub struct DebateFlow<'a> {
    executor: &'a dyn TaskExecutor,
    ctx: ProjectContext,
}

impl<'a> DebateFlow<'a> {
    pub fn new(executor: &'a dyn TaskExecutor, ctx: ProjectContext) -> Self {
        Self { executor, ctx }
    }

    /// Pick debate participants from topic keywords.
    ///
    /// Product, architect, and dev always participate; the other roles join
    /// when the topic touches their specialty.
    pub fn select_participants(topic: &str) -> Vec<AgentRole> {
        let topic_lower = topic.to_lowercase();
        let mut participants = vec![AgentRole::Product, AgentRole::Architect, AgentRole::Dev];

        let contains_any =
            |keywords: &[&str]| keywords.iter().any(|k| topic_lower.contains(k));

        if contains_any(&["user", "ux", "ui", "design", "interface"]) {
            participants.push(AgentRole::Ux);
        }
        if contains_any(&["test", "quality", "verify", "bug"]) {
            participants.push(AgentRole::Test);
        }
        if contains_any(&["security", "vulnerability", "auth", "encrypt"]) {
            participants.push(AgentRole::Security);
        }
        if contains_any(&["deploy", "ci/cd", "infrastructure", "cloud"]) {
            participants.push(AgentRole::DevOps);
        }
        if contains_any(&["document", "guide", "readme", "api doc"]) {
            participants.push(AgentRole::Doc);
        }

        participants
    }

    /// Run the debate to completion and persist the results.
    pub async fn kickoff(&self, topic: &str) -> Result<DebateReport> {
        let participants = Self::select_participants(topic);
        println!(
            "Starting debate on: {} ({} participants, {} rounds)",
            topic,
            participants.len(),
            MAX_ROUNDS
        );

        let mut runner = StepRunner::new(self.executor);
        let mut arguments: Vec<Argument> = Vec::new();

        // Round 1: initial positions
        println!("Round 1: initial positions");
        for role in &participants {
            let task = TaskSpec::new(
                format!(
                    "Present your initial position on the following topic:\n\n\
                     Topic: {}\n\n\
                     Your task:\n\
                     1. Analyze the topic from your perspective\n\
                     2. Present your initial position\n\
                     3. Provide supporting arguments\n\
                     4. Identify potential concerns\n\n\
                     Be concise but thorough in your response.",
                    topic
                ),
                "Initial position with supporting arguments",
            );
            if let Some(position) = runner.run("round1", *role, task).await {
                arguments.push(Argument {
                    round: 1,
                    agent: *role,
                    position,
                });
            }
        }

        // Round 2: counterarguments against round 1
        println!("Round 2: counterarguments");
        let round1_summary = summarize(&arguments);
        for role in &participants {
            let task = TaskSpec::new(
                format!(
                    "Present counterarguments to the following positions:\n\n\
                     Topic: {}\n\n\
                     Previous positions:\n{}\n\n\
                     Your task:\n\
                     1. Review other agents' positions\n\
                     2. Present counterarguments where you disagree\n\
                     3. Acknowledge valid points from others\n\
                     4. Refine your position based on new insights\n\n\
                     Be constructive and respectful in your counterarguments.",
                    topic, round1_summary
                ),
                "Counterarguments with refined position",
            );
            if let Some(position) = runner.run("round2", *role, task).await {
                arguments.push(Argument {
                    round: 2,
                    agent: *role,
                    position,
                });
            }
        }

        // Round 3: consensus building over everything so far
        println!("Round 3: consensus building");
        let all_summary = summarize(&arguments);
        for role in &participants {
            let task = TaskSpec::new(
                format!(
                    "Work towards consensus on the following topic:\n\n\
                     Topic: {}\n\n\
                     All previous arguments:\n{}\n\n\
                     Your task:\n\
                     1. Review all arguments from previous rounds\n\
                     2. Identify areas of agreement\n\
                     3. Propose compromises where there's disagreement\n\
                     4. Suggest a consensus position\n\
                     5. Highlight any remaining concerns\n\n\
                     Focus on finding common ground and practical solutions.",
                    topic, all_summary
                ),
                "Consensus proposal with compromises",
            );
            if let Some(position) = runner.run("round3", *role, task).await {
                arguments.push(Argument {
                    round: 3,
                    agent: *role,
                    position,
                });
            }
        }

        // Consensus synthesis by the product agent
        println!("Synthesizing consensus...");
        let synthesis_task = TaskSpec::new(
            format!(
                "Synthesize the final consensus from all debate rounds.\n\n\
                 Topic: {}\n\n\
                 All arguments:\n{}\n\n\
                 Your task:\n\
                 1. Analyze all arguments from all rounds\n\
                 2. Identify the consensus position\n\
                 3. Document areas of agreement\n\
                 4. Document areas of disagreement\n\
                 5. Provide final recommendation\n\
                 6. List any action items or next steps\n\n\
                 Generate a comprehensive consensus report.",
                topic,
                summarize(&arguments)
            ),
            "Comprehensive consensus report",
        );

        let consensus = match self
            .executor
            .execute(&AgentRole::Product.spec(), &synthesis_task)
            .await
        {
            Ok(consensus) => consensus,
            Err(e) => {
                runner.errors.push(format!("consensus synthesis error: {}", e));
                "Unable to reach consensus due to errors".to_string()
            }
        };

        let report = DebateReport {
            topic: topic.to_string(),
            participants,
            arguments,
            consensus,
            errors: runner.errors,
            concluded_at: Utc::now(),
        };

        // Persist debate results whether or not errors occurred
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            crate::error::MdanError::FlowError(format!("failed to serialize debate results: {}", e))
        })?;
        atomic_write_file(self.ctx.debate_results_path(), &json)?;
        println!(
            "Debate results saved to {}",
            self.ctx.debate_results_path().display()
        );

        Ok(report)
    }
}

/// Summarize arguments for the next round, truncating long positions.
fn summarize(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|arg| {
            let head: String = arg.position.chars().take(200).collect();
            format!("Round {} - {}: {}...", arg.round, arg.agent, head)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::StubExecutor;
    use tempfile::TempDir;

    #[test]
    fn test_core_participants_always_selected() {
        let participants = DebateFlow::select_participants("which database engine to choose");
        assert_eq!(
            participants,
            vec![AgentRole::Product, AgentRole::Architect, AgentRole::Dev]
        );
    }

    #[test]
    fn test_short_keywords_match_inside_words() {
        // "ui" matches inside "build", so the UX agent joins
        let participants = DebateFlow::select_participants("which build system to use");
        assert!(participants.contains(&AgentRole::Ux));
    }

    #[test]
    fn test_topic_keywords_add_participants() {
        let participants =
            DebateFlow::select_participants("should we encrypt user data in the cloud");
        assert!(participants.contains(&AgentRole::Ux)); // "user"
        assert!(participants.contains(&AgentRole::Security)); // "encrypt"
        assert!(participants.contains(&AgentRole::DevOps)); // "cloud"
        assert!(!participants.contains(&AgentRole::Doc));
    }

    #[tokio::test]
    async fn test_debate_runs_three_rounds_and_synthesis() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::new();

        let report = DebateFlow::new(&executor, ctx.clone())
            .kickoff("monolith or microservices")
            .await
            .unwrap();

        // 3 participants x 3 rounds
        assert_eq!(report.arguments.len(), 9);
        assert!(report.consensus.starts_with("[Khalil]"));
        assert!(report.errors.is_empty());
        assert!(ctx.debate_results_path().exists());
    }

    #[tokio::test]
    async fn test_debate_survives_failing_participant() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::failing_for(&["Reda"]);

        let report = DebateFlow::new(&executor, ctx.clone())
            .kickoff("monolith or microservices")
            .await
            .unwrap();

        // Architect fails in every round; others still argue
        assert_eq!(report.arguments.len(), 6);
        assert_eq!(report.errors.len(), 3);
        assert!(ctx.debate_results_path().exists());
    }

    #[tokio::test]
    async fn test_report_flattens_to_flow_steps() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::new();

        let report = DebateFlow::new(&executor, ctx)
            .kickoff("monolith or microservices")
            .await
            .unwrap();

        let flow_report = report.into_flow_report();
        assert_eq!(flow_report.flow, FlowKind::Debate);
        // 9 arguments plus the consensus step
        assert_eq!(flow_report.steps.len(), 10);
        assert_eq!(flow_report.steps[9].step, "consensus");
        assert!(flow_report.succeeded());
    }

    #[tokio::test]
    async fn test_failed_synthesis_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ProjectContext::at(temp_dir.path());
        let executor = StubExecutor::failing_for(&["Khalil"]);

        let report = DebateFlow::new(&executor, ctx)
            .kickoff("monolith or microservices")
            .await
            .unwrap();

        assert_eq!(report.consensus, "Unable to reach consensus due to errors");
        assert!(report.errors.iter().any(|e| e.contains("consensus synthesis")));
    }
}
