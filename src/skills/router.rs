//! Keyword-based skill detection and execution.
//!
//! Detection is deliberately simple: case-insensitive substring matching
//! against each skill's pattern list, in catalog order, so results are
//! deterministic for a given task description.

use super::Skill;
use crate::agents::{AgentRole, TaskSpec};
use crate::error::Result;
use crate::executor::TaskExecutor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One recorded skill execution.
#[derive(Debug, Clone, Serialize)]
pub struct SkillExecution {
    pub task: String,
    pub skills: Vec<String>,
    pub agent: AgentRole,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of routing a task through the skill catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SkillOutcome {
    pub detected_skills: Vec<String>,
    /// Per-agent results, keyed in role order.
    pub agent_results: BTreeMap<AgentRole, String>,
}

impl SkillOutcome {
    /// No skills matched the task description.
    pub fn is_empty(&self) -> bool {
        self.detected_skills.is_empty()
    }
}

/// Detects skills in task descriptions and executes them per owning agent.
pub struct SkillRouter<'a> {
    executor: &'a dyn TaskExecutor,
    history: Vec<SkillExecution>,
}

impl<'a> SkillRouter<'a> {
    pub fn new(executor: &'a dyn TaskExecutor) -> Self {
        Self {
            executor,
            history: Vec::new(),
        }
    }

    /// Detect skills whose patterns appear in the task description.
    ///
    /// Returns skills in catalog order with no duplicates.
    pub fn detect_skills(task_description: &str) -> Vec<Skill> {
        let task_lower = task_description.to_lowercase();

        Skill::all()
            .iter()
            .filter(|skill| {
                skill
                    .patterns()
                    .iter()
                    .any(|pattern| task_lower.contains(pattern))
            })
            .copied()
            .collect()
    }

    /// Group detected skills by their owning agent, preserving catalog order
    /// within each group.
    pub fn group_by_agent(skills: &[Skill]) -> BTreeMap<AgentRole, Vec<Skill>> {
        let mut groups: BTreeMap<AgentRole, Vec<Skill>> = BTreeMap::new();
        for skill in skills {
            groups.entry(skill.agent()).or_default().push(*skill);
        }
        groups
    }

    /// Detect skills for a task and execute each agent's group as one task.
    ///
    /// Agents execute in role order. A failing agent aborts the run; partial
    /// results up to that point are recorded in history.
    pub async fn execute_skills(&mut self, task_description: &str) -> Result<SkillOutcome> {
        self.execute_skills_filtered(task_description, |_| true).await
    }

    /// Like [`execute_skills`](Self::execute_skills), but skips agents the
    /// filter rejects. Skipped groups still count as detected skills.
    pub async fn execute_skills_filtered(
        &mut self,
        task_description: &str,
        enabled: impl Fn(AgentRole) -> bool,
    ) -> Result<SkillOutcome> {
        let skills = Self::detect_skills(task_description);

        if skills.is_empty() {
            return Ok(SkillOutcome {
                detected_skills: Vec::new(),
                agent_results: BTreeMap::new(),
            });
        }

        debug!(
            skills = ?skills.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "detected skills"
        );

        let groups = Self::group_by_agent(&skills);
        let mut agent_results = BTreeMap::new();

        for (role, group) in &groups {
            if !enabled(*role) {
                debug!(agent = role.name(), "skipping disabled agent's skill group");
                continue;
            }

            let skill_context = group
                .iter()
                .map(|s| format!("- {}: Execute this skill", s.name()))
                .collect::<Vec<_>>()
                .join("\n");

            let task = TaskSpec::new(
                format!(
                    "{}\n\nRequired skills to execute:\n{}\n\n\
                     Execute all required skills and provide comprehensive results.",
                    task_description, skill_context
                ),
                "Comprehensive results for every required skill",
            );

            let agent = role.spec();
            let result = self.executor.execute(&agent, &task).await?;

            self.history.push(SkillExecution {
                task: task_description.to_string(),
                skills: group.iter().map(|s| s.name().to_string()).collect(),
                agent: *role,
                result: result.clone(),
                timestamp: Utc::now(),
            });

            agent_results.insert(*role, result);
        }

        Ok(SkillOutcome {
            detected_skills: skills.iter().map(|s| s.name().to_string()).collect(),
            agent_results,
        })
    }

    /// Skill executions recorded so far, oldest first.
    pub fn history(&self) -> &[SkillExecution] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
