//! The eight MDAN agent roles and their task factories.
//!
//! Each role module builds [`TaskSpec`]s for the work that role owns. A
//! [`TaskSpec`] is a prompt plus an expected-output contract; execution is
//! left to a [`crate::executor::TaskExecutor`].

pub mod architect;
pub mod dev;
pub mod devops;
pub mod doc;
pub mod product;
pub mod security;
pub mod ux;

use crate::error::{MdanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of MDAN roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Product,
    Architect,
    Ux,
    Dev,
    Test,
    Security,
    DevOps,
    Doc,
}

impl AgentRole {
    /// All roles in phase order (DISCOVER through SHIP).
    pub fn all() -> &'static [AgentRole] {
        &[
            AgentRole::Product,
            AgentRole::Architect,
            AgentRole::Ux,
            AgentRole::Dev,
            AgentRole::Test,
            AgentRole::Security,
            AgentRole::DevOps,
            AgentRole::Doc,
        ]
    }

    /// Canonical lowercase name, used in the CLI and config keys.
    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Product => "product",
            AgentRole::Architect => "architect",
            AgentRole::Ux => "ux",
            AgentRole::Dev => "dev",
            AgentRole::Test => "test",
            AgentRole::Security => "security",
            AgentRole::DevOps => "devops",
            AgentRole::Doc => "doc",
        }
    }

    /// The agent's persona name.
    pub fn persona(&self) -> &'static str {
        match self {
            AgentRole::Product => "Khalil",
            AgentRole::Architect => "Reda",
            AgentRole::Ux => "Jihane",
            AgentRole::Dev => "Haytame",
            AgentRole::Test => "Youssef",
            AgentRole::Security => "Said",
            AgentRole::DevOps => "Anas",
            AgentRole::Doc => "Amina",
        }
    }

    /// Parse a role from its CLI name (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "product" => Ok(AgentRole::Product),
            "architect" => Ok(AgentRole::Architect),
            "ux" => Ok(AgentRole::Ux),
            "dev" => Ok(AgentRole::Dev),
            "test" => Ok(AgentRole::Test),
            "security" => Ok(AgentRole::Security),
            "devops" => Ok(AgentRole::DevOps),
            "doc" => Ok(AgentRole::Doc),
            other => Err(MdanError::UserError(format!(
                "unknown agent '{}'. Available agents: product, architect, ux, dev, test, security, devops, doc",
                other
            ))),
        }
    }

    /// Build the full agent definition for this role.
    pub fn spec(&self) -> AgentSpec {
        match self {
            AgentRole::Product => product::spec(),
            AgentRole::Architect => architect::spec(),
            AgentRole::Ux => ux::spec(),
            AgentRole::Dev => dev::spec(),
            AgentRole::Test => test::spec(),
            AgentRole::Security => security::spec(),
            AgentRole::DevOps => devops::spec(),
            AgentRole::Doc => doc::spec(),
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An agent definition: persona, role title, goal, and backstory.
///
/// The backstory and goal become the system prompt when a task is executed.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSpec {
    pub role: AgentRole,
    pub name: &'static str,
    pub title: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl AgentSpec {
    /// Render the system prompt for this agent.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}, acting as {}.\n\nGoal: {}\n\n{}",
            self.name, self.title, self.goal, self.backstory
        )
    }
}

/// A unit of work for an agent: a prompt and an expected-output contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Render the user prompt for this task.
    pub fn user_prompt(&self) -> String {
        format!(
            "{}\n\nExpected output: {}",
            self.description.trim(),
            self.expected_output
        )
    }
}

/// Format a slice of items as a markdown bullet list for prompt bodies.
pub(crate) fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}
