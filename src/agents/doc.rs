//! Documentation agent (Amina) - SHIP phase.
//!
//! Owns READMEs, API docs, guides, changelogs, and release notes.

use super::{AgentRole, AgentSpec, TaskSpec};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Doc,
        name: "Amina",
        title: "Technical Writer & Documentation Specialist",
        goal: "Create comprehensive, clear, and user-friendly documentation for the project",
        backstory: "You are Amina, an expert Technical Writer with deep knowledge of technical \
                    documentation, user guides, and developer documentation. You excel at \
                    explaining complex concepts clearly, creating comprehensive guides, and \
                    ensuring documentation is accessible to all users. You are detail-oriented, \
                    user-focused, and committed to documentation excellence.",
    }
}

/// Task: write the project README.
pub fn readme_task(project_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a complete README for this project:\n\n\
             {}\n\n\
             Include project overview, features, installation, quick start, usage \
             examples, configuration, and contribution guidelines.",
            project_context
        ),
        "Complete README.md with project overview, installation, usage, and contribution guidelines",
    )
}

/// Task: document the API surface.
pub fn api_documentation_task(api_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Document the following API:\n\n\
             {}\n\n\
             For each endpoint include purpose, parameters, request/response \
             examples, error codes, and authentication notes.",
            api_context
        ),
        "Comprehensive API documentation with endpoints, examples, and reference",
    )
}

/// Task: write the end-user guide.
pub fn user_guide_task(user_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a user guide for:\n\n\
             {}\n\n\
             Include getting-started tutorials, task-oriented walkthroughs, \
             screenshots placeholders, and a troubleshooting section.",
            user_context
        ),
        "Comprehensive user guide with tutorials, examples, and troubleshooting",
    )
}

/// Task: write the developer guide.
pub fn developer_guide_task(dev_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a developer guide for:\n\n\
             {}\n\n\
             Include environment setup, architecture overview, coding conventions, \
             testing workflow, and the contribution process.",
            dev_context
        ),
        "Comprehensive developer guide with setup, architecture, and contribution process",
    )
}

/// Task: document the system architecture.
pub fn architecture_documentation_task(arch_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Document the architecture of:\n\n\
             {}\n\n\
             Include component diagrams (described in text), data flows, key design \
             decisions with rationale, and operational characteristics.",
            arch_context
        ),
        "Comprehensive architecture documentation with diagrams and design decisions",
    )
}

/// Task: write the changelog.
pub fn changelog_task(changelog_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a CHANGELOG for:\n\n\
             {}\n\n\
             Follow Keep a Changelog conventions; group entries by Added, Changed, \
             Fixed, and Removed, and include migration guidance for breaking changes.",
            changelog_context
        ),
        "Complete CHANGELOG.md with version history and migration guides",
    )
}

/// Task: write a troubleshooting guide.
pub fn troubleshooting_guide_task(troubleshooting_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a troubleshooting guide for:\n\n\
             {}\n\n\
             For each common issue include symptoms, diagnosis steps, the fix, and \
             how to prevent recurrence.",
            troubleshooting_context
        ),
        "Comprehensive troubleshooting guide with common issues and solutions",
    )
}

/// Task: write a migration guide.
pub fn migration_guide_task(migration_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write a migration guide for:\n\n\
             {}\n\n\
             Include prerequisites, step-by-step migration procedures, validation \
             checks, and rollback steps.",
            migration_context
        ),
        "Comprehensive migration guide with procedures and rollback steps",
    )
}

/// Task: produce annotated code examples.
pub fn code_examples_task(examples_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Create annotated code examples for:\n\n\
             {}\n\n\
             Cover the common use cases first, then advanced scenarios; explain each \
             example line by line where it is non-obvious.",
            examples_context
        ),
        "Comprehensive code examples documentation with explanations",
    )
}

/// Task: write release notes.
pub fn release_notes_task(release_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write release notes for:\n\n\
             {}\n\n\
             Highlight new features, fixes, known issues, and upgrade instructions, \
             written for end users rather than contributors.",
            release_context
        ),
        "Comprehensive release notes with features, fixes, and upgrade instructions",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_task_asks_for_quick_start() {
        let task = readme_task("mdan CLI");
        assert!(task.description.contains("quick start"));
        assert!(task.expected_output.contains("README.md"));
    }

    #[test]
    fn test_changelog_follows_conventions() {
        let task = changelog_task("v2.5.0");
        assert!(task.description.contains("Keep a Changelog"));
    }
}
