//! Product agent (Khalil) - DISCOVER phase.
//!
//! Owns requirements gathering: PRDs, personas, user stories, acceptance
//! criteria, prioritization, and project timelines.

use super::{AgentRole, AgentSpec, TaskSpec, bullet_list};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Product,
        name: "Khalil",
        title: "Product Agent",
        goal: "Gather requirements, create PRD, and define user stories",
        backstory: "Khalil is an expert product manager with 15+ years of experience in \
                    software product development. He excels at understanding user needs, \
                    prioritizing features, and creating clear product requirements documents.",
    }
}

/// Task: produce a full PRD from a project description and user input.
pub fn prd_task(project_description: &str, user_input: &str, context: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Based on the following project description and user input, create a comprehensive \
             Product Requirements Document (PRD):\n\n\
             Project Description: {}\n\
             User Input: {}\n\
             Additional Context: {}\n\n\
             The PRD should include:\n\
             1. Executive Summary\n\
             2. Problem Statement\n\
             3. Target Audience / Personas\n\
             4. User Stories (with acceptance criteria)\n\
             5. Functional Requirements\n\
             6. Non-Functional Requirements\n\
             7. Success Metrics\n\
             8. MVP Scope (MoSCoW prioritization)",
            project_description,
            user_input,
            context.unwrap_or("none")
        ),
        "A comprehensive PRD document in markdown format",
    )
}

/// Task: derive user stories from a PRD.
pub fn user_stories_task(prd_content: &str, num_stories: usize) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Based on the PRD below, create {} detailed user stories with acceptance criteria:\n\n\
             {}\n\n\
             Each user story should follow the format:\n\
             - As a [type of user]\n\
             - I want [some goal]\n\
             - So that [some benefit]\n\n\
             Include acceptance criteria for each story using Given/When/Then format.",
            num_stories, prd_content
        ),
        "A list of user stories with acceptance criteria",
    )
}

/// Task: create user personas for a project.
pub fn personas_task(project_description: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Based on the project description, create detailed user personas:\n\n\
             Project: {}\n\n\
             For each persona, include:\n\
             - Name and role\n\
             - Demographics\n\
             - Goals and motivations\n\
             - Pain points\n\
             - Technical proficiency\n\
             - Usage scenarios",
            project_description
        ),
        "Detailed user personas in markdown format",
    )
}

/// Task: prioritize features using the MoSCoW method.
pub fn prioritize_features_task(features: &[String], constraints: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Prioritize the following features using the MoSCoW method:\n\n\
             Features:\n{}\n\n\
             Constraints:\n{}\n\n\
             Categorize each feature as:\n\
             - Must Have: Critical for MVP\n\
             - Should Have: Important but not critical\n\
             - Could Have: Nice to have if time permits\n\
             - Won't Have: Out of scope for this release\n\n\
             Provide rationale for each categorization.",
            bullet_list(features),
            constraints.unwrap_or("none")
        ),
        "Prioritized feature list with MoSCoW categories",
    )
}

/// Task: write Given/When/Then acceptance criteria for existing user stories.
pub fn acceptance_criteria_task(user_stories: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write detailed acceptance criteria for the following user stories:\n\n\
             {}\n\n\
             For each story provide:\n\
             - Given/When/Then scenarios covering the happy path\n\
             - Edge cases and error conditions\n\
             - Non-functional criteria where relevant (performance, accessibility)",
            user_stories
        ),
        "Acceptance criteria for every user story in Given/When/Then format",
    )
}

/// Task: build a milestone-level project timeline from scoped requirements.
pub fn project_timeline_task(scope: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Create a project timeline for the following scope:\n\n\
             {}\n\n\
             Include:\n\
             1. Milestones with target dates (relative, e.g. week 1, week 4)\n\
             2. Deliverables per milestone\n\
             3. Dependencies between milestones\n\
             4. Risks that could shift the timeline",
            scope
        ),
        "A milestone-level project timeline in markdown format",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prd_task_includes_inputs() {
        let task = prd_task("A todo app", "Needs offline mode", None);
        assert!(task.description.contains("A todo app"));
        assert!(task.description.contains("Needs offline mode"));
        assert!(task.description.contains("MoSCoW"));
        assert!(task.expected_output.contains("PRD"));
    }

    #[test]
    fn test_user_stories_task_carries_count() {
        let task = user_stories_task("PRD body", 12);
        assert!(task.description.contains("create 12 detailed user stories"));
        assert!(task.description.contains("Given/When/Then"));
    }

    #[test]
    fn test_prioritize_features_lists_features() {
        let features = vec!["auth".to_string(), "search".to_string()];
        let task = prioritize_features_task(&features, Some("2 week deadline"));
        assert!(task.description.contains("- auth"));
        assert!(task.description.contains("2 week deadline"));
    }

    #[test]
    fn test_timeline_task_asks_for_milestones() {
        let task = project_timeline_task("MVP scope");
        assert!(task.description.contains("Milestones"));
    }
}
