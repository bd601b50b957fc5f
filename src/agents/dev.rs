//! Dev agent (Haytame) - BUILD phase.
//!
//! Owns implementation, refactoring, code review, test writing, and debugging.

use super::{AgentRole, AgentSpec, TaskSpec, bullet_list};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Dev,
        name: "Haytame",
        title: "Dev Agent",
        goal: "Implement features, write clean code, and ensure quality",
        backstory: "Haytame is a senior software engineer with 12+ years of experience in \
                    full-stack development. He writes clean, maintainable code and follows \
                    best practices for testing, documentation, and code review.",
    }
}

/// Task: implement a user story.
pub fn implementation_task(
    user_story: &str,
    acceptance_criteria: &[String],
    tech_stack: Option<&str>,
) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Implement the following user story:\n\n\
             {}\n\n\
             Acceptance Criteria:\n{}\n\n\
             Tech Stack: {}\n\n\
             Provide:\n\
             1. Implementation plan\n\
             2. Complete, working code\n\
             3. Unit tests covering the acceptance criteria\n\
             4. Notes on assumptions and trade-offs",
            user_story,
            bullet_list(acceptance_criteria),
            tech_stack.unwrap_or("as established in the architecture")
        ),
        "Complete implementation with code and tests",
    )
}

/// Task: refactor code to address known issues.
pub fn refactoring_task(code_content: &str, issues: &[String]) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Refactor the following code to address the listed issues:\n\n\
             Code:\n{}\n\n\
             Issues:\n{}\n\n\
             Preserve behavior; explain each change and why it improves the code.",
            code_content,
            bullet_list(issues)
        ),
        "Refactored code with explanations",
    )
}

/// Task: review code for correctness, style, and security.
pub fn code_review_task(code_content: &str, context: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Review the following code:\n\n\
             {}\n\n\
             Context: {}\n\n\
             Check for:\n\
             - Correctness and edge cases\n\
             - Readability and naming\n\
             - Error handling\n\
             - Security issues\n\
             - Performance concerns\n\n\
             Rate severity of each finding (blocker/major/minor/nit).",
            code_content,
            context.unwrap_or("none")
        ),
        "Detailed code review with findings and recommendations",
    )
}

/// Task: write tests for existing code.
pub fn test_task(code_content: &str, requirements: &[String]) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Write tests for the following code:\n\n\
             {}\n\n\
             Test Requirements:\n{}\n\n\
             Cover the happy path, edge cases, and error conditions.",
            code_content,
            bullet_list(requirements)
        ),
        "Comprehensive test suite",
    )
}

/// Task: debug a failure.
pub fn debugging_task(error_message: &str, code_content: &str, context: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Debug the following failure:\n\n\
             Error:\n{}\n\n\
             Code:\n{}\n\n\
             Context: {}\n\n\
             Identify the root cause, propose a fix, and include a regression test.",
            error_message,
            code_content,
            context.unwrap_or("none")
        ),
        "Bug fix with explanation and tests",
    )
}
