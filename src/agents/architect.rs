//! Architect agent (Reda) - DESIGN phase.
//!
//! Owns system architecture, tech stack selection, ADRs, API design, and
//! database schema design.

use super::{AgentRole, AgentSpec, TaskSpec, bullet_list};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Architect,
        name: "Reda",
        title: "Architect Agent",
        goal: "Design system architecture, select tech stack, and create ADRs",
        backstory: "Reda is a senior software architect with 20+ years of experience designing \
                    scalable, maintainable systems. He specializes in microservices, cloud-native \
                    architectures, and technology stack selection.",
    }
}

/// Task: design the system architecture from a PRD.
pub fn architecture_task(prd_content: &str, constraints: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Based on the PRD below, design a comprehensive system architecture:\n\n\
             PRD:\n{}\n\n\
             Constraints:\n{}\n\n\
             The architecture document should include:\n\
             1. High-level architecture diagram (described in text)\n\
             2. Component breakdown\n\
             3. Data flow\n\
             4. Technology stack recommendations\n\
             5. Scalability considerations\n\
             6. Security considerations\n\
             7. Deployment architecture",
            prd_content,
            constraints.unwrap_or("none")
        ),
        "A comprehensive architecture document in markdown format",
    )
}

/// Task: select a technology stack for the requirements.
pub fn tech_stack_task(requirements: &[String], preferences: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Select an optimal technology stack based on the following requirements:\n\n\
             Requirements:\n{}\n\n\
             Preferences:\n{}\n\n\
             Provide recommendations for:\n\
             - Programming language(s)\n\
             - Framework(s)\n\
             - Database(s)\n\
             - Caching layer\n\
             - Message queue (if needed)\n\
             - Frontend framework (if applicable)\n\
             - DevOps tools\n\n\
             For each recommendation, provide justification, pros and cons, and \
             alternatives considered.",
            bullet_list(requirements),
            preferences.unwrap_or("none")
        ),
        "Technology stack recommendations with justifications",
    )
}

/// Task: write an Architecture Decision Record.
pub fn adr_task(decision_topic: &str, context: &str, options: &[String]) -> TaskSpec {
    let numbered = options
        .iter()
        .enumerate()
        .map(|(i, opt)| format!("{}. {}", i + 1, opt))
        .collect::<Vec<_>>()
        .join("\n");

    TaskSpec::new(
        format!(
            "Create an Architecture Decision Record (ADR) for the following:\n\n\
             Decision: {}\n\n\
             Context:\n{}\n\n\
             Options being considered:\n{}\n\n\
             The ADR should follow this format:\n\
             1. Status (Proposed/Accepted/Rejected/Superseded)\n\
             2. Context\n\
             3. Decision\n\
             4. Consequences (positive and negative)\n\
             5. Alternatives considered",
            decision_topic, context, numbered
        ),
        "A complete ADR document",
    )
}

/// Task: design RESTful API endpoints.
pub fn api_design_task(requirements: &[String], data_models: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design RESTful API endpoints based on the following requirements:\n\n\
             Requirements:\n{}\n\n\
             Data Models:\n{}\n\n\
             For each endpoint, specify:\n\
             - HTTP method and path\n\
             - Request parameters (path, query, body)\n\
             - Response format\n\
             - Authentication requirements\n\
             - Rate limiting considerations\n\
             - Error responses\n\n\
             Organize endpoints by resource and provide OpenAPI/Swagger specification.",
            bullet_list(requirements),
            data_models.unwrap_or("To be defined")
        ),
        "API design document with endpoint specifications",
    )
}

/// Task: design a database schema.
pub fn database_schema_task(requirements: &[String], tech_stack: Option<&str>) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design a database schema based on the following requirements:\n\n\
             Requirements:\n{}\n\n\
             Database Technology: {}\n\n\
             Provide:\n\
             1. Entity-Relationship diagram (described in text)\n\
             2. Table definitions with columns, data types, and constraints\n\
             3. Indexes for performance\n\
             4. Relationships (foreign keys)\n\
             5. Migration strategy\n\
             6. SQL DDL statements (if applicable)",
            bullet_list(requirements),
            tech_stack.unwrap_or("To be determined")
        ),
        "Database schema design with DDL statements",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_task_embeds_prd() {
        let task = architecture_task("the PRD", Some("must run on-prem"));
        assert!(task.description.contains("the PRD"));
        assert!(task.description.contains("must run on-prem"));
        assert!(task.description.contains("Deployment architecture"));
    }

    #[test]
    fn test_adr_task_numbers_options() {
        let options = vec!["Postgres".to_string(), "SQLite".to_string()];
        let task = adr_task("Pick a database", "small team", &options);
        assert!(task.description.contains("1. Postgres"));
        assert!(task.description.contains("2. SQLite"));
    }

    #[test]
    fn test_schema_task_default_tech_stack() {
        let task = database_schema_task(&["store users".to_string()], None);
        assert!(task.description.contains("To be determined"));
    }
}
