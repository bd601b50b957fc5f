//! The skill catalog.
//!
//! Every skill has a canonical snake_case name, a set of keyword patterns for
//! detection, and exactly one owning agent. The `skills!` table is the single
//! source of truth; detection order follows declaration order.

pub mod router;

pub use router::SkillRouter;

use crate::agents::AgentRole;
use std::fmt;

macro_rules! skills {
    ($( $variant:ident => ($name:literal, $agent:expr, [$($pattern:literal),+ $(,)?]) ),+ $(,)?) => {
        /// A capability the orchestrator can route to an agent.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Skill {
            $($variant),+
        }

        impl Skill {
            /// All skills in declaration order.
            pub fn all() -> &'static [Skill] {
                &[$(Skill::$variant),+]
            }

            /// Canonical snake_case name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Skill::$variant => $name),+
                }
            }

            /// Keyword patterns that indicate this skill in a task description.
            pub fn patterns(&self) -> &'static [&'static str] {
                match self {
                    $(Skill::$variant => &[$($pattern),+]),+
                }
            }

            /// The agent that owns this skill.
            pub fn agent(&self) -> AgentRole {
                match self {
                    $(Skill::$variant => $agent),+
                }
            }
        }
    };
}

skills! {
    // Product skills
    RequirementAnalysis => ("requirement_analysis", AgentRole::Product,
        ["requirement", "analyze requirement", "gather requirement"]),
    PrdCreation => ("prd_creation", AgentRole::Product,
        ["prd", "product requirement", "requirement document"]),
    UserStoryWriting => ("user_story_writing", AgentRole::Product,
        ["user story", "story", "as a user", "user wants"]),
    PersonaCreation => ("persona_creation", AgentRole::Product,
        ["persona", "user persona", "target audience", "user profile"]),
    FeaturePrioritization => ("feature_prioritization", AgentRole::Product,
        ["prioritize feature", "feature priority", "rank feature", "moscow"]),
    AcceptanceCriteria => ("acceptance_criteria", AgentRole::Product,
        ["acceptance criteria", "definition of done", "dod"]),

    // Architecture skills
    SystemArchitecture => ("system_architecture", AgentRole::Architect,
        ["architecture", "system design", "high level design"]),
    TechStackSelection => ("tech_stack_selection", AgentRole::Architect,
        ["tech stack", "technology stack", "framework", "library"]),
    AdrDocumentation => ("adr_documentation", AgentRole::Architect,
        ["adr", "architecture decision", "decision record"]),
    ApiDesign => ("api_design", AgentRole::Architect,
        ["api design", "endpoint", "rest api", "graphql"]),
    DatabaseSchema => ("database_schema", AgentRole::Architect,
        ["database schema", "data model", "entity relationship", "er diagram"]),

    // UX skills
    UserFlowDesign => ("user_flow_design", AgentRole::Ux,
        ["user flow", "flow", "journey", "workflow"]),
    WireframeCreation => ("wireframe_creation", AgentRole::Ux,
        ["wireframe", "mockup", "layout"]),
    DesignSystem => ("design_system", AgentRole::Ux,
        ["design system", "component library", "style guide"]),
    Accessibility => ("accessibility", AgentRole::Ux,
        ["accessibility", "a11y", "wcag", "inclusive design"]),
    PrototypeCreation => ("prototype_creation", AgentRole::Ux,
        ["prototype", "interactive prototype", "clickable"]),

    // Development skills
    Implementation => ("implementation", AgentRole::Dev,
        ["implement", "develop", "code", "build", "create feature"]),
    Refactoring => ("refactoring", AgentRole::Dev,
        ["refactor", "clean up", "improve code", "optimize code"]),
    CodeReview => ("code_review", AgentRole::Dev,
        ["code review", "review code", "peer review"]),
    Testing => ("testing", AgentRole::Dev,
        ["write test", "create test", "add test"]),
    Debugging => ("debugging", AgentRole::Dev,
        ["debug", "fix bug", "troubleshoot", "resolve issue"]),

    // Testing skills
    TestStrategy => ("test_strategy", AgentRole::Test,
        ["test strategy", "testing approach", "test plan"]),
    UnitTesting => ("unit_testing", AgentRole::Test,
        ["unit test", "unit testing", "test function"]),
    IntegrationTesting => ("integration_testing", AgentRole::Test,
        ["integration test", "api test", "database test"]),
    E2eTesting => ("e2e_testing", AgentRole::Test,
        ["e2e test", "end to end test", "user flow test"]),
    TestExecution => ("test_execution", AgentRole::Test,
        ["run test", "execute test", "test execution"]),
    PerformanceTesting => ("performance_testing", AgentRole::Test,
        ["performance test", "load test", "stress test"]),
    SecurityTesting => ("security_testing", AgentRole::Test,
        ["security test", "penetration test", "vulnerability test"]),
    TestAutomation => ("test_automation", AgentRole::Test,
        ["test automation", "automate test", "ci test"]),
    QualityGate => ("quality_gate", AgentRole::Test,
        ["quality gate", "quality check", "acceptance gate"]),

    // Security skills
    SecurityReview => ("security_review", AgentRole::Security,
        ["security review", "security audit", "code security"]),
    VulnerabilityScan => ("vulnerability_scan", AgentRole::Security,
        ["vulnerability scan", "security scan", "dependency scan"]),
    SecureCoding => ("secure_coding", AgentRole::Security,
        ["secure coding", "security best practice", "secure code"]),
    DependencySecurity => ("dependency_security", AgentRole::Security,
        ["dependency security", "vulnerable dependency", "supply chain"]),
    AuthenticationSecurity => ("authentication_security", AgentRole::Security,
        ["authentication", "authorization", "auth", "oauth", "jwt"]),
    DataProtection => ("data_protection", AgentRole::Security,
        ["data protection", "encryption", "gdpr", "privacy"]),
    ApiSecurity => ("api_security", AgentRole::Security,
        ["api security", "rate limiting", "api key"]),
    SecurityMonitoring => ("security_monitoring", AgentRole::Security,
        ["security monitoring", "security alert", "intrusion detection"]),
    ComplianceReview => ("compliance_review", AgentRole::Security,
        ["compliance", "audit", "regulation", "standard"]),

    // DevOps skills
    CiCdPipeline => ("ci_cd_pipeline", AgentRole::DevOps,
        ["ci/cd", "pipeline", "continuous integration", "continuous deployment"]),
    DockerSetup => ("docker_setup", AgentRole::DevOps,
        ["docker", "container", "dockerfile", "docker compose"]),
    KubernetesSetup => ("kubernetes_setup", AgentRole::DevOps,
        ["kubernetes", "k8s", "deployment", "pod", "service"]),
    CloudDeployment => ("cloud_deployment", AgentRole::DevOps,
        ["azure", "cloud deployment", "azure devops"]),
    MonitoringSetup => ("monitoring_setup", AgentRole::DevOps,
        ["monitoring", "observability", "logging", "metrics"]),
    DeploymentStrategy => ("deployment_strategy", AgentRole::DevOps,
        ["deployment strategy", "blue green", "canary", "rolling"]),
    InfrastructureAsCode => ("infrastructure_as_code", AgentRole::DevOps,
        ["infrastructure as code", "iac", "terraform", "bicep"]),
    BackupRecovery => ("backup_recovery", AgentRole::DevOps,
        ["backup", "disaster recovery", "dr"]),
    ScalingStrategy => ("scaling_strategy", AgentRole::DevOps,
        ["scaling", "auto scaling", "horizontal scaling", "vertical scaling"]),
    SecurityHardening => ("security_hardening", AgentRole::DevOps,
        ["security hardening", "infrastructure security", "network security"]),

    // Documentation skills
    ReadmeCreation => ("readme_creation", AgentRole::Doc,
        ["readme", "read me", "project documentation"]),
    ApiDocumentation => ("api_documentation", AgentRole::Doc,
        ["api documentation", "api doc", "endpoint documentation"]),
    UserGuide => ("user_guide", AgentRole::Doc,
        ["user guide", "user manual", "how to"]),
    DeveloperGuide => ("developer_guide", AgentRole::Doc,
        ["developer guide", "dev guide", "contributing"]),
    ArchitectureDocumentation => ("architecture_documentation", AgentRole::Doc,
        ["architecture documentation", "system documentation"]),
    Changelog => ("changelog", AgentRole::Doc,
        ["changelog", "change log", "version history"]),
    TroubleshootingGuide => ("troubleshooting_guide", AgentRole::Doc,
        ["troubleshooting", "faq", "help", "support"]),
    MigrationGuide => ("migration_guide", AgentRole::Doc,
        ["migration guide", "upgrade guide", "migration"]),
    CodeExamples => ("code_examples", AgentRole::Doc,
        ["code example", "example", "sample code", "snippet"]),
    ReleaseNotes => ("release_notes", AgentRole::Doc,
        ["release notes", "release note", "what's new"]),

    // Tool skills
    WebSearch => ("web_search", AgentRole::Product,
        ["search", "web search", "google", "find information"]),
    SqlQuery => ("sql_query", AgentRole::Architect,
        ["sql", "query", "database query", "select", "insert", "update", "delete"]),
    FileOperation => ("file_operation", AgentRole::Dev,
        ["file", "read file", "write file", "create file", "delete file"]),
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_sixty_two_skills() {
        assert_eq!(Skill::all().len(), 62);
    }

    #[test]
    fn test_skill_names_are_unique() {
        let names: HashSet<_> = Skill::all().iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), Skill::all().len());
    }

    #[test]
    fn test_every_skill_has_patterns_and_an_agent() {
        for skill in Skill::all() {
            assert!(!skill.patterns().is_empty(), "{} has no patterns", skill);
            // agent() is total; just exercise it
            let _ = skill.agent();
        }
    }

    #[test]
    fn test_tool_skill_ownership() {
        assert_eq!(Skill::WebSearch.agent(), AgentRole::Product);
        assert_eq!(Skill::SqlQuery.agent(), AgentRole::Architect);
        assert_eq!(Skill::FileOperation.agent(), AgentRole::Dev);
    }

    #[test]
    fn test_display_uses_snake_case_name() {
        assert_eq!(Skill::PrdCreation.to_string(), "prd_creation");
        assert_eq!(Skill::CiCdPipeline.to_string(), "ci_cd_pipeline");
    }
}
