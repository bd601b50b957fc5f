//! Security agent (Said) - BUILD and VERIFY phases.
//!
//! Owns security reviews, vulnerability assessment, secure coding guidance,
//! and compliance.

use super::{AgentRole, AgentSpec, TaskSpec};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::Security,
        name: "Said",
        title: "Security Engineer & Vulnerability Specialist",
        goal: "Ensure software security through comprehensive security reviews and vulnerability assessments",
        backstory: "You are Said, an expert Security Engineer with deep knowledge of cybersecurity, \
                    vulnerability assessment, and secure coding practices. You excel at identifying \
                    security vulnerabilities, conducting security reviews, and implementing security \
                    best practices. You are thorough, security-conscious, and focused on preventing \
                    security breaches before they happen.",
    }
}

/// Task: review a codebase for security issues.
pub fn security_review_task(codebase_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Perform a security review of the following codebase:\n\n\
             {}\n\n\
             Check against OWASP Top 10:\n\
             - Injection (SQL, command, template)\n\
             - Broken authentication and session management\n\
             - Sensitive data exposure\n\
             - Access control flaws\n\
             - Security misconfiguration\n\
             - Vulnerable dependencies\n\n\
             Rate each finding by severity and provide a remediation plan.",
            codebase_context
        ),
        "Security review report with vulnerability findings, risk assessment, and remediation plan",
    )
}

/// Task: scan for known vulnerabilities.
pub fn vulnerability_scan_task(scan_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Perform a vulnerability scan of:\n\n\
             {}\n\n\
             Report each vulnerability with CVE reference where applicable, severity \
             rating (critical/high/medium/low), affected component, and remediation \
             timeline.",
            scan_context
        ),
        "Vulnerability scan report with severity ratings and remediation timeline",
    )
}

/// Task: write secure coding guidelines for the team.
pub fn secure_coding_task(coding_guidelines: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Create secure coding guidelines for this project:\n\n\
             {}\n\n\
             Include input validation, output encoding, secrets handling, \
             authentication patterns, and per-guideline code examples with a \
             developer checklist.",
            coding_guidelines
        ),
        "Secure coding guidelines document with examples and developer checklists",
    )
}

/// Task: assess dependency security.
pub fn dependency_security_task(dependency_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Assess the security of the project's dependencies:\n\n\
             {}\n\n\
             Identify vulnerable or unmaintained packages, license concerns, and \
             recommend version updates or replacements.",
            dependency_context
        ),
        "Dependency security report with vulnerability assessment and update recommendations",
    )
}

/// Task: review authentication and session handling.
pub fn authentication_security_task(auth_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Review the authentication and session management of:\n\n\
             {}\n\n\
             Cover credential storage, session lifecycle, MFA, password policy, \
             token handling, and account recovery. Provide a hardening plan.",
            auth_context
        ),
        "Authentication security report with vulnerability findings and hardening plan",
    )
}

/// Task: review data protection and privacy compliance.
pub fn data_protection_task(data_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Review data protection for:\n\n\
             {}\n\n\
             Cover encryption at rest and in transit, data classification, retention, \
             access logging, and GDPR/privacy obligations.",
            data_context
        ),
        "Data protection report with compliance assessment and security recommendations",
    )
}

/// Task: review API security.
pub fn api_security_task(api_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Review the security of the following APIs:\n\n\
             {}\n\n\
             Cover authentication, authorization, rate limiting, input validation, \
             error handling, and CORS. Provide a hardening plan per endpoint group.",
            api_context
        ),
        "API security report with vulnerability assessment and hardening plan",
    )
}

/// Task: design security monitoring and incident response.
pub fn security_monitoring_task(monitoring_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design security monitoring for:\n\n\
             {}\n\n\
             Include log sources, detection rules, alerting thresholds, and an \
             incident response runbook.",
            monitoring_context
        ),
        "Security monitoring infrastructure with alerting and incident response documentation",
    )
}

/// Task: review compliance posture.
pub fn compliance_review_task(compliance_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Perform a compliance review for:\n\n\
             {}\n\n\
             Map current controls to the applicable standards, identify gaps, and \
             recommend remediations with priorities.",
            compliance_context
        ),
        "Compliance review report with gap analysis and remediation recommendations",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_review_references_owasp() {
        let task = security_review_task("a web app");
        assert!(task.description.contains("OWASP Top 10"));
    }

    #[test]
    fn test_vulnerability_scan_requests_severity() {
        let task = vulnerability_scan_task("the stack");
        assert!(task.description.contains("critical/high/medium/low"));
    }
}
