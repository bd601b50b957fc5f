//! DevOps agent (Anas) - SHIP phase.
//!
//! Owns CI/CD, containers, orchestration, cloud deployment, monitoring, and
//! infrastructure as code.

use super::{AgentRole, AgentSpec, TaskSpec};

pub fn spec() -> AgentSpec {
    AgentSpec {
        role: AgentRole::DevOps,
        name: "Anas",
        title: "DevOps Engineer & Cloud Specialist",
        goal: "Ensure reliable deployment and infrastructure management through CI/CD and cloud operations",
        backstory: "You are Anas, an expert DevOps Engineer with deep knowledge of cloud \
                    infrastructure, CI/CD pipelines, containerization, and infrastructure as code. \
                    You excel at designing robust deployment strategies, automating operations, and \
                    ensuring high availability. You are automation-focused, reliability-conscious, \
                    and committed to operational excellence.",
    }
}

/// Task: design a CI/CD pipeline.
pub fn ci_cd_pipeline_task(project_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design a CI/CD pipeline for this project:\n\n\
             {}\n\n\
             Include build, test, lint, security scan, artifact publishing, and \
             deployment stages, with caching and branch/tag trigger rules.",
            project_context
        ),
        "CI/CD pipeline configuration with all stages and documentation",
    )
}

/// Task: containerize an application.
pub fn docker_setup_task(application_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Containerize the following application:\n\n\
             {}\n\n\
             Provide a multi-stage Dockerfile, a docker-compose file for local \
             development, image size and security considerations, and usage notes.",
            application_context
        ),
        "Docker setup with Dockerfile, docker-compose, and usage documentation",
    )
}

/// Task: write Kubernetes manifests.
pub fn kubernetes_setup_task(k8s_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Create Kubernetes deployment manifests for:\n\n\
             {}\n\n\
             Include deployments, services, ingress, config maps, secrets handling, \
             resource limits, and health probes.",
            k8s_context
        ),
        "Kubernetes deployment manifests with setup documentation",
    )
}

/// Task: plan a cloud deployment.
pub fn cloud_deployment_task(cloud_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Plan the cloud infrastructure and deployment for:\n\n\
             {}\n\n\
             Include the service topology, networking, managed services, IAM, cost \
             considerations, and infrastructure-as-code definitions.",
            cloud_context
        ),
        "Cloud infrastructure setup with IaC and deployment documentation",
    )
}

/// Task: set up monitoring and alerting.
pub fn monitoring_setup_task(monitoring_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Set up monitoring for:\n\n\
             {}\n\n\
             Include metrics, dashboards, log aggregation, alert rules with \
             thresholds, and on-call escalation.",
            monitoring_context
        ),
        "Monitoring infrastructure with dashboards and alerting configuration",
    )
}

/// Task: choose and document a deployment strategy.
pub fn deployment_strategy_task(deployment_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Define a deployment strategy for:\n\n\
             {}\n\n\
             Compare blue-green, canary, and rolling approaches; pick one and \
             document the rollout and rollback procedures.",
            deployment_context
        ),
        "Deployment strategy document with implementation procedures",
    )
}

/// Task: author infrastructure as code.
pub fn infrastructure_as_code_task(iac_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Author infrastructure-as-code for:\n\n\
             {}\n\n\
             Structure it into reusable modules with per-environment configuration \
             and state management guidance.",
            iac_context
        ),
        "Infrastructure as Code setup with modules and documentation",
    )
}

/// Task: design backup and disaster recovery.
pub fn backup_recovery_task(backup_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design backup and disaster recovery for:\n\n\
             {}\n\n\
             Specify backup schedules, retention, RPO/RTO targets, restore \
             procedures, and recovery testing cadence.",
            backup_context
        ),
        "Backup and disaster recovery setup with procedures documentation",
    )
}

/// Task: design a scaling strategy.
pub fn scaling_strategy_task(scaling_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Design a scaling strategy for:\n\n\
             {}\n\n\
             Cover horizontal and vertical scaling, auto-scaling triggers, load \
             balancing, and capacity planning.",
            scaling_context
        ),
        "Scaling strategy document with auto-scaling configuration",
    )
}

/// Task: harden the infrastructure.
pub fn security_hardening_task(security_context: &str) -> TaskSpec {
    TaskSpec::new(
        format!(
            "Harden the infrastructure for:\n\n\
             {}\n\n\
             Cover network segmentation, least-privilege IAM, secrets management, \
             patching, and audit logging.",
            security_context
        ),
        "Infrastructure security hardening with documentation",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_task_lists_stages() {
        let task = ci_cd_pipeline_task("a Rust service");
        assert!(task.description.contains("build, test, lint"));
    }

    #[test]
    fn test_backup_task_mentions_rpo_rto() {
        let task = backup_recovery_task("a postgres cluster");
        assert!(task.description.contains("RPO/RTO"));
    }
}
