//! Task and flow execution commands: `run`, `auto`, `debate`, and `flow`.
//!
//! These are the commands that talk to the LLM backend. They resolve the
//! project, load mdan.yaml, and hand off to the orchestrator.

use crate::agents::AgentRole;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{MdanError, Result};
use crate::executor::OpenAiExecutor;
use crate::flows::debate::DebateReport;
use crate::flows::{FlowKind, FlowReport};
use crate::orchestrator::{Orchestrator, TaskAnalysis, TaskOutcome};

/// Execute the `mdan run` command.
pub async fn cmd_run(task: &str) -> Result<()> {
    let (ctx, config) = load_project()?;
    let executor = OpenAiExecutor::new(config.llm.clone())?;
    let mut orchestrator = Orchestrator::new(&executor, ctx, config);

    match Orchestrator::analyze_task(task) {
        TaskAnalysis::Flow { flow, reason } => {
            println!("Routing to {} flow: {}", flow.name(), reason)
        }
        TaskAnalysis::Agent { agent, reason } => {
            println!("Routing to {} agent: {}", agent.name(), reason)
        }
    }
    println!();

    match orchestrator.execute_task(task).await? {
        TaskOutcome::Agent { agent, result } => {
            println!("{}", result);
            println!();
            println!("Completed by the {} agent ({}).", agent.name(), agent.persona());
            Ok(())
        }
        TaskOutcome::Debate(report) => finish_debate(report),
        TaskOutcome::Flow(report) => finish_flow(report),
    }
}

/// Execute the `mdan auto` command.
pub async fn cmd_auto(force: bool) -> Result<()> {
    let (ctx, config) = load_project()?;
    let executor = OpenAiExecutor::new(config.llm.clone())?;
    let mut orchestrator = Orchestrator::new(&executor, ctx, config);
    if force {
        orchestrator.enable_auto_mode();
    }

    let report = orchestrator.run_auto_mode().await?;
    finish_flow(report)
}

/// Execute the `mdan debate` command.
pub async fn cmd_debate(topic: &str) -> Result<()> {
    let (ctx, config) = load_project()?;
    let executor = OpenAiExecutor::new(config.llm.clone())?;
    let orchestrator = Orchestrator::new(&executor, ctx, config);

    let report = orchestrator.start_debate(topic).await?;
    finish_debate(report)
}

/// Execute the `mdan flow` command.
pub async fn cmd_flow(name: &str, input: Option<&str>) -> Result<()> {
    let kind = FlowKind::parse(name)?;
    let input = match (kind, input) {
        (FlowKind::Auto, _) => input.unwrap_or("").to_string(),
        (_, Some(input)) => input.to_string(),
        (_, None) => {
            return Err(MdanError::UserError(format!(
                "flow '{}' requires an input (project description or topic)",
                kind.name()
            )));
        }
    };

    let (ctx, config) = load_project()?;
    let executor = OpenAiExecutor::new(config.llm.clone())?;
    let orchestrator = Orchestrator::new(&executor, ctx, config);

    // Debate has a richer report than the common flow shape
    if kind == FlowKind::Debate {
        let report = orchestrator.start_debate(&input).await?;
        return finish_debate(report);
    }

    let report = orchestrator.execute_flow(kind, &input).await?;
    finish_flow(report)
}

fn load_project() -> Result<(ProjectContext, Config)> {
    let ctx = ProjectContext::resolve()?;
    ctx.ensure_active()?;
    let config = Config::load(ctx.config_path())?;
    Ok((ctx, config))
}

/// Print a flow report and map collected step errors to a flow failure.
fn finish_flow(report: FlowReport) -> Result<()> {
    let completed = report.steps.iter().filter(|s| s.output.is_some()).count();
    println!();
    println!(
        "Flow '{}' finished: {}/{} steps succeeded.",
        report.flow.name(),
        completed,
        report.steps.len()
    );

    if report.succeeded() {
        return Ok(());
    }

    println!();
    println!("Errors:");
    for error in &report.errors {
        println!("  - {}", error);
    }
    Err(MdanError::FlowError(format!(
        "flow '{}' completed with {} error(s)",
        report.flow.name(),
        report.errors.len()
    )))
}

fn finish_debate(report: DebateReport) -> Result<()> {
    println!();
    println!("Debate on: {}", report.topic);
    let participants: Vec<&str> = report
        .participants
        .iter()
        .map(AgentRole::name)
        .collect();
    println!("Participants: {}", participants.join(", "));
    println!("Arguments recorded: {}", report.arguments.len());
    println!();
    println!("Consensus:");
    println!("{}", report.consensus);

    if report.errors.is_empty() {
        return Ok(());
    }

    println!();
    println!("Errors:");
    for error in &report.errors {
        println!("  - {}", error);
    }
    Err(MdanError::FlowError(format!(
        "debate completed with {} error(s)",
        report.errors.len()
    )))
}
