//! Command implementations for mdan.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Scaffolding commands live in `init`, LLM-backed commands
//! in `run`, and the small read-only commands are defined here.

mod init;
mod run;

use crate::agents::AgentRole;
use crate::cli::Command;
use crate::clipboard;
use crate::context::ProjectContext;
use crate::error::{MdanError, Result};
use crate::fs::atomic_write_file;
use crate::scaffold;
use crate::state::ProjectState;
use std::fs;

/// Dispatch a command to its implementation.
pub async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => init::cmd_init(&args.name),
        Command::Attach(args) => init::cmd_attach(args.rebuild),
        Command::Status => cmd_status(),
        Command::Phase(args) => cmd_phase(&args.phase, args.copy),
        Command::Agent(args) => cmd_agent(args.name.as_deref()),
        Command::Oc => cmd_oc(),
        Command::Skills => cmd_skills(),
        Command::Run(args) => run::cmd_run(&args.task).await,
        Command::Auto(args) => run::cmd_auto(args.force).await,
        Command::Debate(args) => run::cmd_debate(&args.topic).await,
        Command::Flow(args) => run::cmd_flow(&args.name, args.input.as_deref()).await,
        Command::Setup => cmd_setup(),
    }
}

/// Lifecycle phases: CLI aliases, embedded prompt file, display label.
const PHASES: &[(&[&str], &str, &str)] = &[
    (&["1", "discover"], "01-discover.md", "DISCOVER"),
    (&["2", "design"], "02-design.md", "DESIGN"),
    (&["3", "build"], "03-build.md", "BUILD"),
    (&["4", "verify"], "04-verify.md", "VERIFY"),
    (&["5", "ship"], "05-ship.md", "SHIP"),
];

fn lookup_phase(phase: &str) -> Result<(&'static str, &'static str)> {
    let needle = phase.to_lowercase();
    PHASES
        .iter()
        .find(|(aliases, _, _)| aliases.contains(&needle.as_str()))
        .map(|(_, file, label)| (*file, *label))
        .ok_or_else(|| {
            MdanError::UserError(format!(
                "unknown phase '{}'. Use 1-5 or discover, design, build, verify, ship.",
                phase
            ))
        })
}

fn cmd_status() -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    ctx.ensure_active()?;

    if ctx.status_path().exists() {
        let status = fs::read_to_string(ctx.status_path())
            .map_err(|e| MdanError::UserError(format!("failed to read STATUS.md: {}", e)))?;
        println!("{}", status);
        return Ok(());
    }

    if ctx.state_path().exists() {
        let state = ProjectState::load(ctx.state_path())?;
        println!("Project: {}", state.project_name);
        println!(
            "Current phase: {}",
            state.current_phase.as_deref().unwrap_or("not started")
        );
        if !state.phases_completed.is_empty() {
            println!("Completed: {}", state.phases_completed.join(", "));
        }
        if !state.errors.is_empty() {
            println!("Errors from last run:");
            for error in &state.errors {
                println!("  - {}", error);
            }
        }
        println!("Updated: {}", state.updated_at.to_rfc3339());
        return Ok(());
    }

    println!("No status recorded yet. Run a phase or `mdan run` to get started.");
    Ok(())
}

fn cmd_phase(phase: &str, copy: bool) -> Result<()> {
    let (file, label) = lookup_phase(phase)?;
    let prompt = scaffold::phase_prompt(file)?;

    if copy {
        copy_or_print(prompt, &format!("{} phase prompt", label))
    } else {
        println!("{}", prompt);
        Ok(())
    }
}

fn cmd_agent(name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        println!("Available agents:");
        for role in AgentRole::all() {
            let spec = role.spec();
            println!("  {:9} {} — {}", role.name(), spec.name, spec.title);
        }
        return Ok(());
    };

    let role = AgentRole::parse(name)?;

    // Prefer the project's installed copy, which the team may have edited
    let ctx = ProjectContext::resolve()?;
    let installed = ctx.agents_dir().join(format!("{}.md", role.name()));
    if installed.is_file() {
        let prompt = fs::read_to_string(&installed).map_err(|e| {
            MdanError::UserError(format!("failed to read '{}': {}", installed.display(), e))
        })?;
        println!("{}", prompt);
        return Ok(());
    }

    println!("{}", scaffold::agent_prompt(role.name())?);
    Ok(())
}

fn cmd_oc() -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    let prompt = if ctx.is_active() {
        fs::read_to_string(ctx.orchestrator_prompt_path())
            .map_err(|e| MdanError::UserError(format!("failed to read orchestrator prompt: {}", e)))?
    } else {
        scaffold::orchestrator_prompt()?.to_string()
    };

    copy_or_print(&prompt, "orchestrator prompt")
}

fn cmd_skills() -> Result<()> {
    let ctx = ProjectContext::resolve()?;

    let names: Vec<String> = if ctx.is_active() && ctx.skills_dir().is_dir() {
        let mut names = Vec::new();
        for entry in fs::read_dir(ctx.skills_dir())
            .map_err(|e| MdanError::UserError(format!("failed to list skills: {}", e)))?
        {
            let entry =
                entry.map_err(|e| MdanError::UserError(format!("failed to list skills: {}", e)))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        names
    } else {
        scaffold::skill_names().iter().map(|s| s.to_string()).collect()
    };

    if names.is_empty() {
        println!("No skills installed.");
    } else {
        println!("Available skills:");
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}

const CONFIG_TEMPLATE: &str = "\
# MDAN orchestrator configuration
llm:
  model: gpt-4o
  temperature: 0.7
  max_tokens: 4096

auto_mode:
  enabled: false
  save_context: true

# Per-flow and per-agent toggles; everything is enabled by default.
# flows:
#   debate:
#     enabled: false
# agents:
#   devops:
#     enabled: false

# serper_api_key: your-serper-key
# database_url: postgres://localhost/mdan
";

const ENV_TEMPLATE: &str = "\
OPENAI_API_KEY=
SERPER_API_KEY=
DATABASE_URL=
";

fn cmd_setup() -> Result<()> {
    let ctx = ProjectContext::resolve()?;

    if ctx.config_path().exists() {
        println!("mdan.yaml already exists, leaving it alone.");
    } else {
        atomic_write_file(ctx.config_path(), CONFIG_TEMPLATE)?;
        println!("Wrote mdan.yaml");
    }

    let env_example = ctx.root.join(".env.example");
    if env_example.exists() {
        println!(".env.example already exists, leaving it alone.");
    } else {
        atomic_write_file(&env_example, ENV_TEMPLATE)?;
        println!("Wrote .env.example");
    }

    println!();
    println!("Set OPENAI_API_KEY in your environment before running `mdan run`.");
    Ok(())
}

/// Copy text to the clipboard, falling back to printing it when no
/// clipboard utility is available.
fn copy_or_print(text: &str, what: &str) -> Result<()> {
    match clipboard::copy(text) {
        Ok(()) => {
            println!("Copied {} to the clipboard.", what);
            Ok(())
        }
        Err(MdanError::ToolError(e)) => {
            println!("Clipboard unavailable ({}), printing instead:", e);
            println!();
            println!("{}", text);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
