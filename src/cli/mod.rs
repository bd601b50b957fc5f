//! CLI argument parsing for mdan.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// MDAN: Markdown-driven agent network for software delivery.
///
/// A project carries a prompt pack (orchestrator, eight role agents, skills)
/// under mdan/, and the CLI drives the agents through five lifecycle phases:
/// DISCOVER, DESIGN, BUILD, VERIFY, SHIP.
#[derive(Parser, Debug)]
#[command(name = "mdan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for mdan.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new MDAN project.
    ///
    /// Creates the project directory and installs the prompt pack
    /// (orchestrator, agents, skills, templates) plus editor rule files.
    Init(InitArgs),

    /// Install MDAN into the current directory.
    ///
    /// Same layout as `init`, but into an existing project and without
    /// seeding a README.
    Attach(AttachArgs),

    /// Show project status.
    ///
    /// Prints the orchestrator's STATUS.md if present, otherwise the
    /// saved project state.
    Status,

    /// Print the prompt for a lifecycle phase.
    ///
    /// Accepts a number (1-5) or a name (discover, design, build,
    /// verify, ship).
    Phase(PhaseArgs),

    /// Print an agent's prompt file, or list the roster.
    Agent(AgentArgs),

    /// Copy the orchestrator prompt to the clipboard.
    ///
    /// Prefers the project's installed copy; falls back to the embedded one.
    Oc,

    /// List available skills.
    Skills,

    /// Route a task to the right agent or flow and execute it.
    Run(RunArgs),

    /// Run the full autonomous delivery cycle.
    ///
    /// Requires auto_mode.enabled in mdan.yaml.
    Auto(AutoArgs),

    /// Run a multi-agent debate on a topic.
    ///
    /// Three rounds of arguments followed by a consensus synthesis;
    /// results are saved to debate_results.json.
    Debate(DebateArgs),

    /// Run a named flow directly.
    ///
    /// Flows: auto, discovery, build, debate.
    Flow(FlowArgs),

    /// Write a starter mdan.yaml and .env.example.
    Setup,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create.
    #[arg(default_value = "my-project")]
    pub name: String,
}

/// Arguments for the `attach` command.
#[derive(Parser, Debug)]
pub struct AttachArgs {
    /// Instruct editors to analyze the existing code and rewrite it.
    #[arg(long)]
    pub rebuild: bool,
}

/// Arguments for the `phase` command.
#[derive(Parser, Debug)]
pub struct PhaseArgs {
    /// Phase number (1-5) or name (discover, design, build, verify, ship).
    pub phase: String,

    /// Copy the phase prompt to the clipboard instead of printing it.
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the `agent` command.
#[derive(Parser, Debug)]
pub struct AgentArgs {
    /// Agent role to print (product, architect, ux, dev, test, security,
    /// devops, doc). Omit to list the roster.
    pub name: Option<String>,
}

/// Arguments for the `auto` command.
#[derive(Parser, Debug)]
pub struct AutoArgs {
    /// Run even if auto_mode.enabled is false in mdan.yaml.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// The task to classify and execute.
    pub task: String,
}

/// Arguments for the `debate` command.
#[derive(Parser, Debug)]
pub struct DebateArgs {
    /// Topic to debate.
    pub topic: String,
}

/// Arguments for the `flow` command.
#[derive(Parser, Debug)]
pub struct FlowArgs {
    /// Flow name: auto, discovery, build, or debate.
    pub name: String,

    /// Input for the flow (project description or debate topic).
    pub input: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
