//! Project scaffolding.
//!
//! The prompt pack (orchestrator, agent files, phase prompts, templates, and
//! skills) is embedded in the binary and written out by `mdan init` and
//! `mdan attach`.

use crate::context::ProjectContext;
use crate::error::{MdanError, Result};
use crate::fs::atomic_write_file;
use include_dir::{Dir, include_dir};
use std::fs;
use std::path::Path;

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

const CURSOR_FOOTER: &str =
    "\n\n## CURSOR INSTRUCTIONS\nAgent files in mdan/agents/\nSkills in mdan/skills/";
const REBUILD_FOOTER: &str =
    "\n\n## REBUILD MODE\nAnalyze existing code then rewrite from scratch.";

/// How the prompt pack is being installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Fresh project directory; seeds a README as well.
    Init,
    /// Existing project; leaves the README alone.
    Attach { rebuild: bool },
}

/// Write the prompt pack into `target`.
///
/// Creates mdan/, mdan_output/, .claude/skills/, and .github/, then copies
/// the embedded prompts into place. Editor rule files (.cursorrules,
/// .windsurfrules, copilot-instructions.md) are derived from the
/// orchestrator prompt.
pub fn install(target: &Path, project_name: &str, mode: InstallMode) -> Result<()> {
    let ctx = ProjectContext::at(target);

    for dir in [
        ctx.agents_dir(),
        ctx.skills_dir(),
        ctx.output_dir(),
        target.join(".claude").join("skills"),
        target.join(".github"),
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            MdanError::UserError(format!("failed to create '{}': {}", dir.display(), e))
        })?;
    }

    let core = asset_dir("core")?;
    for file in core.files() {
        let name = file_name(file)?;
        write_asset(&ctx.mdan_dir().join(name), file)?;
    }

    for file in asset_dir("agents")?.files() {
        let name = file_name(file)?;
        write_asset(&ctx.agents_dir().join(name), file)?;
    }

    for file in asset_dir("templates")?.files() {
        let name = file_name(file)?;
        write_asset(&ctx.output_dir().join(name), file)?;
    }

    for skill in asset_dir("skills")?.dirs() {
        let skill_name = skill
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MdanError::UserError("malformed embedded skill".to_string()))?;
        for file in skill.files() {
            let name = file_name(file)?;
            write_asset(&ctx.skills_dir().join(skill_name).join(name), file)?;
            write_asset(
                &target.join(".claude").join("skills").join(skill_name).join(name),
                file,
            )?;
        }
    }

    let mut rules = orchestrator_prompt()?.to_string();
    rules.push_str(CURSOR_FOOTER);
    if matches!(mode, InstallMode::Attach { rebuild: true }) {
        rules.push_str(REBUILD_FOOTER);
    }
    atomic_write_file(target.join(".cursorrules"), &rules)?;
    atomic_write_file(target.join(".windsurfrules"), &rules)?;
    atomic_write_file(
        target.join(".github").join("copilot-instructions.md"),
        orchestrator_prompt()?,
    )?;

    if mode == InstallMode::Init {
        atomic_write_file(
            target.join("README.md"),
            &format!("# {}\n\n> Built with MDAN\n", project_name),
        )?;
    }

    Ok(())
}

/// The embedded orchestrator prompt.
pub fn orchestrator_prompt() -> Result<&'static str> {
    asset_text("core/orchestrator.md")
}

/// The embedded prompt for a lifecycle phase file such as `01-discover.md`.
pub fn phase_prompt(file: &str) -> Result<&'static str> {
    asset_text(&format!("phases/{}", file))
}

/// The embedded prompt for an agent role.
pub fn agent_prompt(role: &str) -> Result<&'static str> {
    asset_text(&format!("agents/{}.md", role))
}

/// Names of the embedded skill directories, sorted.
pub fn skill_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ASSETS
        .get_dir("skills")
        .map(|d| {
            d.dirs()
                .filter_map(|s| s.path().file_name().and_then(|n| n.to_str()))
                .collect()
        })
        .unwrap_or_default();
    names.sort_unstable();
    names
}

fn asset_dir(path: &str) -> Result<&'static Dir<'static>> {
    ASSETS
        .get_dir(path)
        .ok_or_else(|| MdanError::UserError(format!("embedded assets missing '{}'", path)))
}

fn asset_text(path: &str) -> Result<&'static str> {
    ASSETS
        .get_file(path)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| MdanError::UserError(format!("embedded assets missing '{}'", path)))
}

fn file_name<'a>(file: &'a include_dir::File<'a>) -> Result<&'a str> {
    file.path()
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MdanError::UserError("malformed embedded asset".to_string()))
}

fn write_asset(dest: &Path, file: &include_dir::File) -> Result<()> {
    let content = file.contents_utf8().ok_or_else(|| {
        MdanError::UserError(format!("embedded asset '{}' is not UTF-8", file.path().display()))
    })?;
    atomic_write_file(dest, content)
}
