//! Implementation of the `mdan init` and `mdan attach` commands.
//!
//! Both install the prompt pack; `init` creates a fresh project directory and
//! seeds a README, `attach` installs into the current directory (optionally in
//! rebuild mode, which tells editors to rewrite the existing code).

use crate::context::ProjectContext;
use crate::error::{MdanError, Result};
use crate::scaffold::{self, InstallMode};
use std::fs;
use std::path::Path;

/// Execute the `mdan init` command.
pub fn cmd_init(name: &str) -> Result<()> {
    let target = Path::new(name);
    if target.exists() {
        return Err(MdanError::UserError(format!(
            "directory '{}' already exists. Use `mdan attach` inside it instead.",
            name
        )));
    }

    fs::create_dir_all(target)
        .map_err(|e| MdanError::UserError(format!("failed to create '{}': {}", name, e)))?;

    scaffold::install(target, name, InstallMode::Init)?;
    print_installed(target, name);
    println!();
    println!("Next steps:");
    println!("  cd {}", name);
    println!("  mdan phase 1");
    Ok(())
}

/// Execute the `mdan attach` command.
pub fn cmd_attach(rebuild: bool) -> Result<()> {
    let ctx = ProjectContext::resolve()?;
    let name = ctx.project_name();

    scaffold::install(&ctx.root, &name, InstallMode::Attach { rebuild })?;
    print_installed(&ctx.root, &name);
    if rebuild {
        println!();
        println!("Rebuild mode: editor rules instruct a rewrite of the existing code.");
    }
    Ok(())
}

fn print_installed(target: &Path, name: &str) {
    println!("MDAN installed in {} ({})", target.display(), name);
    println!();
    println!("  mdan/                    orchestrator and agent prompts");
    println!("  mdan/skills/             skill playbooks");
    println!("  mdan_output/             generated artifact templates");
    println!("  .claude/skills/          skills for Claude-compatible editors");
    println!("  .cursorrules             Cursor rules");
    println!("  .windsurfrules           Windsurf rules");
    println!("  .github/copilot-instructions.md");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_init_refuses_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        fs::create_dir("taken").unwrap();
        let err = cmd_init("taken").unwrap_err();
        assert!(err.to_string().contains("already exists"));

        std::env::set_current_dir(prev).unwrap();
    }

    #[test]
    #[serial]
    fn test_init_creates_project() {
        let temp_dir = TempDir::new().unwrap();
        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        cmd_init("fresh").unwrap();
        assert!(temp_dir.path().join("fresh/mdan/orchestrator.md").is_file());
        assert!(temp_dir.path().join("fresh/README.md").is_file());

        std::env::set_current_dir(prev).unwrap();
    }

    #[test]
    #[serial]
    fn test_attach_installs_into_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        cmd_attach(false).unwrap();
        assert!(temp_dir.path().join("mdan/orchestrator.md").is_file());
        assert!(!temp_dir.path().join("README.md").exists());

        std::env::set_current_dir(prev).unwrap();
    }
}
