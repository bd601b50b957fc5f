//! System clipboard access via platform utilities.
//!
//! Used by `mdan phase --copy` and `mdan oc` to put prompt content on the
//! clipboard. Copying shells out to the platform's clipboard tool rather than
//! linking a GUI toolkit; callers fall back to printing the content when no
//! tool is available.

use crate::error::{MdanError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Copy text to the system clipboard.
///
/// Returns an error when no clipboard utility is available; callers should
/// print the content instead so the user can copy it manually.
pub fn copy(text: &str) -> Result<()> {
    for (program, args) in candidates() {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            // Tool missing; try the next candidate
            Err(_) => continue,
        }
    }

    Err(MdanError::ToolError(
        "no clipboard utility found on this system".to_string(),
    ))
}

/// Clipboard tools to try, in order, for the current platform.
fn candidates() -> &'static [(&'static str, &'static [&'static str])] {
    #[cfg(target_os = "macos")]
    {
        &[("pbcopy", &[])]
    }
    #[cfg(target_os = "windows")]
    {
        &[("clip", &[])]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // Wayland first, then X11
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

/// Spawn a clipboard tool and write text to its stdin.
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| MdanError::ToolError(format!("failed to spawn {}: {}", program, e)))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| MdanError::ToolError(format!("failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| MdanError::ToolError(format!("failed to wait for {}: {}", program, e)))?;

    if !status.success() {
        return Err(MdanError::ToolError(format!(
            "{} exited with status {}",
            program, status
        )));
    }

    Ok(())
}
