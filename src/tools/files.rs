//! File operations scoped to a base directory.
//!
//! Relative paths resolve against the base; absolute paths are rejected so
//! agent-driven file operations stay inside the project.

use crate::error::{MdanError, Result};
use crate::fs::atomic_write_file;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Metadata about a directory entry.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
}

pub struct FileTool {
    base: PathBuf,
}

impl FileTool {
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Resolve a relative path inside the base directory.
    ///
    /// Absolute paths and `..` traversal are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let candidate = Path::new(path);

        if candidate.is_absolute() {
            return Err(MdanError::UserError(format!(
                "absolute paths are not allowed: '{}'",
                path
            )));
        }

        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(MdanError::UserError(format!(
                "path escapes the project directory: '{}'",
                path
            )));
        }

        Ok(self.base.join(candidate))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let resolved = self.resolve(path)?;
        fs::read_to_string(&resolved)
            .map_err(|e| MdanError::ToolError(format!("failed to read '{}': {}", path, e)))
    }

    /// Write a file atomically, creating parent directories as needed.
    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let resolved = self.resolve(path)?;
        atomic_write_file(resolved, content)
    }

    pub fn append_file(&self, path: &str, content: &str) -> Result<()> {
        let existing = match self.read_file(path) {
            Ok(existing) => existing,
            Err(MdanError::ToolError(_)) => String::new(),
            Err(e) => return Err(e),
        };
        self.write_file(path, &format!("{}{}", existing, content))
    }

    pub fn delete_file(&self, path: &str) -> Result<()> {
        let resolved = self.resolve(path)?;
        fs::remove_file(&resolved)
            .map_err(|e| MdanError::ToolError(format!("failed to delete '{}': {}", path, e)))
    }

    pub fn create_directory(&self, path: &str) -> Result<()> {
        let resolved = self.resolve(path)?;
        fs::create_dir_all(&resolved).map_err(|e| {
            MdanError::ToolError(format!("failed to create directory '{}': {}", path, e))
        })
    }

    /// List entries in a directory, sorted by name.
    pub fn list_directory(&self, path: &str) -> Result<Vec<FileInfo>> {
        let resolved = self.resolve(path)?;
        let entries = fs::read_dir(&resolved)
            .map_err(|e| MdanError::ToolError(format!("failed to list '{}': {}", path, e)))?;

        let mut infos = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| MdanError::ToolError(format!("failed to list '{}': {}", path, e)))?;
            let metadata = entry
                .metadata()
                .map_err(|e| MdanError::ToolError(format!("failed to stat entry: {}", e)))?;

            infos.push(FileInfo {
                path: entry.file_name().to_string_lossy().into_owned(),
                is_dir: metadata.is_dir(),
                size: metadata.len(),
            });
        }

        infos.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(infos)
    }

    /// List files under a directory recursively, sorted by path.
    ///
    /// `extension` filters by file extension when given (without the dot).
    pub fn list_recursive(&self, path: &str, extension: Option<&str>) -> Result<Vec<FileInfo>> {
        let resolved = self.resolve(path)?;
        let mut infos = Vec::new();
        collect_files(&resolved, &resolved, extension, &mut infos)?;
        infos.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(infos)
    }

    pub fn copy_file(&self, src: &str, dst: &str) -> Result<()> {
        let from = self.resolve(src)?;
        let to = self.resolve(dst)?;

        if let Some(parent) = to.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                MdanError::ToolError(format!("failed to create parent directory: {}", e))
            })?;
        }

        fs::copy(&from, &to)
            .map(|_| ())
            .map_err(|e| MdanError::ToolError(format!("failed to copy '{}': {}", src, e)))
    }

    pub fn move_file(&self, src: &str, dst: &str) -> Result<()> {
        self.copy_file(src, dst)?;
        self.delete_file(src)
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_dir()).unwrap_or(false)
    }
}

fn collect_files(
    base: &Path,
    dir: &Path,
    extension: Option<&str>,
    infos: &mut Vec<FileInfo>,
) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| MdanError::ToolError(format!("failed to list '{}': {}", dir.display(), e)))?;

    for entry in entries {
        let entry = entry
            .map_err(|e| MdanError::ToolError(format!("failed to list '{}': {}", dir.display(), e)))?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(base, &path, extension, infos)?;
            continue;
        }

        if let Some(ext) = extension
            && path.extension().and_then(|e| e.to_str()) != Some(ext)
        {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| MdanError::ToolError(format!("failed to stat entry: {}", e)))?;
        let relative = path.strip_prefix(base).unwrap_or(&path);
        infos.push(FileInfo {
            path: relative.to_string_lossy().into_owned(),
            is_dir: false,
            size: metadata.len(),
        });
    }

    Ok(())
}
