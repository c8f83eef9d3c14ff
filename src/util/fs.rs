//! Filesystem utilities and isolated workspaces.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::MatrixError;

/// A throwaway directory outside the source tree.
///
/// The directory and everything in it is removed when the workspace is
/// closed or dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a new empty workspace under the system temp directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("buildmatrix-")
            .tempdir()
            .map_err(MatrixError::Workspace)?;

        tracing::debug!("created workspace {}", dir.path().display());
        Ok(Workspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace, reporting any removal error.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("failed to remove workspace: {}", path.display()))
    }
}

/// Run `f` inside a fresh workspace and remove it afterwards.
///
/// The workspace is removed on every exit path, including when `f` fails.
/// A failure to remove it is logged, never returned in place of `f`'s result.
pub fn with_workspace<T>(f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    let workspace = Workspace::new()?;
    let result = f(workspace.path());

    if let Err(e) = workspace.close() {
        tracing::warn!("{:#}", e);
    }

    result
}

/// Does any line of the file at `path` contain `text`?
pub fn file_contains(path: &Path, text: &str) -> Result<bool> {
    let file =
        fs::File::open(path).with_context(|| format!("failed to read file: {}", path.display()))?;

    for line in BufReader::new(file).split(b'\n') {
        let line = line.with_context(|| format!("failed to read file: {}", path.display()))?;
        if String::from_utf8_lossy(&line).contains(text) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn test_workspace_removed_after_success() {
        let mut seen = None;
        with_workspace(|dir| {
            assert!(dir.is_dir());
            fs::write(dir.join("file.txt"), "content")?;
            seen = Some(dir.to_path_buf());
            Ok(())
        })
        .unwrap();

        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_workspace_removed_after_failure() {
        let mut seen = None;
        let result: Result<()> = with_workspace(|dir| {
            fs::create_dir_all(dir.join("nested/deeper"))?;
            seen = Some(dir.to_path_buf());
            bail!("step failed");
        });

        assert!(result.is_err());
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_workspaces_are_distinct() {
        let a = Workspace::new().unwrap();
        let b = Workspace::new().unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_file_contains() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build.out");
        fs::write(
            &path,
            "configure: error: source directory already configured; \
             run \"make distclean\" there first\n",
        )
        .unwrap();

        assert!(file_contains(&path, "make distclean").unwrap());
        assert!(!file_contains(&path, "cmake").unwrap());
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a/b/check.cxx");

        write_string(&path, "int main() {}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "int main() {}");
    }
}
