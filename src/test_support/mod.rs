//! Fake tools and fixtures for unit tests.
//!
//! Compilers, `configure`, `make` and `cmake` are stood in for by small shell
//! scripts, so the probing and build logic runs against real processes
//! without any toolchain installed.
//!
//! # Example
//!
//! ```rust,ignore
//! let project = FakeProject::new();
//! project.configure("exit 0");
//! let make = project.make(r#"[ "$2" = check ] && exit 1; exit 0"#);
//! ```

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Write an executable `/bin/sh` script named `name` into `dir`.
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A scratch layout with a source tree, a logs directory and a tool directory.
pub struct FakeProject {
    root: TempDir,
}

impl FakeProject {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["src", "logs", "bin", "marks"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }
        FakeProject { root }
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.path().join("src")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.path().join("logs")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    /// Directory scripts can drop marker files into.
    pub fn marks_dir(&self) -> PathBuf {
        self.root.path().join("marks")
    }

    /// Write `src/configure` with the given body.
    pub fn configure(&self, body: &str) -> PathBuf {
        fake_tool(&self.source_dir(), "configure", body)
    }

    /// Write `bin/make` with the given body.
    pub fn make(&self, body: &str) -> PathBuf {
        fake_tool(&self.bin_dir(), "make", body)
    }

    /// Write an arbitrary tool into `bin/`.
    pub fn tool(&self, name: &str, body: &str) -> PathBuf {
        fake_tool(&self.bin_dir(), name, body)
    }

    /// Read a log file from the logs directory.
    pub fn log(&self, name: &str) -> String {
        fs::read_to_string(self.logs_dir().join(name)).unwrap()
    }

    /// Sorted names of the files in the logs directory.
    pub fn log_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.logs_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Lines recorded into `marks/<name>` by scripts, in order.
    pub fn marks(&self, name: &str) -> Vec<String> {
        match fs::read_to_string(self.marks_dir().join(name)) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for FakeProject {
    fn default() -> Self {
        Self::new()
    }
}
