//! Configuration file support.
//!
//! The matrix dimensions default to the tables below. A project can override
//! any of them with a `buildmatrix.toml` in its source directory, or an
//! explicit `--config` file. Command-line flags override both.
//!
//! ```toml
//! compilers = ["g++-12", "clang++-15"]
//! stdlibs = ["", "-stdlib=libc++"]
//! optimize = ["-O0", "-O2"]
//! jobs = 16
//!
//! [link]
//! static = ["--enable-static", "--disable-dynamic"]
//!
//! [[cmake.generators]]
//! name = "Ninja"
//! build = "ninja"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::BuildAxis;

/// File name looked up in the source directory.
pub const CONFIG_FILE_NAME: &str = "buildmatrix.toml";

/// GCC major versions probed by default.
pub const GCC_VERSIONS: std::ops::Range<u32> = 7..12;

/// Clang major versions probed by default, besides `clang++-6.0`.
pub const CLANG_VERSIONS: std::ops::Range<u32> = 7..12;

/// Default standard-library selectors; empty means the platform default.
pub const DEFAULT_STDLIBS: &[&str] = &["", "-stdlib=libc++"];

/// Default optimisation flags.
pub const DEFAULT_OPTIMIZE: &[&str] = &["-O0", "-O3"];

/// Default job count passed to `make -j`.
pub const DEFAULT_JOBS: usize = 8;

/// Build matrix configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Compiler drivers to probe.
    pub compilers: Vec<String>,

    /// Standard-library flags to probe.
    pub stdlibs: Vec<String>,

    /// Optimisation flags, one matrix dimension.
    pub optimize: Vec<String>,

    /// Parallel job count for make.
    pub jobs: usize,

    /// Make program used for the build and check steps.
    pub make: String,

    /// Link mode axis.
    pub link: BuildAxis,

    /// Debug/audit mode axis.
    pub debug: BuildAxis,

    /// CMake phase settings.
    pub cmake: CmakeConfig,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        MatrixConfig {
            compilers: default_compilers(),
            stdlibs: to_strings(DEFAULT_STDLIBS),
            optimize: to_strings(DEFAULT_OPTIMIZE),
            jobs: DEFAULT_JOBS,
            make: "make".to_string(),
            link: BuildAxis::default_link(),
            debug: BuildAxis::default_debug(),
            cmake: CmakeConfig::default(),
        }
    }
}

/// CMake phase settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmakeConfig {
    /// Whether to run the CMake phase at all.
    pub enabled: bool,

    /// Generators to try, in order.
    pub generators: Vec<GeneratorConfig>,
}

impl Default for CmakeConfig {
    fn default() -> Self {
        CmakeConfig {
            enabled: true,
            generators: vec![
                GeneratorConfig {
                    name: Some("Ninja".to_string()),
                    build: "ninja".to_string(),
                },
                GeneratorConfig {
                    name: None,
                    build: "make".to_string(),
                },
            ],
        }
    }
}

/// One CMake generator candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Value for `cmake -G`; `None` lets CMake pick its default.
    #[serde(default)]
    pub name: Option<String>,

    /// Program that runs the generated build.
    pub build: String,
}

impl MatrixConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }
}

/// Resolve configuration for a source directory.
///
/// An explicit path must load; the implicit project file is best-effort.
pub fn load_config(explicit: Option<&Path>, source_dir: &Path) -> Result<MatrixConfig> {
    match explicit {
        Some(path) => MatrixConfig::load(path),
        None => Ok(MatrixConfig::load_or_default(&project_config_path(source_dir))),
    }
}

/// Get the project config path (`<source_dir>/buildmatrix.toml`).
pub fn project_config_path(source_dir: &Path) -> PathBuf {
    source_dir.join(CONFIG_FILE_NAME)
}

/// The default compiler list: GCC versions, then Clang versions.
pub fn default_compilers() -> Vec<String> {
    let gcc = GCC_VERSIONS.map(|v| format!("g++-{}", v));
    let clang = std::iter::once("clang++-6.0".to_string())
        .chain(CLANG_VERSIONS.map(|v| format!("clang++-{}", v)));
    gcc.chain(clang).collect()
}

/// Split a comma-separated option value, keeping empty segments.
///
/// `",-stdlib=libc++"` yields the platform default plus libc++.
pub fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
