//! Command implementations

pub mod completions;
pub mod probe;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ToolchainArgs;
use buildmatrix::util::config::{load_config, split_list};
use buildmatrix::MatrixConfig;

/// Resolve the source directory and the configuration, with CLI overrides
/// applied.
pub fn resolve_config(args: &ToolchainArgs) -> Result<(PathBuf, MatrixConfig)> {
    let source_dir = match args.source_dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    // Builds run elsewhere, so the configure script needs an absolute path.
    let source_dir = source_dir
        .canonicalize()
        .with_context(|| format!("source directory not found: {}", source_dir.display()))?;

    let mut config = load_config(args.config.as_deref(), &source_dir)?;
    if let Some(ref compilers) = args.compilers {
        config.compilers = split_list(compilers);
    }
    if let Some(ref stdlibs) = args.stdlibs {
        config.stdlibs = split_list(stdlibs);
    }

    Ok((source_dir, config))
}
