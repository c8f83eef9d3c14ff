//! Build-matrix orchestration.
//!
//! The matrix is the cross product of optimisation flags, link modes, debug
//! modes and viable toolchains, iterated in exactly that nesting:
//!
//! ```text
//! for opt in sorted(optimizations)
//!   for link in sorted(link labels)
//!     for debug in sorted(debug labels)
//!       for toolchain in probe order
//! ```
//!
//! The nesting fixes both the run order and the log names, so two runs over
//! the same inputs produce directly comparable log directories.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::{BuildAxis, BuildConfiguration, BuildOutcome, MatrixError, ViableToolchainSet};
use crate::ops::build::{run_build, BuildSteps};
use crate::util::process::ProcessBuilder;

/// The dimensions of the matrix other than the toolchains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub optimizations: Vec<String>,
    pub link: BuildAxis,
    pub debug: BuildAxis,
}

/// A matrix cell resolved to its log path and configure command.
#[derive(Debug, Clone)]
pub struct PlannedBuild {
    pub log: PathBuf,
    pub configure: ProcessBuilder,
}

impl Matrix {
    /// Resolve every cell, in run order.
    ///
    /// `configure` is the configure script; `logs_dir` receives one log per
    /// cell.
    pub fn plan(
        &self,
        viable: &ViableToolchainSet,
        configure: &Path,
        logs_dir: &Path,
    ) -> Vec<PlannedBuild> {
        let mut optimizations: Vec<&str> = self.optimizations.iter().map(String::as_str).collect();
        optimizations.sort_unstable();

        let mut planned = Vec::new();
        for &optimization in &optimizations {
            for (link, link_args) in self.link.iter() {
                for (debug, debug_args) in self.debug.iter() {
                    for compiler in viable {
                        let config = BuildConfiguration {
                            compiler,
                            optimization,
                            link,
                            link_args,
                            debug,
                            debug_args,
                        };
                        planned.push(PlannedBuild {
                            log: logs_dir.join(config.log_name()),
                            configure: ProcessBuilder::new(configure).args(config.configure_args()),
                        });
                    }
                }
            }
        }
        planned
    }
}

/// Outcome of one matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRecord {
    pub log: PathBuf,
    #[serde(flatten)]
    pub outcome: BuildOutcome,
}

/// Outcomes of all cells, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatrixReport {
    pub builds: Vec<BuildRecord>,
}

impl MatrixReport {
    pub fn passed_count(&self) -> usize {
        self.builds.iter().filter(|b| b.outcome.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.builds.len() - self.passed_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &BuildRecord> {
        self.builds.iter().filter(|b| !b.outcome.is_success())
    }
}

/// Fail unless `logs_dir` is an existing directory.
pub fn check_logs_dir(logs_dir: &Path) -> Result<()> {
    if !logs_dir.is_dir() {
        return Err(MatrixError::LogsNotADirectory(logs_dir.to_path_buf()).into());
    }
    Ok(())
}

/// Run every cell of the matrix, one after another.
///
/// Build failures are recorded and the loop moves on; any `Err` (a stale
/// source tree, an unwritable log) stops the matrix at once.
pub fn run_matrix(
    viable: &ViableToolchainSet,
    matrix: &Matrix,
    configure: &Path,
    steps: &BuildSteps,
    logs_dir: &Path,
) -> Result<MatrixReport> {
    check_logs_dir(logs_dir)?;

    let planned = matrix.plan(viable, configure, logs_dir);
    tracing::debug!("{} build configuration(s)", planned.len());

    let mut report = MatrixReport::default();
    for build in planned {
        print!("{}... ", build.log.display());
        std::io::stdout().flush().ok();

        let outcome = run_build(&build.configure, steps, &build.log)?;
        report.builds.push(BuildRecord {
            log: build.log,
            outcome,
        });
    }

    Ok(report)
}
