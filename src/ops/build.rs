//! Single configure/build/check run in an isolated workspace.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::{BuildOutcome, MatrixError};
use crate::util::fs::{file_contains, with_workspace};
use crate::util::process::{describe_exit, ProcessBuilder};

/// Text `configure` prints when the source tree is already configured.
///
/// Coupled to the configure script's wording; keep all matching in
/// [`is_stale_source_tree`].
pub const STALE_TREE_MARKER: &str = "make distclean";

/// Does this configure log show a source tree left configured by a manual
/// build?
pub fn is_stale_source_tree(log: &Path) -> Result<bool> {
    file_contains(log, STALE_TREE_MARKER)
}

/// The make invocations that follow a successful configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSteps {
    /// Make program.
    pub make: String,
    /// Value for `-j`.
    pub jobs: usize,
}

impl BuildSteps {
    pub fn new(make: impl Into<String>, jobs: usize) -> Self {
        BuildSteps {
            make: make.into(),
            jobs,
        }
    }

    /// `make -jN`
    pub fn compile(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.make).arg(format!("-j{}", self.jobs))
    }

    /// `make -jN check`
    pub fn check(&self) -> ProcessBuilder {
        self.compile().arg("check")
    }
}

impl Default for BuildSteps {
    fn default() -> Self {
        BuildSteps::new("make", crate::util::config::DEFAULT_JOBS)
    }
}

/// Configure, build and check once, logging everything to `log_path`.
///
/// Returns `Ok` with the per-configuration outcome. A stale source tree is
/// an `Err` carrying [`MatrixError::StaleSourceTree`], since every other
/// configuration would fail the same way.
pub fn run_build(
    configure: &ProcessBuilder,
    steps: &BuildSteps,
    log_path: &Path,
) -> Result<BuildOutcome> {
    let mut log = File::create(log_path)
        .with_context(|| format!("failed to create build log: {}", log_path.display()))?;

    let outcome = with_workspace(|work_dir| {
        let configure = configure.clone().cwd(work_dir);
        if run_step(&configure, &mut log)?.is_some() {
            if is_stale_source_tree(log_path)? {
                bail!(MatrixError::StaleSourceTree {
                    log: log_path.to_path_buf(),
                });
            }
            return Ok(BuildOutcome::failure("configure failed."));
        }

        for step in [steps.compile(), steps.check()] {
            if let Some(reason) = run_step(&step.cwd(work_dir), &mut log)? {
                return Ok(BuildOutcome::Failure(reason));
            }
        }

        Ok(BuildOutcome::Success)
    })?;

    report(&mut log, &outcome)
        .with_context(|| format!("failed to write build log: {}", log_path.display()))?;
    Ok(outcome)
}

/// Run one step into the log. `Some(reason)` if it did not succeed.
///
/// A command that cannot be launched counts as a failed step; its error is
/// written to the log like any other output.
fn run_step(cmd: &ProcessBuilder, log: &mut File) -> Result<Option<String>> {
    match cmd.exec_to_log(log) {
        Ok(status) if status.success() => Ok(None),
        Ok(status) => Ok(Some(describe_exit(cmd, status))),
        Err(e) => {
            let reason = format!("{:#}", e);
            writeln!(log, "{}", reason).context("failed to write build log")?;
            Ok(Some(reason))
        }
    }
}

/// Write the outcome line to the log and echo it to stdout.
pub(crate) fn report(log: &mut impl Write, outcome: &BuildOutcome) -> io::Result<()> {
    println!("{}", outcome);
    write!(log, "\n\n{}\n", outcome)?;
    log.flush()
}
