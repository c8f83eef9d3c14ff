//! CMake build with the first generator that works.
//!
//! CMake support is a secondary build path: if no generator configures, the
//! phase is skipped with a notice and never fails the run.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::BuildOutcome;
use crate::ops::build::report;
use crate::util::config::GeneratorConfig;
use crate::util::fs::with_workspace;
use crate::util::process::{describe_exit, find_executable, ProcessBuilder};

/// Log file name for the CMake phase.
pub const CMAKE_LOG_NAME: &str = "build-cmake.out";

/// CMake fallback builder.
pub struct CmakeBuilder {
    source_dir: PathBuf,
    log_path: PathBuf,
    program: PathBuf,
    generators: Vec<GeneratorConfig>,
}

impl CmakeBuilder {
    /// Create a builder for `source_dir`, logging to `log_path`.
    pub fn new(source_dir: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        CmakeBuilder {
            source_dir: source_dir.into(),
            log_path: log_path.into(),
            program: PathBuf::from("cmake"),
            generators: crate::util::config::CmakeConfig::default().generators,
        }
    }

    /// Use a different `cmake` executable.
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the generators to try, in order.
    pub fn generators(mut self, generators: impl IntoIterator<Item = GeneratorConfig>) -> Self {
        self.generators = generators.into_iter().collect();
        self
    }

    /// Configure with each generator in turn and build with the first one
    /// that works.
    ///
    /// Returns `None` when CMake or every generator is unavailable.
    pub fn build(&self) -> Result<Option<BuildOutcome>> {
        let Some(cmake) = find_executable(&self.program) else {
            println!("No cmake found.  Skipping.");
            return Ok(None);
        };

        println!("\nLooking for CMake generator.");
        let mut log = File::create(&self.log_path)
            .with_context(|| format!("failed to create build log: {}", self.log_path.display()))?;

        for generator in &self.generators {
            let outcome = with_workspace(|work_dir| {
                if !self.configure(&cmake, generator, work_dir, &mut log)? {
                    return Ok(None);
                }

                println!("Building with CMake and {}.", generator.build);
                let cmd = ProcessBuilder::new(&generator.build).cwd(work_dir);
                let outcome = match cmd.exec_to_log(&mut log) {
                    Ok(status) if status.success() => BuildOutcome::Success,
                    Ok(status) => BuildOutcome::Failure(describe_exit(&cmd, status)),
                    Err(e) => BuildOutcome::Failure(format!("{:#}", e)),
                };
                Ok(Some(outcome))
            })?;

            if let Some(outcome) = outcome {
                report(&mut log, &outcome).with_context(|| {
                    format!("failed to write build log: {}", self.log_path.display())
                })?;
                return Ok(Some(outcome));
            }
        }

        println!("No CMake generators found.  Skipping CMake build.");
        Ok(None)
    }

    /// Run the configure step for one generator. `true` if it succeeded.
    fn configure(
        &self,
        cmake: &Path,
        generator: &GeneratorConfig,
        work_dir: &Path,
        log: &mut File,
    ) -> Result<bool> {
        let mut cmd = ProcessBuilder::new(cmake).arg(&self.source_dir).cwd(work_dir);
        if let Some(ref name) = generator.name {
            cmd = cmd.arg("-G").arg(name);
        }

        match cmd.exec_to_log(log) {
            Ok(status) if status.success() => Ok(true),
            Ok(_) => {
                let name = generator.name.as_deref().unwrap_or("<default>");
                println!("CMake generator {} is not available.  Skipping.", name);
                Ok(false)
            }
            Err(e) => {
                tracing::debug!("{:#}", e);
                println!("No cmake found.  Skipping.");
                Ok(false)
            }
        }
    }
}
