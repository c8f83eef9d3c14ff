//! The full run: probe, matrix, then CMake.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::{BuildOutcome, ViableToolchainSet};
use crate::ops::build::BuildSteps;
use crate::ops::cmake::{CmakeBuilder, CMAKE_LOG_NAME};
use crate::ops::matrix::{check_logs_dir, run_matrix, Matrix, MatrixReport, PlannedBuild};
use crate::ops::probe::{probe, ProbeOptions};
use crate::util::config::MatrixConfig;

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Project source tree; holds the `configure` script.
    pub source_dir: PathBuf,

    /// Existing directory that receives the build logs.
    pub logs_dir: PathBuf,

    /// Matrix dimensions and tools.
    pub config: MatrixConfig,

    /// Echo probe diagnostics.
    pub verbose: bool,
}

impl RunOptions {
    /// The configure script, `<source_dir>/configure`.
    pub fn configure_script(&self) -> PathBuf {
        self.source_dir.join("configure")
    }

    fn matrix(&self) -> Matrix {
        Matrix {
            optimizations: self.config.optimize.clone(),
            link: self.config.link.clone(),
            debug: self.config.debug.clone(),
        }
    }

    fn steps(&self) -> BuildSteps {
        BuildSteps::new(self.config.make.as_str(), self.config.jobs)
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub toolchains: ViableToolchainSet,
    pub matrix: MatrixReport,
    /// `None` when the CMake phase was disabled or skipped.
    pub cmake: Option<BuildOutcome>,
}

/// Probe compilers, run the build matrix, then the CMake build.
///
/// The logs directory is validated before anything else runs.
pub fn run(opts: &RunOptions) -> Result<RunReport> {
    check_logs_dir(&opts.logs_dir)?;

    let toolchains = probe_toolchains(opts)?;

    println!("\nStarting builds.");
    let matrix = run_matrix(
        &toolchains,
        &opts.matrix(),
        &opts.configure_script(),
        &opts.steps(),
        &opts.logs_dir,
    )?;

    let cmake = if opts.config.cmake.enabled {
        println!("\nBuilding with CMake.");
        CmakeBuilder::new(&opts.source_dir, opts.logs_dir.join(CMAKE_LOG_NAME))
            .generators(opts.config.cmake.generators.iter().cloned())
            .build()?
    } else {
        tracing::debug!("CMake phase disabled");
        None
    };

    Ok(RunReport {
        toolchains,
        matrix,
        cmake,
    })
}

/// Probe compilers and resolve the matrix without building anything.
pub fn plan(opts: &RunOptions) -> Result<Vec<PlannedBuild>> {
    check_logs_dir(&opts.logs_dir)?;

    let toolchains = probe_toolchains(opts)?;
    Ok(opts
        .matrix()
        .plan(&toolchains, &opts.configure_script(), &opts.logs_dir))
}

fn probe_toolchains(opts: &RunOptions) -> Result<ViableToolchainSet> {
    println!("\nChecking available compilers.");
    probe(
        &opts.config.compilers,
        &opts.config.stdlibs,
        &ProbeOptions {
            verbose: opts.verbose,
        },
    )
}
