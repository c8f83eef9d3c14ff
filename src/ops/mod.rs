//! High-level operations.
//!
//! This module contains the probing, build and matrix logic behind the
//! `buildmatrix` commands.

pub mod build;
pub mod cmake;
pub mod matrix;
pub mod probe;
pub mod run;

pub use build::{is_stale_source_tree, run_build, BuildSteps, STALE_TREE_MARKER};
pub use cmake::{CmakeBuilder, CMAKE_LOG_NAME};
pub use matrix::{check_logs_dir, run_matrix, BuildRecord, Matrix, MatrixReport, PlannedBuild};
pub use probe::{probe, ProbeOptions};
pub use run::{plan, run, RunOptions, RunReport};
