//! Buildmatrix - brute-force build testing for C++ projects
//!
//! This crate probes which compiler and standard-library pairs work on the
//! host, then configures, builds and checks a project once per cell of the
//! compiler × optimisation × link × debug matrix, each in a throwaway
//! directory. A final CMake build runs with the first generator that works.

pub mod core;
pub mod ops;
pub mod util;

/// Fake tools and fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    BuildAxis, BuildConfiguration, BuildOutcome, CompilerSpec, MatrixError, ViableToolchainSet,
};
pub use util::config::MatrixConfig;
