//! Core data structures for the build matrix.
//!
//! - Compiler specs and the probed viable toolchain set
//! - Build axes (link mode, debug mode)
//! - Materialized build configurations
//! - Build outcomes and fatal errors

pub mod axis;
pub mod compiler;
pub mod configuration;
pub mod outcome;

pub use axis::BuildAxis;
pub use compiler::{CompilerSpec, ViableToolchainSet};
pub use configuration::BuildConfiguration;
pub use outcome::{BuildOutcome, MatrixError};
