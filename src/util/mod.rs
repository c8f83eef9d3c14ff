//! Shared utilities

pub mod config;
pub mod fs;
pub mod process;

pub use config::MatrixConfig;
pub use fs::{with_workspace, Workspace};
pub use process::ProcessBuilder;
