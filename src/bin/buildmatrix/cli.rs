//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Buildmatrix - build a C++ project across many compilers and options
#[derive(Parser)]
#[command(name = "buildmatrix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe compilers, build every matrix configuration, then build with CMake
    Run(RunArgs),

    /// Only check which compiler/stdlib pairs are usable
    Probe(ProbeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Compiler selection shared by `run` and `probe`.
#[derive(Args)]
pub struct ToolchainArgs {
    /// Compilers, separated by commas
    #[arg(short, long, allow_hyphen_values = true)]
    pub compilers: Option<String>,

    /// Standard library options, separated by commas (empty = default)
    #[arg(short = 'L', long, allow_hyphen_values = true)]
    pub stdlibs: Option<String>,

    /// Config file (defaults to buildmatrix.toml in the source directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project source directory holding `configure`
    #[arg(long)]
    pub source_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub toolchains: ToolchainArgs,

    /// Optimisation options, separated by commas
    #[arg(short = 'O', long, allow_hyphen_values = true)]
    pub optimize: Option<String>,

    /// Write build logs to DIRECTORY
    #[arg(short, long, value_name = "DIRECTORY", default_value = ".")]
    pub logs: PathBuf,

    /// Number of parallel make jobs
    #[arg(short, long, env = "BUILDMATRIX_JOBS")]
    pub jobs: Option<usize>,

    /// Make program for the build and check steps
    #[arg(long)]
    pub make: Option<String>,

    /// Skip the CMake build
    #[arg(long)]
    pub no_cmake: bool,

    /// List the configurations that would be built, without building
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON summary of all outcomes to FILE
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub toolchains: ToolchainArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
