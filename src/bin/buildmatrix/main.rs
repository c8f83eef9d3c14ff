//! Buildmatrix CLI - brute-force build testing for C++ projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("buildmatrix=debug")
    } else {
        EnvFilter::new("buildmatrix=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.verbose),
        Commands::Probe(args) => commands::probe::execute(args, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
