//! `buildmatrix probe` command

use anyhow::Result;

use crate::cli::ProbeArgs;
use crate::commands::resolve_config;
use buildmatrix::ops::probe::{probe, ProbeOptions};

pub fn execute(args: ProbeArgs, verbose: bool) -> Result<()> {
    let (_, config) = resolve_config(&args.toolchains)?;

    println!("Checking available compilers.");
    let viable = probe(&config.compilers, &config.stdlibs, &ProbeOptions { verbose })?;

    println!();
    if viable.is_empty() {
        println!("No usable compilers found.");
        return Ok(());
    }

    println!("Usable compilers:");
    for spec in &viable {
        println!("  {}", spec);
    }

    Ok(())
}
