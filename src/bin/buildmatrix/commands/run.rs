//! `buildmatrix run` command

use anyhow::{Context, Result};

use crate::cli::RunArgs;
use crate::commands::resolve_config;
use buildmatrix::ops::run::{plan, run, RunOptions};
use buildmatrix::util::config::split_list;
use buildmatrix::util::fs::write_string;

pub fn execute(args: RunArgs, verbose: bool) -> Result<()> {
    let (source_dir, mut config) = resolve_config(&args.toolchains)?;

    // CLI overrides config
    if let Some(ref optimize) = args.optimize {
        config.optimize = split_list(optimize);
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if let Some(make) = args.make {
        config.make = make;
    }
    if args.no_cmake {
        config.cmake.enabled = false;
    }

    let opts = RunOptions {
        source_dir,
        logs_dir: args.logs,
        config,
        verbose,
    };

    if args.dry_run {
        let planned = plan(&opts)?;
        println!("\n{} configuration(s):", planned.len());
        for build in &planned {
            println!("{}", build.log.display());
            println!("    {}", build.configure.display_command());
        }
        return Ok(());
    }

    let report = run(&opts)?;

    println!(
        "\n{} passed, {} failed",
        report.matrix.passed_count(),
        report.matrix.failed_count()
    );

    if let Some(path) = args.summary {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize summary")?;
        write_string(&path, &json)?;
        tracing::info!("Wrote summary to {}", path.display());
    }

    Ok(())
}
