//! Compiler availability probing.
//!
//! Before spending minutes per build, find out which (compiler, stdlib)
//! pairs can compile a trivial program at all. Missing compilers and
//! unsupported standard libraries are expected here, so they only produce a
//! notice and are left out of the viable set.

use std::path::Path;

use anyhow::Result;

use crate::core::{CompilerSpec, ViableToolchainSet};
use crate::util::fs::{with_workspace, write_string};
use crate::util::process::{find_executable, ProcessBuilder};

/// File name of the reference program inside the probe workspace.
pub const CHECK_FILE: &str = "check.cxx";

/// A minimal program every working C++ toolchain must compile.
pub const CHECK_PROGRAM: &str = r#"#include <iostream>
int main()
{
    std::cout << "Hello world." << std::endl;
}
"#;

/// Options for [`probe`].
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// Echo the compiler's stderr for pairs that fail.
    pub verbose: bool,
}

/// Determine which compiler/stdlib pairs are usable.
///
/// Pairs are tried stdlib-outer, compiler-inner, and the result keeps that
/// order. All attempts share one workspace. Only a failure to set up the
/// workspace is an error.
pub fn probe(
    compilers: &[String],
    stdlibs: &[String],
    opts: &ProbeOptions,
) -> Result<ViableToolchainSet> {
    with_workspace(|work_dir| {
        write_string(&work_dir.join(CHECK_FILE), CHECK_PROGRAM)?;

        let mut viable = ViableToolchainSet::new();
        for stdlib in stdlibs {
            for cxx in compilers {
                let spec = CompilerSpec::new(cxx.as_str(), stdlib.as_str());
                if check_compiler(work_dir, &spec, opts.verbose) {
                    viable.push(spec);
                }
            }
        }

        tracing::debug!("{} viable toolchain(s)", viable.len());
        Ok(viable)
    })
}

/// Is the given compiler/stdlib pair able to build the reference program?
fn check_compiler(work_dir: &Path, spec: &CompilerSpec, verbose: bool) -> bool {
    let mut cmd = ProcessBuilder::new(&spec.cxx).arg(CHECK_FILE).cwd(work_dir);
    if let Some(flag) = spec.stdlib_flag() {
        cmd = cmd.arg(flag);
    }

    match find_executable(&spec.cxx) {
        Some(path) => tracing::debug!("probing `{}` ({})", cmd.display_command(), path.display()),
        None => tracing::debug!("probing `{}` (not on PATH)", cmd.display_command()),
    }

    let viable = match cmd.exec() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            if verbose {
                print!("{}", String::from_utf8_lossy(&output.stderr));
            }
            false
        }
        Err(e) => {
            if verbose {
                println!("{:#}", e);
            }
            false
        }
    };

    if !viable {
        println!("Can't build with '{} {}'.  Skipping.", spec.cxx, spec.stdlib);
    }
    viable
}
