//! A single cell of the build matrix.

use crate::core::compiler::CompilerSpec;

/// Configure flag that keeps documentation out of every matrix build.
pub const DISABLE_DOCUMENTATION: &str = "--disable-documentation";

/// One element of the compiler × optimisation × link × debug cross product.
///
/// Built transiently while iterating the matrix and consumed by a single
/// build; it borrows everything from the matrix inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfiguration<'a> {
    pub compiler: &'a CompilerSpec,
    pub optimization: &'a str,
    pub link: &'a str,
    pub link_args: &'a [String],
    pub debug: &'a str,
    pub debug_args: &'a [String],
}

impl<'a> BuildConfiguration<'a> {
    /// Log file name, e.g. `build-g++-9_-O0__static_plain.out`.
    ///
    /// Every component goes through [`escape_component`], so the name never
    /// leaves the logs directory and distinct cells never share a log.
    pub fn log_name(&self) -> String {
        let parts = [
            self.compiler.cxx.as_str(),
            self.optimization,
            self.compiler.stdlib.as_str(),
            self.link,
            self.debug,
        ]
        .map(escape_component);
        format!("build-{}.out", parts.join("_"))
    }

    /// Arguments for the configure script, after the script path itself.
    pub fn configure_args(&self) -> Vec<String> {
        let mut args = vec![format!("CXX={}", self.compiler.cxx)];

        match self.compiler.stdlib_flag() {
            None => args.push(format!("CXXFLAGS={}", self.optimization)),
            Some(stdlib) => {
                args.push(format!("CXXFLAGS={} {}", self.optimization, stdlib));
                args.push(format!("LDFLAGS={}", stdlib));
            }
        }

        args.push(DISABLE_DOCUMENTATION.to_string());
        args.extend(self.link_args.iter().cloned());
        args.extend(self.debug_args.iter().cloned());
        args
    }
}

/// Percent-escape `%`, `/` and the `_` separator in one log name component.
///
/// The mapping is injective, and plain names such as `g++-9` or
/// `-stdlib=libc++` pass through unchanged.
fn escape_component(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '_' => escaped.push_str("%5F"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_log_name_with_default_stdlib() {
        let compiler = CompilerSpec::new("g++-9", "");
        let link = strings(&["--enable-static", "--disable-dynamic"]);
        let config = BuildConfiguration {
            compiler: &compiler,
            optimization: "-O0",
            link: "static",
            link_args: &link,
            debug: "plain",
            debug_args: &[],
        };

        assert_eq!(config.log_name(), "build-g++-9_-O0__static_plain.out");
    }

    #[test]
    fn test_log_name_escapes_compiler_paths() {
        let compiler = CompilerSpec::new("/opt/gcc/bin/g++", "");
        let config = BuildConfiguration {
            compiler: &compiler,
            optimization: "-O2",
            link: "dynamic",
            link_args: &[],
            debug: "full",
            debug_args: &[],
        };

        assert_eq!(
            config.log_name(),
            "build-%2Fopt%2Fgcc%2Fbin%2Fg++_-O2__dynamic_full.out"
        );
    }

    #[test]
    fn test_log_name_escapes_every_component() {
        let compiler = CompilerSpec::new("clang++", "--gcc-toolchain=/opt/gcc-11");
        let config = BuildConfiguration {
            compiler: &compiler,
            optimization: "-fprofile-use=/tmp/prof",
            link: "static_pic",
            link_args: &[],
            debug: "100%",
            debug_args: &[],
        };

        assert_eq!(
            config.log_name(),
            "build-clang++_-fprofile-use=%2Ftmp%2Fprof_--gcc-toolchain=%2Fopt%2Fgcc-11\
             _static%5Fpic_100%25.out"
        );
    }

    #[test]
    fn test_log_names_do_not_collide_after_escaping() {
        let dotted = CompilerSpec::new("./g++", "");
        let dashed = CompilerSpec::new(".-g++", "");
        let underscored = CompilerSpec::new("g++_-O0", "");
        let plain = CompilerSpec::new("g++", "");

        let name = |compiler: &CompilerSpec, optimization: &str| {
            BuildConfiguration {
                compiler,
                optimization,
                link: "static",
                link_args: &[],
                debug: "plain",
                debug_args: &[],
            }
            .log_name()
        };

        assert_ne!(name(&dotted, "-O0"), name(&dashed, "-O0"));
        assert_ne!(name(&underscored, ""), name(&plain, "-O0_"));
        assert_ne!(name(&CompilerSpec::new("%2F", ""), "-O0"), name(&dotted, "-O0"));
    }

    #[test]
    fn test_configure_args_default_stdlib() {
        let compiler = CompilerSpec::new("g++-9", "");
        let link = strings(&["--enable-static", "--disable-dynamic"]);
        let debug = strings(&["--enable-audit"]);
        let config = BuildConfiguration {
            compiler: &compiler,
            optimization: "-O3",
            link: "static",
            link_args: &link,
            debug: "audit",
            debug_args: &debug,
        };

        assert_eq!(
            config.configure_args(),
            [
                "CXX=g++-9",
                "CXXFLAGS=-O3",
                "--disable-documentation",
                "--enable-static",
                "--disable-dynamic",
                "--enable-audit",
            ]
        );
    }

    #[test]
    fn test_configure_args_with_stdlib() {
        let compiler = CompilerSpec::new("clang++-11", "-stdlib=libc++");
        let config = BuildConfiguration {
            compiler: &compiler,
            optimization: "-O0",
            link: "dynamic",
            link_args: &[],
            debug: "plain",
            debug_args: &[],
        };

        assert_eq!(
            config.configure_args(),
            [
                "CXX=clang++-11",
                "CXXFLAGS=-O0 -stdlib=libc++",
                "LDFLAGS=-stdlib=libc++",
                "--disable-documentation",
            ]
        );
        assert_eq!(
            config.log_name(),
            "build-clang++-11_-O0_-stdlib=libc++_dynamic_plain.out"
        );
    }
}
