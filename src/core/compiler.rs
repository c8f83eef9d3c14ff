//! Compiler specifications and the viable toolchain set.

use std::fmt;

use serde::Serialize;

/// A compiler driver paired with a standard-library selector flag.
///
/// An empty `stdlib` means "use the platform default" and is never passed to
/// the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompilerSpec {
    /// Compiler executable, e.g. `g++-11` or `/usr/bin/clang++`.
    pub cxx: String,
    /// Standard library flag, e.g. `-stdlib=libc++`, or empty.
    pub stdlib: String,
}

impl CompilerSpec {
    pub fn new(cxx: impl Into<String>, stdlib: impl Into<String>) -> Self {
        CompilerSpec {
            cxx: cxx.into(),
            stdlib: stdlib.into(),
        }
    }

    /// Whether this spec uses the platform's default standard library.
    pub fn uses_default_stdlib(&self) -> bool {
        self.stdlib.is_empty()
    }

    /// The stdlib flag, if one is set.
    pub fn stdlib_flag(&self) -> Option<&str> {
        if self.stdlib.is_empty() {
            None
        } else {
            Some(&self.stdlib)
        }
    }
}

impl fmt::Display for CompilerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stdlib_flag() {
            Some(stdlib) => write!(f, "{} {}", self.cxx, stdlib),
            None => f.write_str(&self.cxx),
        }
    }
}

/// Ordered set of compiler specs that compiled the reference program.
///
/// Order is stdlib-outer, compiler-inner, mirroring the probe inputs. It is
/// built once by the prober and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViableToolchainSet {
    specs: Vec<CompilerSpec>,
}

impl ViableToolchainSet {
    pub fn new() -> Self {
        ViableToolchainSet { specs: Vec::new() }
    }

    pub(crate) fn push(&mut self, spec: CompilerSpec) {
        self.specs.push(spec);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompilerSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn as_slice(&self) -> &[CompilerSpec] {
        &self.specs
    }
}

impl FromIterator<CompilerSpec> for ViableToolchainSet {
    fn from_iter<I: IntoIterator<Item = CompilerSpec>>(iter: I) -> Self {
        ViableToolchainSet {
            specs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ViableToolchainSet {
    type Item = &'a CompilerSpec;
    type IntoIter = std::slice::Iter<'a, CompilerSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
