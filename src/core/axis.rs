//! Build axes: independent dimensions of configure-step variation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named mapping from short labels to configure arguments.
///
/// Labels are unique and iterate in lexicographic order, so log names and
/// run order are stable across invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildAxis {
    variants: BTreeMap<String, Vec<String>>,
}

impl BuildAxis {
    pub fn new() -> Self {
        BuildAxis {
            variants: BTreeMap::new(),
        }
    }

    /// Add a variant, replacing any existing variant with the same label.
    pub fn variant<I, S>(mut self, label: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants
            .insert(label.into(), args.into_iter().map(Into::into).collect());
        self
    }

    /// Iterate `(label, args)` pairs sorted by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.variants
            .iter()
            .map(|(label, args)| (label.as_str(), args.as_slice()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.variants.get(label).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Static vs. shared library builds.
    pub fn default_link() -> Self {
        BuildAxis::new()
            .variant("static", ["--enable-static", "--disable-dynamic"])
            .variant("dynamic", ["--disable-static", "--enable-dynamic"])
    }

    /// Audit and maintainer-mode combinations.
    pub fn default_debug() -> Self {
        BuildAxis::new()
            .variant("plain", Vec::<String>::new())
            .variant("audit", ["--enable-audit"])
            .variant("maintainer", ["--enable-maintainer-mode"])
            .variant("full", ["--enable-audit", "--enable-maintainer-mode"])
    }
}
