//! Build outcomes and the errors that abort a whole run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result of one build configuration.
///
/// Both variants are non-blocking: the matrix moves on to the next cell
/// either way. Conditions that must stop the run are [`MatrixError`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum BuildOutcome {
    Success,
    Failure(String),
}

impl BuildOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        BuildOutcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Success => write!(f, "OK"),
            BuildOutcome::Failure(reason) => write!(f, "FAIL: {}", reason),
        }
    }
}

/// Fatal conditions that abort the entire run.
///
/// These travel inside `anyhow::Error`; use `downcast_ref` to match them.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Logs location '{}' is not a directory.", .0.display())]
    LogsNotADirectory(PathBuf),

    #[error(
        "Configure failed.  Did you remember to 'make distclean' the source tree? (see {})",
        .log.display()
    )]
    StaleSourceTree { log: PathBuf },

    #[error("could not create an isolated workspace")]
    Workspace(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(BuildOutcome::Success.to_string(), "OK");
        assert_eq!(
            BuildOutcome::failure("configure failed.").to_string(),
            "FAIL: configure failed."
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&BuildOutcome::failure("boom")).unwrap();
        assert_eq!(json, r#"{"status":"failure","reason":"boom"}"#);

        let json = serde_json::to_string(&BuildOutcome::Success).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }

    #[test]
    fn test_stale_tree_message_names_the_fix() {
        let err = MatrixError::StaleSourceTree {
            log: PathBuf::from("logs/build-x.out"),
        };
        assert!(err.to_string().contains("make distclean"));
    }
}
