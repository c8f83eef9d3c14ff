//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{Context, Result};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command and wait for completion, capturing its output.
    pub fn exec(&self) -> Result<Output> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd
            .output()
            .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;

        Ok(output)
    }

    /// Execute with stdout and stderr appended to `log`.
    ///
    /// The command line and a blank line are written to the log first.
    pub fn exec_to_log(&self, log: &mut File) -> Result<ExitStatus> {
        writeln!(log, "{}\n", self.display_command()).context("failed to write build log")?;
        log.flush().context("failed to write build log")?;

        let stdout = log.try_clone().context("failed to share build log")?;
        let stderr = log.try_clone().context("failed to share build log")?;

        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::from(stdout));
        cmd.stderr(Stdio::from(stderr));

        cmd.status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Describe a nonzero exit for a failure report.
pub fn describe_exit(cmd: &ProcessBuilder, status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("`{}` failed with exit code {}", cmd.display_command(), code),
        None => format!("`{}` was terminated by a signal", cmd.display_command()),
    }
}

/// Find an executable in PATH, or check an explicit path.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_process_builder() {
        let output = ProcessBuilder::new("echo").arg("hello").exec().unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.trim() == "hello" || stdout.contains("hello"));
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("make").args(["-j8", "check"]);

        assert_eq!(pb.display_command(), "make -j8 check");
    }

    #[test]
    fn test_find_executable() {
        assert!(find_executable("sh").is_some());
        assert!(find_executable("buildmatrix-no-such-program-xyz").is_none());
    }

    #[test]
    fn test_exec_missing_program_is_an_error() {
        let result = ProcessBuilder::new("buildmatrix-no-such-program-xyz").exec();
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_to_log_captures_command_and_output() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("build.out");
        let mut log = File::create(&log_path).unwrap();

        let status = ProcessBuilder::new("sh")
            .args(["-c", "echo out; echo err >&2"])
            .exec_to_log(&mut log)
            .unwrap();
        drop(log);

        assert!(status.success());
        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.starts_with("sh -c echo out; echo err >&2\n\n"));
        assert!(contents.contains("out\n"));
        assert!(contents.contains("err\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_describe_exit() {
        let tmp = TempDir::new().unwrap();
        let mut log = File::create(tmp.path().join("build.out")).unwrap();
        let cmd = ProcessBuilder::new("sh").args(["-c", "exit 3"]);
        let status = cmd.exec_to_log(&mut log).unwrap();

        assert_eq!(
            describe_exit(&cmd, status),
            "`sh -c exit 3` failed with exit code 3"
        );
    }
}
