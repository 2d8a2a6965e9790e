use std::path::Path;
use std::process::{Command, Stdio};

use crate::cmd::GitCommand;
use crate::error::{GitPushError, Result};
use crate::git::Runner;

/// Real [Runner] implementation backed by `std::process::Command`.
///
/// Each invocation is echoed to stdout as `+ <argv>` before it runs, so the
/// CI log shows exactly which commands executed. The child inherits stderr;
/// stdout is inherited for `run` and captured for `run_capture`.
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }

    fn command(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Command {
        let mut command = Command::new(cmd.program());
        command.args(cmd.args());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        command
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for ProcessRunner {
    fn run(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<()> {
        println!("+ {}", cmd);

        let status = self
            .command(cmd, cwd)
            .stderr(Stdio::inherit())
            .stdin(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(GitPushError::command(format!(
                "{} exited with {}",
                cmd, status
            )));
        }

        Ok(())
    }

    fn run_capture(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<String> {
        println!("+ {}", cmd);

        let output = self
            .command(cmd, cwd)
            .stderr(Stdio::inherit())
            .stdout(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(GitPushError::command(format!(
                "{} exited with {}",
                cmd, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
