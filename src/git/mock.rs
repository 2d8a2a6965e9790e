use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::cmd::GitCommand;
use crate::error::{GitPushError, Result};
use crate::git::Runner;

/// Mock runner for testing without spawning real processes.
///
/// Records every invocation (argv plus working directory) in order, and can
/// be scripted to fail specific commands or return canned stdout.
/// Commands are keyed by their display form, e.g. `git diff --exit-code`.
pub struct MockRunner {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    failures: Vec<String>,
    outputs: HashMap<String, String>,
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl MockRunner {
    /// Create a new mock runner with an empty transcript
    pub fn new() -> Self {
        MockRunner {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Script a failure for the command with the given display form
    pub fn fail_on(&self, display: impl Into<String>) {
        self.state.lock().unwrap().failures.push(display.into());
    }

    /// Script captured stdout for the command with the given display form
    pub fn set_output(&self, display: impl Into<String>, output: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .outputs
            .insert(display.into(), output.into());
    }

    /// The recorded invocations, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The recorded invocations as display strings, oldest first
    pub fn transcript(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|c| c.argv.join(" "))
            .collect()
    }

    fn record(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            argv: cmd.argv(),
            cwd: cwd.map(Path::to_path_buf),
        });

        let display = cmd.to_string();
        if state.failures.iter().any(|f| *f == display) {
            return Err(GitPushError::command(format!("{} exited with 1", display)));
        }

        Ok(())
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for MockRunner {
    fn run(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<()> {
        self.record(cmd, cwd)
    }

    fn run_capture(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<String> {
        self.record(cmd, cwd)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .outputs
            .get(&cmd.to_string())
            .cloned()
            .unwrap_or_default())
    }
}
