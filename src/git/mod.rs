//! Process execution abstraction layer
//!
//! This module provides a trait-based seam between command descriptors and
//! actual process spawning, allowing a real implementation and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Runner] trait. The concrete
//! implementations include:
//!
//! - [process::ProcessRunner]: spawns real external processes
//! - [mock::MockRunner]: records invocations for testing without side effects
//!
//! Most code should depend on the [Runner] trait rather than a concrete
//! implementation. The working directory is an explicit parameter of every
//! invocation; nothing here mutates process-global state.

pub mod mock;
pub mod process;

pub use mock::MockRunner;
pub use process::ProcessRunner;

use std::path::Path;

use crate::cmd::GitCommand;
use crate::error::Result;

/// Executes [GitCommand] descriptors.
///
/// ## Error Handling
///
/// `run` and `run_capture` fail with [crate::error::GitPushError::Command]
/// when the child exits non-zero; the failing argv is included in the
/// message. Spawn failures surface as I/O errors.
///
/// ## Blocking
///
/// Both methods block until the child exits. There is no timeout and no
/// cancellation; a hung child hangs the run.
pub trait Runner {
    /// Run a command to completion, inheriting stderr.
    ///
    /// # Arguments
    /// * `cmd` - The command descriptor to execute
    /// * `cwd` - Working directory for the child, or `None` for the current one
    fn run(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<()>;

    /// Run a command to completion and capture its stdout.
    fn run_capture(&self, cmd: &GitCommand, cwd: Option<&Path>) -> Result<String>;
}
