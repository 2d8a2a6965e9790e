use thiserror::Error;

/// Unified error type for git-push-ci operations
#[derive(Error, Debug)]
pub enum GitPushError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version extraction error: {0}")]
    Version(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Working directory error: {0}")]
    Workdir(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-push-ci
pub type Result<T> = std::result::Result<T, GitPushError>;

impl GitPushError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitPushError::Config(msg.into())
    }

    /// Create a version extraction error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitPushError::Version(msg.into())
    }

    /// Create a credential error with context
    pub fn credential(msg: impl Into<String>) -> Self {
        GitPushError::Credential(msg.into())
    }

    /// Create a command failure error with context
    pub fn command(msg: impl Into<String>) -> Self {
        GitPushError::Command(msg.into())
    }

    /// Create a working directory error with context
    pub fn workdir(msg: impl Into<String>) -> Self {
        GitPushError::Workdir(msg.into())
    }
}
