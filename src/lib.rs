pub mod cmd;
pub mod config;
pub mod creds;
pub mod error;
pub mod git;
pub mod plugin;
pub mod ui;
pub mod version;

pub use error::{GitPushError, Result};
