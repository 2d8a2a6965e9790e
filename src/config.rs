use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for one plugin run.
///
/// Mirrors the CI plugin surface: credentials, remote/branch selection, and
/// the behavior flags. Constructed once at startup and read-only afterward.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PluginConfig {
    /// SSH private key material, written verbatim to the key file
    #[serde(default)]
    pub key: String,

    /// Remote URL to register before pushing; `None` pushes to an existing remote
    #[serde(default)]
    pub remote: Option<String>,

    /// Name the temporary remote is registered under
    #[serde(default = "default_remote_name")]
    pub remote_name: String,

    /// Remote branch to push to
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Local ref to push from
    #[serde(default = "default_local_branch")]
    pub local_branch: String,

    /// Working directory for every git invocation; `None` keeps the current one
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub force: bool,

    #[serde(default)]
    pub follow_tags: bool,

    /// Push the version tag instead of a branch
    #[serde(default)]
    pub tag_remote: bool,

    /// Disable SSL verification for the repository
    #[serde(default)]
    pub skip_verify: bool,

    /// Stage and commit dirty changes before pushing
    #[serde(default)]
    pub commit: bool,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Commit even when the tree is clean
    #[serde(default)]
    pub empty_commit: bool,

    /// File the version token is read from in tag-remote mode
    #[serde(default = "default_version_file")]
    pub version_file: String,
}

fn default_remote_name() -> String {
    "deploy".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_local_branch() -> String {
    "HEAD".to_string()
}

fn default_commit_message() -> String {
    "[skip ci] Commit dirty state".to_string()
}

fn default_version_file() -> String {
    "version".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            key: String::new(),
            remote: None,
            remote_name: default_remote_name(),
            branch: default_branch(),
            local_branch: default_local_branch(),
            path: None,
            force: false,
            follow_tags: false,
            tag_remote: false,
            skip_verify: false,
            commit: false,
            commit_message: default_commit_message(),
            empty_commit: false,
            version_file: default_version_file(),
        }
    }
}

/// Netrc credential fields, written to the netrc file before pushing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Netrc {
    #[serde(default)]
    pub machine: String,

    #[serde(default)]
    pub login: String,

    #[serde(default)]
    pub password: String,
}

/// Committer identity applied with `git config` before committing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Author {
    #[serde(default = "default_author_name")]
    pub name: String,

    #[serde(default = "default_author_email")]
    pub email: String,
}

fn default_author_name() -> String {
    "CI".to_string()
}

fn default_author_email() -> String {
    "ci@localhost".to_string()
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: default_author_name(),
            email: default_author_email(),
        }
    }
}

/// Everything a run needs, grouped the way the TOML file lays it out.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub config: PluginConfig,

    #[serde(default)]
    pub netrc: Netrc,

    #[serde(default)]
    pub author: Author,
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitpush.toml` in current directory
/// 3. `.gitpush.toml` in the user config directory
/// 4. Default settings if no file found
///
/// Command-line flags and `PLUGIN_*` environment variables are applied on
/// top of whatever this returns.
///
/// # Arguments
/// * `config_path` - Optional path to custom settings file
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_settings(config_path: Option<&str>) -> Result<Settings, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitpush.toml").exists() {
        fs::read_to_string("./gitpush.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitpush.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    let settings: Settings = toml::from_str(&config_str)?;
    Ok(settings)
}
