//! Credential file writers.
//!
//! Writes the SSH private key and netrc file the push will authenticate
//! with. The base directory is injectable so tests never touch the real
//! home directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GitPushError, Result};

/// Writes SSH and netrc credentials under a base directory (normally `$HOME`).
pub struct CredentialWriter {
    home: PathBuf,
}

impl CredentialWriter {
    /// Create a writer rooted at the user's home directory
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| GitPushError::credential("cannot determine home directory"))?;
        Ok(CredentialWriter { home })
    }

    /// Create a writer rooted at an explicit directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        CredentialWriter { home: home.into() }
    }

    /// Writes the private SSH key to `.ssh/id_rsa` and relaxes host key
    /// checking in `.ssh/config`.
    ///
    /// An empty key is a no-op: nothing is written and nothing existing is
    /// touched.
    pub fn write_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Ok(());
        }

        let ssh_dir = self.home.join(".ssh");
        fs::create_dir_all(&ssh_dir)?;
        set_mode(&ssh_dir, 0o700)?;

        let mut contents = key.to_string();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }

        let key_path = ssh_dir.join("id_rsa");
        fs::write(&key_path, contents)?;
        set_mode(&key_path, 0o600)?;

        let config_path = ssh_dir.join("config");
        fs::write(&config_path, "Host *\n  StrictHostKeyChecking no\n")?;
        set_mode(&config_path, 0o600)?;

        Ok(())
    }

    /// Writes machine/login/password to `.netrc`.
    ///
    /// An empty machine is a no-op.
    pub fn write_netrc(&self, machine: &str, login: &str, password: &str) -> Result<()> {
        if machine.is_empty() {
            return Ok(());
        }

        let contents = format!(
            "machine {}\nlogin {}\npassword {}\n",
            machine, login, password
        );

        let netrc_path = self.home.join(".netrc");
        fs::write(&netrc_path, contents)?;
        set_mode(&netrc_path, 0o600)?;

        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_key_creates_files() {
        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());

        writer.write_key("-----BEGIN KEY-----\nabc\n-----END KEY-----").unwrap();

        let key = fs::read_to_string(home.path().join(".ssh/id_rsa")).unwrap();
        assert!(key.starts_with("-----BEGIN KEY-----"));
        assert!(key.ends_with('\n'));

        let config = fs::read_to_string(home.path().join(".ssh/config")).unwrap();
        assert!(config.contains("StrictHostKeyChecking no"));
    }

    #[test]
    fn test_write_key_appends_trailing_newline() {
        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());

        writer.write_key("no-newline").unwrap();

        let key = fs::read_to_string(home.path().join(".ssh/id_rsa")).unwrap();
        assert_eq!(key, "no-newline\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_key_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());
        writer.write_key("secret").unwrap();

        let mode = fs::metadata(home.path().join(".ssh/id_rsa"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_key_empty_is_noop() {
        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());

        writer.write_key("").unwrap();

        assert!(!home.path().join(".ssh").exists());
    }

    #[test]
    fn test_write_netrc() {
        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());

        writer.write_netrc("example.com", "bot", "hunter2").unwrap();

        let netrc = fs::read_to_string(home.path().join(".netrc")).unwrap();
        assert_eq!(netrc, "machine example.com\nlogin bot\npassword hunter2\n");
    }

    #[test]
    fn test_write_netrc_empty_machine_is_noop() {
        let home = TempDir::new().unwrap();
        let writer = CredentialWriter::with_home(home.path());

        writer.write_netrc("", "bot", "hunter2").unwrap();

        assert!(!home.path().join(".netrc").exists());
    }
}
