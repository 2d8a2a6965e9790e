// tests/config_test.rs
use git_push_ci::config::{load_settings, PluginConfig, Settings};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.config.remote_name, "deploy");
    assert_eq!(settings.config.branch, "master");
    assert_eq!(settings.config.local_branch, "HEAD");
    assert_eq!(settings.config.commit_message, "[skip ci] Commit dirty state");
    assert_eq!(settings.config.version_file, "version");
    assert!(settings.config.remote.is_none());
    assert!(settings.netrc.machine.is_empty());
    assert_eq!(settings.author.name, "CI");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[config]
remote = "https://example.com/org/repo.git"
branch = "main"
force = true
skip_verify = true

[netrc]
machine = "example.com"
login = "bot"
password = "hunter2"

[author]
name = "Release Bot"
email = "bot@example.com"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let settings = load_settings(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        settings.config.remote.as_deref(),
        Some("https://example.com/org/repo.git")
    );
    assert_eq!(settings.config.branch, "main");
    assert!(settings.config.force);
    assert!(settings.config.skip_verify);
    assert_eq!(settings.netrc.login, "bot");
    assert_eq!(settings.author.email, "bot@example.com");
    // sections absent from the file keep their defaults
    assert_eq!(settings.config.remote_name, "deploy");
    assert_eq!(settings.config.local_branch, "HEAD");
}

#[test]
fn test_load_missing_custom_file_is_error() {
    let result = load_settings(Some("/nonexistent/gitpush.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[config\nbroken").unwrap();
    temp_file.flush().unwrap();

    let result = load_settings(Some(temp_file.path().to_str().unwrap()));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_load_discovers_file_in_current_directory() {
    // load_settings(None) probes ./gitpush.toml, so the test pins the cwd
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gitpush.toml"),
        "[config]\nbranch = \"release\"\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let settings = load_settings(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(settings.unwrap().config.branch, "release");
}

#[test]
fn test_config_is_plain_data() {
    // PluginConfig round-trips through TOML without losing fields
    let mut config = PluginConfig::default();
    config.remote = Some("git@example.com:org/repo.git".to_string());
    config.tag_remote = true;
    config.version_file = ".tags".to_string();

    let serialized = toml::to_string(&config).unwrap();
    let deserialized: PluginConfig = toml::from_str(&serialized).unwrap();
    assert_eq!(config, deserialized);
}
