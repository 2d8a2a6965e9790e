//! Typed command descriptors for git operations.
//!
//! Every git invocation in the plugin is built here as a [GitCommand] (program
//! name plus ordered argument list) before anything is spawned. Builders are
//! pure except where an operation needs the version token, which is obtained
//! by reading the configured version file; if that read fails, no command is
//! constructed and nothing runs.

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::version::{read_version_file, VersionToken};

/// An external-process invocation descriptor: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    program: String,
    args: Vec<String>,
}

impl GitCommand {
    fn git(args: &[&str]) -> Self {
        GitCommand {
            program: "git".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full argv, program first. This is what tests assert against.
    pub fn argv(&self) -> Vec<String> {
        let mut v = Vec::with_capacity(self.args.len() + 1);
        v.push(self.program.clone());
        v.extend(self.args.iter().cloned());
        v
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Everything that determines one branch push. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSpec {
    pub remote: String,
    pub local_ref: String,
    pub remote_ref: String,
    pub force: bool,
    pub follow_tags: bool,
}

impl PushSpec {
    pub fn new(
        remote: impl Into<String>,
        local_ref: impl Into<String>,
        remote_ref: impl Into<String>,
        force: bool,
        follow_tags: bool,
    ) -> Self {
        PushSpec {
            remote: remote.into(),
            local_ref: local_ref.into(),
            remote_ref: remote_ref.into(),
            force,
            follow_tags,
        }
    }
}

/// `git remote add <name> <url>`
pub fn remote_add(name: &str, url: &str) -> GitCommand {
    GitCommand::git(&["remote", "add", name, url])
}

/// `git remote rm <name>`
pub fn remote_remove(name: &str) -> GitCommand {
    GitCommand::git(&["remote", "rm", name])
}

/// `git add --all`
pub fn add_all() -> GitCommand {
    GitCommand::git(&["add", "--all"])
}

/// `git diff --exit-code` - exits non-zero when the tree is dirty
pub fn test_clean_tree() -> GitCommand {
    GitCommand::git(&["diff", "--exit-code"])
}

/// `git commit -m <message>`
pub fn force_commit(message: &str) -> GitCommand {
    GitCommand::git(&["commit", "-m", message])
}

/// `git commit --allow-empty -m <message>`
pub fn empty_commit(message: &str) -> GitCommand {
    GitCommand::git(&["commit", "--allow-empty", "-m", message])
}

/// `git config user.name <name>`
pub fn config_user_name(name: &str) -> GitCommand {
    GitCommand::git(&["config", "user.name", name])
}

/// `git config user.email <email>`
pub fn config_user_email(email: &str) -> GitCommand {
    GitCommand::git(&["config", "user.email", email])
}

/// `git config http.sslVerify false`
pub fn skip_verify() -> GitCommand {
    GitCommand::git(&["config", "http.sslVerify", "false"])
}

/// `git push <remote> <local>:<branch> [--force] [--follow-tags]`
pub fn push_branch(spec: &PushSpec) -> GitCommand {
    let refspec = format!("{}:{}", spec.local_ref, spec.remote_ref);
    let mut cmd = GitCommand::git(&["push", &spec.remote, &refspec]);

    if spec.force {
        cmd.args.push("--force".to_string());
    }

    if spec.follow_tags {
        cmd.args.push("--follow-tags".to_string());
    }

    cmd
}

/// `git push --tags`
pub fn push_tags() -> GitCommand {
    GitCommand::git(&["push", "--tags"])
}

/// `git tag` - local tag listing, input for the remote-tag existence check.
///
/// The push flow does not consult that check ([crate::version::tag_exists]);
/// whether non-force tag pushes should be guarded by it is still an open
/// question, so this stays available for callers and tests only.
pub fn list_tags() -> GitCommand {
    GitCommand::git(&["tag"])
}

/// `git push <remote> :refs/tags/<version>` - deletes the tag on the remote.
///
/// The version token is read from `version_file`; construction fails if the
/// file is unreadable or contains no token.
pub fn delete_remote_tag(remote: &str, version_file: &Path) -> Result<GitCommand> {
    let version = read_version_file(version_file)?;
    Ok(delete_remote_tag_for(remote, &version))
}

fn delete_remote_tag_for(remote: &str, version: &VersionToken) -> GitCommand {
    let refspec = format!(":refs/tags/{}", version);
    GitCommand::git(&["push", remote, &refspec])
}

/// `git tag [-fa|-a] <version> -m <message>` - moves the local tag to HEAD.
///
/// With `force` the tag is replaced (`-fa`); otherwise creation fails if the
/// tag already exists. The version token comes from `version_file`.
pub fn replace_local_tag(version_file: &Path, force: bool) -> Result<GitCommand> {
    let version = read_version_file(version_file)?;
    let flag = if force { "-fa" } else { "-a" };
    let message = format!("tag to {}", version);
    Ok(GitCommand::git(&[
        "tag",
        flag,
        version.as_str(),
        "-m",
        &message,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn argv(cmd: &GitCommand) -> Vec<&str> {
        cmd.args().iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_remote_add() {
        let cmd = remote_add("deploy", "git@example.com:org/repo.git");
        assert_eq!(cmd.program(), "git");
        assert_eq!(
            argv(&cmd),
            ["remote", "add", "deploy", "git@example.com:org/repo.git"]
        );
    }

    #[test]
    fn test_remote_remove() {
        let cmd = remote_remove("deploy");
        assert_eq!(argv(&cmd), ["remote", "rm", "deploy"]);
    }

    #[test]
    fn test_push_branch_force() {
        let spec = PushSpec::new("origin", "HEAD", "main", true, false);
        let cmd = push_branch(&spec);
        assert_eq!(
            cmd.argv(),
            ["git", "push", "origin", "HEAD:main", "--force"]
        );
    }

    #[test]
    fn test_push_branch_follow_tags() {
        let spec = PushSpec::new("origin", "HEAD", "main", false, true);
        let cmd = push_branch(&spec);
        assert_eq!(
            cmd.argv(),
            ["git", "push", "origin", "HEAD:main", "--follow-tags"]
        );
    }

    #[test]
    fn test_push_branch_plain() {
        let spec = PushSpec::new("origin", "feature", "main", false, false);
        let cmd = push_branch(&spec);
        assert_eq!(cmd.argv(), ["git", "push", "origin", "feature:main"]);
    }

    #[test]
    fn test_push_branch_both_flags_ordered() {
        let spec = PushSpec::new("origin", "HEAD", "main", true, true);
        let cmd = push_branch(&spec);
        assert_eq!(
            cmd.argv(),
            ["git", "push", "origin", "HEAD:main", "--force", "--follow-tags"]
        );
    }

    #[test]
    fn test_commit_commands() {
        assert_eq!(argv(&force_commit("release")), ["commit", "-m", "release"]);
        assert_eq!(
            argv(&empty_commit("release")),
            ["commit", "--allow-empty", "-m", "release"]
        );
    }

    #[test]
    fn test_clean_tree_probe() {
        assert_eq!(argv(&test_clean_tree()), ["diff", "--exit-code"]);
    }

    #[test]
    fn test_config_commands() {
        assert_eq!(
            argv(&config_user_name("CI Bot")),
            ["config", "user.name", "CI Bot"]
        );
        assert_eq!(
            argv(&config_user_email("ci@example.com")),
            ["config", "user.email", "ci@example.com"]
        );
        assert_eq!(
            argv(&skip_verify()),
            ["config", "http.sslVerify", "false"]
        );
    }

    #[test]
    fn test_delete_remote_tag_reads_version_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "v3.1.4").unwrap();
        file.flush().unwrap();

        let cmd = delete_remote_tag("origin", file.path()).unwrap();
        assert_eq!(argv(&cmd), ["push", "origin", ":refs/tags/v3.1.4"]);
    }

    #[test]
    fn test_delete_remote_tag_missing_file() {
        let result = delete_remote_tag("origin", Path::new("/nonexistent/version"));
        assert!(result.is_err());
    }

    #[test]
    fn test_replace_local_tag_force() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version: v0.9.0").unwrap();
        file.flush().unwrap();

        let cmd = replace_local_tag(file.path(), true).unwrap();
        assert_eq!(
            argv(&cmd),
            ["tag", "-fa", "v0.9.0", "-m", "tag to v0.9.0"]
        );
    }

    #[test]
    fn test_replace_local_tag_no_force() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "v0.9.0").unwrap();
        file.flush().unwrap();

        let cmd = replace_local_tag(file.path(), false).unwrap();
        assert_eq!(argv(&cmd), ["tag", "-a", "v0.9.0", "-m", "tag to v0.9.0"]);
    }

    #[test]
    fn test_replace_local_tag_no_token_in_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "unversioned").unwrap();
        file.flush().unwrap();

        assert!(replace_local_tag(file.path(), true).is_err());
    }

    #[test]
    fn test_display_joins_argv() {
        let spec = PushSpec::new("origin", "HEAD", "main", false, false);
        assert_eq!(push_branch(&spec).to_string(), "git push origin HEAD:main");
    }

    #[test]
    fn test_push_tags_and_listing() {
        assert_eq!(argv(&push_tags()), ["push", "--tags"]);
        assert_eq!(argv(&list_tags()), ["tag"]);
    }
}
