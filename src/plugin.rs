//! Plugin orchestration.
//!
//! Runs the fixed step sequence: working directory, committer config,
//! credentials, optional commit, optional remote registration, push (branch
//! or tag), remote cleanup. Steps run strictly in order; the first failure
//! aborts the run and nothing already done is rolled back (a registered
//! remote stays registered if a later step fails).

use std::path::{Path, PathBuf};

use crate::cmd::{self, PushSpec};
use crate::config::Settings;
use crate::creds::CredentialWriter;
use crate::error::{GitPushError, Result};
use crate::git::Runner;
use crate::ui;

/// One plugin run: settings plus the runner and credential writer to use.
pub struct Plugin<R: Runner> {
    settings: Settings,
    runner: R,
    creds: CredentialWriter,
    workdir: Option<PathBuf>,
}

impl<R: Runner> Plugin<R> {
    pub fn new(settings: Settings, runner: R, creds: CredentialWriter) -> Self {
        Plugin {
            settings,
            runner,
            creds,
            workdir: None,
        }
    }

    /// Runs the full step sequence, stopping at the first failure.
    pub fn exec(&mut self) -> Result<()> {
        self.handle_path()?;
        self.write_config()?;
        self.write_key()?;
        self.write_netrc()?;
        self.handle_commit()?;
        self.handle_remote()?;

        if self.settings.config.tag_remote {
            self.handle_push_tag()?;
        } else {
            self.handle_push()?;
        }

        self.handle_cleanup()
    }

    /// Fixes the working directory every later git invocation runs in.
    fn handle_path(&mut self) -> Result<()> {
        if let Some(path) = &self.settings.config.path {
            let dir = PathBuf::from(path);
            if !dir.is_dir() {
                return Err(GitPushError::workdir(format!(
                    "{} is not a directory",
                    dir.display()
                )));
            }
            self.workdir = Some(dir);
        }

        Ok(())
    }

    /// Sets committer identity, and disables SSL verification if requested.
    fn write_config(&self) -> Result<()> {
        self.run(&cmd::config_user_name(&self.settings.author.name))?;
        self.run(&cmd::config_user_email(&self.settings.author.email))?;

        if self.settings.config.skip_verify {
            self.run(&cmd::skip_verify())?;
        }

        Ok(())
    }

    fn write_key(&self) -> Result<()> {
        self.creds.write_key(&self.settings.config.key)
    }

    fn write_netrc(&self) -> Result<()> {
        let netrc = &self.settings.netrc;
        self.creds
            .write_netrc(&netrc.machine, &netrc.login, &netrc.password)
    }

    /// Commits dirty changes if commit mode is enabled.
    ///
    /// A non-zero `git diff --exit-code` means the tree is dirty and gets a
    /// real commit; a clean tree gets an empty commit only when configured.
    fn handle_commit(&self) -> Result<()> {
        let config = &self.settings.config;
        if !config.commit {
            return Ok(());
        }

        self.run(&cmd::add_all())?;

        if self.run(&cmd::test_clean_tree()).is_err() {
            // changes to commit
            self.run(&cmd::force_commit(&config.commit_message))?;
        } else if config.empty_commit {
            // no changes but commit anyway
            self.run(&cmd::empty_commit(&config.commit_message))?;
        }

        Ok(())
    }

    /// Registers the remote if a URL was configured.
    fn handle_remote(&self) -> Result<()> {
        if let Some(url) = &self.settings.config.remote {
            self.run(&cmd::remote_add(&self.settings.config.remote_name, url))?;
        }

        Ok(())
    }

    /// Pushes the configured local ref to the remote branch.
    fn handle_push(&self) -> Result<()> {
        let config = &self.settings.config;
        let spec = PushSpec::new(
            config.remote_name.clone(),
            config.local_branch.clone(),
            config.branch.clone(),
            config.force,
            config.follow_tags,
        );

        self.run(&cmd::push_branch(&spec))
    }

    /// Pushes the version tag: with force the remote tag is deleted first,
    /// then the local tag is moved to HEAD and all tags are pushed.
    fn handle_push_tag(&self) -> Result<()> {
        let config = &self.settings.config;
        let version_file = self.version_file_path();

        if config.force {
            let delete = cmd::delete_remote_tag(&config.remote_name, &version_file)?;
            self.run(&delete)?;
        }

        let replace = cmd::replace_local_tag(&version_file, config.force)?;
        self.run(&replace)?;

        self.run(&cmd::push_tags())
    }

    /// Removes the remote registered by [Plugin::handle_remote].
    fn handle_cleanup(&self) -> Result<()> {
        if self.settings.config.remote.is_some() {
            self.run(&cmd::remote_remove(&self.settings.config.remote_name))?;
        }

        Ok(())
    }

    /// The version file, resolved against the configured working directory.
    fn version_file_path(&self) -> PathBuf {
        let file = Path::new(&self.settings.config.version_file);
        match &self.workdir {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }

    fn run(&self, command: &cmd::GitCommand) -> Result<()> {
        self.runner.run(command, self.workdir.as_deref())
    }

    /// The runner, for inspecting recorded invocations in tests.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}

/// Runs a plugin to completion, reporting the outcome on the console.
pub fn run<R: Runner>(settings: Settings, runner: R, creds: CredentialWriter) -> Result<()> {
    let mut plugin = Plugin::new(settings, runner, creds);
    ui::display_status("starting push");
    match plugin.exec() {
        Ok(()) => {
            ui::display_success("push complete");
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            Err(e)
        }
    }
}
