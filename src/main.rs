use anyhow::Result;
use clap::Parser;

use git_push_ci::config::{self, Settings};
use git_push_ci::creds::CredentialWriter;
use git_push_ci::git::ProcessRunner;
use git_push_ci::{plugin, ui};

// CLI surface of the plugin. Every option also reads a `PLUGIN_*`
// environment variable, which is how the CI runner normally supplies them.
// Flags and environment variables override values from the optional TOML
// settings file. Kept as a plain comment: a doc comment here would become
// clap's long_about and shadow the `about` text in `--help`.
#[derive(clap::Parser)]
#[command(
    name = "git-push-ci",
    about = "Push local commits and tags to a remote git repository"
)]
struct Args {
    #[arg(short, long, help = "Custom settings file path")]
    config: Option<String>,

    #[arg(long, env = "PLUGIN_SSH_KEY", help = "SSH private key material")]
    ssh_key: Option<String>,

    #[arg(long, env = "PLUGIN_REMOTE", help = "Remote URL to register and push to")]
    remote: Option<String>,

    #[arg(long, env = "PLUGIN_REMOTE_NAME", help = "Name for the registered remote")]
    remote_name: Option<String>,

    #[arg(long, env = "PLUGIN_BRANCH", help = "Remote branch to push to")]
    branch: Option<String>,

    #[arg(long, env = "PLUGIN_LOCAL_BRANCH", help = "Local ref to push from")]
    local_branch: Option<String>,

    #[arg(long, env = "PLUGIN_PATH", help = "Working directory for git commands")]
    path: Option<String>,

    #[arg(long, env = "PLUGIN_FORCE", help = "Force the push")]
    force: bool,

    #[arg(long, env = "PLUGIN_FOLLOWTAGS", help = "Push annotated tags alongside")]
    followtags: bool,

    #[arg(long, env = "PLUGIN_TAG_REMOTE", help = "Push the version tag instead of a branch")]
    tag_remote: bool,

    #[arg(long, env = "PLUGIN_SKIP_VERIFY", help = "Disable SSL verification")]
    skip_verify: bool,

    #[arg(long, env = "PLUGIN_COMMIT", help = "Commit dirty changes before pushing")]
    commit: bool,

    #[arg(long, env = "PLUGIN_COMMIT_MESSAGE", help = "Message for the dirty-state commit")]
    commit_message: Option<String>,

    #[arg(long, env = "PLUGIN_EMPTY_COMMIT", help = "Commit even when the tree is clean")]
    empty_commit: bool,

    #[arg(long, env = "PLUGIN_VERSION_FILE", help = "File the version tag is read from")]
    version_file: Option<String>,

    #[arg(long, env = "PLUGIN_NETRC_MACHINE", help = "Netrc machine")]
    netrc_machine: Option<String>,

    #[arg(long, env = "PLUGIN_NETRC_USERNAME", help = "Netrc login")]
    netrc_username: Option<String>,

    #[arg(long, env = "PLUGIN_NETRC_PASSWORD", help = "Netrc password")]
    netrc_password: Option<String>,

    #[arg(long, env = "PLUGIN_AUTHOR_NAME", help = "Committer name")]
    author_name: Option<String>,

    #[arg(long, env = "PLUGIN_AUTHOR_EMAIL", help = "Committer email")]
    author_email: Option<String>,
}

impl Args {
    /// Applies CLI/environment values on top of file-loaded settings.
    fn apply(self, mut settings: Settings) -> Settings {
        let config = &mut settings.config;
        if let Some(key) = self.ssh_key {
            config.key = key;
        }
        if self.remote.is_some() {
            config.remote = self.remote;
        }
        if let Some(name) = self.remote_name {
            config.remote_name = name;
        }
        if let Some(branch) = self.branch {
            config.branch = branch;
        }
        if let Some(local) = self.local_branch {
            config.local_branch = local;
        }
        if self.path.is_some() {
            config.path = self.path;
        }
        if let Some(message) = self.commit_message {
            config.commit_message = message;
        }
        if let Some(file) = self.version_file {
            config.version_file = file;
        }
        config.force |= self.force;
        config.follow_tags |= self.followtags;
        config.tag_remote |= self.tag_remote;
        config.skip_verify |= self.skip_verify;
        config.commit |= self.commit;
        config.empty_commit |= self.empty_commit;

        if let Some(machine) = self.netrc_machine {
            settings.netrc.machine = machine;
        }
        if let Some(login) = self.netrc_username {
            settings.netrc.login = login;
        }
        if let Some(password) = self.netrc_password {
            settings.netrc.password = password;
        }
        if let Some(name) = self.author_name {
            settings.author.name = name;
        }
        if let Some(email) = self.author_email {
            settings.author.email = email;
        }

        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load settings file, then layer CLI/environment values on top
    let settings = match config::load_settings(args.config.as_deref()) {
        Ok(settings) => args.apply(settings),
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            std::process::exit(1);
        }
    };

    let creds = match CredentialWriter::new() {
        Ok(creds) => creds,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if plugin::run(settings, ProcessRunner::new(), creds).is_err() {
        std::process::exit(1);
    }

    Ok(())
}
