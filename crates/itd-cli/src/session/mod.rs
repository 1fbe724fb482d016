//! Session plumbing for the CLI: where the session lives and how a client
//! is built from it.

mod command;
mod prompt;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use itd_core::{Credentials, LoginProvider};
use itd_file::FileCredentialStore;
use itd_http::Client;

use crate::cli::GlobalArgs;

pub use command::CommandLogin;
pub use prompt::PromptLogin;

/// The login fallback selected by `--login-command`.
#[derive(Debug, Clone)]
pub enum CliLogin {
    Prompt(PromptLogin),
    Command(CommandLogin),
}

impl CliLogin {
    pub fn from_args(global: &GlobalArgs) -> Self {
        match &global.login_command {
            Some(program) => CliLogin::Command(CommandLogin::new(program)),
            None => CliLogin::Prompt(PromptLogin),
        }
    }
}

impl LoginProvider for CliLogin {
    fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> itd_core::Result<Option<Credentials>> {
        match self {
            CliLogin::Prompt(prompt) => prompt.login(email, password),
            CliLogin::Command(command) => command.login(email, password),
        }
    }
}

/// The session file: `--session-file` or `<data_dir>/session.json`.
pub fn session_path(global: &GlobalArgs) -> Result<PathBuf> {
    if let Some(path) = &global.session_file {
        return Ok(path.clone());
    }

    let dirs = ProjectDirs::from("", "", "itd").context("Could not determine data directory")?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

pub fn store(global: &GlobalArgs) -> Result<FileCredentialStore> {
    Ok(FileCredentialStore::new(session_path(global)?))
}

/// Build a client from the stored session, prompting if there is none and
/// prompting is allowed.
pub async fn connect(global: &GlobalArgs) -> Result<Client> {
    let mut builder = Client::builder()
        .base_url(global.base_url.clone())
        .store(store(global)?)
        .login_provider(CliLogin::from_args(global))
        .interactive_login(!global.no_interactive);

    if let Some(email) = &global.email {
        builder = builder.email(email.as_str());
    }
    if let Some(password) = &global.password {
        builder = builder.password(password.as_str());
    }

    builder
        .build()
        .await
        .context("No usable session. Run 'itd login' first.")
}
