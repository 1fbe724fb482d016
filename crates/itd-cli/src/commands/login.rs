//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use itd_core::{CredentialStore, Credentials, LoginProvider};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session::{self, CliLogin};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Access token (prompted for when omitted)
    #[arg(long)]
    pub token: Option<String>,

    /// Cookie header from the browser session; enables token refresh
    #[arg(long, requires = "token")]
    pub cookies: Option<String>,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let credentials = match args.token {
        Some(token) => Credentials::new(token, args.cookies.unwrap_or_default()),
        None if global.no_interactive => bail!("--token is required with --no-interactive"),
        None => {
            let provider = CliLogin::from_args(global);
            let email = global.email.clone();
            let password = global.password.clone();
            tokio::task::spawn_blocking(move || provider.login(email.as_deref(), password.as_deref()))
                .await
                .context("Login prompt failed")??
                .context("Login cancelled")?
        }
    };

    if !credentials.is_usable() {
        bail!("Access token is empty");
    }

    let path = session::session_path(global)?;
    session::store(global)?
        .save(&credentials)
        .await
        .context("Failed to save session")?;

    output::status("Verifying session...");
    let client = session::connect(global).await?;
    let me = client.me().await.context("Failed to verify session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", me.username.as_deref().unwrap_or("-"));
    output::field("Name", &me.display_name);
    output::field("Refreshable", credentials.can_refresh());
    output::field("Session", path.display());

    Ok(())
}
