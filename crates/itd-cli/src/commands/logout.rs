//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use itd_core::CredentialStore;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Only delete the local session, without calling the API
    #[arg(long)]
    pub local: bool,
}

pub async fn run(global: &GlobalArgs, args: LogoutArgs) -> Result<()> {
    if args.local {
        session::store(global)?
            .clear()
            .await
            .context("Failed to delete session")?;
    } else {
        let client = session::connect(global).await?;
        client.logout().await.context("Failed to log out")?;
    }

    output::success("Logged out");
    Ok(())
}
