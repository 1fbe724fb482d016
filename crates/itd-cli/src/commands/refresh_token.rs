//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(global: &GlobalArgs, _args: RefreshTokenArgs) -> Result<()> {
    let client = session::connect(global).await?;

    output::status("Refreshing session...");

    // The client persists the new token and rotated cookies itself.
    client.refresh().await.context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    output::field("Session", session::session_path(global)?.display());

    Ok(())
}
