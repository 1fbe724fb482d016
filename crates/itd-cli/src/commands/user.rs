//! User command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Username, or `me`
    pub username: String,
}

pub async fn run(global: &GlobalArgs, args: UserArgs) -> Result<()> {
    let client = session::connect(global).await?;
    let username = args.username.trim_start_matches('@');

    let user = client
        .get_user(username)
        .await
        .with_context(|| format!("Failed to fetch user '{username}'"))?;

    output::value(&user, global.pretty)
}
