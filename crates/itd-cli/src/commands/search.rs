//! Search command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub query: String,

    /// Maximum number of users
    #[arg(long, default_value_t = 5)]
    pub users: u32,

    /// Maximum number of hashtags
    #[arg(long, default_value_t = 5)]
    pub hashtags: u32,
}

pub async fn run(global: &GlobalArgs, args: SearchArgs) -> Result<()> {
    let client = session::connect(global).await?;

    let results = client
        .search(&args.query, args.users, args.hashtags)
        .await
        .context("Search failed")?;

    output::value(&results, global.pretty)
}
