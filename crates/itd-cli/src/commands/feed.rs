//! Feed command implementation.

use anyhow::{Context, Result};
use clap::Args;

use itd_core::models::PostsTab;
use itd_http::FeedQuery;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Feed tab: popular or following
    #[arg(long, default_value = "popular")]
    pub tab: PostsTab,

    /// Maximum number of posts
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Pagination cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,
}

pub async fn run(global: &GlobalArgs, args: FeedArgs) -> Result<()> {
    let client = session::connect(global).await?;

    let mut query = FeedQuery::tab(args.tab).limit(args.limit);
    if let Some(cursor) = args.cursor {
        query = query.cursor(cursor);
    }

    let feed = client.posts(&query).await.context("Failed to fetch feed")?;

    if let Some(cursor) = &feed.pagination.next_cursor {
        output::status(&format!("Next cursor: {cursor}"));
    }
    output::value(&feed, global.pretty)
}
