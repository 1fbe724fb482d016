//! Notifications command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct NotificationsArgs {
    /// Maximum number of notifications
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Number of notifications to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Mark everything as read afterwards
    #[arg(long)]
    pub mark_read: bool,
}

pub async fn run(global: &GlobalArgs, args: NotificationsArgs) -> Result<()> {
    let client = session::connect(global).await?;

    let list = client
        .notifications(args.limit, args.offset, None)
        .await
        .context("Failed to fetch notifications")?;

    output::value(&list, global.pretty)?;

    if args.mark_read {
        client
            .mark_all_notifications_read()
            .await
            .context("Failed to mark notifications read")?;
        output::success("Marked all notifications read");
    }

    Ok(())
}
