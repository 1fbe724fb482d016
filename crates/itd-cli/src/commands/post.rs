//! Post subcommands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use uuid::Uuid;

use itd_http::NewPost;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PostCommand {
    #[command(subcommand)]
    pub command: PostSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostSubcommand {
    /// Fetch a single post
    Get {
        id: Uuid,
    },

    /// Publish a post
    Create {
        content: String,

        /// Publish on this user's wall instead of your own
        #[arg(long)]
        wall: Option<Uuid>,

        /// Attach previously uploaded files
        #[arg(long = "attach")]
        attachments: Vec<Uuid>,
    },
}

pub async fn handle(global: &GlobalArgs, cmd: PostCommand) -> Result<()> {
    let client = session::connect(global).await?;

    match cmd.command {
        PostSubcommand::Get { id } => {
            let post = client
                .get_post(id)
                .await
                .with_context(|| format!("Failed to fetch post {id}"))?;
            output::value(&post, global.pretty)
        }
        PostSubcommand::Create {
            content,
            wall,
            attachments,
        } => {
            let mut post = NewPost::new(content);
            if let Some(user_id) = wall {
                post = post.on_wall_of(user_id);
            }
            for file_id in attachments {
                post = post.attach(file_id);
            }

            let created = client
                .create_post(&post)
                .await
                .context("Failed to create post")?;
            output::success(&format!("Created post {}", created.id));
            output::value(&created, global.pretty)
        }
    }
}
