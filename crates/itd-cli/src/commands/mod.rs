//! Subcommand implementations.

mod feed;
mod login;
mod logout;
mod notifications;
mod post;
mod refresh_token;
mod search;
mod user;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a session (token and cookies from a browser)
    Login(login::LoginArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Refresh the access token with the session cookies
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// End the session and delete it locally
    Logout(logout::LogoutArgs),

    /// Show a user profile
    User(user::UserArgs),

    /// Post operations
    Post(post::PostCommand),

    /// Read the main feed
    Feed(feed::FeedArgs),

    /// List notifications
    Notifications(notifications::NotificationsArgs),

    /// Search users and hashtags
    Search(search::SearchArgs),
}

pub async fn handle(global: GlobalArgs, command: Commands) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(&global, args).await,
        Commands::Whoami(args) => whoami::run(&global, args).await,
        Commands::RefreshToken(args) => refresh_token::run(&global, args).await,
        Commands::Logout(args) => logout::run(&global, args).await,
        Commands::User(args) => user::run(&global, args).await,
        Commands::Post(cmd) => post::handle(&global, cmd).await,
        Commands::Feed(args) => feed::run(&global, args).await,
        Commands::Notifications(args) => notifications::run(&global, args).await,
        Commands::Search(args) => search::run(&global, args).await,
    }
}
