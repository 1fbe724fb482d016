//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use itd_core::BaseUrl;
use itd_core::base_url::DEFAULT_BASE_URL;

use crate::commands::Commands;

/// Command-line client for the itd social network.
#[derive(Parser, Debug)]
#[command(name = "itd")]
#[command(author, version = env!("ITD_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(long, global = true, env = "ITD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: BaseUrl,

    /// Session file (defaults to the platform data directory)
    #[arg(long, global = true, env = "ITD_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Never prompt for credentials
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Account email, passed to the login prompt or helper
    #[arg(long, global = true, env = "ITD_EMAIL")]
    pub email: Option<String>,

    /// Account password, passed to the login helper
    #[arg(long, global = true, env = "ITD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Program that logs in and prints a session document on stdout
    #[arg(long, global = true, env = "ITD_LOGIN_COMMAND")]
    pub login_command: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_helper_flags_are_global() {
        let cli = Cli::try_parse_from([
            "itd",
            "whoami",
            "--email",
            "a@b.c",
            "--password",
            "pw",
            "--login-command",
            "/usr/local/bin/itd-browser-login",
        ])
        .unwrap();

        assert_eq!(cli.global.email.as_deref(), Some("a@b.c"));
        assert_eq!(cli.global.password.as_deref(), Some("pw"));
        assert_eq!(
            cli.global.login_command,
            Some(PathBuf::from("/usr/local/bin/itd-browser-login"))
        );
    }
}
