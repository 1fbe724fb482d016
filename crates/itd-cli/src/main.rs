//! itd - CLI tool for the itd social network.
//!
//! A thin wrapper over `itd-http`, intended for scripting and for debugging
//! sessions against the API.

mod cli;
mod commands;
mod output;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

/// Exit status when the session is missing or was rejected.
const EXIT_SESSION: u8 = 2;
/// Exit status when the API asked us to back off.
const EXIT_RATE_LIMITED: u8 = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.json_logs);

    match commands::handle(cli.global, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    output::error(err);

    let cause = err
        .chain()
        .find_map(|e| e.downcast_ref::<itd_core::Error>());
    match cause {
        Some(itd_core::Error::Session(_) | itd_core::Error::Unauthorized) => {
            output::hint("run 'itd login' to start a new session");
            ExitCode::from(EXIT_SESSION)
        }
        Some(limited @ itd_core::Error::RateLimited { .. }) => {
            if let Some(wait) = limited.retry_after() {
                output::hint(&format!("try again in {}s", wait.as_secs()));
            }
            ExitCode::from(EXIT_RATE_LIMITED)
        }
        _ => ExitCode::FAILURE,
    }
}

/// `-v` raises only the itd crates; dependencies stay at `warn` until `-vvv`.
/// `ITD_LOG` (or `RUST_LOG`) overrides the ladder entirely.
fn init_logging(verbosity: u8, json: bool) {
    let directives = match verbosity {
        0 => "warn",
        1 => "warn,itd=info,itd_http=info,itd_file=info",
        2 => "warn,itd=debug,itd_http=debug,itd_file=debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("ITD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(directives));

    // stdout carries command output
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
