//! Terminal output for `itd`.
//!
//! Payloads go to stdout as JSON so they can be piped into `jq`. Everything
//! addressed to the person at the terminal (progress, confirmations, errors)
//! goes to stderr.

use std::fmt::Display;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Confirm a completed action.
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Progress or pagination hints.
pub fn status(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// A `label: value` line of a human-readable summary.
pub fn field(label: &str, value: impl Display) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print an API payload as one JSON document.
pub fn value<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Report a failed command with its full context chain.
pub fn error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
}

/// A follow-up suggestion after an error.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".yellow(), msg);
}
