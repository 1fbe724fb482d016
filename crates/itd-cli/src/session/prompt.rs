//! Terminal login prompt.

use std::io::{self, BufRead, Write};

use tracing::warn;

use itd_core::error::StorageError;
use itd_core::{Credentials, LoginProvider, Result};

/// Asks for an access token and cookie string copied from a browser session.
///
/// Prompts go to stderr and answers are read from stdin. An empty token
/// means the user gave up; a closed stdin is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptLogin;

fn ask(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> io::Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed before login finished",
        ));
    }
    Ok(line.trim().to_string())
}

fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    email: Option<&str>,
) -> io::Result<Option<Credentials>> {
    match email {
        Some(email) => writeln!(out, "Log in as {email} in a browser, then paste the session below.")?,
        None => writeln!(out, "Log in in a browser, then paste the session below.")?,
    }

    let token = ask(input, out, "Access token")?;
    if token.is_empty() {
        return Ok(None);
    }
    let cookies = ask(input, out, "Cookies (optional)")?;

    Ok(Some(Credentials::new(token, cookies)))
}

impl LoginProvider for PromptLogin {
    // The paste flow never sees the password; it is typed into the browser.
    fn login(&self, email: Option<&str>, _password: Option<&str>) -> Result<Option<Credentials>> {
        let stdin = io::stdin();
        prompt(&mut stdin.lock(), &mut io::stderr().lock(), email).map_err(|err| {
            warn!(error = %err, "Login prompt failed");
            StorageError::Io(err).into()
        })
    }
}
