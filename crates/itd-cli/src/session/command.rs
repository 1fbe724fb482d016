//! Login through an external helper program.
//!
//! The helper drives a real browser (or anything else) and prints a session
//! document, `{"token": "...", "cookies": "..."}`, on stdout. It receives
//! the account as `ITD_EMAIL` and `ITD_PASSWORD`. Empty output means the
//! helper gave up.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use itd_core::error::{SessionError, StorageError};
use itd_core::{Credentials, LoginProvider, Result};
use itd_file::StoredSession;

#[derive(Debug, Clone)]
pub struct CommandLogin {
    program: PathBuf,
}

impl CommandLogin {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl LoginProvider for CommandLogin {
    fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<Option<Credentials>> {
        let mut command = Command::new(&self.program);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .env_remove("ITD_EMAIL")
            .env_remove("ITD_PASSWORD");
        if let Some(email) = email {
            command.env("ITD_EMAIL", email);
        }
        if let Some(password) = password {
            command.env("ITD_PASSWORD", password);
        }

        debug!(program = %self.program.display(), "Running login helper");
        let output = command.output().map_err(StorageError::Io)?;
        if !output.status.success() {
            warn!(status = %output.status, "Login helper failed");
            return Err(SessionError::LoginFailed.into());
        }

        parse_session(&output.stdout)
    }
}

fn parse_session(stdout: &[u8]) -> Result<Option<Credentials>> {
    let text = String::from_utf8_lossy(stdout);
    if text.trim().is_empty() {
        return Ok(None);
    }
    let stored: StoredSession = serde_json::from_str(text.trim()).map_err(StorageError::Format)?;
    Ok(Some(stored.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_document() {
        let creds = parse_session(br#"{"token": "tok", "cookies": "a=1; a=2; flag"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(creds.access_token.as_str(), "tok");
        assert_eq!(creds.cookie_header().as_deref(), Some("a=1; a=2; flag"));
    }

    #[test]
    fn empty_output_is_cancel() {
        assert!(parse_session(b"  \n").unwrap().is_none());
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(matches!(
            parse_session(b"not json"),
            Err(itd_core::Error::Storage(StorageError::Format(_)))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn helper_receives_account_in_env() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("helper.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\nprintf '{\"token\": \"%s\", \"cookies\": \"pw=%s\"}' \"$ITD_EMAIL\" \"$ITD_PASSWORD\"\n",
        )
        .unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o700)).unwrap();
        }

        let creds = CommandLogin::new(&script)
            .login(Some("a@b.c"), Some("hunter2"))
            .unwrap()
            .unwrap();

        assert_eq!(creds.access_token.as_str(), "a@b.c");
        assert_eq!(creds.cookie_header().as_deref(), Some("pw=hunter2"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_helper_is_login_failed() {
        let result = CommandLogin::new("false").login(None, None);
        assert!(matches!(
            result,
            Err(itd_core::Error::Session(SessionError::LoginFailed))
        ));
    }
}
