use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::MockServer;

/// An isolated session file plus the mock API it talks to.
pub struct Env {
    pub server: MockServer,
    pub dir: TempDir,
}

impl Env {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Write a session document directly.
    pub fn seed_session(&self, token: &str, cookies: &str) {
        write_session(&self.session_file(), token, cookies);
    }

    pub fn read_session(&self) -> Value {
        let raw = std::fs::read_to_string(self.session_file()).expect("Session file missing");
        serde_json::from_str(&raw).expect("Session file is not JSON")
    }

    fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_itd"));
        command
            .arg("--base-url")
            .arg(self.server.uri())
            .arg("--session-file")
            .arg(self.session_file())
            .env_remove("RUST_LOG")
            .env_remove("ITD_LOG")
            .env_remove("ITD_BASE_URL")
            .env_remove("ITD_SESSION_FILE")
            .env_remove("ITD_EMAIL")
            .env_remove("ITD_PASSWORD")
            .env_remove("ITD_LOGIN_COMMAND")
            .env("HOME", self.dir.path());
        command
    }

    /// Run the CLI binary against the mock API.
    pub async fn run(&self, args: &[&str]) -> Output {
        self.command()
            .arg("--no-interactive")
            .args(args)
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run with the login fallback enabled and stdin closed.
    pub async fn run_interactive(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Write an executable login helper that prints `body` on stdout.
    #[cfg(unix)]
    pub fn login_helper(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("login-helper.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write helper");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o700))
            .expect("Failed to mark helper executable");
        path
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

pub fn write_session(path: &Path, token: &str, cookies: &str) {
    let doc = json!({"token": token, "cookies": cookies});
    std::fs::write(path, doc.to_string()).expect("Failed to write session");
}

pub fn profile() -> Value {
    json!({
        "id": "u1",
        "username": "alice",
        "displayName": "Alice",
        "avatar": "🦊",
        "createdAt": "2026-01-01 12:00:00+03"
    })
}
