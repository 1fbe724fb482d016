//! Client configuration.

use std::fmt;
use std::time::Duration;

use itd_core::BaseUrl;

/// Timeout for ordinary calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Timeout for multipart uploads.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// User agent sent with every call.
pub const USER_AGENT: &str = concat!("itd-rs/", env!("CARGO_PKG_VERSION"));

/// Settings a [`Client`](crate::Client) is built from.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub user_agent: String,
    pub timeout: Duration,
    pub upload_timeout: Duration,
    /// Fall back to the login provider when no credentials are available or
    /// the refresh endpoint rejects the session.
    pub interactive_login: bool,
    /// Passed through to the login provider.
    pub email: Option<String>,
    /// Passed through to the login provider.
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
            interactive_login: true,
            email: None,
            password: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("upload_timeout", &self.upload_timeout)
            .field("interactive_login", &self.interactive_login)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
