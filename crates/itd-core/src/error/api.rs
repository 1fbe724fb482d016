//! Structured API error envelope and the closed set of classified faults.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error codes the client reacts to.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const USER_BLOCKED: &str = "USER_BLOCKED";
    pub const USERNAME_TAKEN: &str = "USERNAME_TAKEN";
    pub const PHONE_VERIFICATION_REQUIRED: &str = "PHONE_VERIFICATION_REQUIRED";
    pub const PENDING_REQUEST_EXISTS: &str = "PENDING_REQUEST_EXISTS";
    pub const PIN_NOT_OWNED: &str = "PIN_NOT_OWNED";
    pub const SAME_PASSWORD: &str = "SAME_PASSWORD";
    pub const INVALID_OLD_PASSWORD: &str = "INVALID_OLD_PASSWORD";
    pub const FAILED_QUERY: &str = "FAILED_QUERY";
    pub const URI_TOO_LONG: &str = "URI_TOO_LONG";
}

/// A structured failure returned by the API.
///
/// Wire shape: `{"error": {"code", "message", "retryAfter"?, "found"?}}`.
/// `found` keeps the server's key order, so first/last entries are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<Map<String, Value>>,
}

impl ApiError {
    /// Create an error with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retry_after: None,
            found: None,
        }
    }

    /// Returns true if the code matches.
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// First `(field, reason)` pair of the validation map.
    pub fn first_found(&self) -> Option<(String, String)> {
        self.found
            .as_ref()
            .and_then(|found| found.iter().next())
            .map(found_pair)
    }

    /// Last `(field, reason)` pair of the validation map.
    pub fn last_found(&self) -> Option<(String, String)> {
        self.found
            .as_ref()
            .and_then(|found| found.iter().next_back())
            .map(found_pair)
    }
}

fn found_pair((field, reason): (&String, &Value)) -> (String, String) {
    let reason = match reason {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (field.clone(), reason)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Business errors the endpoint tables classify API failures into.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiFault {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} not found or access denied")]
    NotFoundOrForbidden(&'static str),

    #[error("forbidden: cannot {0}")]
    Forbidden(&'static str),

    #[error("user is banned")]
    UserBanned,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot follow yourself")]
    CantFollowYourself,

    #[error("cannot repost your own post")]
    CantRepostYourPost,

    #[error("post already reposted")]
    AlreadyReposted,

    #[error("{0} already reported")]
    AlreadyReported(&'static str),

    #[error("request too large")]
    TooLarge,

    #[error("pin is not owned by this account")]
    PinNotOwned,

    #[error("a verification request is already pending")]
    PendingRequestExists,

    #[error("new password is the same as the old one")]
    SamePassword,

    #[error("old password is invalid")]
    InvalidOldPassword,

    #[error("no content")]
    NoContent,

    #[error("phone verification required")]
    NotVerified,

    /// No rule matched; the raw envelope is passed through.
    #[error("{0}")]
    Unclassified(ApiError),
}
