//! Error types for the itd client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, session, decoding, storage and classified API failures.

mod api;
pub mod classify;

pub use api::{ApiError, ApiFault, codes};
pub use classify::{ErrorTable, FaultKind, FoundEntry, MessageMatch, Rule, Trigger};

use std::time::Duration;

use thiserror::Error;

/// The unified error type for itd operations.
///
/// Callers see either a decoded payload or one of these variants, each with
/// a stable discriminant they can match on.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable non-2xx).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API rejected the access token and no refresh could fix it.
    #[error("unauthorized")]
    Unauthorized,

    /// The API asked the caller to back off.
    #[error("rate limit exceeded, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    /// A business error classified by the endpoint's error table.
    #[error("api error: {0}")]
    Api(#[from] ApiFault),

    /// The response body did not match the declared shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Missing or unusable session material.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Credential persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, header material).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this failure should trigger a credential refresh.
    ///
    /// The API does not distinguish an expired token from a dropped
    /// connection reliably, so every transport fault counts.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::Transport(_))
    }

    /// Returns the server-provided backoff for rate-limit faults.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited { retry_after } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }

    /// Returns the classified API fault, if this is one.
    pub fn api_fault(&self) -> Option<&ApiFault> {
        match self {
            Error::Api(fault) => Some(fault),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Non-2xx response without a decodable error envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Returns the HTTP status for status faults.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Response decoding errors. Always fatal: they indicate contract drift.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not JSON at all.
    #[error("response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The body is JSON but does not fit the declared shape.
    #[error("response did not match {schema}: {source}")]
    Schema {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Session errors. These require explicit re-authentication.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No credentials could be loaded or obtained.
    #[error("no auth data: log in or supply a token")]
    NoAuthData,

    /// The operation needs session cookies but only a token is available.
    #[error("no session cookie available")]
    NoCookie,

    /// The refresh endpoint refused the session cookie.
    #[error("session refresh rejected (HTTP {status})")]
    RefreshRejected { status: u16 },

    /// The interactive login provider did not produce credentials.
    #[error("interactive login failed")]
    LoginFailed,
}

/// Credential persistence errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("malformed session document: {0}")]
    Format(#[from] serde_json::Error),

    /// Storage location could not be determined.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Credential material that cannot be placed in an HTTP header.
    #[error("invalid {name} header value")]
    Header { name: &'static str },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
