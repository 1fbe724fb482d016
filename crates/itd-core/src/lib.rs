//! itd-core - Core types, error taxonomy and traits for the itd API client.
//!
//! This crate holds everything that does not touch the network: credentials,
//! the API error envelope and its classifier, response envelope decoding, the
//! typed data model and the storage/login traits the HTTP client consumes.

pub mod base_url;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod markdown;
pub mod models;
pub mod traits;

pub use base_url::BaseUrl;
pub use credentials::{AccessToken, Credentials, SessionCookies};
pub use error::{ApiError, ApiFault, Error};
pub use traits::{CredentialStore, LoginProvider, MemoryCredentialStore};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a call that reached the API: either the decoded payload or a
/// structured error envelope the caller is expected to branch on.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
