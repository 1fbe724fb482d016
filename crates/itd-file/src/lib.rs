//! itd-file - Filesystem-backed credential store.
//!
//! Persists the session as a small JSON document
//! `{"token": "...", "cookies": "name=value; ..."}` so it survives restarts.

mod store;

pub use store::{FileCredentialStore, StoredSession};
