//! Traits the HTTP client consumes: credential persistence and the opaque
//! interactive login capability.

mod login;
mod store;

pub use login::LoginProvider;
pub use store::{CredentialStore, MemoryCredentialStore};
