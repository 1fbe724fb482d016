//! Credential persistence.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{Credentials, Result};

/// Durable storage for the active credential set.
///
/// Implementations must treat a missing or unreadable document as "no
/// credentials" rather than an error on [`load`](Self::load).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load previously saved credentials, if any.
    async fn load(&self) -> Result<Option<Credentials>>;

    /// Replace the stored credentials.
    async fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Remove stored credentials.
    async fn clear(&self) -> Result<()>;
}

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with credentials.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            slot: Mutex::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.slot.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}
