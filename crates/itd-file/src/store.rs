//! Session document on disk.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use itd_core::error::StorageError;
use itd_core::{CredentialStore, Credentials, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk shape of a saved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub cookies: String,
}

impl From<&Credentials> for StoredSession {
    fn from(credentials: &Credentials) -> Self {
        Self {
            token: credentials.access_token.as_str().to_string(),
            cookies: credentials.cookie_header().unwrap_or_default(),
        }
    }
}

impl From<StoredSession> for Credentials {
    fn from(stored: StoredSession) -> Self {
        Credentials::new(stored.token, stored.cookies)
    }
}

/// Stores credentials in a JSON file, readable only by the owner.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// under an exclusive lock on `<file>.lock`, so concurrent processes never
/// see a half-written document.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        with_suffix(&self.path, ".lock")
    }

    fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, ".tmp")
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(StorageError::Io)?;
        lock_file.lock_exclusive().map_err(StorageError::Io)?;
        Ok(lock_file)
    }

    /// Read the stored document. Missing files are `None`.
    pub fn read(&self) -> Result<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(StorageError::Io)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let stored = serde_json::from_str(&content).map_err(StorageError::Format)?;
        Ok(Some(stored))
    }

    /// Replace the stored document.
    pub fn write(&self, stored: &StoredSession) -> Result<()> {
        let lock_file = self.lock()?;

        let json = serde_json::to_string_pretty(stored).map_err(StorageError::Format)?;
        let temp = self.temp_path();
        {
            let mut file = File::create(&temp).map_err(StorageError::Io)?;
            file.write_all(json.as_bytes()).map_err(StorageError::Io)?;
            file.sync_data().map_err(StorageError::Io)?;
        }

        #[cfg(unix)]
        fs::set_permissions(&temp, fs::Permissions::from_mode(0o600)).map_err(StorageError::Io)?;

        fs::rename(&temp, &self.path).map_err(StorageError::Io)?;
        lock_file.unlock().map_err(StorageError::Io)?;
        Ok(())
    }

    /// Delete the stored document, if any.
    pub fn remove(&self) -> Result<()> {
        let lock_file = self.lock()?;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(StorageError::Io)?;
        }
        lock_file.unlock().map_err(StorageError::Io)?;
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    /// Best effort: an unreadable or malformed file counts as no session.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Credentials>> {
        match self.read() {
            Ok(Some(stored)) => {
                let credentials = Credentials::from(stored);
                if credentials.is_usable() {
                    debug!("Loaded session");
                    Ok(Some(credentials))
                } else {
                    debug!("Stored session has no token");
                    Ok(None)
                }
            }
            Ok(None) => Ok(None),
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn save(&self, credentials: &Credentials) -> Result<()> {
        self.write(&StoredSession::from(credentials))?;
        debug!("Saved session");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<()> {
        self.remove()?;
        debug!("Cleared session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("nested").join("session.json"))
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let credentials = Credentials::new("tok", "refresh_token=r1; theme=dark");
        store.save(&credentials).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(credentials));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn document_shape() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .save(&Credentials::new("tok", "refresh_token=r1"))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            serde_json::json!({"token": "tok", "cookies": "refresh_token=r1"})
        );
    }

    #[tokio::test]
    async fn cookie_string_is_stored_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .save(&Credentials::new("tok", "a=1; a=2; flag"))
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["cookies"], "a=1; a=2; flag");

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.cookie_header().as_deref(), Some("a=1; a=2; flag"));
    }

    #[tokio::test]
    async fn token_only_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&Credentials::token_only("tok")).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        assert!(!loaded.can_refresh());
        assert_eq!(loaded.access_token.as_str(), "tok");
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.load().await.unwrap(), None);
        assert!(store.read().is_err());
    }

    #[tokio::test]
    async fn clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&Credentials::token_only("tok")).await.unwrap();
        store.clear().await.unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.save(&Credentials::token_only("tok")).await.unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
