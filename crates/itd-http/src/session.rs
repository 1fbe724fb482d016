//! Credential lifecycle: install, snapshot, refresh, login fallback, persist.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use itd_core::error::SessionError;
use itd_core::models::RefreshedToken;
use itd_core::{ApiFault, CredentialStore, Credentials, Error, LoginProvider, Result};
use itd_core::{AccessToken, envelope};

use crate::pipeline;
use crate::request::{AuthMode, RequestSpec};
use crate::transport::Transport;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoCredentials,
    Authenticated,
    Refreshing,
    /// The refresh endpoint rejected the session; only a new login helps.
    NeedsManualLogin,
}

/// Credentials as seen at one point in time, tagged with the generation they
/// belong to.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub credentials: Credentials,
    pub generation: u64,
}

struct Slot {
    credentials: Option<Credentials>,
    generation: u64,
    state: SessionState,
}

/// Login provider plus what it is called with.
pub(crate) struct LoginSettings {
    pub provider: Option<Arc<dyn LoginProvider>>,
    pub enabled: bool,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The one logical session of a client.
///
/// Readers take a snapshot and never hold a lock across a round trip.
/// Refreshes are serialized; a caller that waited for another refresh and
/// finds the generation advanced reuses its result.
pub struct Session {
    slot: RwLock<Slot>,
    refresh_lock: Mutex<()>,
    login_lock: Mutex<()>,
    store: Arc<dyn CredentialStore>,
    login: LoginSettings,
}

impl Session {
    pub(crate) fn new(store: Arc<dyn CredentialStore>, login: LoginSettings) -> Self {
        Self {
            slot: RwLock::new(Slot {
                credentials: None,
                generation: 0,
                state: SessionState::NoCredentials,
            }),
            refresh_lock: Mutex::new(()),
            login_lock: Mutex::new(()),
            store,
            login,
        }
    }

    /// Establish initial credentials: explicit, then stored, then
    /// interactive login. Makes no API calls.
    #[instrument(skip_all)]
    pub(crate) async fn initialize(&self, explicit: Option<Credentials>) -> Result<()> {
        if let Some(credentials) = explicit.filter(Credentials::is_usable) {
            debug!(refreshable = credentials.can_refresh(), "Using supplied credentials");
            self.install(credentials, false).await;
            return Ok(());
        }

        match self.store.load().await {
            Ok(Some(credentials)) if credentials.is_usable() => {
                debug!(refreshable = credentials.can_refresh(), "Loaded stored session");
                self.install(credentials, false).await;
                return Ok(());
            }
            Ok(_) => debug!("No stored session"),
            Err(err) => warn!(error = %err, "Failed to load stored session"),
        }

        if self.login_available() && self.login().await?.is_some() {
            return Ok(());
        }

        Err(SessionError::NoAuthData.into())
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.slot.read().await.state
    }

    /// A copy of the current credentials.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.slot.read().await.credentials.clone()
    }

    /// Current generation. Advances on every credential replacement.
    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    /// Credentials to send with the next call.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let slot = self.slot.read().await;
        match &slot.credentials {
            Some(credentials) => Ok(Snapshot {
                credentials: credentials.clone(),
                generation: slot.generation,
            }),
            None => Err(SessionError::NoAuthData.into()),
        }
    }

    /// Replace the credentials and persist them.
    pub async fn replace(&self, credentials: Credentials) {
        self.install(credentials, true).await;
    }

    /// Drop the credentials and clear the store.
    pub async fn clear(&self) -> Result<()> {
        {
            let mut slot = self.slot.write().await;
            slot.credentials = None;
            slot.generation += 1;
            slot.state = SessionState::NoCredentials;
        }
        self.store.clear().await
    }

    async fn install(&self, credentials: Credentials, persist: bool) {
        {
            let mut slot = self.slot.write().await;
            slot.credentials = Some(credentials.clone());
            slot.generation += 1;
            slot.state = SessionState::Authenticated;
        }
        if persist {
            self.persist(&credentials).await;
        }
    }

    async fn persist(&self, credentials: &Credentials) {
        match self.store.save(credentials).await {
            Ok(()) => debug!("Session persisted"),
            Err(err) => warn!(error = %err, "Failed to persist session"),
        }
    }

    async fn set_state(&self, state: SessionState) {
        self.slot.write().await.state = state;
    }

    fn login_available(&self) -> bool {
        self.login.enabled && self.login.provider.is_some()
    }

    /// Refresh the access token using the session cookies.
    ///
    /// `observed_generation` is the generation the caller's failed call used.
    /// If it is stale, another caller already refreshed and its credentials
    /// are returned without a network call.
    #[instrument(skip(self, transport))]
    pub async fn refresh(&self, transport: &Transport, observed_generation: u64) -> Result<Credentials> {
        let _guard = self.refresh_lock.lock().await;

        let current = {
            let slot = self.slot.read().await;
            let credentials = slot.credentials.clone().ok_or(SessionError::NoAuthData)?;
            if slot.generation != observed_generation {
                debug!(generation = slot.generation, "Already refreshed by another caller");
                return Ok(credentials);
            }
            credentials
        };

        if !current.can_refresh() {
            return Err(SessionError::NoCookie.into());
        }

        info!("Refreshing access token");
        self.set_state(SessionState::Refreshing).await;

        match self.request_refresh(transport, &current).await {
            Ok(fresh) => {
                self.install(fresh.clone(), true).await;
                info!("Access token refreshed");
                Ok(fresh)
            }
            Err(Error::Session(SessionError::RefreshRejected { status })) => {
                self.set_state(SessionState::NeedsManualLogin).await;
                if self.login_available() {
                    info!(status, "Refresh rejected, falling back to interactive login");
                    self.login()
                        .await?
                        .ok_or_else(|| SessionError::LoginFailed.into())
                } else {
                    warn!(status, "Refresh rejected, manual login required");
                    Err(SessionError::RefreshRejected { status }.into())
                }
            }
            Err(err) => {
                self.set_state(SessionState::Authenticated).await;
                Err(err)
            }
        }
    }

    async fn request_refresh(&self, transport: &Transport, current: &Credentials) -> Result<Credentials> {
        let spec = RequestSpec::post("auth/refresh").auth(AuthMode::Cookie { with_bearer: false });

        let reply = match pipeline::attempt(transport, &spec, current).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(api)) => return Err(ApiFault::Unclassified(api).into()),
            Err(Error::Unauthorized) => {
                return Err(SessionError::RefreshRejected { status: 401 }.into());
            }
            Err(err) => {
                return match err {
                    Error::Transport(t) if matches!(t.status(), Some(401 | 403)) => {
                        let status = t.status().unwrap_or(401);
                        Err(SessionError::RefreshRejected { status }.into())
                    }
                    other => Err(other),
                };
            }
        };

        let token: RefreshedToken = envelope::decode(&reply.body)?;

        let mut cookies = current.cookies.clone().unwrap_or_default();
        let rotated = reply
            .set_cookies
            .iter()
            .filter(|header| cookies.apply_set_cookie(header))
            .count();
        debug!(rotated, "Merged response cookies");

        Ok(Credentials {
            access_token: AccessToken::new(token.access_token),
            cookies: Some(cookies),
        })
    }

    /// Run the login provider on a blocking thread and install its result.
    ///
    /// `Ok(None)` means the provider declined or returned nothing usable.
    /// Provider errors pass through unchanged.
    async fn login(&self) -> Result<Option<Credentials>> {
        let provider = match (&self.login.provider, self.login.enabled) {
            (Some(provider), true) => Arc::clone(provider),
            _ => return Err(SessionError::NoAuthData.into()),
        };

        let _slot = self.login_lock.lock().await;
        info!("Starting interactive login");

        let email = self.login.email.clone();
        let password = self.login.password.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            provider.login(email.as_deref(), password.as_deref())
        })
        .await
        .map_err(|err| {
            warn!(error = %err, "Login provider panicked");
            SessionError::LoginFailed
        })??;

        match outcome.filter(Credentials::is_usable) {
            Some(credentials) => {
                self.install(credentials.clone(), true).await;
                info!("Interactive login succeeded");
                Ok(Some(credentials))
            }
            None => {
                warn!("Interactive login produced no credentials");
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &"[REDACTED]")
            .field("interactive_login", &self.login_available())
            .finish()
    }
}
