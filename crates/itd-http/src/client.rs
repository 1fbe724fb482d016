//! The itd API client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use itd_core::error::ErrorTable;
use itd_core::{
    ApiResult, BaseUrl, CredentialStore, Credentials, Error, LoginProvider, MemoryCredentialStore,
    Result,
};

use crate::config::ClientConfig;
use crate::pipeline::Pipeline;
use crate::request::RequestSpec;
use crate::session::{LoginSettings, Session};
use crate::transport::Transport;

/// Handle to one authenticated session against the API.
///
/// Cheap to clone; clones share the session.
///
/// # Example
///
/// ```no_run
/// use itd_core::Credentials;
/// use itd_http::Client;
///
/// # async fn example() -> itd_core::Result<()> {
/// let client = Client::builder()
///     .credentials(Credentials::new("access-token", "refresh_token=..."))
///     .build()
///     .await?;
///
/// let me = client.me().await?;
/// println!("{}", me.display_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    transport: Transport,
    session: Session,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &BaseUrl {
        self.inner.transport.base_url()
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(&self.inner.transport, &self.inner.session)
    }

    /// Execute an arbitrary call. See [`Pipeline::execute`].
    pub async fn execute<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<ApiResult<T>> {
        self.pipeline().execute(spec).await
    }

    /// Execute a call without a response body. See [`Pipeline::execute_unit`].
    pub async fn execute_unit(&self, spec: &RequestSpec) -> Result<ApiResult<()>> {
        self.pipeline().execute_unit(spec).await
    }

    /// Execute and classify API errors with the endpoint's table.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        table: &ErrorTable,
    ) -> Result<T> {
        match self.execute(&spec).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(api)) => Err(Error::Api(table.classify(api))),
            Err(err) => Err(table.refine(err)),
        }
    }

    pub(crate) async fn call_unit(&self, spec: RequestSpec, table: &ErrorTable) -> Result<()> {
        match self.execute_unit(&spec).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(api)) => Err(Error::Api(table.classify(api))),
            Err(err) => Err(table.refine(err)),
        }
    }

    /// Force a token refresh with the session cookies.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Credentials> {
        let generation = self.inner.session.generation().await;
        self.inner
            .session
            .refresh(&self.inner.transport, generation)
            .await
    }
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    credentials: Option<Credentials>,
    store: Option<Arc<dyn CredentialStore>>,
    login: Option<Arc<dyn LoginProvider>>,
}

impl ClientBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.config.base_url = base_url;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.config.upload_timeout = timeout;
        self
    }

    /// Use these credentials instead of loading from the store.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn store(self, store: impl CredentialStore + 'static) -> Self {
        self.store_arc(Arc::new(store))
    }

    pub fn store_arc(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn login_provider(mut self, provider: impl LoginProvider + 'static) -> Self {
        self.login = Some(Arc::new(provider));
        self
    }

    /// Enable or disable the login provider fallback.
    pub fn interactive_login(mut self, enabled: bool) -> Self {
        self.config.interactive_login = enabled;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.config.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Build the client and establish credentials.
    ///
    /// Fails with `SessionError::NoAuthData` if no credentials are supplied,
    /// none are stored and interactive login is unavailable. No API call is
    /// made in that case.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn build(self) -> Result<Client> {
        let ClientBuilder {
            config,
            credentials,
            store,
            login,
        } = self;

        let transport = Transport::new(&config)?;
        let store = store
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()) as Arc<dyn CredentialStore>);
        let session = Session::new(
            store,
            LoginSettings {
                provider: login,
                enabled: config.interactive_login,
                email: config.email,
                password: config.password,
            },
        );

        session.initialize(credentials).await?;
        debug!("Client ready");

        Ok(Client {
            inner: Arc::new(ClientInner { transport, session }),
        })
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .field("store", &self.store.is_some())
            .field("login", &self.login.is_some())
            .finish()
    }
}
