//! The authenticated request pipeline.
//!
//! One call is: snapshot credentials, send, interpret, and on an
//! authentication failure refresh once and retry once. Decoding happens after
//! the retry stage, so schema drift is never retried.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use itd_core::envelope;
use itd_core::error::{TransportError, codes};
use itd_core::{ApiError, ApiResult, Credentials, Error, Result};

use crate::diagnostics;
use crate::request::RequestSpec;
use crate::session::Session;
use crate::transport::{Reply, Transport};

/// Drives a [`RequestSpec`] through the transport on behalf of a session.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    transport: &'a Transport,
    session: &'a Session,
}

impl<'a> Pipeline<'a> {
    pub fn new(transport: &'a Transport, session: &'a Session) -> Self {
        Self { transport, session }
    }

    /// Execute a call and decode the success body into `T`.
    ///
    /// Raised faults come back as the outer `Err`; a decoded API error
    /// envelope comes back as `Ok(Err(ApiError))`.
    pub async fn execute<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<ApiResult<T>> {
        match self.execute_with_refresh(spec).await? {
            Ok(reply) => Ok(Ok(envelope::decode(&reply.body)?)),
            Err(api) => Ok(Err(api)),
        }
    }

    /// Execute a call whose success body carries nothing of interest.
    /// Empty and 204 responses are accepted.
    pub async fn execute_unit(&self, spec: &RequestSpec) -> Result<ApiResult<()>> {
        Ok(self.execute_with_refresh(spec).await?.map(|_| ()))
    }

    /// The single retry stage: at most one refresh and one retry per call.
    #[instrument(skip(self, spec), fields(method = %spec.method, path = %spec.path))]
    pub async fn execute_with_refresh(&self, spec: &RequestSpec) -> Result<ApiResult<Reply>> {
        let snapshot = self.session.snapshot().await?;

        match attempt(self.transport, spec, &snapshot.credentials).await {
            Err(err) if err.is_auth_failure() && snapshot.credentials.can_refresh() => {
                warn!(error = %err, "Call failed, refreshing access token");
                let fresh = self
                    .session
                    .refresh(self.transport, snapshot.generation)
                    .await?;
                debug!("Retrying after refresh");
                attempt(self.transport, spec, &fresh).await
            }
            other => other,
        }
    }
}

/// One send plus interpretation, with its diagnostic record.
pub(crate) async fn attempt(
    transport: &Transport,
    spec: &RequestSpec,
    credentials: &Credentials,
) -> Result<ApiResult<Reply>> {
    let url = transport.url(spec);

    let reply = match transport.send(spec, credentials).await {
        Ok(reply) => reply,
        Err(err) => {
            diagnostics::dump(spec, &url, None, Some(&err.to_string()));
            return Err(err);
        }
    };

    let outcome = interpret(&reply);
    let classified = match &outcome {
        Ok(None) => None,
        Ok(Some(api)) => Some(api.to_string()),
        Err(err) => Some(err.to_string()),
    };
    diagnostics::dump(spec, &url, Some(&reply), classified.as_deref());

    match outcome? {
        None => Ok(Ok(reply)),
        Some(api) => Ok(Err(api)),
    }
}

/// Classify a reply.
///
/// - `Err` for raised faults: bare or enveloped `UNAUTHORIZED`, rate limits,
///   and non-2xx replies without an error envelope.
/// - `Ok(Some)` for any other error envelope, whatever the status.
/// - `Ok(None)` for success.
pub(crate) fn interpret(reply: &Reply) -> Result<Option<ApiError>> {
    if reply.body.trim() == codes::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    if let Some(api) = serde_json::from_str::<Value>(&reply.body)
        .ok()
        .as_ref()
        .and_then(envelope::parse_error_envelope)
    {
        if api.is(codes::RATE_LIMIT_EXCEEDED) {
            return Err(Error::RateLimited {
                retry_after: api.retry_after.unwrap_or_default(),
            });
        }
        if api.is(codes::UNAUTHORIZED) {
            return Err(Error::Unauthorized);
        }
        return Ok(Some(api));
    }

    if !reply.is_success() {
        return Err(TransportError::Status {
            status: reply.status,
            body: diagnostics::truncate(&reply.body).into_owned(),
        }
        .into());
    }

    Ok(None)
}
