//! Single-attempt HTTP transport.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use tracing::trace;

use itd_core::error::{InvalidInputError, SessionError, TransportError};
use itd_core::{BaseUrl, Credentials, Error, Result};

use crate::config::ClientConfig;
use crate::request::{AuthMode, Params, RequestSpec};

/// Raw outcome of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    /// Raw `Set-Cookie` header values.
    pub set_cookies: Vec<String>,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Owns the HTTP client and builds requests from specs.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: BaseUrl,
    timeout: Duration,
    upload_timeout: Duration,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Http {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            upload_timeout: config.upload_timeout,
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn url(&self, spec: &RequestSpec) -> String {
        self.base_url.endpoint(&spec.path)
    }

    fn timeout_for(&self, spec: &RequestSpec) -> Duration {
        if spec.is_upload() {
            self.upload_timeout
        } else {
            self.timeout
        }
    }

    /// Send one request. No retries, no interpretation of the body.
    pub async fn send(&self, spec: &RequestSpec, credentials: &Credentials) -> Result<Reply> {
        let url = self.url(spec);
        let timeout = self.timeout_for(spec);

        let mut request = self
            .http
            .request(spec.method.clone(), &url)
            .timeout(timeout)
            .headers(auth_headers(spec.auth, credentials)?);

        request = match &spec.params {
            Params::None => request,
            Params::Query(pairs) => request.query(pairs),
            Params::Json(body) => request.json(body),
            Params::Multipart {
                field,
                file_name,
                bytes,
                mime,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)
                    .map_err(|e| InvalidInputError::Other {
                        message: format!("invalid MIME type '{mime}': {e}"),
                    })?;
                request.multipart(Form::new().part(*field, part))
            }
        };

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        trace!(status, bytes = body.len(), "response received");

        Ok(Reply {
            status,
            body,
            set_cookies,
        })
    }
}

fn auth_headers(mode: AuthMode, credentials: &Credentials) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let bearer = match mode {
        AuthMode::Bearer => true,
        AuthMode::Cookie { with_bearer } => {
            let cookie = credentials
                .cookie_header()
                .ok_or(SessionError::NoCookie)?;
            headers.insert(COOKIE, header_value("cookie", &cookie)?);
            with_bearer
        }
    };

    if bearer {
        let value = format!("Bearer {}", credentials.access_token.as_str());
        let mut value = header_value("authorization", &value)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|_| InvalidInputError::Header { name })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
