//! Immutable description of one API call.

use std::fmt;

use reqwest::Method;
use serde_json::Value;

/// How a call authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// `Authorization: Bearer <token>`.
    #[default]
    Bearer,
    /// The full `Cookie` header, plus the bearer header when `with_bearer`.
    Cookie { with_bearer: bool },
}

/// Request parameters.
#[derive(Clone, Default)]
pub enum Params {
    #[default]
    None,
    /// Query string pairs, in order.
    Query(Vec<(&'static str, String)>),
    /// JSON body.
    Json(Value),
    /// One named file part. Held as bytes so the call can be rebuilt for a
    /// retry.
    Multipart {
        field: &'static str,
        file_name: String,
        bytes: Vec<u8>,
        mime: String,
    },
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Params::None => f.write_str("None"),
            Params::Query(pairs) => f.debug_tuple("Query").field(pairs).finish(),
            Params::Json(body) => f.debug_tuple("Json").field(body).finish(),
            Params::Multipart {
                field,
                file_name,
                bytes,
                mime,
            } => f
                .debug_struct("Multipart")
                .field("field", field)
                .field("file_name", file_name)
                .field("len", &bytes.len())
                .field("mime", mime)
                .finish(),
        }
    }
}

/// A single API call: method, endpoint path, parameters and auth mode.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    /// Relative to the base URL, without a leading slash.
    pub path: String,
    pub params: Params,
    pub auth: AuthMode,
    /// Keep the request body out of diagnostics.
    pub sensitive: bool,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::None,
            auth: AuthMode::Bearer,
            sensitive: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        match &mut self.params {
            Params::Query(pairs) => pairs.push((key, value.to_string())),
            _ => self.params = Params::Query(vec![(key, value.to_string())]),
        }
        self
    }

    /// Append a query parameter if present.
    pub fn param_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.params = Params::Json(body);
        self
    }

    pub fn multipart(
        mut self,
        field: &'static str,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: impl Into<String>,
    ) -> Self {
        self.params = Params::Multipart {
            field,
            file_name: file_name.into(),
            bytes,
            mime: mime.into(),
        };
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn is_upload(&self) -> bool {
        matches!(self.params, Params::Multipart { .. })
    }

    /// Request body as shown in diagnostics.
    pub(crate) fn describe_body(&self) -> String {
        if self.sensitive {
            return "[REDACTED]".to_string();
        }
        match &self.params {
            Params::None => String::new(),
            Params::Query(pairs) => pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&"),
            Params::Json(body) => body.to_string(),
            Params::Multipart {
                field,
                file_name,
                bytes,
                ..
            } => format!("<multipart {field}={file_name}, {} bytes>", bytes.len()),
        }
    }
}
