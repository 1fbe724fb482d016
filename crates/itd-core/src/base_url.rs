//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://xn--d1ah4a.com/api/";

/// A validated API base URL.
///
/// Must use HTTPS (or HTTP for loopback hosts) and is normalized to end in
/// `/`, so endpoint paths join without a leading slash.
///
/// # Example
///
/// ```
/// use itd_core::BaseUrl;
///
/// let base = BaseUrl::new("https://xn--d1ah4a.com/api").unwrap();
/// assert_eq!(base.endpoint("posts/123"), "https://xn--d1ah4a.com/api/posts/123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the absolute URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.0.as_str(), path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let base = BaseUrl::default();
        assert_eq!(base.as_str(), DEFAULT_BASE_URL);
        assert_eq!(base.host(), Some("xn--d1ah4a.com"));
    }

    #[test]
    fn unicode_host_is_punycoded() {
        let base = BaseUrl::new("https://итд.com/api/").unwrap();
        assert_eq!(base, BaseUrl::default());
    }

    #[test]
    fn appends_trailing_slash() {
        let base = BaseUrl::new("https://xn--d1ah4a.com/api").unwrap();
        assert_eq!(base.as_str(), "https://xn--d1ah4a.com/api/");
    }

    #[test]
    fn endpoint_joins_without_leading_slash() {
        let base = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(base.endpoint("auth/refresh"), "http://127.0.0.1:8080/auth/refresh");
        assert_eq!(base.endpoint("/auth/refresh"), "http://127.0.0.1:8080/auth/refresh");
    }

    #[test]
    fn valid_localhost_http() {
        let base = BaseUrl::new("http://localhost:3000/api/").unwrap();
        assert_eq!(base.host(), Some("localhost"));
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(BaseUrl::new("http://xn--d1ah4a.com/api/").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api/posts").is_err());
    }

    #[test]
    fn invalid_scheme() {
        assert!(BaseUrl::new("file:///tmp/api").is_err());
    }
}
