//! Credential types for itd authentication.
//!
//! A session is an access token plus the cookie jar the web client keeps.
//! The token is short-lived; the cookies carry the refresh capability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An access token for authenticated API calls.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token. A leading `Bearer ` prefix is stripped.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        match token.strip_prefix("Bearer ") {
            Some(stripped) => Self(stripped.trim().to_string()),
            None => Self(token.trim().to_string()),
        }
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting
    /// the session.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the token carries no material.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// The cookie jar as the web client sends it.
///
/// Held verbatim: duplicate names, bare fragments without `=` and the
/// original order all survive a load/save round-trip. The header text is
/// only rebuilt when a cookie is set or removed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    raw: String,
}

impl SessionCookies {
    /// Wrap a `Cookie` header string. Only surrounding whitespace is trimmed.
    pub fn parse(header: &str) -> Self {
        Self {
            raw: header.trim().to_string(),
        }
    }

    /// Build a jar from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut cookies = Self::default();
        for (name, value) in pairs {
            cookies.set(name, value);
        }
        cookies
    }

    fn fragments(&self) -> impl Iterator<Item = &str> {
        self.raw.split(';').map(str::trim).filter(|f| !f.is_empty())
    }

    /// Returns the value of the first cookie with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fragments()
            .filter_map(split_pair)
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Insert or replace a cookie.
    ///
    /// The first fragment with this name takes the new value and later
    /// duplicates are dropped. Everything else keeps its text and position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut replaced = false;
        let mut out = Vec::new();
        for fragment in self.fragments() {
            match split_pair(fragment) {
                Some((n, _)) if n == name => {
                    if !replaced {
                        out.push(format!("{name}={value}"));
                        replaced = true;
                    }
                }
                _ => out.push(fragment.to_string()),
            }
        }
        if !replaced {
            out.push(format!("{name}={value}"));
        }
        self.raw = out.join("; ");
    }

    /// Remove every cookie with this name, returning the first value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let value = self.get(name)?.to_string();
        let kept: Vec<&str> = self
            .fragments()
            .filter(|f| split_pair(f).is_none_or(|(n, _)| n != name))
            .collect();
        self.raw = kept.join("; ");
        Some(value)
    }

    /// Merge one `Set-Cookie` header value. Only the leading `name=value`
    /// pair is used; attributes are ignored.
    ///
    /// Returns true if the jar changed.
    pub fn apply_set_cookie(&mut self, header: &str) -> bool {
        let pair = header.split(';').next().unwrap_or_default().trim();
        let Some((name, value)) = split_pair(pair) else {
            return false;
        };
        if self.get(name) == Some(value) {
            return false;
        }
        self.set(name, value);
        true
    }

    /// Render the `Cookie` header value.
    pub fn to_header(&self) -> String {
        self.raw.clone()
    }

    /// Returns the header text without copying.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the cookie names in order. Bare fragments have no name.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments().filter_map(split_pair).map(|(n, _)| n)
    }

    /// Number of fragments, bare ones included.
    pub fn len(&self) -> usize {
        self.fragments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments().next().is_none()
    }
}

fn split_pair(fragment: &str) -> Option<(&str, &str)> {
    let (name, value) = fragment.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then(|| (name, value.trim()))
}

// Values are bearer material
impl fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Serialize for SessionCookies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for SessionCookies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SessionCookies::parse(&s))
    }
}

/// The active credential set of a client.
///
/// Either complete (token and cookies) or token-only. Token-only sessions
/// cannot be refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: AccessToken,
    pub cookies: Option<SessionCookies>,
}

impl Credentials {
    /// Complete credentials. An empty cookie string yields token-only mode.
    pub fn new(access_token: impl Into<String>, cookies: impl AsRef<str>) -> Self {
        let cookies = SessionCookies::parse(cookies.as_ref());
        Self {
            access_token: AccessToken::new(access_token),
            cookies: (!cookies.is_empty()).then_some(cookies),
        }
    }

    /// Token-only credentials.
    pub fn token_only(access_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            cookies: None,
        }
    }

    /// Returns true if a refresh can be attempted.
    pub fn can_refresh(&self) -> bool {
        self.cookies.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Returns the rendered `Cookie` header, if any cookies are held.
    pub fn cookie_header(&self) -> Option<String> {
        self.cookies
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(SessionCookies::to_header)
    }

    /// Returns true if there is a token to send.
    pub fn is_usable(&self) -> bool {
        !self.access_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(AccessToken::new("Bearer abc").as_str(), "abc");
        assert_eq!(AccessToken::new("abc").as_str(), "abc");
    }

    #[test]
    fn cookie_header_round_trip_keeps_order() {
        let cookies = SessionCookies::parse("refresh_token=r1; cf_clearance=c; theme=dark");
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("cf_clearance"), Some("c"));
        assert_eq!(
            cookies.to_header(),
            "refresh_token=r1; cf_clearance=c; theme=dark"
        );
    }

    #[test]
    fn cookie_values_may_contain_equals() {
        let cookies = SessionCookies::parse("token=abc==; x=1");
        assert_eq!(cookies.get("token"), Some("abc=="));
    }

    #[test]
    fn set_cookie_replaces_in_place() {
        let mut cookies = SessionCookies::parse("a=1; refresh_token=old; b=2");
        assert!(cookies.apply_set_cookie("refresh_token=new; Path=/; HttpOnly; Secure"));
        assert_eq!(cookies.to_header(), "a=1; refresh_token=new; b=2");

        assert!(!cookies.apply_set_cookie("refresh_token=new; Path=/"));
        assert!(cookies.apply_set_cookie("c=3"));
        assert_eq!(cookies.to_header(), "a=1; refresh_token=new; b=2; c=3");
    }

    #[test]
    fn cookies_debug_shows_names_only() {
        let cookies = SessionCookies::parse("refresh_token=supersecret");
        let debug = format!("{:?}", cookies);
        assert!(debug.contains("refresh_token"));
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn empty_cookie_string_is_token_only() {
        let creds = Credentials::new("tok", "");
        assert!(!creds.can_refresh());
        assert!(creds.cookie_header().is_none());

        let creds = Credentials::new("tok", "refresh_token=r");
        assert!(creds.can_refresh());
        assert_eq!(creds.cookie_header().as_deref(), Some("refresh_token=r"));
    }

    #[test]
    fn duplicates_and_bare_fragments_survive() {
        let creds = Credentials::new("t", "a=1; a=2; flag");
        assert_eq!(creds.cookie_header().as_deref(), Some("a=1; a=2; flag"));

        let cookies = creds.cookies.unwrap();
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("a"), Some("1"));
        assert_eq!(cookies.names().collect::<Vec<_>>(), ["a", "a"]);

        let json = serde_json::to_string(&cookies).unwrap();
        assert_eq!(json, r#""a=1; a=2; flag""#);
        let back: SessionCookies = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cookies);
    }

    #[test]
    fn set_cookie_collapses_duplicates_and_keeps_bare_fragments() {
        let mut cookies = SessionCookies::parse("a=1; flag; a=2; b=3");
        assert!(cookies.apply_set_cookie("a=9; Path=/"));
        assert_eq!(cookies.to_header(), "a=9; flag; b=3");
    }

    #[test]
    fn bare_fragment_only_jar_is_not_empty() {
        let creds = Credentials::new("t", "flag");
        assert!(creds.can_refresh());
        assert_eq!(creds.cookie_header().as_deref(), Some("flag"));
    }

    #[test]
    fn remove_cookie() {
        let mut cookies = SessionCookies::from_pairs([("a", "1"), ("b", "2")]);
        assert_eq!(cookies.remove("a").as_deref(), Some("1"));
        assert_eq!(cookies.remove("a"), None);
        assert_eq!(cookies.to_header(), "b=2");
    }
}
