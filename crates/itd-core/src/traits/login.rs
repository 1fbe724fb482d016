//! Interactive login capability.

use crate::{Credentials, Result};

/// Obtains fresh credentials outside the API, typically by driving a browser
/// or prompting a person.
///
/// Calls are blocking and may take minutes. The client runs them on a
/// blocking thread and never invokes a provider concurrently.
pub trait LoginProvider: Send + Sync {
    /// Returns `Ok(None)` if the user gave up or the flow produced nothing.
    fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<Option<Credentials>>;
}

impl<F> LoginProvider for F
where
    F: Fn(Option<&str>, Option<&str>) -> Result<Option<Credentials>> + Send + Sync,
{
    fn login(&self, email: Option<&str>, password: Option<&str>) -> Result<Option<Credentials>> {
        self(email, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_providers() {
        let provider = |email: Option<&str>, _: Option<&str>| -> Result<Option<Credentials>> {
            Ok(email.map(|_| Credentials::token_only("tok")))
        };
        assert!(provider.login(Some("a@b.c"), None).unwrap().is_some());
        assert!(provider.login(None, None).unwrap().is_none());
    }
}
