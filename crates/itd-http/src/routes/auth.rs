//! Session endpoints that authenticate with the cookie jar.

use serde_json::json;
use tracing::{info, instrument};

use itd_core::error::{ErrorTable, FaultKind, Rule, SessionError, codes};
use itd_core::models::Message;
use itd_core::{Error, Result};

use crate::client::Client;
use crate::request::{AuthMode, RequestSpec};

pub const CHANGE_PASSWORD: ErrorTable = ErrorTable::new(
    "change_password",
    &[
        Rule::code(codes::SAME_PASSWORD, FaultKind::SamePassword),
        Rule::code(codes::INVALID_OLD_PASSWORD, FaultKind::InvalidOldPassword),
    ],
);

impl Client {
    /// End the session server-side, then drop local and stored credentials.
    ///
    /// Token-only sessions have nothing to end server-side and are only
    /// dropped locally.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let spec = RequestSpec::post("auth/logout").auth(AuthMode::Cookie { with_bearer: false });
        match self.call_unit(spec, &ErrorTable::EMPTY).await {
            Ok(()) | Err(Error::Session(SessionError::NoCookie)) => {}
            Err(err) => return Err(err),
        }
        self.session().clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Change the account password.
    #[instrument(skip_all)]
    pub async fn change_password(&self, old: &str, new: &str) -> Result<Message> {
        let spec = RequestSpec::post("auth/change-password")
            .auth(AuthMode::Cookie { with_bearer: true })
            .json(json!({"oldPassword": old, "newPassword": new}))
            .sensitive();
        self.call(spec, &CHANGE_PASSWORD).await
    }
}
