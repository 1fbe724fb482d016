//! Profile pins.

use serde_json::json;
use tracing::instrument;

use itd_core::error::{ErrorTable, FaultKind, FoundEntry, Rule, codes};
use itd_core::models::{PinList, SetPin};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

pub const SET_PIN: ErrorTable = ErrorTable::new(
    "set_pin",
    &[
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::PIN_NOT_OWNED, FaultKind::PinNotOwned),
    ],
);

impl Client {
    /// Pins the account owns, and the active one.
    #[instrument(skip(self))]
    pub async fn pins(&self) -> Result<PinList> {
        self.call(RequestSpec::get("users/me/pins"), &ErrorTable::EMPTY)
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_pin(&self, slug: &str) -> Result<SetPin> {
        let spec = RequestSpec::put("users/me/pin").json(json!({"slug": slug}));
        self.call(spec, &SET_PIN).await
    }

    #[instrument(skip(self))]
    pub async fn remove_pin(&self) -> Result<()> {
        self.call_unit(RequestSpec::delete("users/me/pin"), &ErrorTable::EMPTY)
            .await
    }
}
