use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use itd_core::error::ErrorTable;
use itd_core::models::Poll;
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

impl Client {
    /// Vote for one or more options. Returns the updated poll.
    #[instrument(skip(self))]
    pub async fn vote(&self, option_ids: &[Uuid]) -> Result<Poll> {
        let spec = RequestSpec::post("poll/vote").json(json!({"optionIds": option_ids}));
        self.call(spec, &ErrorTable::EMPTY).await
    }
}
