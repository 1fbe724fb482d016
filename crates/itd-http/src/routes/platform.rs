use tracing::instrument;

use itd_core::error::ErrorTable;
use itd_core::models::{ClanList, PlatformStatus, WhoToFollow};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

impl Client {
    /// Whether the platform is in read-only mode.
    #[instrument(skip(self))]
    pub async fn platform_status(&self) -> Result<PlatformStatus> {
        self.call(RequestSpec::get("platform/status"), &ErrorTable::EMPTY)
            .await
    }

    #[instrument(skip(self))]
    pub async fn top_clans(&self) -> Result<ClanList> {
        self.call(RequestSpec::get("users/stats/top-clans"), &ErrorTable::EMPTY)
            .await
    }

    #[instrument(skip(self))]
    pub async fn who_to_follow(&self) -> Result<WhoToFollow> {
        self.call(
            RequestSpec::get("users/suggestions/who-to-follow"),
            &ErrorTable::EMPTY,
        )
        .await
    }
}
