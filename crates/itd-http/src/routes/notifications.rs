use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use itd_core::error::ErrorTable;
use itd_core::models::{NotificationCount, NotificationList, NotificationType};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

impl Client {
    #[instrument(skip(self))]
    pub async fn notifications(
        &self,
        limit: u32,
        offset: u32,
        kind: Option<NotificationType>,
    ) -> Result<NotificationList> {
        let spec = RequestSpec::get("notifications")
            .param("limit", limit)
            .param("cursor", offset)
            .param_opt("type", kind.map(|k| k.as_str()));
        self.call(spec, &ErrorTable::EMPTY).await
    }

    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, id: Uuid) -> Result<()> {
        self.call_unit(
            RequestSpec::post(format!("notifications/{id}/read")),
            &ErrorTable::EMPTY,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn mark_notifications_read(&self, ids: &[Uuid]) -> Result<()> {
        let spec = RequestSpec::post("notifications/read-batch").json(json!({"ids": ids}));
        self.call_unit(spec, &ErrorTable::EMPTY).await
    }

    #[instrument(skip(self))]
    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        self.call_unit(RequestSpec::post("notifications/read-all"), &ErrorTable::EMPTY)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unread_notifications(&self) -> Result<NotificationCount> {
        self.call(RequestSpec::get("notifications/count"), &ErrorTable::EMPTY)
            .await
    }
}
