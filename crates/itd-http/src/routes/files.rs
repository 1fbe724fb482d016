//! File uploads.

use tracing::instrument;
use uuid::Uuid;

use itd_core::error::{ErrorTable, FaultKind, Rule, codes};
use itd_core::models::Attachment;
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

pub const GET_FILE: ErrorTable = ErrorTable::new(
    "get_file",
    &[Rule::code(codes::NOT_FOUND, FaultKind::NotFoundOrForbidden("File"))],
);

pub const DELETE_FILE: ErrorTable = ErrorTable::new(
    "delete_file",
    &[Rule::code(codes::NOT_FOUND, FaultKind::NotFound("File"))],
);

impl Client {
    /// Upload a file as the multipart `file` part. Uses the upload timeout.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>, mime: &str) -> Result<Attachment> {
        let spec = RequestSpec::post("files/upload").multipart("file", file_name, bytes, mime);
        self.call(spec, &ErrorTable::EMPTY).await
    }

    #[instrument(skip(self))]
    pub async fn get_file(&self, id: Uuid) -> Result<Attachment> {
        self.call(RequestSpec::get(format!("files/{id}")), &GET_FILE).await
    }

    #[instrument(skip(self))]
    pub async fn delete_file(&self, id: Uuid) -> Result<()> {
        self.call_unit(RequestSpec::delete(format!("files/{id}")), &DELETE_FILE)
            .await
    }
}
