use serde_json::json;
use tracing::instrument;

use itd_core::error::{ErrorTable, FaultKind, Rule, codes};
use itd_core::models::{Verification, VerificationStatus};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

pub const VERIFY: ErrorTable = ErrorTable::new(
    "verify",
    &[Rule::code(codes::PENDING_REQUEST_EXISTS, FaultKind::PendingRequestExists)],
);

impl Client {
    /// Submit a verification video, previously uploaded.
    #[instrument(skip(self))]
    pub async fn verify(&self, video_url: &str) -> Result<Verification> {
        let spec = RequestSpec::post("verification/submit").json(json!({"videoUrl": video_url}));
        self.call(spec, &VERIFY).await
    }

    #[instrument(skip(self))]
    pub async fn verification_status(&self) -> Result<VerificationStatus> {
        self.call(RequestSpec::get("verification/status"), &ErrorTable::EMPTY)
            .await
    }
}
