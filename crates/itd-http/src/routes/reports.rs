//! Abuse reports.
//!
//! The API answers every report failure with `VALIDATION_ERROR`; the
//! message tells "not found" from "already reported", in English or Russian.

use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use itd_core::error::{ErrorTable, FaultKind, FoundEntry, Rule, codes};
use itd_core::models::{NewReport, ReportReason, ReportTargetType};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

const NOT_FOUND_MESSAGES: &[&str] = &["не найден", "not found"];
const ALREADY_REPORTED_MESSAGES: &[&str] = &["Вы уже отправляли жалобу", "already reported"];

macro_rules! report_table {
    ($name:ident, $subject:literal) => {
        pub const $name: ErrorTable = ErrorTable::new(
            "report",
            &[
                Rule::code(codes::VALIDATION_ERROR, FaultKind::NotFound($subject))
                    .when_message(NOT_FOUND_MESSAGES),
                Rule::code(codes::VALIDATION_ERROR, FaultKind::AlreadyReported($subject))
                    .when_message(ALREADY_REPORTED_MESSAGES),
                Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::Last)),
            ],
        );
    };
}

report_table!(REPORT_POST, "Post");
report_table!(REPORT_USER, "User");
report_table!(REPORT_COMMENT, "Comment");

/// The report table for a target type.
pub fn report_table(target: ReportTargetType) -> &'static ErrorTable {
    match target {
        ReportTargetType::User => &REPORT_USER,
        ReportTargetType::Comment => &REPORT_COMMENT,
        ReportTargetType::Post | ReportTargetType::Unknown => &REPORT_POST,
    }
}

impl Client {
    #[instrument(skip(self, description))]
    pub async fn report(
        &self,
        target_id: Uuid,
        target: ReportTargetType,
        reason: ReportReason,
        description: Option<&str>,
    ) -> Result<NewReport> {
        let spec = RequestSpec::post("reports").json(json!({
            "targetId": target_id,
            "targetType": target,
            "reason": reason,
            "description": description.unwrap_or_default(),
        }));
        self.call(spec, report_table(target)).await
    }
}
