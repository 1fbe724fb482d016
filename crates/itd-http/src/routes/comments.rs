//! Comments and replies.

use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use itd_core::error::{ErrorTable, FaultKind, FoundEntry, Rule, codes};
use itd_core::models::{Comment, CommentList, Like, Replies};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

pub const ADD_COMMENT: ErrorTable = ErrorTable::new(
    "add_comment",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::PHONE_VERIFICATION_REQUIRED, FaultKind::NotVerified),
    ],
);

pub const ADD_REPLY: ErrorTable = ErrorTable::new(
    "add_reply",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Comment")),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::NoContent),
        Rule::code(codes::FAILED_QUERY, FaultKind::NotFound("User")),
        Rule::code(codes::PHONE_VERIFICATION_REQUIRED, FaultKind::NotVerified),
    ],
);

pub const COMMENTS: ErrorTable = ErrorTable::new(
    "comments",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::status(404, FaultKind::NotFound("Post")),
    ],
);

/// Replies, likes and unlikes.
pub const COMMENT_NOT_FOUND: ErrorTable = ErrorTable::new(
    "comment_lookup",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Comment")),
        Rule::status(404, FaultKind::NotFound("Comment")),
    ],
);

pub const DELETE_COMMENT: ErrorTable = ErrorTable::new(
    "delete_comment",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Comment")),
        Rule::code(codes::FORBIDDEN, FaultKind::Forbidden("delete comment")),
    ],
);

/// Paging for top-level comments.
#[derive(Debug, Clone)]
pub struct CommentsQuery {
    pub limit: u32,
    /// Number of comments to skip.
    pub cursor: u64,
    pub sort: String,
}

impl Default for CommentsQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            cursor: 0,
            sort: "popular".to_string(),
        }
    }
}

fn comment_body(content: &str, attachment_ids: &[Uuid]) -> Value {
    let mut body = json!({"content": content});
    if !attachment_ids.is_empty() {
        body["attachmentIds"] = json!(attachment_ids);
    }
    body
}

impl Client {
    #[instrument(skip(self, content, attachment_ids))]
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        content: &str,
        attachment_ids: &[Uuid],
    ) -> Result<Comment> {
        let spec = RequestSpec::post(format!("posts/{post_id}/comments"))
            .json(comment_body(content, attachment_ids));
        self.call(spec, &ADD_COMMENT).await
    }

    /// Reply to a comment, optionally addressing a specific user in the thread.
    #[instrument(skip(self, content, attachment_ids))]
    pub async fn add_reply(
        &self,
        comment_id: Uuid,
        content: &str,
        reply_to_user_id: Option<Uuid>,
        attachment_ids: &[Uuid],
    ) -> Result<Comment> {
        let mut payload = comment_body(content, attachment_ids);
        if let Some(user_id) = reply_to_user_id {
            payload["replyToUserId"] = json!(user_id);
        }
        let spec = RequestSpec::post(format!("comments/{comment_id}/replies")).json(payload);
        self.call(spec, &ADD_REPLY).await
    }

    #[instrument(skip(self))]
    pub async fn comments(&self, post_id: Uuid, query: &CommentsQuery) -> Result<CommentList> {
        let spec = RequestSpec::get(format!("posts/{post_id}/comments"))
            .param("limit", query.limit)
            .param("sort", &query.sort)
            .param("cursor", query.cursor);
        self.call(spec, &COMMENTS).await
    }

    /// One page of replies. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn replies(&self, comment_id: Uuid, page: u32, limit: u32, sort: &str) -> Result<Replies> {
        let spec = RequestSpec::get(format!("comments/{comment_id}/replies"))
            .param("page", page)
            .param("limit", limit)
            .param("sort", sort);
        self.call(spec, &COMMENT_NOT_FOUND).await
    }

    #[instrument(skip(self))]
    pub async fn like_comment(&self, id: Uuid) -> Result<Like> {
        self.call(RequestSpec::post(format!("comments/{id}/like")), &COMMENT_NOT_FOUND)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unlike_comment(&self, id: Uuid) -> Result<Like> {
        self.call(
            RequestSpec::delete(format!("comments/{id}/like")),
            &COMMENT_NOT_FOUND,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: Uuid) -> Result<()> {
        self.call_unit(RequestSpec::delete(format!("comments/{id}")), &DELETE_COMMENT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_core::{ApiError, ApiFault};

    #[test]
    fn reply_without_found_is_no_content() {
        let err = ApiError::new(codes::VALIDATION_ERROR, "Content required");
        assert_eq!(ADD_REPLY.classify(err), ApiFault::NoContent);
    }

    #[test]
    fn reply_to_missing_user() {
        let err = ApiError::new(codes::FAILED_QUERY, "insert failed");
        assert_eq!(ADD_REPLY.classify(err), ApiFault::NotFound("User"));
    }

    #[test]
    fn attachments_are_only_sent_when_present() {
        assert_eq!(comment_body("hi", &[]), json!({"content": "hi"}));
        let id = Uuid::nil();
        assert_eq!(
            comment_body("hi", &[id]),
            json!({"content": "hi", "attachmentIds": [id]})
        );
    }
}
