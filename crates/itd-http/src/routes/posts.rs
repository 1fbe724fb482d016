//! Posts: feed, CRUD, reactions, reposts.

use serde::Serialize;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use itd_core::error::{ErrorTable, FaultKind, FoundEntry, Rule, codes};
use itd_core::models::{Like, NewPoll, PinResult, Post, PostFeed, PostUpdate, PostsTab};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

use super::body;
use super::users::USER_NOT_FOUND;

pub const CREATE_POST: ErrorTable = ErrorTable::new(
    "create_post",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Wall recipient")),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::PHONE_VERIFICATION_REQUIRED, FaultKind::NotVerified),
    ],
);

/// Get, view, like and unlike.
pub const POST_NOT_FOUND: ErrorTable = ErrorTable::new(
    "post_lookup",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::status(404, FaultKind::NotFound("Post")),
    ],
);

pub const EDIT_POST: ErrorTable = ErrorTable::new(
    "edit_post",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::code(codes::FORBIDDEN, FaultKind::Forbidden("edit post")),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
    ],
);

pub const DELETE_POST: ErrorTable = ErrorTable::new(
    "delete_post",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::code(codes::FORBIDDEN, FaultKind::Forbidden("delete post")),
    ],
);

pub const PIN_POST: ErrorTable = ErrorTable::new(
    "pin_post",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::code(codes::FORBIDDEN, FaultKind::Forbidden("pin post")),
    ],
);

pub const REPOST: ErrorTable = ErrorTable::new(
    "repost",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("Post")),
        Rule::code(codes::CONFLICT, FaultKind::AlreadyReposted),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::CantRepostYourPost)
            .when_message_is("Cannot repost your own post"),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::PHONE_VERIFICATION_REQUIRED, FaultKind::NotVerified),
    ],
);

/// A post to publish.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    /// Publish on another user's wall.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_recipient_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<NewPoll>,
}

impl NewPost {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn on_wall_of(mut self, user_id: Uuid) -> Self {
        self.wall_recipient_id = Some(user_id);
        self
    }

    pub fn attach(mut self, file_id: Uuid) -> Self {
        self.attachment_ids.push(file_id);
        self
    }

    pub fn poll(mut self, poll: NewPoll) -> Self {
        self.poll = Some(poll);
        self
    }
}

/// Feed parameters.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub limit: u32,
    pub cursor: Option<String>,
    pub username: Option<String>,
    pub sort: Option<String>,
    pub tab: Option<PostsTab>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            cursor: None,
            username: None,
            sort: None,
            tab: None,
        }
    }
}

impl FeedQuery {
    pub fn tab(tab: PostsTab) -> Self {
        Self {
            tab: Some(tab),
            ..Default::default()
        }
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl Client {
    #[instrument(skip(self, post))]
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let spec = RequestSpec::post("posts").json(body(post)?);
        self.call(spec, &CREATE_POST).await
    }

    /// The main feed.
    #[instrument(skip(self))]
    pub async fn posts(&self, query: &FeedQuery) -> Result<PostFeed> {
        let spec = RequestSpec::get("posts")
            .param("limit", query.limit)
            .param("cursor", query.cursor.as_deref().unwrap_or("0"))
            .param_opt("username", query.username.as_deref())
            .param_opt("sort", query.sort.as_deref())
            .param_opt("tab", query.tab.map(|t| t.as_str()));
        self.call(spec, &ErrorTable::EMPTY).await
    }

    #[instrument(skip(self))]
    pub async fn get_post(&self, id: Uuid) -> Result<Post> {
        self.call(RequestSpec::get(format!("posts/{id}")), &POST_NOT_FOUND)
            .await
    }

    #[instrument(skip(self, content))]
    pub async fn edit_post(&self, id: Uuid, content: &str) -> Result<PostUpdate> {
        let spec = RequestSpec::put(format!("posts/{id}")).json(json!({"content": content}));
        self.call(spec, &EDIT_POST).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: Uuid) -> Result<()> {
        self.call_unit(RequestSpec::delete(format!("posts/{id}")), &DELETE_POST)
            .await
    }

    /// Undo a deletion.
    #[instrument(skip(self))]
    pub async fn restore_post(&self, id: Uuid) -> Result<()> {
        self.call_unit(
            RequestSpec::post(format!("posts/{id}/restore")),
            &ErrorTable::EMPTY,
        )
        .await
    }

    /// Pin a post to the top of the author's wall.
    #[instrument(skip(self))]
    pub async fn pin_post(&self, id: Uuid) -> Result<PinResult> {
        self.call(RequestSpec::post(format!("posts/{id}/pin")), &PIN_POST)
            .await
    }

    /// Repost, optionally with a comment.
    #[instrument(skip(self, content))]
    pub async fn repost(&self, id: Uuid, content: Option<&str>) -> Result<Post> {
        let payload = match content.filter(|c| !c.is_empty()) {
            Some(content) => json!({"content": content}),
            None => json!({}),
        };
        let spec = RequestSpec::post(format!("posts/{id}/repost")).json(payload);
        self.call(spec, &REPOST).await
    }

    /// Count a view.
    #[instrument(skip(self))]
    pub async fn view_post(&self, id: Uuid) -> Result<()> {
        self.call_unit(RequestSpec::post(format!("posts/{id}/view")), &POST_NOT_FOUND)
            .await
    }

    #[instrument(skip(self))]
    pub async fn like_post(&self, id: Uuid) -> Result<Like> {
        self.call(RequestSpec::post(format!("posts/{id}/like")), &POST_NOT_FOUND)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unlike_post(&self, id: Uuid) -> Result<Like> {
        self.call(RequestSpec::delete(format!("posts/{id}/like")), &POST_NOT_FOUND)
            .await
    }

    /// Posts on a user's wall. `user` is a username or user id.
    #[instrument(skip(self))]
    pub async fn user_posts(&self, user: &str, limit: u32, cursor: Option<&str>) -> Result<PostFeed> {
        let spec = RequestSpec::get(format!("posts/user/{user}"))
            .param("limit", limit)
            .param_opt("cursor", cursor);
        self.call(spec, &USER_NOT_FOUND).await
    }

    /// Posts a user liked. `user` is a username or user id.
    #[instrument(skip(self))]
    pub async fn liked_posts(&self, user: &str, limit: u32, cursor: Option<&str>) -> Result<PostFeed> {
        let spec = RequestSpec::get(format!("posts/user/{user}/liked"))
            .param("limit", limit)
            .param_opt("cursor", cursor);
        self.call(spec, &USER_NOT_FOUND).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_core::{ApiError, ApiFault};

    #[test]
    fn new_post_omits_empty_fields() {
        let post = NewPost::new("hello");
        assert_eq!(serde_json::to_value(&post).unwrap(), json!({"content": "hello"}));

        let id = Uuid::nil();
        let post = NewPost::new("hi")
            .on_wall_of(id)
            .poll(NewPoll::new("Tea?", ["yes", "no"]));
        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({
                "content": "hi",
                "wallRecipientId": id,
                "poll": {
                    "question": "Tea?",
                    "options": [{"text": "yes"}, {"text": "no"}],
                    "multipleChoice": false
                }
            })
        );
    }

    #[test]
    fn repost_own_post_message_wins_over_field_error() {
        let err = ApiError::new(codes::VALIDATION_ERROR, "Cannot repost your own post");
        assert_eq!(REPOST.classify(err), ApiFault::CantRepostYourPost);

        let err = ApiError::new(codes::CONFLICT, "Already reposted");
        assert_eq!(REPOST.classify(err), ApiFault::AlreadyReposted);
    }

    #[test]
    fn repost_message_must_match_exactly() {
        let err = ApiError::new(codes::VALIDATION_ERROR, "Cannot repost your own post twice");
        assert!(matches!(REPOST.classify(err), ApiFault::Unclassified(_)));

        let err = ApiError::new(codes::VALIDATION_ERROR, "cannot repost your own post");
        assert!(matches!(REPOST.classify(err), ApiFault::Unclassified(_)));
    }

    #[test]
    fn delete_forbidden_names_action() {
        let err = ApiError::new(codes::FORBIDDEN, "nope");
        assert_eq!(DELETE_POST.classify(err), ApiFault::Forbidden("delete post"));
    }
}
