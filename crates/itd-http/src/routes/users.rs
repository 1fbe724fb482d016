//! Profiles and the follow graph.

use tracing::instrument;

use itd_core::error::{ErrorTable, FaultKind, FoundEntry, Rule, codes};
use itd_core::models::{
    Follow, PrivacySettings, PrivacyUpdate, ProfileChanges, ProfileUpdate, UserFull, UserList,
};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

use super::body;

pub const GET_USER: ErrorTable = ErrorTable::new(
    "get_user",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("User")),
        Rule::code(codes::USER_BLOCKED, FaultKind::UserBanned),
    ],
);

pub const UPDATE_PROFILE: ErrorTable = ErrorTable::new(
    "update_profile",
    &[
        Rule::code(codes::VALIDATION_ERROR, FaultKind::Validation(FoundEntry::First)),
        Rule::code(codes::USERNAME_TAKEN, FaultKind::UsernameTaken),
        Rule::code(codes::PHONE_VERIFICATION_REQUIRED, FaultKind::NotVerified),
    ],
);

pub const FOLLOW: ErrorTable = ErrorTable::new(
    "follow",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("User")),
        Rule::code(codes::VALIDATION_ERROR, FaultKind::CantFollowYourself),
    ],
);

/// Unfollow, follower lists and per-user post lists.
pub const USER_NOT_FOUND: ErrorTable = ErrorTable::new(
    "user_lookup",
    &[
        Rule::code(codes::NOT_FOUND, FaultKind::NotFound("User")),
        Rule::status(404, FaultKind::NotFound("User")),
    ],
);

impl Client {
    /// Fetch a profile by username. `"me"` is the current account.
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<UserFull> {
        self.call(RequestSpec::get(format!("users/{username}")), &GET_USER)
            .await
    }

    /// Fetch the current account's profile.
    pub async fn me(&self) -> Result<UserFull> {
        self.get_user("me").await
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, changes: &ProfileChanges) -> Result<ProfileUpdate> {
        let spec = RequestSpec::put("users/me").json(body(changes)?);
        self.call(spec, &UPDATE_PROFILE).await
    }

    #[instrument(skip(self))]
    pub async fn update_privacy(&self, privacy: &PrivacySettings) -> Result<PrivacyUpdate> {
        let spec = RequestSpec::put("users/me/privacy").json(body(privacy)?);
        self.call(spec, &ErrorTable::EMPTY).await
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, username: &str) -> Result<Follow> {
        self.call(RequestSpec::post(format!("users/{username}/follow")), &FOLLOW)
            .await
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, username: &str) -> Result<Follow> {
        self.call(
            RequestSpec::delete(format!("users/{username}/follow")),
            &USER_NOT_FOUND,
        )
        .await
    }

    /// One page of followers. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn followers(&self, username: &str, limit: u32, page: u32) -> Result<UserList> {
        let spec = RequestSpec::get(format!("users/{username}/followers"))
            .param("limit", limit)
            .param("page", page);
        self.call(spec, &USER_NOT_FOUND).await
    }

    /// One page of followed accounts. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn following(&self, username: &str, limit: u32, page: u32) -> Result<UserList> {
        let spec = RequestSpec::get(format!("users/{username}/following"))
            .param("limit", limit)
            .param("page", page);
        self.call(spec, &USER_NOT_FOUND).await
    }

    /// Set a new banner from an uploaded file.
    #[instrument(skip(self, bytes))]
    pub async fn update_banner(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<ProfileUpdate> {
        let upload = self.upload_file(file_name, bytes, mime).await?;
        let changes = ProfileChanges {
            banner_id: Some(upload.id),
            ..Default::default()
        };
        self.update_profile(&changes).await
    }
}
