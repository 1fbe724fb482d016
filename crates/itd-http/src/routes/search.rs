use tracing::instrument;

use itd_core::error::{ErrorTable, FaultKind, Rule, codes};
use itd_core::models::SearchResults;
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

pub const SEARCH: ErrorTable = ErrorTable::new(
    "search",
    &[
        Rule::code(codes::URI_TOO_LONG, FaultKind::TooLarge),
        Rule::status(414, FaultKind::TooLarge),
    ],
);

impl Client {
    /// Search users and hashtags.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, user_limit: u32, hashtag_limit: u32) -> Result<SearchResults> {
        let spec = RequestSpec::get("search")
            .param("userLimit", user_limit)
            .param("hashtagLimit", hashtag_limit)
            .param("q", query);
        self.call(spec, &SEARCH).await
    }

    pub async fn search_users(&self, query: &str, limit: u32) -> Result<SearchResults> {
        self.search(query, limit, 1).await
    }

    pub async fn search_hashtags(&self, query: &str, limit: u32) -> Result<SearchResults> {
        self.search(query, 1, limit).await
    }
}
