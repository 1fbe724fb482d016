use tracing::instrument;

use itd_core::error::ErrorTable;
use itd_core::models::{HashtagFeed, SearchResults};
use itd_core::Result;

use crate::client::Client;
use crate::request::RequestSpec;

impl Client {
    /// Trending hashtags. Only `hashtags` is populated.
    #[instrument(skip(self))]
    pub async fn trending_hashtags(&self, limit: u32) -> Result<SearchResults> {
        let spec = RequestSpec::get("hashtags/trending").param("limit", limit);
        self.call(spec, &ErrorTable::EMPTY).await
    }

    /// Posts tagged with `hashtag` (without the leading `#`).
    #[instrument(skip(self))]
    pub async fn hashtag_posts(&self, hashtag: &str, limit: u32, cursor: Option<&str>) -> Result<HashtagFeed> {
        let tag = hashtag.trim_start_matches('#');
        let spec = RequestSpec::get(format!("hashtags/{tag}/posts"))
            .param("limit", limit)
            .param_opt("cursor", cursor);
        self.call(spec, &ErrorTable::EMPTY).await
    }
}
