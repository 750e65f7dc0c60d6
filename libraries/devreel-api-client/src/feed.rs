//! Feed endpoints.

use crate::client::ApiClient;
use crate::types::FeedResponse;
use async_trait::async_trait;
use devreel_core::{CoreError, FeedApi, FeedList, NewPost, Post};
use tracing::debug;

#[async_trait]
impl FeedApi for ApiClient {
    async fn fetch(&self, list: &FeedList) -> devreel_core::Result<Vec<Post>> {
        let url = match list {
            FeedList::Home => self.endpoint(&["api", "feed", "home"])?,
            FeedList::Following => self.endpoint(&["api", "feed", "following"])?,
            FeedList::User(user_id) => {
                self.endpoint(&["api", "feed", "users", user_id.as_str()])?
            }
        };
        debug!(url = %url, "Fetching feed");

        let feed: FeedResponse = self.send_json(self.get(url), "feed").await?;
        debug!(posts = feed.posts.len(), "Fetched feed");
        Ok(feed.posts)
    }

    async fn create(&self, text: &str) -> devreel_core::Result<Post> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::invalid_input("Post text cannot be empty"));
        }

        let url = self.endpoint(&["api", "posts"])?;
        let body = NewPost {
            text: text.to_string(),
        };

        let post: Post = self
            .send_json(self.post(url).json(&body), "created post")
            .await?;
        debug!(post_id = %post.id, "Created post");
        Ok(post)
    }
}
