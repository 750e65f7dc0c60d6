//! Follow-graph endpoints.

use crate::client::ApiClient;
use crate::types::MutualFollowResponse;
use async_trait::async_trait;
use devreel_core::{FollowApi, UserId};
use tracing::debug;

#[async_trait]
impl FollowApi for ApiClient {
    async fn follow(&self, user_id: &UserId) -> devreel_core::Result<()> {
        let url = self.endpoint(&["api", "users", user_id.as_str(), "follow"])?;
        self.send(self.post(url)).await?;
        debug!(user_id = %user_id, "Followed user");
        Ok(())
    }

    async fn unfollow(&self, user_id: &UserId) -> devreel_core::Result<()> {
        let url = self.endpoint(&["api", "users", user_id.as_str(), "follow"])?;
        self.send(self.delete(url)).await?;
        debug!(user_id = %user_id, "Unfollowed user");
        Ok(())
    }

    async fn is_mutual_follow(&self, user_id: &UserId) -> devreel_core::Result<bool> {
        let url = self.endpoint(&["api", "users", user_id.as_str(), "mutual"])?;
        let response: MutualFollowResponse = self.send_json(self.get(url), "mutual follow").await?;
        Ok(response.mutual)
    }
}
