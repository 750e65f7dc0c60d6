//! Profile endpoints.

use crate::client::ApiClient;
use crate::error::ApiClientError;
use async_trait::async_trait;
use devreel_core::{CoreError, Profile, ProfileApi, ProfileStats, ProfileUpdate, UserId};
use tracing::debug;

/// 404 on a user route means the user does not exist
fn user_not_found(user_id: &UserId) -> impl FnOnce(ApiClientError) -> CoreError + '_ {
    move |error| match error {
        ApiClientError::NotFound(_) => CoreError::not_found("User", user_id.as_str()),
        other => other.into(),
    }
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn get_stats(&self, user_id: &UserId) -> devreel_core::Result<ProfileStats> {
        let url = self.endpoint(&["api", "users", user_id.as_str(), "stats"])?;
        self.send_json(self.get(url), "profile stats")
            .await
            .map_err(user_not_found(user_id))
    }

    async fn get_profile(&self, user_id: &UserId) -> devreel_core::Result<Profile> {
        let url = self.endpoint(&["api", "users", user_id.as_str()])?;
        self.send_json(self.get(url), "profile")
            .await
            .map_err(user_not_found(user_id))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> devreel_core::Result<Profile> {
        if update.is_empty() {
            return Err(CoreError::invalid_input("Profile update changes nothing"));
        }

        let url = self.endpoint(&["api", "profile"])?;
        let profile: Profile = self
            .send_json(self.patch(url).json(update), "updated profile")
            .await?;
        debug!(user_id = %profile.id, "Updated profile");
        Ok(profile)
    }
}
