//! Collaborator contracts
//!
//! The feed, follow graph and profile pages are plain request/response glue
//! against a REST API. These traits are the shape the rest of the client
//! depends on; `devreel-api-client` implements them over HTTP.

use crate::error::Result;
use crate::types::{FeedList, Post, Profile, ProfileStats, ProfileUpdate, UserId};
use async_trait::async_trait;

/// Feed/list API
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch an ordered sequence of posts (newest first)
    async fn fetch(&self, list: &FeedList) -> Result<Vec<Post>>;

    /// Create a new post authored by the caller
    async fn create(&self, text: &str) -> Result<Post>;
}

/// Follow-graph API
#[async_trait]
pub trait FollowApi: Send + Sync {
    /// Follow a user
    async fn follow(&self, user_id: &UserId) -> Result<()>;

    /// Unfollow a user
    async fn unfollow(&self, user_id: &UserId) -> Result<()>;

    /// Whether the caller and `user_id` follow each other
    async fn is_mutual_follow(&self, user_id: &UserId) -> Result<bool>;
}

/// Profile API
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Counters shown on a profile page
    async fn get_stats(&self, user_id: &UserId) -> Result<ProfileStats>;

    /// Public profile record
    async fn get_profile(&self, user_id: &UserId) -> Result<Profile>;

    /// Apply a partial update to the caller's own profile
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile>;
}
