//! Configuration and wire types for the Devreel API.

use devreel_core::Post;
use serde::{Deserialize, Serialize};

/// Connection settings for the API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://devreel.dev`
    pub base_url: String,

    /// Bearer token for authenticated calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Whole-request timeout (default: 30)
    pub timeout_secs: u64,

    /// Connect timeout (default: 10)
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            access_token: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    /// Config for `base_url` with default timeouts and no token.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// `GET /api/feed/...` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
}

/// `GET /api/users/:id/mutual` response body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MutualFollowResponse {
    pub mutual: bool,
}
