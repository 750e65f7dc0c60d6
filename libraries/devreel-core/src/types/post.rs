/// Feed post domain types
use super::ids::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as returned by the feed API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: PostId,

    /// Author of the post
    pub author: UserId,

    /// Author display name at the time of fetching
    pub author_name: String,

    /// Post body
    pub text: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Embedded video clip (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoAttachment>,
}

/// Video clip embedded in a post
///
/// This is what the page hands to the video player when it mounts one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAttachment {
    /// Playable media URL
    pub url: String,

    /// Poster/thumbnail URL (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,

    /// Total duration in seconds, as known by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

/// Request body for creating a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    /// Post body
    pub text: String,
}

/// Which list a feed fetch targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedList {
    /// Everyone's posts, newest first
    Home,

    /// Posts from accounts the caller follows
    Following,

    /// Posts authored by one user
    User(UserId),
}
