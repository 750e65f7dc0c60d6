/// Profile domain types
use super::ids::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique user identifier
    pub id: UserId,

    /// Login handle
    pub username: String,

    /// Display name
    pub display_name: String,

    /// Free-form biography
    #[serde(default)]
    pub bio: String,

    /// Avatar URL (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Follower/following/post counters shown on a profile page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub followers: u64,
    pub following: u64,
    pub posts: u64,
}

/// Partial profile record for updates
///
/// Only the fields that are `Some` are sent; the server leaves the others
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Set the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Set the biography
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Set the avatar URL
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.bio.is_none() && self.avatar_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_serializes_only_set_fields() {
        let update = ProfileUpdate::default().with_bio("rustacean");
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"bio":"rustacean"}"#);
    }

    #[test]
    fn empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate::default()
            .with_display_name("Ada")
            .is_empty());
    }

    #[test]
    fn stats_default_to_zero() {
        let stats = ProfileStats::default();
        assert_eq!(stats.followers, 0);
        assert_eq!(stats.following, 0);
        assert_eq!(stats.posts, 0);
    }
}
