//! Devreel Core
//!
//! Shared records, identifiers and collaborator contracts for the Devreel
//! web client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Post`, `Profile`, `ProfileStats`, etc.
//! - **Collaborator Contracts**: `FeedApi`, `FollowApi`, `ProfileApi`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! The contracts are implemented over HTTP by `devreel-api-client`; the
//! video player only consumes the `VideoAttachment` carried by a post.
//!
//! # Example
//!
//! ```rust
//! use devreel_core::types::{ProfileUpdate, UserId};
//!
//! let user = UserId::new("octocat");
//! let update = ProfileUpdate::default().with_bio("Writes Rust on weekends");
//!
//! assert_eq!(user.as_str(), "octocat");
//! assert!(!update.is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::{FeedApi, FollowApi, ProfileApi};
pub use types::{
    FeedList, NewPost, Post, PostId, Profile, ProfileStats, ProfileUpdate, UserId,
    VideoAttachment,
};
