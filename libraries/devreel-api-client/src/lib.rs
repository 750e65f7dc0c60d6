//! Devreel API client
//!
//! HTTP client for the Devreel REST API, implementing the collaborator
//! contracts from `devreel-core`.
//!
//! # Features
//!
//! - Base URL validation and normalization
//! - Bearer token authentication
//! - Feed listing and post creation
//! - Follow / unfollow / mutual-follow checks
//! - Profile stats, lookup and partial updates

mod client;
mod error;
mod feed;
mod follow;
mod profile;
mod types;

pub use client::ApiClient;
pub use error::{ApiClientError, Result};
pub use types::{ApiConfig, FeedResponse, MutualFollowResponse};
