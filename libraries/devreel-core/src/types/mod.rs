mod ids;
mod post;
mod profile;

pub use ids::{PostId, UserId};
pub use post::{FeedList, NewPost, Post, VideoAttachment};
pub use profile::{Profile, ProfileStats, ProfileUpdate};
