//! Error types for the video player

use thiserror::Error;

/// Player errors
///
/// User intents never surface these: they are logged and folded back into
/// state. Only mounting and configuration validation return them.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Playback speed outside the supported set
    #[error("Unsupported playback speed: {0}")]
    UnsupportedSpeed(f64),

    /// Media resource refused to start playback (autoplay policy, permissions)
    #[error("Play request rejected: {0}")]
    PlayRejected(String),

    /// Fullscreen API is missing or no container is attached
    #[error("Fullscreen is unavailable")]
    FullscreenUnavailable,

    /// Host refused the fullscreen request
    #[error("Fullscreen request rejected: {0}")]
    FullscreenRejected(String),

    /// Media resource failure (load, subscribe)
    #[error("Media error: {0}")]
    Media(String),

    /// Generic host environment failure
    #[error("Host error: {0}")]
    Host(String),

    /// Operation on a player that has been torn down
    #[error("Player is not mounted")]
    NotMounted,
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
