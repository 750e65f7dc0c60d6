//! Core types for the video player

use devreel_core::VideoAttachment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback state as reconciled from media resource events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing requested yet
    #[default]
    Idle,

    /// Play requested, waiting for the resource to start
    Loading,

    /// Resource confirmed playback
    Playing,

    /// Paused, ended, or play was rejected
    Paused,

    /// Playback stalled waiting for data
    Buffering,
}

impl PlaybackState {
    /// Controls may auto-hide only in this state
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Waiting on the resource, either for the first frame or more data
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::Loading | Self::Buffering)
    }
}

/// Supported playback speeds
///
/// Any rate outside this set is rejected by the settings panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackSpeed {
    /// Every supported speed, slowest first
    pub const ALL: [PlaybackSpeed; 8] = [
        Self::Quarter,
        Self::Half,
        Self::ThreeQuarters,
        Self::Normal,
        Self::OneAndQuarter,
        Self::OneAndHalf,
        Self::OneAndThreeQuarters,
        Self::Double,
    ];

    /// Rate multiplier handed to the media resource
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Quarter => 0.25,
            Self::Half => 0.5,
            Self::ThreeQuarters => 0.75,
            Self::Normal => 1.0,
            Self::OneAndQuarter => 1.25,
            Self::OneAndHalf => 1.5,
            Self::OneAndThreeQuarters => 1.75,
            Self::Double => 2.0,
        }
    }

    /// Look up a supported speed by multiplier
    ///
    /// Returns `None` for NaN, infinities, and anything not in [`Self::ALL`].
    pub fn from_multiplier(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        Self::ALL
            .into_iter()
            .find(|speed| (speed.multiplier() - value).abs() < 1e-9)
    }

    /// Menu label, e.g. "Normal" or "1.5x"
    pub fn label(self) -> String {
        match self {
            Self::Normal => "Normal".to_string(),
            other => format!("{}x", other.multiplier()),
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

/// Position within the media, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimePosition {
    pub current_time: f64,

    /// Unknown until metadata loads or the caller supplies one
    pub duration: Option<f64>,
}

/// Where the media comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaSourceRef {
    /// Remote or relative URL
    Url(String),

    /// Opaque host handle (object URL, blob store key)
    Handle(u64),
}

impl fmt::Display for MediaSourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Handle(handle) => write!(f, "handle:{}", handle),
        }
    }
}

/// Host reference to the element that goes fullscreen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef(pub String);

impl ContainerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Inputs supplied by the embedding view when mounting a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProps {
    pub source: MediaSourceRef,

    /// Still image shown before the first frame
    pub poster: Option<String>,

    /// Caller-known duration in seconds, used until the resource reports its own
    pub duration: Option<f64>,
}

impl PlayerProps {
    pub fn new(source: MediaSourceRef) -> Self {
        Self {
            source,
            poster: None,
            duration: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(MediaSourceRef::Url(url.into()))
    }

    #[must_use]
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl From<&VideoAttachment> for PlayerProps {
    fn from(video: &VideoAttachment) -> Self {
        Self {
            source: MediaSourceRef::Url(video.url.clone()),
            poster: video.poster_url.clone(),
            duration: video.duration_secs,
        }
    }
}
