//! Player events
//!
//! Three flows meet here:
//! - [`MediaEvent`]: what the media resource reports (HTML media event set)
//! - [`PlayerInput`]: everything the host delivers to a mounted player
//! - [`PlayerEvent`]: notifications the player emits for UI synchronization

use crate::host::{ListenerId, TimerId};
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events reported by the media resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Resource started fetching
    LoadStart,

    /// Metadata (including duration) is available
    LoadedMetadata { duration: f64 },

    DurationChange { duration: f64 },

    /// Enough data to start or resume
    CanPlay,

    /// Play was requested on the resource
    Play,

    /// Frames are actually advancing
    Playing,

    Pause,

    /// Stalled waiting for data
    Waiting,

    TimeUpdate { current_time: f64 },

    Seeked { current_time: f64 },

    Ended,

    /// Asynchronous rejection of a play request (autoplay policy, abort)
    PlayRejected { reason: String },

    Error { message: String },
}

impl MediaEvent {
    /// DOM event name, for logging and host bindings
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadStart => "loadstart",
            Self::LoadedMetadata { .. } => "loadedmetadata",
            Self::DurationChange { .. } => "durationchange",
            Self::CanPlay => "canplay",
            Self::Play => "play",
            Self::Playing => "playing",
            Self::Pause => "pause",
            Self::Waiting => "waiting",
            Self::TimeUpdate { .. } => "timeupdate",
            Self::Seeked { .. } => "seeked",
            Self::Ended => "ended",
            Self::PlayRejected { .. } => "playrejected",
            Self::Error { .. } => "error",
        }
    }

    /// Build an event from a DOM event name and the element's numeric readout
    ///
    /// `value` is `duration` for metadata events and `currentTime` for time
    /// events; it is ignored otherwise. Unknown names yield `None`.
    pub fn from_dom(name: &str, value: f64) -> Option<Self> {
        let event = match name {
            "loadstart" => Self::LoadStart,
            "loadedmetadata" => Self::LoadedMetadata { duration: value },
            "durationchange" => Self::DurationChange { duration: value },
            "canplay" | "canplaythrough" => Self::CanPlay,
            "play" => Self::Play,
            "playing" => Self::Playing,
            "pause" => Self::Pause,
            "waiting" | "stalled" => Self::Waiting,
            "timeupdate" => Self::TimeUpdate {
                current_time: value,
            },
            "seeked" => Self::Seeked {
                current_time: value,
            },
            "ended" => Self::Ended,
            "error" => Self::Error {
                message: "media element error".to_string(),
            },
            _ => return None,
        };
        Some(event)
    }
}

/// Keyboard shortcuts understood by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    K,
    M,
    F,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" => Some(Self::Space),
            "k" | "K" => Some(Self::K),
            "m" | "M" => Some(Self::M),
            "f" | "F" => Some(Self::F),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// Everything a host can deliver to a mounted player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    Media(MediaEvent),
    TimerFired(TimerId),
    PointerMove,
    ControlsHover(bool),

    /// Document-level press; `inside_panel` covers the panel and its toggle button
    DocumentPointerDown {
        listener: ListenerId,
        inside_panel: bool,
    },

    Key(Key),
    TogglePlayPause,
    Seek(f64),

    /// Seek by progress-bar fraction, 0.0 to 100.0
    SeekPercent(f64),

    SeekRelative(f64),
    SetVolume(f64),
    ToggleMute,
    ToggleSettings,
    CloseSettings,
    SetSpeed(f64),
    SetQuality(String),
    ToggleFullscreen,
}

/// Notifications emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    StateChanged { state: PlaybackState },
    ControlsVisibilityChanged { visible: bool },
    VolumeChanged { level: f64, muted: bool },
    SettingsToggled { open: bool },
    SpeedChanged { multiplier: f64 },
    QualityChanged { label: String },
    FullscreenChanged { active: bool },
    Error { message: String },
}
