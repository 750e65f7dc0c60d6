//! Render snapshot of a player

use crate::types::PlaybackState;
use crate::volume::VolumeIcon;
use serde::{Deserialize, Serialize};

/// Everything a view needs to draw the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub mounted: bool,
    pub state: PlaybackState,
    pub buffering: bool,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub progress_percent: f64,

    /// e.g. "1:00 / 2:00"
    pub time_label: String,

    pub controls_visible: bool,
    pub volume_level: f64,
    pub muted: bool,
    pub volume_icon: VolumeIcon,
    pub settings_open: bool,
    pub speed: f64,
    pub speed_label: String,
    pub quality: String,
    pub qualities: Vec<String>,
    pub fullscreen: bool,
    pub poster: Option<String>,
}
