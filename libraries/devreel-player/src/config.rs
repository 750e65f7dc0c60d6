//! Player configuration

use crate::error::{PlayerError, Result};
use crate::types::PlaybackSpeed;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a mounted player
///
/// Every field has a default, so partial TOML/JSON tables deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Idle time before controls hide during playback (default: 3000)
    pub idle_hide_delay_ms: u64,

    /// Initial volume level, 0.0 to 1.0 (default: 1.0)
    pub initial_volume: f64,

    /// Start muted (default: false)
    pub initial_muted: bool,

    /// Initial playback rate, must be a supported speed (default: 1.0)
    pub initial_speed: f64,

    /// Labels offered in the quality menu
    pub qualities: Vec<String>,

    /// Quality selected on mount (default: "Auto")
    pub default_quality: String,

    /// Seconds moved by the arrow-key seek shortcuts (default: 5.0)
    pub seek_step_secs: f64,

    /// Volume change per arrow-key press (default: 0.1)
    pub volume_step: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            idle_hide_delay_ms: 3000,
            initial_volume: 1.0,
            initial_muted: false,
            initial_speed: 1.0,
            qualities: ["Auto", "1080p", "720p", "480p", "360p"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_quality: "Auto".to_string(),
            seek_step_secs: 5.0,
            volume_step: 0.1,
        }
    }
}

impl PlayerConfig {
    /// Delay before the idle timer hides the controls
    pub fn idle_hide_delay(&self) -> Duration {
        Duration::from_millis(self.idle_hide_delay_ms)
    }

    /// Initial speed as a supported enum value
    pub fn initial_playback_speed(&self) -> Result<PlaybackSpeed> {
        PlaybackSpeed::from_multiplier(self.initial_speed)
            .ok_or(PlayerError::UnsupportedSpeed(self.initial_speed))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.idle_hide_delay_ms == 0 {
            return Err(PlayerError::InvalidConfig(
                "idle_hide_delay_ms must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlayerError::InvalidConfig(format!(
                "initial_volume must be within 0.0..=1.0, got {}",
                self.initial_volume
            )));
        }

        self.initial_playback_speed()?;

        if self.qualities.is_empty() {
            return Err(PlayerError::InvalidConfig(
                "qualities must offer at least one label".to_string(),
            ));
        }

        if !self.qualities.contains(&self.default_quality) {
            return Err(PlayerError::InvalidConfig(format!(
                "default_quality '{}' is not one of the offered qualities",
                self.default_quality
            )));
        }

        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            return Err(PlayerError::InvalidConfig(
                "seek_step_secs must be a positive number".to_string(),
            ));
        }

        if !self.volume_step.is_finite() || self.volume_step <= 0.0 || self.volume_step > 1.0 {
            return Err(PlayerError::InvalidConfig(
                "volume_step must be within (0.0, 1.0]".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.idle_hide_delay(), Duration::from_millis(3000));
        assert_eq!(config.initial_volume, 1.0);
        assert!(!config.initial_muted);
        assert_eq!(config.default_quality, "Auto");
        assert_eq!(config.qualities.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{ "idle_hide_delay_ms": 1500, "initial_muted": true }"#)
                .unwrap();
        assert_eq!(config.idle_hide_delay_ms, 1500);
        assert!(config.initial_muted);
        assert_eq!(config.initial_speed, 1.0);
        assert_eq!(config.default_quality, "Auto");
    }

    #[test]
    fn rejects_unsupported_initial_speed() {
        let config = PlayerConfig {
            initial_speed: 3.0,
            ..PlayerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlayerError::UnsupportedSpeed(speed)) if speed == 3.0
        ));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let config = PlayerConfig {
            initial_volume: 1.5,
            ..PlayerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlayerError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_unknown_default_quality() {
        let config = PlayerConfig {
            default_quality: "4K".to_string(),
            ..PlayerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlayerError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_idle_delay() {
        let config = PlayerConfig {
            idle_hide_delay_ms: 0,
            ..PlayerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
