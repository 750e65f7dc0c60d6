//! Volume control with mute tracking
//!
//! Level is linear 0.0 to 1.0, as media elements expect. Mute preserves the
//! level. Dragging to zero mutes; dragging back up unmutes only if zero was
//! the reason for the mute.

use crate::host::MediaResource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Icon shown on the volume button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

/// Why the output is muted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MuteCause {
    User,
    ZeroLevel,
}

#[derive(Debug, Clone)]
pub struct VolumeManager {
    /// Volume level (0.0-1.0)
    level: f64,

    /// Mute state and its cause
    muted: Option<MuteCause>,
}

impl VolumeManager {
    /// Create a volume controller
    ///
    /// Out-of-range levels are clamped; NaN becomes full volume.
    pub fn new(level: f64, muted: bool) -> Self {
        let level = if level.is_nan() { 1.0 } else { level.clamp(0.0, 1.0) };
        let muted = if muted {
            Some(MuteCause::User)
        } else if level == 0.0 {
            Some(MuteCause::ZeroLevel)
        } else {
            None
        };
        Self { level, muted }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted.is_some()
    }

    /// Push the current level and mute flag to the resource
    pub fn sync(&self, media: &mut dyn MediaResource) {
        media.set_volume(self.level);
        media.set_muted(self.is_muted());
    }

    /// Set the level, clamped to 0.0..=1.0. NaN is ignored.
    pub fn set_level(&mut self, level: f64, media: &mut dyn MediaResource) -> bool {
        if level.is_nan() {
            debug!("Ignoring NaN volume level");
            return false;
        }

        let level = level.clamp(0.0, 1.0);
        let was_muted = self.is_muted();
        self.level = level;
        media.set_volume(level);

        if level == 0.0 {
            if self.muted.is_none() {
                self.muted = Some(MuteCause::ZeroLevel);
            }
        } else if self.muted == Some(MuteCause::ZeroLevel) {
            self.muted = None;
        }

        if was_muted != self.is_muted() {
            media.set_muted(self.is_muted());
        }
        debug!(level, muted = self.is_muted(), "Volume changed");
        true
    }

    /// Nudge the level by `delta`, as the arrow keys do
    pub fn step(&mut self, delta: f64, media: &mut dyn MediaResource) -> bool {
        self.set_level(self.level + delta, media)
    }

    /// Toggle mute (preserves the level)
    pub fn toggle_mute(&mut self, media: &mut dyn MediaResource) {
        self.muted = match self.muted {
            Some(_) => None,
            None => Some(MuteCause::User),
        };
        media.set_muted(self.is_muted());
        debug!(muted = self.is_muted(), "Mute toggled");
    }

    pub fn icon(&self) -> VolumeIcon {
        if self.is_muted() || self.level == 0.0 {
            VolumeIcon::Muted
        } else if self.level < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}

impl Default for VolumeManager {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeMedia, MediaCommand};

    #[test]
    fn create_volume() {
        let vol = VolumeManager::new(0.8, false);
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn clamps_out_of_range_levels() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::default();

        vol.set_level(1.7, &mut media);
        assert_eq!(vol.level(), 1.0);
        vol.set_level(-0.2, &mut media);
        assert_eq!(vol.level(), 0.0);
        assert_eq!(VolumeManager::new(f64::NAN, false).level(), 1.0);
    }

    #[test]
    fn ignores_nan_level() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::new(0.4, false);
        assert!(!vol.set_level(f64::NAN, &mut media));
        assert_eq!(vol.level(), 0.4);
        assert!(media.commands.is_empty());
    }

    #[test]
    fn zero_level_mutes_and_raising_unmutes() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::default();

        vol.set_level(0.0, &mut media);
        assert!(vol.is_muted());

        vol.set_level(0.5, &mut media);
        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.5);
        assert_eq!(
            media.commands,
            vec![
                MediaCommand::SetVolume(0.0),
                MediaCommand::SetMuted(true),
                MediaCommand::SetVolume(0.5),
                MediaCommand::SetMuted(false),
            ]
        );
    }

    #[test]
    fn explicit_mute_survives_level_changes() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::new(0.6, false);

        vol.toggle_mute(&mut media);
        vol.set_level(0.3, &mut media);
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.3);
    }

    #[test]
    fn toggle_mute_preserves_level() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::new(0.7, false);

        vol.toggle_mute(&mut media);
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.7);

        vol.toggle_mute(&mut media);
        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.7);
    }

    #[test]
    fn icon_reflects_level_and_mute() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::new(0.8, false);
        assert_eq!(vol.icon(), VolumeIcon::High);

        vol.set_level(0.3, &mut media);
        assert_eq!(vol.icon(), VolumeIcon::Low);

        vol.toggle_mute(&mut media);
        assert_eq!(vol.icon(), VolumeIcon::Muted);

        vol.toggle_mute(&mut media);
        vol.set_level(0.0, &mut media);
        assert_eq!(vol.icon(), VolumeIcon::Muted);
    }

    #[test]
    fn step_moves_level() {
        let mut media = FakeMedia::default();
        let mut vol = VolumeManager::new(0.5, false);
        vol.step(0.1, &mut media);
        assert!((vol.level() - 0.6).abs() < 1e-9);
        vol.step(-1.0, &mut media);
        assert_eq!(vol.level(), 0.0);
        assert!(vol.is_muted());
    }

    #[test]
    fn sync_pushes_both_values() {
        let mut media = FakeMedia::default();
        VolumeManager::new(0.25, true).sync(&mut media);
        assert_eq!(
            media.commands,
            vec![MediaCommand::SetVolume(0.25), MediaCommand::SetMuted(true)]
        );
    }
}
