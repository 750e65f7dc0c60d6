//! Devreel - Video Player
//!
//! Platform-agnostic video player state for the Devreel web client.
//!
//! This crate provides:
//! - Play/pause reconciliation against media resource events
//! - Progress tracking with `M:SS` time labels
//! - Auto-hiding controls (3 s idle while playing)
//! - Volume with mute tracking
//! - Settings panel (playback speed, quality)
//! - Fullscreen toggle
//! - Deterministic teardown on unmount
//!
//! # Architecture
//!
//! `devreel-player` never touches a DOM or a clock:
//! - Media element, timers and document are host traits ([`host`])
//! - The browser binding lives behind the `wasm` feature
//! - [`driver`] runs a player on tokio for native hosts and tests
//!
//! All inputs are processed one at a time on a single task, so no locking
//! is involved.
//!
//! # Example: Formatting
//!
//! ```rust
//! use devreel_player::{format_time, progress_percentage, PlaybackSpeed};
//!
//! assert_eq!(format_time(Some(65.0)), "1:05");
//! assert_eq!(format_time(None), "00:00");
//! assert_eq!(progress_percentage(60.0, Some(120.0)), 50.0);
//! assert_eq!(PlaybackSpeed::from_multiplier(1.5), Some(PlaybackSpeed::OneAndHalf));
//! assert_eq!(PlaybackSpeed::from_multiplier(3.0), None);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use devreel_player::{
//!     MediaEvent, PlayerConfig, PlayerHosts, PlayerProps, VideoPlayer,
//!     MediaResource, TimerHost, DocumentHost,
//! };
//!
//! fn mount(
//!     media: Box<dyn MediaResource>,
//!     timers: Box<dyn TimerHost>,
//!     document: Box<dyn DocumentHost>,
//! ) -> devreel_player::Result<()> {
//!     let props = PlayerProps::from_url("https://cdn.devreel.dev/v/42.mp4").with_duration(120.0);
//!     let mut player = VideoPlayer::mount(
//!         props,
//!         PlayerConfig::default(),
//!         PlayerHosts::new(media, timers, document),
//!     )?;
//!
//!     player.toggle_play_pause();
//!     player.handle_media_event(&MediaEvent::Playing);
//!     player.handle_media_event(&MediaEvent::TimeUpdate { current_time: 60.0 });
//!     assert_eq!(player.view().time_label, "1:00 / 2:00");
//!
//!     player.unmount();
//!     Ok(())
//! }
//! ```

mod config;
pub mod controller;
pub mod controls;
#[cfg(not(target_arch = "wasm32"))]
pub mod driver;
mod error;
mod events;
pub mod fullscreen;
pub mod host;
mod player;
pub mod progress;
pub mod settings;
pub mod types;
mod view;
pub mod volume;

#[cfg(test)]
mod testing;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::PlayerConfig;
pub use controller::{clamp_seek, PlayIntent, PlaybackCommand, PlaybackController};
pub use controls::ControlsVisibility;
pub use error::{PlayerError, Result};
pub use events::{Key, MediaEvent, PlayerEvent, PlayerInput};
pub use fullscreen::{toggle_fullscreen, FullscreenOutcome};
pub use host::{
    DocumentHost, ListenerId, MediaResource, NoopQualitySelector, QualitySelector, Subscription,
    TimerHost, TimerId,
};
pub use player::{PlayerHosts, VideoPlayer};
pub use progress::{format_time, progress_percentage, ProgressTracker};
pub use settings::SettingsPanel;
pub use types::{
    ContainerRef, MediaSourceRef, PlaybackSpeed, PlaybackState, PlayerProps, TimePosition,
};
pub use view::PlayerView;
pub use volume::{VolumeIcon, VolumeManager};
