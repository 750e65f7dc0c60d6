//! Playback controller
//!
//! Tracks the user's intent separately from the reported state. Toggling
//! flips the intent and issues a command; only media events move the state
//! out of the optimistic `Loading`, so a fast double toggle can never leave
//! the UI showing `Playing` while the resource is paused.

use crate::events::MediaEvent;
use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// What the user last asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayIntent {
    Play,
    #[default]
    Pause,
}

/// Command the caller must issue on the media resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    intent: PlayIntent,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn intent(&self) -> PlayIntent {
        self.intent
    }

    /// Flip the intent and return the command to issue
    ///
    /// From `Idle` or `Paused` the state becomes `Loading` until the resource
    /// confirms. Pausing leaves the state alone until the `Pause` event.
    pub fn toggle(&mut self) -> PlaybackCommand {
        match self.intent {
            PlayIntent::Pause => {
                self.intent = PlayIntent::Play;
                if matches!(self.state, PlaybackState::Idle | PlaybackState::Paused) {
                    self.state = PlaybackState::Loading;
                }
                debug!(state = ?self.state, "Play requested");
                PlaybackCommand::Play
            }
            PlayIntent::Play => {
                self.intent = PlayIntent::Pause;
                debug!(state = ?self.state, "Pause requested");
                PlaybackCommand::Pause
            }
        }
    }

    /// The resource refused a play command synchronously
    pub fn play_failed(&mut self, reason: &str) {
        warn!(reason, "Play rejected by media resource");
        self.intent = PlayIntent::Pause;
        self.state = PlaybackState::Paused;
    }

    /// An event that no longer describes the resource
    ///
    /// A rejection settling after the resource confirmed playback belongs to
    /// an earlier, aborted `play()` request.
    pub fn is_stale(&self, event: &MediaEvent) -> bool {
        matches!(event, MediaEvent::PlayRejected { .. })
            && matches!(self.state, PlaybackState::Playing | PlaybackState::Buffering)
    }

    /// Reconcile with a media event. Returns true if the state changed.
    pub fn apply(&mut self, event: &MediaEvent) -> bool {
        if self.is_stale(event) {
            trace!(event = event.name(), state = ?self.state, "Ignoring stale media event");
            return false;
        }

        let before = self.state;

        match event {
            MediaEvent::LoadStart => {
                if self.intent == PlayIntent::Play && self.state != PlaybackState::Buffering {
                    self.state = PlaybackState::Loading;
                }
            }
            MediaEvent::CanPlay => {
                if self.state.is_waiting() {
                    self.state = match self.intent {
                        PlayIntent::Play => PlaybackState::Playing,
                        PlayIntent::Pause => PlaybackState::Paused,
                    };
                }
            }
            MediaEvent::Play => {
                self.intent = PlayIntent::Play;
                if matches!(self.state, PlaybackState::Idle | PlaybackState::Paused) {
                    self.state = PlaybackState::Loading;
                }
            }
            MediaEvent::Playing => {
                self.intent = PlayIntent::Play;
                self.state = PlaybackState::Playing;
            }
            MediaEvent::Waiting => {
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Buffering;
                }
            }
            MediaEvent::Pause | MediaEvent::Ended => {
                self.intent = PlayIntent::Pause;
                self.state = PlaybackState::Paused;
            }
            MediaEvent::PlayRejected { reason } => {
                self.play_failed(reason);
            }
            MediaEvent::Error { message } => {
                warn!(message = %message, "Media resource error");
                self.intent = PlayIntent::Pause;
                self.state = PlaybackState::Paused;
            }
            MediaEvent::LoadedMetadata { .. }
            | MediaEvent::DurationChange { .. }
            | MediaEvent::TimeUpdate { .. }
            | MediaEvent::Seeked { .. } => {}
        }

        if before != self.state {
            debug!(event = event.name(), from = ?before, to = ?self.state, "Playback state changed");
        }
        before != self.state
    }
}

/// Clamp a seek target into `[0, duration]`
///
/// An unknown, non-finite or non-positive duration clamps everything to 0.
/// A NaN target seeks to 0.
pub fn clamp_seek(target: f64, duration: f64) -> f64 {
    let upper = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    };

    if target.is_nan() {
        return 0.0;
    }

    target.clamp(0.0, upper)
}
