//! Settings panel: speed and quality menus
//!
//! The outside-click listener lives exactly as long as the panel is open.

use crate::host::{DocumentHost, ListenerId, MediaResource, QualitySelector, Subscription};
use crate::types::PlaybackSpeed;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct SettingsPanel {
    open: bool,
    speed: PlaybackSpeed,
    quality: String,
    qualities: Vec<String>,
    outside_listener: Option<Subscription>,
}

impl SettingsPanel {
    pub fn new(speed: PlaybackSpeed, qualities: Vec<String>, quality: String) -> Self {
        Self {
            open: false,
            speed,
            quality,
            qualities,
            outside_listener: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    pub fn qualities(&self) -> &[String] {
        &self.qualities
    }

    /// Whether an outside-click listener is currently attached
    pub fn has_outside_listener(&self) -> bool {
        self.outside_listener.is_some()
    }

    /// Open or close. Returns the new open state.
    ///
    /// If the document refuses a listener the panel still opens; only an
    /// explicit toggle will close it then.
    pub fn toggle(&mut self, document: &mut dyn DocumentHost) -> bool {
        if self.open {
            self.close();
            return false;
        }

        match document.listen_pointer_down() {
            Ok(subscription) => self.outside_listener = Some(subscription),
            Err(e) => warn!(error = %e, "Could not attach outside-click listener"),
        }
        self.open = true;
        debug!("Settings panel opened");
        true
    }

    /// Close and detach the outside-click listener. Returns true if it was open.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.outside_listener = None;
        debug!("Settings panel closed");
        true
    }

    /// Document pointer-down from listener `listener`
    ///
    /// Closes on a press outside the panel. Presses routed from a listener
    /// that is no longer attached are ignored.
    pub fn outside_pointer_down(&mut self, listener: ListenerId, inside_panel: bool) -> bool {
        match &self.outside_listener {
            Some(subscription) if subscription.id() == listener => {}
            _ => {
                debug!(%listener, "Ignoring press from detached listener");
                return false;
            }
        }

        if inside_panel {
            return false;
        }
        self.close()
    }

    /// Select a playback speed by multiplier; unsupported values are rejected
    pub fn set_speed(
        &mut self,
        multiplier: f64,
        media: &mut dyn MediaResource,
    ) -> Option<PlaybackSpeed> {
        let Some(speed) = PlaybackSpeed::from_multiplier(multiplier) else {
            debug!(multiplier, "Rejecting unsupported playback speed");
            return None;
        };

        media.set_playback_rate(speed.multiplier());
        self.speed = speed;
        debug!(%speed, "Playback speed changed");
        Some(speed)
    }

    /// Select a quality label from the offered list
    ///
    /// The selector is told about the choice; a selector failure is logged
    /// and the label is kept.
    pub fn set_quality(&mut self, label: &str, selector: &mut dyn QualitySelector) -> bool {
        if !self.qualities.iter().any(|q| q == label) {
            debug!(quality = label, "Rejecting unknown quality label");
            return false;
        }

        self.quality = label.to_string();
        if let Err(e) = selector.select(label) {
            warn!(quality = label, error = %e, "Quality selector failed");
        }
        true
    }

    /// Drop any listener. Called on unmount.
    pub fn teardown(&mut self) {
        self.close();
    }
}
