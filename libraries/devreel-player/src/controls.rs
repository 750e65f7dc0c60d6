//! Controls visibility
//!
//! Controls show on any pointer activity and hide after the idle delay, but
//! only while playing and not hovered. One idle timer is pending at most;
//! a fired id that is no longer the pending one is ignored.

use crate::host::{TimerHost, TimerId};
use crate::types::PlaybackState;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    visible: bool,
    hovered: bool,
    pending: Option<TimerId>,
    last_activity: Option<Instant>,
    hide_delay: Duration,
}

impl ControlsVisibility {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            visible: true,
            hovered: false,
            pending: None,
            last_activity: None,
            hide_delay,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// When the pointer last moved over the player
    ///
    /// Kept as part of the visibility record for hosts; hiding is driven by
    /// the idle timer alone and never reads it.
    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    /// Pointer moved over the player. Returns true if visibility changed.
    pub fn pointer_moved(&mut self, timers: &mut dyn TimerHost) -> bool {
        self.last_activity = Some(Instant::now());
        let changed = self.show();
        self.restart_timer(timers);
        changed
    }

    /// Pointer entered or left the controls bar
    pub fn set_hovered(&mut self, hovered: bool, timers: &mut dyn TimerHost) -> bool {
        self.hovered = hovered;
        if hovered {
            self.cancel_timer(timers);
            self.show()
        } else {
            self.restart_timer(timers);
            false
        }
    }

    /// Playback state moved
    ///
    /// Anything but `Playing` pins the controls visible. Entering `Playing`
    /// arms the idle timer if none is pending.
    pub fn playback_changed(&mut self, state: PlaybackState, timers: &mut dyn TimerHost) -> bool {
        if state.is_playing() {
            if self.pending.is_none() && !self.hovered {
                self.restart_timer(timers);
            }
            false
        } else {
            self.cancel_timer(timers);
            self.show()
        }
    }

    /// Idle timer fired. Returns true if the controls were hidden.
    pub fn timer_fired(&mut self, id: TimerId, state: PlaybackState) -> bool {
        if self.pending != Some(id) {
            trace!(%id, "Ignoring stale idle timer");
            return false;
        }
        self.pending = None;

        if state.is_playing() && !self.hovered && self.visible {
            self.visible = false;
            trace!("Controls hidden after idle delay");
            return true;
        }
        false
    }

    /// Cancel the pending timer. Called on unmount.
    pub fn teardown(&mut self, timers: &mut dyn TimerHost) {
        self.cancel_timer(timers);
    }

    fn show(&mut self) -> bool {
        let changed = !self.visible;
        self.visible = true;
        changed
    }

    fn restart_timer(&mut self, timers: &mut dyn TimerHost) {
        self.cancel_timer(timers);
        self.pending = Some(timers.schedule(self.hide_delay));
    }

    fn cancel_timer(&mut self, timers: &mut dyn TimerHost) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTimers;

    const DELAY: Duration = Duration::from_millis(3000);

    fn playing_controls(timers: &mut FakeTimers) -> ControlsVisibility {
        let mut controls = ControlsVisibility::new(DELAY);
        controls.playback_changed(PlaybackState::Playing, timers);
        controls
    }

    #[test]
    fn starts_visible() {
        let controls = ControlsVisibility::new(DELAY);
        assert!(controls.is_visible());
        assert!(controls.pending_timer().is_none());
    }

    #[test]
    fn hides_after_idle_while_playing() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        let id = controls.pending_timer().unwrap();

        assert_eq!(timers.scheduled, vec![(id, DELAY)]);
        assert!(controls.timer_fired(id, PlaybackState::Playing));
        assert!(!controls.is_visible());
    }

    #[test]
    fn pointer_movement_replaces_pending_timer() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        let first = controls.pending_timer().unwrap();

        controls.pointer_moved(&mut timers);
        let second = controls.pending_timer().unwrap();

        assert_ne!(first, second);
        assert_eq!(timers.live(), vec![second]);
        assert!(controls.last_activity().is_some());

        // Late delivery of the cancelled timer does nothing
        assert!(!controls.timer_fired(first, PlaybackState::Playing));
        assert!(controls.is_visible());
    }

    #[test]
    fn pointer_movement_reveals_hidden_controls() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        let id = controls.pending_timer().unwrap();
        controls.timer_fired(id, PlaybackState::Playing);

        assert!(controls.pointer_moved(&mut timers));
        assert!(controls.is_visible());
    }

    #[test]
    fn hover_keeps_controls_visible() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        let id = controls.pending_timer().unwrap();

        controls.set_hovered(true, &mut timers);
        assert!(timers.cancelled.contains(&id));
        assert!(!controls.timer_fired(id, PlaybackState::Playing));
        assert!(controls.is_visible());

        controls.set_hovered(false, &mut timers);
        let rearmed = controls.pending_timer().unwrap();
        assert!(controls.timer_fired(rearmed, PlaybackState::Playing));
    }

    #[test]
    fn paused_forces_visible_and_cancels_timer() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        let id = controls.pending_timer().unwrap();
        controls.timer_fired(id, PlaybackState::Playing);
        assert!(!controls.is_visible());

        assert!(controls.playback_changed(PlaybackState::Paused, &mut timers));
        assert!(controls.is_visible());
        assert!(controls.pending_timer().is_none());

        controls.playback_changed(PlaybackState::Playing, &mut timers);
        let rearmed = controls.pending_timer().unwrap();
        controls.playback_changed(PlaybackState::Loading, &mut timers);
        assert!(timers.cancelled.contains(&rearmed));
    }

    #[test]
    fn expiry_while_not_playing_keeps_controls() {
        let mut timers = FakeTimers::default();
        let mut controls = ControlsVisibility::new(DELAY);
        controls.pointer_moved(&mut timers);
        let id = controls.pending_timer().unwrap();

        assert!(!controls.timer_fired(id, PlaybackState::Buffering));
        assert!(controls.is_visible());
    }

    #[test]
    fn teardown_cancels_pending_timer() {
        let mut timers = FakeTimers::default();
        let mut controls = playing_controls(&mut timers);
        controls.teardown(&mut timers);
        assert!(timers.live().is_empty());
        assert!(controls.pending_timer().is_none());
    }
}
