//! Simulated media element and document
//!
//! `SimulatedMedia` answers player commands by pushing the media events a
//! browser would fire back through the driver handle. Time only advances
//! when [`tick`] runs alongside the driver.

use crate::config::MediaSettings;
use devreel_player::driver::PlayerHandle;
use devreel_player::{
    ContainerRef, DocumentHost, ListenerId, MediaEvent, MediaResource, MediaSourceRef,
    PlayerError, PlayerInput, Subscription,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

/// Playhead of the simulated element
#[derive(Debug, Clone, PartialEq)]
pub struct MediaClock {
    pub current_time: f64,
    pub rate: f64,
    pub playing: bool,
    pub subscribed: bool,

    /// Real clip length; playback ends here
    pub length: Option<f64>,
}

impl MediaClock {
    pub fn new(length: Option<f64>) -> Self {
        Self {
            current_time: 0.0,
            rate: 1.0,
            playing: false,
            subscribed: false,
            length: length.filter(|secs| secs.is_finite() && *secs > 0.0),
        }
    }

    /// Advance the playhead by `elapsed` wall time
    ///
    /// Returns the events a browser would fire for the step.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<MediaEvent> {
        if !self.playing {
            return Vec::new();
        }

        self.current_time += elapsed.as_secs_f64() * self.rate;

        match self.length {
            Some(length) if self.current_time >= length => {
                self.current_time = length;
                self.playing = false;
                vec![
                    MediaEvent::TimeUpdate {
                        current_time: length,
                    },
                    MediaEvent::Ended,
                ]
            }
            _ => vec![MediaEvent::TimeUpdate {
                current_time: self.current_time,
            }],
        }
    }

    fn at_end(&self) -> bool {
        self.length.is_some_and(|length| self.current_time >= length)
    }
}

pub type SharedClock = Rc<RefCell<MediaClock>>;

/// [`MediaResource`] that loops its commands back as media events
pub struct SimulatedMedia {
    handle: PlayerHandle,
    clock: SharedClock,
    settings: MediaSettings,
}

impl SimulatedMedia {
    pub fn new(handle: PlayerHandle, clock: SharedClock, settings: MediaSettings) -> Self {
        Self {
            handle,
            clock,
            settings,
        }
    }

    fn fire(&self, event: MediaEvent) {
        if !self.clock.borrow().subscribed {
            trace!(event = event.name(), "No subscriber, event dropped");
            return;
        }
        // The driver may already have stopped
        self.handle.send(PlayerInput::Media(event)).ok();
    }
}

impl MediaResource for SimulatedMedia {
    fn load(&mut self, source: &MediaSourceRef, poster: Option<&str>) -> devreel_player::Result<()> {
        debug!(%source, ?poster, "Simulated load");

        let length = {
            let mut clock = self.clock.borrow_mut();
            clock.current_time = 0.0;
            clock.playing = false;
            clock.length
        };

        self.fire(MediaEvent::LoadStart);
        if let (true, Some(duration)) = (self.settings.report_duration, length) {
            self.fire(MediaEvent::LoadedMetadata { duration });
        }
        self.fire(MediaEvent::CanPlay);
        Ok(())
    }

    fn play(&mut self) -> devreel_player::Result<()> {
        if self.settings.autoplay_blocked {
            debug!("Simulated autoplay block");
            self.fire(MediaEvent::PlayRejected {
                reason: "NotAllowedError: play() requires a user gesture".to_string(),
            });
            return Ok(());
        }

        {
            let mut clock = self.clock.borrow_mut();
            if clock.at_end() {
                clock.current_time = 0.0;
            }
            clock.playing = true;
        }

        self.fire(MediaEvent::Play);
        self.fire(MediaEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        let was_playing = std::mem::replace(&mut self.clock.borrow_mut().playing, false);
        if was_playing {
            self.fire(MediaEvent::Pause);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.clock.borrow_mut().current_time = seconds;
        self.fire(MediaEvent::Seeked {
            current_time: seconds,
        });
    }

    fn set_volume(&mut self, level: f64) {
        trace!(level, "Simulated volume");
    }

    fn set_muted(&mut self, muted: bool) {
        trace!(muted, "Simulated mute");
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.clock.borrow_mut().rate = rate;
    }

    fn subscribe(&mut self) -> devreel_player::Result<Subscription> {
        let clock = Rc::clone(&self.clock);
        clock.borrow_mut().subscribed = true;

        Ok(Subscription::new(ListenerId(0), move || {
            clock.borrow_mut().subscribed = false;
        }))
    }
}

/// Drive the playhead until the driver stops
pub async fn tick(clock: SharedClock, handle: PlayerHandle, every: Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    while !handle.is_closed() {
        interval.tick().await;

        let events = {
            let mut clock = clock.borrow_mut();
            if clock.subscribed {
                clock.advance(every)
            } else {
                Vec::new()
            }
        };
        for event in events {
            handle.send(PlayerInput::Media(event)).ok();
        }
    }
}

/// Document with no real DOM behind it
///
/// Listener ids count up from 1, so scripts can address the settings
/// panel's outside-press listener.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    next_listener: u64,
    fullscreen: bool,
}

impl DocumentHost for HeadlessDocument {
    fn listen_pointer_down(&mut self) -> devreel_player::Result<Subscription> {
        self.next_listener += 1;
        Ok(Subscription::detached(ListenerId(self.next_listener)))
    }

    fn fullscreen_active(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self, container: &ContainerRef) -> devreel_player::Result<()> {
        if container.as_str().is_empty() {
            return Err(PlayerError::FullscreenRejected(
                "container has no id".to_string(),
            ));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> devreel_player::Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}
