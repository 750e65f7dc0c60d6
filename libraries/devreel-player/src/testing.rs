//! Recording host fakes for unit tests

use crate::error::{PlayerError, Result};
use crate::host::{DocumentHost, ListenerId, MediaResource, Subscription, TimerHost, TimerId};
use crate::types::{ContainerRef, MediaSourceRef};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Load(MediaSourceRef),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    SetMuted(bool),
    SetPlaybackRate(f64),
}

#[derive(Default)]
pub struct FakeMedia {
    pub commands: Vec<MediaCommand>,
    pub reject_play: bool,
}

impl MediaResource for FakeMedia {
    fn load(&mut self, source: &MediaSourceRef, _poster: Option<&str>) -> Result<()> {
        self.commands.push(MediaCommand::Load(source.clone()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(MediaCommand::Play);
        if self.reject_play {
            return Err(PlayerError::PlayRejected("NotAllowedError".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(MediaCommand::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push(MediaCommand::SetCurrentTime(seconds));
    }

    fn set_volume(&mut self, level: f64) {
        self.commands.push(MediaCommand::SetVolume(level));
    }

    fn set_muted(&mut self, muted: bool) {
        self.commands.push(MediaCommand::SetMuted(muted));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.commands.push(MediaCommand::SetPlaybackRate(rate));
    }

    fn subscribe(&mut self) -> Result<Subscription> {
        Ok(Subscription::detached(ListenerId(0)))
    }
}

#[derive(Default)]
pub struct FakeTimers {
    next_id: u64,
    pub scheduled: Vec<(TimerId, Duration)>,
    pub cancelled: Vec<TimerId>,
}

impl FakeTimers {
    /// Scheduled and neither cancelled nor fired
    pub fn live(&self) -> Vec<TimerId> {
        self.scheduled
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.cancelled.contains(id))
            .collect()
    }
}

impl TimerHost for FakeTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.cancelled.push(id);
    }
}

#[derive(Default)]
pub struct FakeDocument {
    pub(crate) next_id: u64,
    pub attached: Rc<Cell<usize>>,
    pub fullscreen: bool,
    pub fullscreen_supported: bool,
    pub listen_fails: bool,
}

impl FakeDocument {
    pub fn with_fullscreen() -> Self {
        Self {
            fullscreen_supported: true,
            ..Self::default()
        }
    }
}

impl DocumentHost for FakeDocument {
    fn listen_pointer_down(&mut self) -> Result<Subscription> {
        if self.listen_fails {
            return Err(PlayerError::Host("document unavailable".to_string()));
        }
        self.next_id += 1;
        self.attached.set(self.attached.get() + 1);
        let attached = self.attached.clone();
        Ok(Subscription::new(ListenerId(self.next_id), move || {
            attached.set(attached.get() - 1);
        }))
    }

    fn fullscreen_active(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self, _container: &ContainerRef) -> Result<()> {
        if !self.fullscreen_supported {
            return Err(PlayerError::FullscreenUnavailable);
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}
