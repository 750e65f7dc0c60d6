//! Recording host fakes shared by the integration tests
//!
//! All fakes write into one `HostLog` so a test can inspect what the player
//! did to its hosts after handing them over.

#![allow(dead_code)]

use devreel_player::{
    ContainerRef, DocumentHost, ListenerId, MediaResource, MediaSourceRef, PlayerConfig,
    PlayerError, PlayerHosts, PlayerProps, Result, Subscription, TimerHost, TimerId, VideoPlayer,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(MediaSourceRef, Option<String>),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    SetMuted(bool),
    SetPlaybackRate(f64),
}

#[derive(Debug, Default)]
pub struct HostLog {
    pub commands: Vec<Command>,

    /// Currently attached listeners
    pub media_listeners: usize,
    pub document_listeners: usize,

    /// Total document listeners ever attached
    pub document_attaches: usize,

    pub scheduled: Vec<(TimerId, Duration)>,
    pub cancelled: Vec<TimerId>,
    pub fired: Vec<TimerId>,

    pub fullscreen: bool,
    pub fullscreen_supported: bool,
    pub reject_play: bool,
    pub fail_load: bool,
}

impl HostLog {
    /// Timers scheduled and neither cancelled nor fired
    pub fn live_timers(&self) -> Vec<TimerId> {
        self.scheduled
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.cancelled.contains(id) && !self.fired.contains(id))
            .collect()
    }

    pub fn last_command(&self) -> Option<&Command> {
        self.commands.last()
    }
}

pub type Log = Rc<RefCell<HostLog>>;

pub struct RecordingMedia {
    log: Log,
}

impl MediaResource for RecordingMedia {
    fn load(&mut self, source: &MediaSourceRef, poster: Option<&str>) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if log.fail_load {
            return Err(PlayerError::Media("unsupported codec".to_string()));
        }
        log.commands
            .push(Command::Load(source.clone(), poster.map(String::from)));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.commands.push(Command::Play);
        if log.reject_play {
            return Err(PlayerError::PlayRejected("NotAllowedError".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().commands.push(Command::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.log
            .borrow_mut()
            .commands
            .push(Command::SetCurrentTime(seconds));
    }

    fn set_volume(&mut self, level: f64) {
        self.log.borrow_mut().commands.push(Command::SetVolume(level));
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().commands.push(Command::SetMuted(muted));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.log
            .borrow_mut()
            .commands
            .push(Command::SetPlaybackRate(rate));
    }

    fn subscribe(&mut self) -> Result<Subscription> {
        self.log.borrow_mut().media_listeners += 1;
        let log = self.log.clone();
        Ok(Subscription::new(ListenerId(0), move || {
            log.borrow_mut().media_listeners -= 1;
        }))
    }
}

pub struct RecordingTimers {
    log: Log,
    next_id: u64,
}

impl TimerHost for RecordingTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.log.borrow_mut().scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.log.borrow_mut().cancelled.push(id);
    }
}

pub struct RecordingDocument {
    log: Log,
    next_id: u64,
}

impl DocumentHost for RecordingDocument {
    fn listen_pointer_down(&mut self) -> Result<Subscription> {
        self.next_id += 1;
        {
            let mut log = self.log.borrow_mut();
            log.document_listeners += 1;
            log.document_attaches += 1;
        }
        let log = self.log.clone();
        Ok(Subscription::new(ListenerId(self.next_id), move || {
            log.borrow_mut().document_listeners -= 1;
        }))
    }

    fn fullscreen_active(&self) -> bool {
        self.log.borrow().fullscreen
    }

    fn request_fullscreen(&mut self, _container: &ContainerRef) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if !log.fullscreen_supported {
            return Err(PlayerError::FullscreenUnavailable);
        }
        log.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.log.borrow_mut().fullscreen = false;
        Ok(())
    }
}

pub fn hosts(log: &Log) -> PlayerHosts {
    PlayerHosts::new(
        Box::new(RecordingMedia { log: log.clone() }),
        Box::new(RecordingTimers {
            log: log.clone(),
            next_id: 0,
        }),
        Box::new(RecordingDocument {
            log: log.clone(),
            next_id: 0,
        }),
    )
}

pub fn mount_with(props: PlayerProps, config: PlayerConfig, log: &Log) -> VideoPlayer {
    VideoPlayer::mount(props, config, hosts(log)).expect("mount failed")
}

/// Mount `clip.mp4` with default config and an optional caller duration
pub fn mount(duration: Option<f64>) -> (VideoPlayer, Log) {
    let log = Log::default();
    let mut props = PlayerProps::from_url("clip.mp4");
    props.duration = duration;
    let player = mount_with(props, PlayerConfig::default(), &log);
    (player, log)
}

/// Fire the single live idle timer, recording it as fired
pub fn fire_live_timer(player: &mut VideoPlayer, log: &Log) -> TimerId {
    let live = log.borrow().live_timers();
    assert_eq!(live.len(), 1, "expected exactly one live timer, got {:?}", live);
    let id = live[0];
    log.borrow_mut().fired.push(id);
    player.handle_timer(id);
    id
}
