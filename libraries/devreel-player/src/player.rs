//! Video player
//!
//! Composes the playback controller, progress tracker, controls visibility,
//! volume, settings and fullscreen over the host seams. All inputs arrive
//! through [`VideoPlayer::dispatch`] or the matching intent methods, one at a
//! time; the player never blocks.

use crate::config::PlayerConfig;
use crate::controller::{clamp_seek, PlaybackCommand, PlaybackController};
use crate::controls::ControlsVisibility;
use crate::error::Result;
use crate::events::{Key, MediaEvent, PlayerEvent, PlayerInput};
use crate::fullscreen::{toggle_fullscreen, FullscreenOutcome};
use crate::host::{
    DocumentHost, ListenerId, MediaResource, NoopQualitySelector, QualitySelector, Subscription,
    TimerHost, TimerId,
};
use crate::progress::ProgressTracker;
use crate::settings::SettingsPanel;
use crate::types::{ContainerRef, PlaybackSpeed, PlaybackState, PlayerProps, TimePosition};
use crate::view::PlayerView;
use crate::volume::VolumeManager;
use tracing::{debug, info, trace, warn};

/// Platform services a player is mounted onto
pub struct PlayerHosts {
    pub media: Box<dyn MediaResource>,
    pub timers: Box<dyn TimerHost>,
    pub document: Box<dyn DocumentHost>,
    pub quality: Box<dyn QualitySelector>,

    /// Element promoted on fullscreen; `None` disables fullscreen
    pub container: Option<ContainerRef>,
}

impl PlayerHosts {
    pub fn new(
        media: Box<dyn MediaResource>,
        timers: Box<dyn TimerHost>,
        document: Box<dyn DocumentHost>,
    ) -> Self {
        Self {
            media,
            timers,
            document,
            quality: Box::new(NoopQualitySelector),
            container: None,
        }
    }

    #[must_use]
    pub fn with_quality_selector(mut self, quality: Box<dyn QualitySelector>) -> Self {
        self.quality = quality;
        self
    }

    #[must_use]
    pub fn with_container(mut self, container: ContainerRef) -> Self {
        self.container = Some(container);
        self
    }
}

/// A mounted video player
pub struct VideoPlayer {
    props: PlayerProps,
    config: PlayerConfig,

    // Hosts
    media: Box<dyn MediaResource>,
    timers: Box<dyn TimerHost>,
    document: Box<dyn DocumentHost>,
    quality: Box<dyn QualitySelector>,
    container: Option<ContainerRef>,

    // Managers
    controller: PlaybackController,
    progress: ProgressTracker,
    controls: ControlsVisibility,
    volume: VolumeManager,
    settings: SettingsPanel,

    media_subscription: Option<Subscription>,
    pending_events: Vec<PlayerEvent>,
    mounted: bool,
}

impl VideoPlayer {
    /// Mount a player: subscribe to the resource, load the source, and push
    /// the initial volume, mute and rate
    pub fn mount(props: PlayerProps, config: PlayerConfig, hosts: PlayerHosts) -> Result<Self> {
        config.validate()?;
        let speed = config.initial_playback_speed()?;

        let PlayerHosts {
            mut media,
            timers,
            document,
            quality,
            container,
        } = hosts;

        let media_subscription = media.subscribe()?;
        media.load(&props.source, props.poster.as_deref())?;

        let volume = VolumeManager::new(config.initial_volume, config.initial_muted);
        volume.sync(media.as_mut());
        media.set_playback_rate(speed.multiplier());

        let progress = ProgressTracker::new(props.duration);
        let controls = ControlsVisibility::new(config.idle_hide_delay());
        let settings = SettingsPanel::new(
            speed,
            config.qualities.clone(),
            config.default_quality.clone(),
        );

        info!(source = %props.source, duration = ?props.duration, "Video player mounted");

        Ok(Self {
            props,
            config,
            media,
            timers,
            document,
            quality,
            container,
            controller: PlaybackController::new(),
            progress,
            controls,
            volume,
            settings,
            media_subscription: Some(media_subscription),
            pending_events: Vec::new(),
            mounted: true,
        })
    }

    /// Tear down: cancel the idle timer and detach every listener
    ///
    /// Idempotent. Inputs after this are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        self.controls.teardown(self.timers.as_mut());
        self.settings.teardown();
        self.media_subscription = None;
        self.pending_events.clear();

        info!(source = %self.props.source, "Video player unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn accepts(&self, operation: &str) -> bool {
        if !self.mounted {
            trace!(operation, "Ignoring input on unmounted player");
        }
        self.mounted
    }

    /// Route one host input
    pub fn dispatch(&mut self, input: PlayerInput) {
        match input {
            PlayerInput::Media(event) => self.handle_media_event(&event),
            PlayerInput::TimerFired(id) => self.handle_timer(id),
            PlayerInput::PointerMove => self.pointer_moved(),
            PlayerInput::ControlsHover(hovered) => self.set_controls_hovered(hovered),
            PlayerInput::DocumentPointerDown {
                listener,
                inside_panel,
            } => self.handle_document_pointer_down(listener, inside_panel),
            PlayerInput::Key(key) => self.handle_key(key),
            PlayerInput::TogglePlayPause => self.toggle_play_pause(),
            PlayerInput::Seek(target) => self.seek(target),
            PlayerInput::SeekPercent(percent) => self.seek_percent(percent),
            PlayerInput::SeekRelative(delta) => self.seek_relative(delta),
            PlayerInput::SetVolume(level) => self.set_volume(level),
            PlayerInput::ToggleMute => self.toggle_mute(),
            PlayerInput::ToggleSettings => self.toggle_settings(),
            PlayerInput::CloseSettings => self.close_settings(),
            PlayerInput::SetSpeed(multiplier) => {
                self.set_speed(multiplier);
            }
            PlayerInput::SetQuality(label) => {
                self.set_quality(&label);
            }
            PlayerInput::ToggleFullscreen => {
                self.toggle_fullscreen();
            }
        }
    }

    // ===== Media Resource =====

    pub fn handle_media_event(&mut self, event: &MediaEvent) {
        if !self.accepts(event.name()) {
            return;
        }
        if self.controller.is_stale(event) {
            trace!(event = event.name(), state = ?self.controller.state(), "Ignoring stale media event");
            return;
        }
        trace!(event = event.name(), "Media event");

        let state_changed = self.controller.apply(event);
        self.progress.apply(event);

        match event {
            MediaEvent::PlayRejected { reason } => self.emit(PlayerEvent::Error {
                message: format!("Play rejected: {}", reason),
            }),
            MediaEvent::Error { message } => self.emit(PlayerEvent::Error {
                message: message.clone(),
            }),
            _ => {}
        }

        if state_changed {
            self.on_state_changed();
        }
    }

    fn on_state_changed(&mut self) {
        let state = self.controller.state();
        self.emit(PlayerEvent::StateChanged { state });
        if self.controls.playback_changed(state, self.timers.as_mut()) {
            self.emit(PlayerEvent::ControlsVisibilityChanged { visible: true });
        }
    }

    // ===== Playback =====

    /// Play if paused, pause if playing
    pub fn toggle_play_pause(&mut self) {
        if !self.accepts("toggle_play_pause") {
            return;
        }

        let before = self.controller.state();
        match self.controller.toggle() {
            PlaybackCommand::Play => {
                if let Err(e) = self.media.play() {
                    let message = e.to_string();
                    self.controller.play_failed(&message);
                    self.emit(PlayerEvent::Error { message });
                }
            }
            PlaybackCommand::Pause => self.media.pause(),
        }

        if self.controller.state() != before {
            self.on_state_changed();
        }
    }

    /// Seek to `target` seconds, clamped into the known duration
    pub fn seek(&mut self, target: f64) {
        if !self.accepts("seek") {
            return;
        }

        let duration = self.progress.effective_duration();
        let position = clamp_seek(target, duration);
        debug!(requested = target, position, duration, "Seeking");
        self.media.set_current_time(position);
    }

    /// Seek to a progress-bar position, 0 to 100
    pub fn seek_percent(&mut self, percent: f64) {
        if !percent.is_finite() {
            debug!(percent, "Ignoring non-finite seek percentage");
            return;
        }
        let target = self.progress.effective_duration() * percent.clamp(0.0, 100.0) / 100.0;
        self.seek(target);
    }

    /// Seek forward (positive) or back (negative) from the current time
    pub fn seek_relative(&mut self, delta: f64) {
        if !delta.is_finite() {
            debug!(delta, "Ignoring non-finite seek offset");
            return;
        }
        self.seek(self.progress.current_time() + delta);
    }

    // ===== Controls Visibility =====

    pub fn pointer_moved(&mut self) {
        if !self.accepts("pointer_moved") {
            return;
        }
        if self.controls.pointer_moved(self.timers.as_mut()) {
            self.emit(PlayerEvent::ControlsVisibilityChanged { visible: true });
        }
    }

    pub fn set_controls_hovered(&mut self, hovered: bool) {
        if !self.accepts("set_controls_hovered") {
            return;
        }
        if self.controls.set_hovered(hovered, self.timers.as_mut()) {
            self.emit(PlayerEvent::ControlsVisibilityChanged { visible: true });
        }
    }

    pub fn handle_timer(&mut self, id: TimerId) {
        if !self.accepts("handle_timer") {
            return;
        }
        if self.controls.timer_fired(id, self.controller.state()) {
            self.emit(PlayerEvent::ControlsVisibilityChanged { visible: false });
        }
    }

    // ===== Volume =====

    pub fn set_volume(&mut self, level: f64) {
        if !self.accepts("set_volume") {
            return;
        }
        if self.volume.set_level(level, self.media.as_mut()) {
            self.emit_volume();
        }
    }

    fn step_volume(&mut self, delta: f64) {
        if self.volume.step(delta, self.media.as_mut()) {
            self.emit_volume();
        }
    }

    pub fn toggle_mute(&mut self) {
        if !self.accepts("toggle_mute") {
            return;
        }
        self.volume.toggle_mute(self.media.as_mut());
        self.emit_volume();
    }

    fn emit_volume(&mut self) {
        self.emit(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    // ===== Settings =====

    pub fn toggle_settings(&mut self) {
        if !self.accepts("toggle_settings") {
            return;
        }
        let open = self.settings.toggle(self.document.as_mut());
        self.emit(PlayerEvent::SettingsToggled { open });
    }

    pub fn close_settings(&mut self) {
        if !self.accepts("close_settings") {
            return;
        }
        if self.settings.close() {
            self.emit(PlayerEvent::SettingsToggled { open: false });
        }
    }

    pub fn handle_document_pointer_down(&mut self, listener: ListenerId, inside_panel: bool) {
        if !self.accepts("handle_document_pointer_down") {
            return;
        }
        if self.settings.outside_pointer_down(listener, inside_panel) {
            self.emit(PlayerEvent::SettingsToggled { open: false });
        }
    }

    /// Returns the applied speed, or `None` if `multiplier` is unsupported
    pub fn set_speed(&mut self, multiplier: f64) -> Option<PlaybackSpeed> {
        if !self.accepts("set_speed") {
            return None;
        }
        let speed = self.settings.set_speed(multiplier, self.media.as_mut())?;
        self.emit(PlayerEvent::SpeedChanged {
            multiplier: speed.multiplier(),
        });
        Some(speed)
    }

    /// Swap the quality selector, e.g. once renditions are known
    pub fn replace_quality_selector(&mut self, quality: Box<dyn QualitySelector>) {
        self.quality = quality;
    }

    pub fn set_quality(&mut self, label: &str) -> bool {
        if !self.accepts("set_quality") {
            return false;
        }
        let applied = self.settings.set_quality(label, self.quality.as_mut());
        if applied {
            self.emit(PlayerEvent::QualityChanged {
                label: label.to_string(),
            });
        }
        applied
    }

    // ===== Fullscreen =====

    pub fn toggle_fullscreen(&mut self) -> FullscreenOutcome {
        if !self.accepts("toggle_fullscreen") {
            return FullscreenOutcome::Unavailable;
        }
        let outcome = toggle_fullscreen(self.document.as_mut(), self.container.as_ref());
        match outcome {
            FullscreenOutcome::Entered => {
                self.emit(PlayerEvent::FullscreenChanged { active: true });
            }
            FullscreenOutcome::Exited => {
                self.emit(PlayerEvent::FullscreenChanged { active: false });
            }
            FullscreenOutcome::Unavailable | FullscreenOutcome::Rejected => {}
        }
        outcome
    }

    // ===== Keyboard =====

    /// Keyboard shortcut. Any key counts as activity for the controls.
    pub fn handle_key(&mut self, key: Key) {
        if !self.accepts("handle_key") {
            return;
        }
        self.pointer_moved();

        let seek_step = self.config.seek_step_secs;
        let volume_step = self.config.volume_step;
        match key {
            Key::Space | Key::K => self.toggle_play_pause(),
            Key::ArrowLeft => self.seek_relative(-seek_step),
            Key::ArrowRight => self.seek_relative(seek_step),
            Key::ArrowUp => self.step_volume(volume_step),
            Key::ArrowDown => self.step_volume(-volume_step),
            Key::M => self.toggle_mute(),
            Key::F => {
                if self.toggle_fullscreen() == FullscreenOutcome::Rejected {
                    warn!("Fullscreen shortcut rejected by host");
                }
            }
            Key::Escape => self.close_settings(),
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn position(&self) -> TimePosition {
        self.progress.position()
    }

    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    pub fn volume(&self) -> &VolumeManager {
        &self.volume
    }

    pub fn settings(&self) -> &SettingsPanel {
        &self.settings
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Render snapshot
    pub fn view(&self) -> PlayerView {
        let speed = self.settings.speed();
        PlayerView {
            mounted: self.mounted,
            state: self.controller.state(),
            buffering: self.progress.is_buffering(),
            current_time: self.progress.current_time(),
            duration: self.progress.duration(),
            progress_percent: self.progress.progress_percent(),
            time_label: self.progress.time_label(),
            controls_visible: self.controls.is_visible(),
            volume_level: self.volume.level(),
            muted: self.volume.is_muted(),
            volume_icon: self.volume.icon(),
            settings_open: self.settings.is_open(),
            speed: speed.multiplier(),
            speed_label: speed.label(),
            quality: self.settings.quality().to_string(),
            qualities: self.settings.qualities().to_vec(),
            fullscreen: self.document.fullscreen_active(),
            poster: self.props.poster.clone(),
        }
    }

    // ===== Events =====

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        self.unmount();
    }
}
