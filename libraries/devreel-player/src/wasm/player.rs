//! WASM-compatible VideoPlayer wrapper

use super::host::{describe, JsDocument, JsMediaResource, JsQualitySelector, JsTimers};
use crate::config::PlayerConfig;
use crate::events::{Key, MediaEvent};
use crate::fullscreen::FullscreenOutcome;
use crate::host::{ListenerId, TimerId};
use crate::player::{PlayerHosts, VideoPlayer};
use crate::types::{ContainerRef, MediaSourceRef, PlayerProps};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible video player
///
/// Wraps [`VideoPlayer`] with a JavaScript-friendly API. Every mutating call
/// notifies the `onViewChange` and `onEvent` callbacks.
#[wasm_bindgen]
pub struct WasmVideoPlayer {
    inner: VideoPlayer,

    // Event callbacks
    on_view_change: Option<Function>,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmVideoPlayer {
    /// Mount a player
    ///
    /// `config` may be `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_url: String,
        poster: Option<String>,
        duration: Option<f64>,
        config: JsValue,
        media: JsValue,
        timers: JsValue,
        document: JsValue,
        container_id: Option<String>,
    ) -> Result<WasmVideoPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let props = PlayerProps {
            source: MediaSourceRef::Url(source_url),
            poster,
            duration,
        };

        let mut hosts = PlayerHosts::new(
            Box::new(JsMediaResource::new(media)),
            Box::new(JsTimers::new(timers)),
            Box::new(JsDocument::new(document)),
        );
        if let Some(id) = container_id {
            hosts = hosts.with_container(ContainerRef::new(id));
        }

        let inner = VideoPlayer::mount(props, config, hosts)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_view_change: None,
            on_event: None,
        })
    }

    // ===== Host Inputs =====

    /// Forward a DOM media event; `value` is duration or currentTime
    #[wasm_bindgen(js_name = handleMediaEvent)]
    pub fn handle_media_event(&mut self, name: &str, value: f64) -> bool {
        let Some(event) = MediaEvent::from_dom(name, value) else {
            return false;
        };
        self.inner.handle_media_event(&event);
        self.flush();
        true
    }

    /// Report a rejected `play()` promise
    #[wasm_bindgen(js_name = handlePlayRejected)]
    pub fn handle_play_rejected(&mut self, reason: JsValue) {
        let event = MediaEvent::PlayRejected {
            reason: describe(&reason),
        };
        self.inner.handle_media_event(&event);
        self.flush();
    }

    #[wasm_bindgen(js_name = handleTimer)]
    pub fn handle_timer(&mut self, id: u32) {
        self.inner.handle_timer(TimerId(u64::from(id)));
        self.flush();
    }

    #[wasm_bindgen(js_name = handleDocumentPointerDown)]
    pub fn handle_document_pointer_down(&mut self, listener: u32, inside_panel: bool) {
        self.inner
            .handle_document_pointer_down(ListenerId(u64::from(listener)), inside_panel);
        self.flush();
    }

    /// Returns true if `key` is a player shortcut
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(key) = Key::from_dom(key) else {
            return false;
        };
        self.inner.handle_key(key);
        self.flush();
        true
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self) {
        self.inner.pointer_moved();
        self.flush();
    }

    #[wasm_bindgen(js_name = setControlsHovered)]
    pub fn set_controls_hovered(&mut self, hovered: bool) {
        self.inner.set_controls_hovered(hovered);
        self.flush();
    }

    // ===== User Intents =====

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        self.inner.toggle_play_pause();
        self.flush();
    }

    pub fn seek(&mut self, seconds: f64) {
        self.inner.seek(seconds);
        self.flush();
    }

    /// Seek by progress-bar position (0-100)
    #[wasm_bindgen(js_name = seekPercent)]
    pub fn seek_percent(&mut self, percent: f64) {
        self.inner.seek_percent(percent);
        self.flush();
    }

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f64) {
        self.inner.set_volume(level);
        self.flush();
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush();
    }

    #[wasm_bindgen(js_name = toggleSettings)]
    pub fn toggle_settings(&mut self) {
        self.inner.toggle_settings();
        self.flush();
    }

    #[wasm_bindgen(js_name = closeSettings)]
    pub fn close_settings(&mut self) {
        self.inner.close_settings();
        self.flush();
    }

    /// Returns false for unsupported speeds
    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&mut self, multiplier: f64) -> bool {
        let applied = self.inner.set_speed(multiplier).is_some();
        self.flush();
        applied
    }

    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&mut self, label: &str) -> bool {
        let applied = self.inner.set_quality(label);
        self.flush();
        applied
    }

    /// Set the quality callback, called with the chosen label
    #[wasm_bindgen(js_name = onQualitySelect)]
    pub fn on_quality_select(&mut self, callback: Function) {
        self.inner
            .replace_quality_selector(Box::new(JsQualitySelector::new(callback)));
    }

    /// Returns "entered" | "exited" | "unavailable" | "rejected"
    #[wasm_bindgen(js_name = toggleFullscreen)]
    pub fn toggle_fullscreen(&mut self) -> String {
        let outcome = self.inner.toggle_fullscreen();
        self.flush();
        match outcome {
            FullscreenOutcome::Entered => "entered".to_string(),
            FullscreenOutcome::Exited => "exited".to_string(),
            FullscreenOutcome::Unavailable => "unavailable".to_string(),
            FullscreenOutcome::Rejected => "rejected".to_string(),
        }
    }

    // ===== Lifecycle =====

    pub fn unmount(&mut self) {
        self.inner.unmount();
        self.notify_view();
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    // ===== State Queries =====

    /// Current render snapshot
    #[wasm_bindgen(js_name = getView)]
    pub fn get_view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.view()).unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    #[wasm_bindgen(js_name = onViewChange)]
    pub fn on_view_change(&mut self, callback: Function) {
        self.on_view_change = Some(callback);
    }

    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush(&mut self) {
        let events = self.inner.drain_events();
        if let Some(ref cb) = self.on_event {
            for event in &events {
                if let Ok(js_event) = serde_wasm_bindgen::to_value(event) {
                    cb.call1(&JsValue::NULL, &js_event).ok();
                }
            }
        }
        self.notify_view();
    }

    fn notify_view(&self) {
        if let Some(ref cb) = self.on_view_change {
            cb.call1(&JsValue::NULL, &self.get_view()).ok();
        }
    }
}
