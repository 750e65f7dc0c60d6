//! Host seams backed by JS objects
//!
//! Media object: `load(source, poster)`, `play()`, `pause()`,
//! `setCurrentTime(s)`, `setVolume(v)`, `setMuted(b)`, `setPlaybackRate(r)`,
//! `subscribe() -> id`, `unsubscribe(id)`.
//!
//! Timer object: `schedule(delayMs) -> id`, `cancel(id)`.
//!
//! Document object: `listenPointerDown() -> id`, `removeListener(id)`,
//! `fullscreenActive() -> bool`, `requestFullscreen(containerId)`,
//! `exitFullscreen()`. Missing `requestFullscreen` means unsupported.

use crate::error::{PlayerError, Result};
use crate::host::{
    DocumentHost, ListenerId, MediaResource, QualitySelector, Subscription, TimerHost, TimerId,
};
use crate::types::{ContainerRef, MediaSourceRef};
use js_sys::{Function, Reflect};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> std::result::Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    match args {
        [] => function.call0(target),
        [a] => function.call1(target, a),
        [a, b] => function.call2(target, a, b),
        _ => function.apply(target, &args.iter().collect::<js_sys::Array>()),
    }
}

fn has_method(target: &JsValue, method: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(method))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

pub(crate) fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(error)
                .ok()
                .map(String::from)
        })
        .unwrap_or_else(|| "unknown JS error".to_string())
}

fn listener_id(value: &JsValue) -> Option<ListenerId> {
    value.as_f64().map(|id| ListenerId(id as u64))
}

pub struct JsMediaResource {
    element: JsValue,
}

impl JsMediaResource {
    pub fn new(element: JsValue) -> Self {
        Self { element }
    }

    fn command(&self, method: &str, args: &[JsValue]) {
        if let Err(e) = call(&self.element, method, args) {
            warn!(method, error = %describe(&e), "Media command failed");
        }
    }
}

impl MediaResource for JsMediaResource {
    fn load(&mut self, source: &MediaSourceRef, poster: Option<&str>) -> Result<()> {
        let source = match source {
            MediaSourceRef::Url(url) => JsValue::from_str(url),
            MediaSourceRef::Handle(handle) => JsValue::from_f64(*handle as f64),
        };
        let poster = poster.map_or(JsValue::NULL, JsValue::from_str);

        call(&self.element, "load", &[source, poster])
            .map(|_| ())
            .map_err(|e| PlayerError::Media(describe(&e)))
    }

    fn play(&mut self) -> Result<()> {
        call(&self.element, "play", &[])
            .map(|_| ())
            .map_err(|e| PlayerError::PlayRejected(describe(&e)))
    }

    fn pause(&mut self) {
        self.command("pause", &[]);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.command("setCurrentTime", &[JsValue::from_f64(seconds)]);
    }

    fn set_volume(&mut self, level: f64) {
        self.command("setVolume", &[JsValue::from_f64(level)]);
    }

    fn set_muted(&mut self, muted: bool) {
        self.command("setMuted", &[JsValue::from_bool(muted)]);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.command("setPlaybackRate", &[JsValue::from_f64(rate)]);
    }

    fn subscribe(&mut self) -> Result<Subscription> {
        let id = call(&self.element, "subscribe", &[])
            .map_err(|e| PlayerError::Media(describe(&e)))?;
        let listener = listener_id(&id).unwrap_or(ListenerId(0));

        let element = self.element.clone();
        Ok(Subscription::new(listener, move || {
            call(&element, "unsubscribe", &[id]).ok();
        }))
    }
}

pub struct JsTimers {
    timers: JsValue,
}

impl JsTimers {
    pub fn new(timers: JsValue) -> Self {
        Self { timers }
    }
}

impl TimerHost for JsTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let delay_ms = JsValue::from_f64(delay.as_millis() as f64);
        match call(&self.timers, "schedule", &[delay_ms]) {
            Ok(id) => TimerId(id.as_f64().unwrap_or_default() as u64),
            Err(e) => {
                // Id 0 is never handed out by setTimeout, so it never fires
                warn!(error = %describe(&e), "Timer scheduling failed");
                TimerId(0)
            }
        }
    }

    fn cancel(&mut self, id: TimerId) {
        call(&self.timers, "cancel", &[JsValue::from_f64(id.0 as f64)]).ok();
    }
}

pub struct JsDocument {
    document: JsValue,
}

impl JsDocument {
    pub fn new(document: JsValue) -> Self {
        Self { document }
    }
}

impl DocumentHost for JsDocument {
    fn listen_pointer_down(&mut self) -> Result<Subscription> {
        let id = call(&self.document, "listenPointerDown", &[])
            .map_err(|e| PlayerError::Host(describe(&e)))?;
        let listener = listener_id(&id)
            .ok_or_else(|| PlayerError::Host("listenPointerDown returned no id".to_string()))?;

        let document = self.document.clone();
        Ok(Subscription::new(listener, move || {
            call(&document, "removeListener", &[id]).ok();
        }))
    }

    fn fullscreen_active(&self) -> bool {
        call(&self.document, "fullscreenActive", &[])
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn request_fullscreen(&mut self, container: &ContainerRef) -> Result<()> {
        if !has_method(&self.document, "requestFullscreen") {
            return Err(PlayerError::FullscreenUnavailable);
        }
        call(
            &self.document,
            "requestFullscreen",
            &[JsValue::from_str(container.as_str())],
        )
        .map(|_| ())
        .map_err(|e| PlayerError::FullscreenRejected(describe(&e)))
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        call(&self.document, "exitFullscreen", &[])
            .map(|_| ())
            .map_err(|e| PlayerError::FullscreenRejected(describe(&e)))
    }
}

/// Quality selector calling a JS function with the chosen label
pub struct JsQualitySelector {
    callback: Function,
}

impl JsQualitySelector {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl QualitySelector for JsQualitySelector {
    fn select(&mut self, label: &str) -> Result<()> {
        self.callback
            .call1(&JsValue::NULL, &JsValue::from_str(label))
            .map(|_| ())
            .map_err(|e| PlayerError::Host(describe(&e)))
    }
}
