//! WASM bindings for devreel-player
//!
//! Exposes [`WasmVideoPlayer`] to the browser. The JS side supplies three
//! plain objects wrapping the `<video>` element, `setTimeout`, and
//! `document`; see [`host`] for the methods each must provide.

pub mod host;
pub mod player;

pub use player::WasmVideoPlayer;
