//! Devreel player simulator
//!
//! Mounts a [`devreel_player::VideoPlayer`] on a simulated media element
//! and replays scripted sessions against it, for reproducing control-bar
//! behavior without a browser.

pub mod config;
pub mod media;
pub mod script;
pub mod session;

pub use config::{MediaSettings, SimConfig};
pub use script::{Script, ScriptStep};
pub use session::{run_session, SessionReport};
