//! Replay a script against a mounted player

use crate::config::SimConfig;
use crate::media::{tick, HeadlessDocument, MediaClock, SimulatedMedia};
use crate::script::Script;
use devreel_player::driver::{self, PlayerDriver, PlayerHandle};
use devreel_player::{ContainerRef, PlayerEvent, PlayerHosts, PlayerView};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outcome of a replayed session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// View taken after unmount
    pub view: PlayerView,

    /// Every event the player emitted, in order
    pub events: Vec<PlayerEvent>,
}

/// Mount a player on simulated hosts, replay `script`, then unmount
///
/// Must run inside a tokio runtime; the future is not `Send`.
pub async fn run_session(script: &Script, config: &SimConfig) -> anyhow::Result<SessionReport> {
    let (handle, inbox) = driver::channel();
    let clock = Rc::new(RefCell::new(MediaClock::new(script.duration)));
    let media = SimulatedMedia::new(handle.clone(), Rc::clone(&clock), config.media.clone());

    let (sink, mut events) = mpsc::unbounded_channel();
    let driver = PlayerDriver::mount(inbox, script.props(), config.player.clone(), |timers| {
        PlayerHosts::new(Box::new(media), timers, Box::new(HeadlessDocument::default()))
            .with_container(ContainerRef::new("devreel-player"))
    })?
    .with_event_sink(sink);

    info!(
        steps = script.steps.len(),
        total_ms = script.total_ms(),
        "Replaying session"
    );

    let every = Duration::from_millis(config.media.tick_ms);
    let (view, (), ()) = tokio::join!(
        driver.run(),
        feed(&handle, script),
        tick(clock, handle.clone(), every)
    );

    let mut emitted = Vec::new();
    while let Ok(event) = events.try_recv() {
        emitted.push(event);
    }

    info!(state = ?view.state, events = emitted.len(), "Session finished");
    Ok(SessionReport {
        view,
        events: emitted,
    })
}

async fn feed(handle: &PlayerHandle, script: &Script) {
    for (index, step) in script.steps.iter().enumerate() {
        if step.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
        }

        debug!(step = index, input = ?step.input, "Script input");
        if handle.send(step.input.clone()).is_err() {
            warn!(step = index, "Player stopped before the script finished");
            return;
        }
    }

    tokio::time::sleep(Duration::from_millis(script.hold_ms)).await;
    handle.unmount();
}
