//! Tokio driver for a mounted player
//!
//! Owns a [`VideoPlayer`] on one task and feeds it host inputs and fired
//! timers in arrival order. The player is not `Send`; await
//! [`PlayerDriver::run`] directly or spawn it on a `LocalSet`.

use crate::config::PlayerConfig;
use crate::error::{PlayerError, Result};
use crate::events::{PlayerEvent, PlayerInput};
use crate::host::{TimerHost, TimerId};
use crate::player::{PlayerHosts, VideoPlayer};
use crate::types::PlayerProps;
use crate::view::PlayerView;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// [`TimerHost`] backed by tokio sleep tasks
///
/// Fired ids are sent on the channel given at construction.
pub struct TokioTimers {
    runtime: Handle,
    fired: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimers {
    /// Must be called from within a tokio runtime
    pub fn new(fired: mpsc::UnboundedSender<TimerId>) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| PlayerError::Host(format!("No tokio runtime: {}", e)))?;

        Ok(Self {
            runtime,
            fired,
            tasks: HashMap::new(),
            next_id: 0,
        })
    }

    /// Timers scheduled and not yet fired or cancelled
    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl TimerHost for TokioTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let fired = self.fired.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver is gone once the driver stops
            fired.send(id).ok();
        });

        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

enum DriverMessage {
    Input(PlayerInput),
    Unmount,
}

/// Cloneable sender side of a driver
#[derive(Clone)]
pub struct PlayerHandle {
    inbox: mpsc::UnboundedSender<DriverMessage>,
    view: watch::Receiver<Option<PlayerView>>,
}

impl PlayerHandle {
    /// Queue an input for the player
    pub fn send(&self, input: PlayerInput) -> Result<()> {
        self.inbox
            .send(DriverMessage::Input(input))
            .map_err(|_| PlayerError::NotMounted)
    }

    /// Ask the driver to unmount and stop. Safe to call repeatedly.
    pub fn unmount(&self) {
        self.inbox.send(DriverMessage::Unmount).ok();
    }

    /// Latest published view; `None` before mount
    pub fn view(&self) -> Option<PlayerView> {
        self.view.borrow().clone()
    }

    /// Receiver notified on every published view
    pub fn watch(&self) -> watch::Receiver<Option<PlayerView>> {
        self.view.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }
}

/// Receiving side, consumed by [`PlayerDriver::mount`]
pub struct DriverInbox {
    messages: mpsc::UnboundedReceiver<DriverMessage>,
    view: watch::Sender<Option<PlayerView>>,
}

/// Create a handle/inbox pair
///
/// Hosts that push media events (a simulated resource, a websocket bridge)
/// can hold a handle clone before the player exists.
pub fn channel() -> (PlayerHandle, DriverInbox) {
    let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(None);

    (
        PlayerHandle {
            inbox: inbox_tx,
            view: view_rx,
        },
        DriverInbox {
            messages: inbox_rx,
            view: view_tx,
        },
    )
}

pub struct PlayerDriver {
    player: VideoPlayer,
    messages: mpsc::UnboundedReceiver<DriverMessage>,
    timer_fired: mpsc::UnboundedReceiver<TimerId>,
    view: watch::Sender<Option<PlayerView>>,
    event_sink: Option<mpsc::UnboundedSender<PlayerEvent>>,
}

impl PlayerDriver {
    /// Mount a player with tokio timers
    ///
    /// `hosts` receives the timer host and returns the full host set.
    pub fn mount(
        inbox: DriverInbox,
        props: PlayerProps,
        config: PlayerConfig,
        hosts: impl FnOnce(Box<dyn TimerHost>) -> PlayerHosts,
    ) -> Result<Self> {
        let (fired_tx, timer_fired) = mpsc::unbounded_channel();
        let timers = TokioTimers::new(fired_tx)?;
        let player = VideoPlayer::mount(props, config, hosts(Box::new(timers)))?;

        inbox.view.send_replace(Some(player.view()));

        Ok(Self {
            player,
            messages: inbox.messages,
            timer_fired,
            view: inbox.view,
            event_sink: None,
        })
    }

    /// Forward drained [`PlayerEvent`]s to `sink`
    #[must_use]
    pub fn with_event_sink(mut self, sink: mpsc::UnboundedSender<PlayerEvent>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn player(&self) -> &VideoPlayer {
        &self.player
    }

    /// Process inputs until unmounted or every handle is dropped
    ///
    /// Returns the final view, taken after teardown.
    pub async fn run(mut self) -> PlayerView {
        info!("Player driver started");

        loop {
            tokio::select! {
                message = self.messages.recv() => match message {
                    Some(DriverMessage::Input(input)) => self.player.dispatch(input),
                    Some(DriverMessage::Unmount) | None => break,
                },
                Some(id) = self.timer_fired.recv() => {
                    debug!(%id, "Timer fired");
                    self.player.handle_timer(id);
                }
            }
            self.publish();
        }

        self.player.unmount();
        let view = self.player.view();
        self.view.send_replace(Some(view.clone()));

        info!("Player driver stopped");
        view
    }

    fn publish(&mut self) {
        let events = self.player.drain_events();
        if let Some(sink) = &self.event_sink {
            for event in events {
                sink.send(event).ok();
            }
        }
        self.view.send_replace(Some(self.player.view()));
    }
}
