//! Host environment seams
//!
//! The player never touches a DOM, clock, or media element directly. The
//! embedding platform implements these traits: a browser binding wraps an
//! `HTMLVideoElement` and `document`, tests use recording fakes, and the
//! simulator drives a scripted resource.
//!
//! Player state is confined to one task, so hosts need not be `Send`.

use crate::error::Result;
use crate::types::{ContainerRef, MediaSourceRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Handle for a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Handle for an attached event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// An attached listener; dropping it detaches exactly once
pub struct Subscription {
    id: ListenerId,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(id: ListenerId, detach: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            detach: Some(Box::new(detach)),
        }
    }

    /// Listener that needs no cleanup
    pub fn detached(id: ListenerId) -> Self {
        Self { id, detach: None }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Detach now instead of at drop
    pub fn unsubscribe(mut self) {
        self.run_detach();
    }

    fn run_detach(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_detach();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Platform media element
///
/// Commands are fire-and-forget. Their outcome comes back as
/// [`MediaEvent`](crate::MediaEvent)s through the subscription, which is
/// what moves the player's state.
pub trait MediaResource {
    /// Point the resource at a source and poster
    fn load(&mut self, source: &MediaSourceRef, poster: Option<&str>) -> Result<()>;

    /// Request playback
    ///
    /// An `Err` is a synchronous rejection. Asynchronous rejection (autoplay
    /// policy) arrives later as `MediaEvent::PlayRejected`.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn set_current_time(&mut self, seconds: f64);

    /// Level in 0.0..=1.0
    fn set_volume(&mut self, level: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: f64);

    /// Start forwarding media events to the player
    fn subscribe(&mut self) -> Result<Subscription>;
}

/// One-shot timer scheduling
///
/// Fired timers come back as `PlayerInput::TimerFired`. Cancelling an
/// unknown or already-fired id must be a no-op.
pub trait TimerHost {
    fn schedule(&mut self, delay: Duration) -> TimerId;

    fn cancel(&mut self, id: TimerId);
}

/// Document-level services: outside-click listening and fullscreen
pub trait DocumentHost {
    /// Attach a document-wide pointer-down listener
    ///
    /// Presses arrive as `PlayerInput::DocumentPointerDown` carrying the
    /// returned listener's id.
    fn listen_pointer_down(&mut self) -> Result<Subscription>;

    fn fullscreen_active(&self) -> bool;

    fn request_fullscreen(&mut self, container: &ContainerRef) -> Result<()>;

    fn exit_fullscreen(&mut self) -> Result<()>;
}

/// Receives quality menu selections
#[cfg_attr(test, mockall::automock)]
pub trait QualitySelector {
    fn select(&mut self, label: &str) -> Result<()>;
}

/// Quality selector for sources with a single rendition
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopQualitySelector;

impl QualitySelector for NoopQualitySelector {
    fn select(&mut self, label: &str) -> Result<()> {
        tracing::debug!(quality = label, "Quality selection has no renditions to switch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn subscription_detaches_once_on_drop() {
        let detached = Rc::new(Cell::new(0));
        let counter = detached.clone();
        let sub = Subscription::new(ListenerId(1), move || counter.set(counter.get() + 1));

        assert_eq!(sub.id(), ListenerId(1));
        drop(sub);
        assert_eq!(detached.get(), 1);
    }

    #[test]
    fn explicit_unsubscribe_does_not_detach_twice() {
        let detached = Rc::new(Cell::new(0));
        let counter = detached.clone();
        let sub = Subscription::new(ListenerId(2), move || counter.set(counter.get() + 1));

        sub.unsubscribe();
        assert_eq!(detached.get(), 1);
    }

    #[test]
    fn detached_subscription_is_inert() {
        let sub = Subscription::detached(ListenerId(3));
        assert!(format!("{:?}", sub).contains("attached: false"));
    }

    #[test]
    fn noop_selector_accepts_everything() {
        let mut selector = NoopQualitySelector;
        assert!(selector.select("720p").is_ok());
    }
}
