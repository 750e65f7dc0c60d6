//! Fullscreen toggle

use crate::error::PlayerError;
use crate::host::DocumentHost;
use crate::types::ContainerRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of a fullscreen toggle. Failures never propagate to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FullscreenOutcome {
    Entered,
    Exited,

    /// No fullscreen API or no container to promote
    Unavailable,

    /// The host refused the request
    Rejected,
}

/// Enter fullscreen on `container`, or exit if the document is already fullscreen
pub fn toggle_fullscreen(
    document: &mut dyn DocumentHost,
    container: Option<&ContainerRef>,
) -> FullscreenOutcome {
    if document.fullscreen_active() {
        return match document.exit_fullscreen() {
            Ok(()) => {
                debug!("Exited fullscreen");
                FullscreenOutcome::Exited
            }
            Err(e) => {
                warn!(error = %e, "Exit fullscreen failed");
                FullscreenOutcome::Rejected
            }
        };
    }

    let Some(container) = container else {
        debug!("No container to make fullscreen");
        return FullscreenOutcome::Unavailable;
    };

    match document.request_fullscreen(container) {
        Ok(()) => {
            debug!(container = container.as_str(), "Entered fullscreen");
            FullscreenOutcome::Entered
        }
        Err(PlayerError::FullscreenUnavailable) => {
            debug!("Fullscreen API unavailable");
            FullscreenOutcome::Unavailable
        }
        Err(e) => {
            warn!(error = %e, "Fullscreen request rejected");
            FullscreenOutcome::Rejected
        }
    }
}
