//! Progress and time tracking

use crate::events::MediaEvent;
use crate::types::TimePosition;

/// Current time, duration and buffering indicator for the progress bar
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    current_time: f64,

    /// Reported by the resource; authoritative once known
    reported_duration: Option<f64>,

    /// Supplied by the caller at mount
    fallback_duration: Option<f64>,

    buffering: bool,
}

impl ProgressTracker {
    pub fn new(fallback_duration: Option<f64>) -> Self {
        Self {
            fallback_duration: fallback_duration.filter(|d| is_usable_duration(*d)),
            ..Self::default()
        }
    }

    /// Apply a media event. Returns true if anything visible changed.
    pub fn apply(&mut self, event: &MediaEvent) -> bool {
        match event {
            MediaEvent::TimeUpdate { current_time } | MediaEvent::Seeked { current_time } => {
                let time = sanitize_time(*current_time);
                let changed = time != self.current_time;
                self.current_time = time;
                changed
            }
            MediaEvent::LoadedMetadata { duration } | MediaEvent::DurationChange { duration } => {
                if !is_usable_duration(*duration) {
                    return false;
                }
                let changed = self.reported_duration != Some(*duration);
                self.reported_duration = Some(*duration);
                changed
            }
            MediaEvent::LoadStart | MediaEvent::Waiting => self.set_buffering(true),
            MediaEvent::CanPlay | MediaEvent::Playing => self.set_buffering(false),
            _ => false,
        }
    }

    fn set_buffering(&mut self, buffering: bool) -> bool {
        let changed = self.buffering != buffering;
        self.buffering = buffering;
        changed
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Best known duration: the resource's once reported, else the caller's
    pub fn duration(&self) -> Option<f64> {
        self.reported_duration.or(self.fallback_duration)
    }

    /// Duration for clamping; 0 when unknown
    pub fn effective_duration(&self) -> f64 {
        self.duration().unwrap_or(0.0)
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    pub fn position(&self) -> TimePosition {
        TimePosition {
            current_time: self.current_time,
            duration: self.duration(),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percentage(self.current_time, self.duration())
    }

    /// "current / duration", e.g. "1:00 / 2:00"
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(Some(self.current_time)),
            format_time(self.duration())
        )
    }
}

fn is_usable_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

fn sanitize_time(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// Progress as a percentage in `[0, 100]`
///
/// Zero when the duration is unknown, zero, or not finite.
pub fn progress_percentage(current_time: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if is_usable_duration(duration) && current_time.is_finite() => {
            (current_time / duration * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Format seconds as `M:SS`
///
/// Unknown or non-finite input renders as "00:00"; negatives floor at "0:00".
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) if seconds.is_finite() => {
            let total = seconds.max(0.0).floor() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "00:00".to_string(),
    }
}
