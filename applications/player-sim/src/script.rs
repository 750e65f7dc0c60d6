/// Scripted player sessions
use anyhow::Context;
use devreel_player::{PlayerInput, PlayerProps};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A clip plus the inputs to replay against it
///
/// ```json
/// {
///   "source": "https://cdn.devreel.dev/clips/intro.mp4",
///   "duration": 95.0,
///   "steps": [
///     { "input": "TogglePlayPause" },
///     { "delay_ms": 4000, "input": "PointerMove" },
///     { "delay_ms": 500, "input": { "SetSpeed": 1.5 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Script {
    pub source: String,

    #[serde(default)]
    pub poster: Option<String>,

    /// Clip length in seconds; also handed to the player as its fallback
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub steps: Vec<ScriptStep>,

    /// Keep running this long after the last step
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptStep {
    /// Wait before delivering the input
    #[serde(default)]
    pub delay_ms: u64,

    pub input: PlayerInput,
}

fn default_hold_ms() -> u64 {
    100
}

impl Script {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let script: Self = serde_json::from_str(text).context("Invalid session script")?;
        if script.source.trim().is_empty() {
            anyhow::bail!("Session script has an empty source");
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn props(&self) -> PlayerProps {
        let mut props = PlayerProps::from_url(self.source.clone());
        if let Some(poster) = &self.poster {
            props = props.with_poster(poster.clone());
        }
        if let Some(duration) = self.duration {
            props = props.with_duration(duration);
        }
        props
    }

    /// Scripted time from mount to unmount
    pub fn total_ms(&self) -> u64 {
        self.steps.iter().map(|step| step.delay_ms).sum::<u64>() + self.hold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devreel_player::MediaEvent;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r#"{
                "source": "clip.mp4",
                "duration": 30.0,
                "steps": [
                    { "input": "TogglePlayPause" },
                    { "delay_ms": 1000, "input": { "SetVolume": 0.25 } },
                    { "delay_ms": 250, "input": { "Media": "Waiting" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[0].delay_ms, 0);
        assert_eq!(script.steps[1].input, PlayerInput::SetVolume(0.25));
        assert_eq!(script.steps[2].input, PlayerInput::Media(MediaEvent::Waiting));
        assert_eq!(script.hold_ms, 100);
        assert_eq!(script.total_ms(), 1_350);
    }

    #[test]
    fn test_props_carry_poster_and_duration() {
        let script = Script::from_json(
            r#"{ "source": "clip.mp4", "poster": "poster.jpg", "duration": 12.5 }"#,
        )
        .unwrap();

        let props = script.props();
        assert_eq!(props.poster.as_deref(), Some("poster.jpg"));
        assert_eq!(props.duration, Some(12.5));
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(Script::from_json(r#"{ "source": "  " }"#).is_err());
        assert!(Script::from_json(r#"{ "steps": [] }"#).is_err());
    }
}
