/// Simulator configuration
use anyhow::Context;
use devreel_player::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub media: MediaSettings,
}

/// Behavior of the simulated media element
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Answer every `play()` with an autoplay rejection
    pub autoplay_blocked: bool,

    /// Interval between `timeupdate` events while playing
    pub tick_ms: u64,

    /// Emit `loadedmetadata` with the clip length on load
    pub report_duration: bool,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            autoplay_blocked: false,
            tick_ms: 250,
            report_duration: true,
        }
    }
}

impl SimConfig {
    /// Load from a TOML file and `DEVREEL_` environment variables
    ///
    /// Without an explicit path, `devreel.toml` in the working directory is
    /// used when present. Nested keys use `__`, e.g.
    /// `DEVREEL_PLAYER__IDLE_HIDE_DELAY_MS=5000`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("devreel.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("DEVREEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.player.validate()?;
        if self.media.tick_ms == 0 {
            anyhow::bail!("media.tick_ms must be greater than zero");
        }
        Ok(())
    }
}
