use std::path::Path;

use log::warn;

use crate::ai::RatingBands;
use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub arena: ArenaConfig,
}

/// Settings shared by every decision engine built from this config.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for reproducible play; fresh entropy when unset.
    pub seed: Option<u64>,
    pub rating_bands: RatingBands,
    pub thinking_delay: ThinkingDelayConfig,
}

impl EngineConfig {
    /// No delay and a fixed seed: the setup for tests and batch runs.
    pub fn instant(seed: u64) -> Self {
        EngineConfig {
            seed: Some(seed),
            rating_bands: RatingBands::default(),
            thinking_delay: ThinkingDelayConfig {
                enabled: false,
                ..ThinkingDelayConfig::default()
            },
        }
    }
}

/// Simulated thinking time: `base_ms + (10 - level) * per_level_ms` plus
/// up to `jitter_ms` (widened at low levels) of random slack.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThinkingDelayConfig {
    pub enabled: bool,
    pub base_ms: u64,
    pub per_level_ms: u64,
    pub jitter_ms: u64,
}

impl Default for ThinkingDelayConfig {
    fn default() -> Self {
        ThinkingDelayConfig {
            enabled: true,
            base_ms: 400,
            per_level_ms: 120,
            jitter_ms: 600,
        }
    }
}

/// Headless match and calibration runs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub games_per_tier: usize,
    pub block_trials: usize,
    /// Rolling window for win/draw rates.
    pub window: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            games_per_tier: 50,
            block_trials: 10_000,
            window: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Reject rating bands that cannot map onto tiers 2..=10 and empty arena runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bands = &self.engine.rating_bands;
        if bands.0.len() != 9 {
            return Err(ConfigError::Validation(
                "engine.rating_bands must list 9 thresholds (tiers 2..=10)".into(),
            ));
        }
        if !bands.is_ascending() {
            return Err(ConfigError::Validation(
                "engine.rating_bands must be strictly ascending".into(),
            ));
        }
        if self.arena.games_per_tier == 0 {
            return Err(ConfigError::Validation(
                "arena.games_per_tier must be > 0".into(),
            ));
        }
        if self.arena.block_trials == 0 {
            return Err(ConfigError::Validation(
                "arena.block_trials must be > 0".into(),
            ));
        }
        if self.arena.window == 0 {
            return Err(ConfigError::Validation("arena.window must be > 0".into()));
        }

        Ok(())
    }

    /// The defaults rendered as TOML, as a starting point for a config file.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
