//! Game configuration loaded from TOML.
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! the stock game.

use std::path::Path;

use serde::Deserialize;

use crate::error::{InfiltratorError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub terminal: TerminalConfig,
    pub breach: BreachConfig,
    pub session: SessionConfig,
    pub world: WorldConfig,
    /// Seed for breach layout selection. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Terminal presentation and scrollback settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// User name shown in the prompt.
    pub user: String,
    /// Host name shown in the prompt on the local machine.
    pub host: String,
    /// Host name shown in the prompt while connected over ssh.
    pub remote_host: String,
    /// Maximum number of lines kept in the output log.
    pub max_scrollback: usize,
    /// Delay between scripted output lines (`analyze`, `ssh`).
    pub reveal_interval_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "root".to_string(),
            host: "alliance1".to_string(),
            remote_host: "alliance-secure".to_string(),
            max_scrollback: 1000,
            reveal_interval_ms: 50,
        }
    }
}

/// Breach protocol settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BreachConfig {
    /// Countdown for a single puzzle run, in seconds.
    pub time_limit_secs: f32,
    /// Failed runs allowed before the terminal locks for good.
    pub max_attempts: u8,
    /// "Loading" delay between the breach command and the puzzle.
    pub load_delay_secs: f32,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 15.0,
            max_attempts: 3,
            load_delay_secs: 2.0,
        }
    }
}

/// Narrative session settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a player thought stays on screen, in seconds.
    pub thought_duration_secs: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thought_duration_secs: 5.0,
        }
    }
}

/// Optional additions to the fixed world.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Place an analyzable `network.conf` under `/etc`.
    pub network_config: bool,
}

impl GameConfig {
    /// Parse a configuration document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the game loop cannot work with. Every duration must be
    /// finite.
    pub fn validate(&self) -> Result<()> {
        let limit = self.breach.time_limit_secs;
        if !(limit.is_finite() && limit > 0.0) {
            return Err(InfiltratorError::Config(
                "breach.time_limit_secs must be a finite positive number".to_string(),
            ));
        }
        if self.breach.max_attempts == 0 {
            return Err(InfiltratorError::Config(
                "breach.max_attempts must be at least 1".to_string(),
            ));
        }
        check_duration("breach.load_delay_secs", self.breach.load_delay_secs)?;
        check_duration(
            "session.thought_duration_secs",
            self.session.thought_duration_secs,
        )?;
        if self.terminal.max_scrollback == 0 {
            return Err(InfiltratorError::Config(
                "terminal.max_scrollback must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_duration(field: &str, secs: f32) -> Result<()> {
    if secs.is_finite() && secs >= 0.0 {
        Ok(())
    } else {
        Err(InfiltratorError::Config(format!(
            "{field} must be a finite non-negative number"
        )))
    }
}
