//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use valentine_tictactoe::{Marker, Matchup, Strength};

/// Presentation delays around the opponent's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct PacingConfig {
    /// Delay between the human's move and the opponent's reply.
    #[serde(default = "default_thinking_ms")]
    thinking_ms: u64,

    /// Extra delay before an opponent win is reported.
    #[serde(default = "default_reveal_ms")]
    reveal_ms: u64,
}

impl PacingConfig {
    /// Pacing with both delays disabled.
    pub fn immediate() -> Self {
        Self::new(0, 0)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::new(default_thinking_ms(), default_reveal_ms())
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Opponent strength.
    #[serde(default)]
    strength: Strength,

    /// Marker played by the human; the opponent takes the other one.
    #[serde(default = "default_human_marker")]
    human_marker: Marker,

    /// Symbol shown for the human's marker.
    #[serde(default = "default_human_symbol")]
    human_symbol: String,

    /// Symbol shown for the opponent's marker.
    #[serde(default = "default_opponent_symbol")]
    opponent_symbol: String,

    /// Presentation delays.
    #[serde(default)]
    pacing: PacingConfig,

    /// Seed for the opponent's random choices. Absent means fresh entropy.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_human_marker() -> Marker {
    Marker::X
}

#[instrument]
fn default_human_symbol() -> String {
    "X".to_string()
}

#[instrument]
fn default_opponent_symbol() -> String {
    "❤".to_string()
}

#[instrument]
fn default_thinking_ms() -> u64 {
    1000
}

#[instrument]
fn default_reveal_ms() -> u64 {
    500
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            strength: Strength::default(),
            human_marker: default_human_marker(),
            human_symbol: default_human_symbol(),
            opponent_symbol: default_opponent_symbol(),
            pacing: PacingConfig::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(strength = %config.strength, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the two display symbols can be told apart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.human_symbol.trim().is_empty() || self.opponent_symbol.trim().is_empty() {
            return Err(ConfigError::new("Marker symbols must not be blank".to_string()));
        }
        if self.human_symbol == self.opponent_symbol {
            return Err(ConfigError::new(format!(
                "Human and opponent share the symbol {:?}",
                self.human_symbol
            )));
        }
        Ok(())
    }

    /// Overrides the opponent strength.
    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = strength;
        self
    }

    /// Overrides the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the human's marker.
    pub fn with_human_marker(mut self, marker: Marker) -> Self {
        self.human_marker = marker;
        self
    }

    /// Overrides the pacing.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// The marker pair in play.
    pub fn matchup(&self) -> Matchup {
        Matchup::for_human(self.human_marker)
    }

    /// Display symbol for `marker`.
    pub fn symbol_for(&self, marker: Marker) -> &str {
        if marker == self.human_marker {
            &self.human_symbol
        } else {
            &self.opponent_symbol
        }
    }

    /// Builds the generator the opponent draws from.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SessionConfig::from_toml("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(*config.pacing().thinking_ms(), 1000);
        assert_eq!(*config.pacing().reveal_ms(), 500);
        assert_eq!(config.matchup().opponent(), Marker::O);
    }

    #[test]
    fn test_partial_toml() {
        let config = SessionConfig::from_toml(
            r#"
            strength = "weak"
            human_marker = "O"
            seed = 42

            [pacing]
            thinking_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(*config.strength(), Strength::Weak);
        assert_eq!(config.matchup().human(), Marker::O);
        assert_eq!(config.matchup().opponent(), Marker::X);
        assert_eq!(*config.seed(), Some(42));
        assert_eq!(*config.pacing().thinking_ms(), 250);
        assert_eq!(*config.pacing().reveal_ms(), 500);
    }

    #[test]
    fn test_same_symbols_rejected() {
        let err = SessionConfig::from_toml(
            r#"
            human_symbol = "X"
            opponent_symbol = "X"
            "#,
        )
        .unwrap_err();
        assert!(err.message.contains("share the symbol"));
    }

    #[test]
    fn test_symbol_for() {
        let config = SessionConfig::default();
        assert_eq!(config.symbol_for(Marker::X), "X");
        assert_eq!(config.symbol_for(Marker::O), "❤");
    }

    #[test]
    fn test_unknown_strength_rejected() {
        assert!(SessionConfig::from_toml(r#"strength = "grandmaster""#).is_err());
    }
}
