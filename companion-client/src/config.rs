//! Configuration loading for the companion engine.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or [`CompanionConfig::default`]) is a valid configuration.

use companion_core::DEFAULT_MAX_RECENT_URLS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for the companion engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanionConfig {
    /// Snapshot publishing configuration.
    #[serde(default)]
    pub publisher: PublisherConfig,
    /// Command dispatch configuration.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
}

/// Snapshot publishing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    /// Maximum recent conferences sent to the companion (default: 10).
    #[serde(default = "default_max_recent_urls")]
    pub max_recent_urls: usize,
}

/// Command dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatcherConfig {
    /// Ask the host to create the audio track when the companion
    /// changes the mute state (default: true).
    #[serde(default = "default_ensure_track_on_mute")]
    pub ensure_track_on_mute: bool,
}

fn default_max_recent_urls() -> usize {
    DEFAULT_MAX_RECENT_URLS
}

fn default_ensure_track_on_mute() -> bool {
    true
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            max_recent_urls: default_max_recent_urls(),
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            ensure_track_on_mute: default_ensure_track_on_mute(),
        }
    }
}

impl CompanionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<inline>"),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.publisher.max_recent_urls == 0 {
            return Err(ConfigError::Invalid(
                "publisher.max_recent_urls must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
