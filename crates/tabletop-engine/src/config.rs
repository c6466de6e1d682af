//! Session configuration loading.
//!
//! A session is described by a variant and an optional board size, read
//! from TOML:
//!
//! ```toml
//! variant = "go"
//! size = 9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{MAX_SIZE, MIN_SIZE};
use crate::rules::Variant;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Requested board size is outside 8..=19.
    #[error("Invalid board size {0}: must be between 8 and 19")]
    InvalidSize(u8),
}

/// Settings for starting a [`Game`](crate::Game).
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Which game to play.
    pub variant: Variant,
    /// Board edge length. Defaults to the variant's usual size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u8>,
}

impl SessionConfig {
    pub fn new(variant: Variant) -> Self {
        SessionConfig {
            variant,
            size: None,
        }
    }

    /// Same variant, explicit board size.
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = Some(size);
        self
    }

    /// Board size to request: the configured one or the variant default.
    pub fn size(&self) -> u8 {
        self.size.unwrap_or_else(|| self.variant.default_size())
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for invalid TOML or an unknown
    /// variant, and [`ConfigError::InvalidSize`] for a size outside 8..=19.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let size = self.size();
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(())
        } else {
            Err(ConfigError::InvalidSize(size))
        }
    }
}
