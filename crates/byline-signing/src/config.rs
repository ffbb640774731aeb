//! Configuration file parsing for the Signer.
//!
//! Loads the signing secret from a TOML file or the environment. An absent
//! secret is a valid configuration: the key provider falls back to an
//! ephemeral key.

use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the signing secret
pub const SIGNING_SECRET_ENV: &str = "BYLINE_SIGNING_SECRET";

/// Signer configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Signer configuration loaded from TOML or the environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignerConfig {
    /// Shared signing secret; `None` selects an ephemeral key
    #[serde(default)]
    pub signing_secret: Option<String>,
}

impl SignerConfig {
    /// Load configuration from a TOML file
    ///
    /// A file without a `signing_secret` entry parses successfully; the
    /// missing secret is handled at key resolution, not treated as a
    /// configuration error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SignerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Read configuration from the `BYLINE_SIGNING_SECRET` environment
    /// variable
    pub fn from_env() -> Self {
        SignerConfig {
            signing_secret: env::var(SIGNING_SECRET_ENV).ok(),
        }
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        SignerConfig {
            signing_secret: Some("test-secret-key-do-not-use-in-production".to_string()),
        }
    }
}
