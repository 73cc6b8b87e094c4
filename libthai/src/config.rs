//! Front-end configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All matcher and IME options from `libthai_core::Config` (flattened via serde)
//! - Location of the persistent corpus database
//! - Verbose suggestion display
//!
//! # Example
//!
//! ```rust
//! use libthai::ThaiConfig;
//!
//! let config = ThaiConfig::from_toml_str("suggestion_count = 3\nverbose = true\n").unwrap();
//! assert_eq!(config.base.suggestion_count, 3);
//! assert!(config.verbose);
//! ```

use libthai_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThaiConfig {
    #[serde(flatten)]
    pub base: libthai_core::Config,

    /// redb corpus file
    pub database: PathBuf,

    /// Show match type, score and frequency next to suggestions
    pub verbose: bool,
}

impl Default for ThaiConfig {
    fn default() -> Self {
        Self {
            base: libthai_core::Config::default(),
            database: default_database_path(),
            verbose: false,
        }
    }
}

impl ThaiConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Convert into the base config for `Engine::new()`
    pub fn into_base(self) -> libthai_core::Config {
        self.base
    }

    pub fn base(&self) -> &libthai_core::Config {
        &self.base
    }
}

/// `corpus.redb` under `libthai/` in the platform's local data directory
/// (`$XDG_DATA_HOME` on Linux), or `./corpus.redb` if there is none.
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("libthai").join("corpus.redb"))
        .unwrap_or_else(|| PathBuf::from("corpus.redb"))
}
