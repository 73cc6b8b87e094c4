//! libthai-core
//!
//! Phonetic fuzzy matching from romanized input to Thai-script words, and the
//! keystroke state machine of a real-time IME built on it.
//!
//! Public API:
//! - `phonetic::encode` - Soundex-style phonetic code of a romanization
//! - `similarity` - edit distance and n-gram Jaccard scorers
//! - `CandidateStore` - read-only lookup seam, with `MemoryStore` and `RedbStore`
//! - `Engine` - retrieval, scoring, compound decomposition, merged matching
//! - `ImeEngine` - per-keystroke session driver (`InputSession` state)
//! - `Config` - tunable constants and IME settings
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ConfigError, StoreError};

pub mod phonetic;

pub mod similarity;

pub mod store;
pub use store::{CandidateStore, Category, CorpusEntry, MemoryStore};

pub mod redb_store;
pub use redb_store::RedbStore;

pub mod candidate;
pub use candidate::{MatchCandidate, MatchType, ScoredMatch};

pub mod engine;
pub use engine::Engine;

pub mod compound;

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod session;
pub use session::InputSession;

pub mod ime_engine;
pub use ime_engine::{ImeEngine, KeyEvent, KeyResult, KeystrokeSource};

/// Engine and IME configuration.
///
/// Defaults reproduce the tuned constants of the matcher; changing them
/// changes ranking behavior.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum phonetic code length
    pub code_length: usize,
    /// Code prefix length used for prefix retrieval
    pub prefix_length: usize,
    /// Maximum candidates scored per query
    pub candidate_cap: usize,

    // Compound decomposition
    pub compound_enabled: bool,
    /// Inputs shorter than this (in chars) are never split
    pub compound_min_length: usize,
    /// Both halves' best score must reach this
    pub compound_min_score: f64,
    /// Subtracted from the averaged half scores
    pub compound_penalty: f64,

    // IME
    /// Suggestions shown per keystroke
    pub suggestion_count: usize,
    /// Keys selecting suggestions; first char selects the 1st, etc.
    pub select_keys: String,

    /// Maximum number of entries in the input -> matches cache
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            code_length: phonetic::DEFAULT_CODE_LENGTH,
            prefix_length: 3,
            candidate_cap: 100,
            compound_enabled: true,
            compound_min_length: 4,
            compound_min_score: 50.0,
            compound_penalty: 30.0,
            suggestion_count: 5,
            select_keys: "12345".to_string(),
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing keys take defaults.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Set the selection keys. Empty strings are ignored.
    pub fn set_select_keys(&mut self, keys: &str) {
        if !keys.is_empty() {
            self.select_keys = keys.to_string();
        }
    }

    /// Index (0-based) of `ch` among the selection keys.
    pub fn selection_key_index(&self, ch: char) -> Option<usize> {
        self.select_keys.chars().position(|c| c == ch)
    }
}

/// Utility helpers.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// Canonical form of romanized input: NFC, lower-case, no whitespace.
    pub fn normalize(s: &str) -> String {
        s.nfc()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}
