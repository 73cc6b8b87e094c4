//! Candidate store abstraction and the in-memory implementation.
//!
//! The ranking engine never owns corpus data. It talks to a `CandidateStore`
//! through three read-only lookups:
//! - exact romanization,
//! - exact phonetic code,
//! - phonetic code prefix.
//!
//! Lookups may overlap or come back empty; the engine deduplicates. Stores
//! return entries in insertion order within a single lookup.
//!
//! Two stores ship with the crate: `MemoryStore` (tests, small seed corpora,
//! bincode snapshots) and `RedbStore` in `redb_store` (persistent).

use crate::error::StoreError;
use crate::phonetic;
use crate::utils;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

/// Where a corpus entry came from. Also a coarse prior on how trustworthy
/// its romanization is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Curated romanization supplied by hand
    Known,
    Country,
    Province,
    /// Personal names and public figures
    Name,
    /// Encyclopedia titles
    Wiki,
    /// General vocabulary from a frequency list
    Word,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Known,
        Category::Country,
        Category::Province,
        Category::Name,
        Category::Wiki,
        Category::Word,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Known => "known",
            Category::Country => "country",
            Category::Province => "province",
            Category::Name => "name",
            Category::Wiki => "wiki",
            Category::Word => "word",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "known" => Ok(Category::Known),
            "country" => Ok(Category::Country),
            "province" => Ok(Category::Province),
            "name" => Ok(Category::Name),
            "wiki" => Ok(Category::Wiki),
            "word" => Ok(Category::Word),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

/// One (native text, romanization) pair in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Native-script text, e.g. "น่ารัก"
    pub text: String,
    /// Normalized romanization, e.g. "narak"
    pub romanization: String,
    /// Phonetic code of `romanization`
    pub phonetic_code: String,
    pub frequency: u64,
    pub category: Category,
}

impl CorpusEntry {
    /// Build an entry, normalizing the romanization and deriving its code
    /// with the default code length.
    pub fn new<T: Into<String>>(
        text: T,
        romanization: &str,
        frequency: u64,
        category: Category,
    ) -> Self {
        Self::with_code_length(text, romanization, frequency, category, phonetic::DEFAULT_CODE_LENGTH)
    }

    /// Like `new`, with an explicit phonetic code length.
    pub fn with_code_length<T: Into<String>>(
        text: T,
        romanization: &str,
        frequency: u64,
        category: Category,
        code_length: usize,
    ) -> Self {
        let romanization = utils::normalize(romanization);
        let phonetic_code = phonetic::encode(&romanization, code_length);
        Self {
            text: text.into(),
            romanization,
            phonetic_code,
            frequency,
            category,
        }
    }

    /// Whether a store may accept this entry.
    pub fn is_indexable(&self) -> bool {
        !self.text.is_empty() && !self.romanization.is_empty() && !self.phonetic_code.is_empty()
    }
}

/// Read-only lookup capability consumed by the ranking engine.
pub trait CandidateStore {
    /// Entries whose romanization equals `romanization`.
    fn lookup_by_romanization(&self, romanization: &str) -> Result<Vec<CorpusEntry>, StoreError>;

    /// Entries whose phonetic code equals `code`.
    fn lookup_by_code(&self, code: &str) -> Result<Vec<CorpusEntry>, StoreError>;

    /// Entries whose phonetic code starts with `prefix`.
    fn lookup_by_code_prefix(&self, prefix: &str) -> Result<Vec<CorpusEntry>, StoreError>;
}

impl<S: CandidateStore + ?Sized> CandidateStore for &S {
    fn lookup_by_romanization(&self, romanization: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_romanization(romanization)
    }

    fn lookup_by_code(&self, code: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_code(code)
    }

    fn lookup_by_code_prefix(&self, prefix: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_code_prefix(prefix)
    }
}

impl<S: CandidateStore + ?Sized> CandidateStore for Box<S> {
    fn lookup_by_romanization(&self, romanization: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_romanization(romanization)
    }

    fn lookup_by_code(&self, code: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_code(code)
    }

    fn lookup_by_code_prefix(&self, prefix: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        (**self).lookup_by_code_prefix(prefix)
    }
}

/// In-memory candidate store.
///
/// Entries live in a vector; the indices hold positions into it, so a
/// position doubles as insertion order. Phonetic codes are kept in a
/// `BTreeMap` so prefix lookups are a range scan.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<CorpusEntry>,
    pairs: AHashSet<(String, String)>,
    by_romanization: AHashMap<String, Vec<usize>>,
    by_code: BTreeMap<String, Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from entries, skipping duplicates and unindexable ones.
    pub fn from_entries<I: IntoIterator<Item = CorpusEntry>>(entries: I) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Insert an entry. Returns false if the (romanization, text) pair is
    /// already present or the entry has no phonetic code.
    pub fn insert(&mut self, entry: CorpusEntry) -> bool {
        if !entry.is_indexable() {
            return false;
        }
        let pair = (entry.romanization.clone(), entry.text.clone());
        if !self.pairs.insert(pair) {
            return false;
        }

        let idx = self.entries.len();
        self.by_romanization
            .entry(entry.romanization.clone())
            .or_default()
            .push(idx);
        self.by_code
            .entry(entry.phonetic_code.clone())
            .or_default()
            .push(idx);
        self.entries.push(entry);
        true
    }

    /// Convenience insert used by tests and demos.
    pub fn insert_word(&mut self, romanization: &str, text: &str, frequency: u64) -> bool {
        self.insert(CorpusEntry::new(text, romanization, frequency, Category::Word))
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry counts per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        counts
    }

    fn collect(&self, positions: &[usize]) -> Vec<CorpusEntry> {
        positions.iter().map(|&i| self.entries[i].clone()).collect()
    }

    /// Save the entries with bincode. Indices are rebuilt on load.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<(), StoreError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &self.entries).map_err(StoreError::unavailable)
    }

    /// Load a store written by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let entries: Vec<CorpusEntry> =
            bincode::deserialize_from(reader).map_err(StoreError::unavailable)?;
        Ok(Self::from_entries(entries))
    }
}

impl CandidateStore for MemoryStore {
    fn lookup_by_romanization(&self, romanization: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        Ok(self
            .by_romanization
            .get(romanization)
            .map(|positions| self.collect(positions))
            .unwrap_or_default())
    }

    fn lookup_by_code(&self, code: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        Ok(self
            .by_code
            .get(code)
            .map(|positions| self.collect(positions))
            .unwrap_or_default())
    }

    fn lookup_by_code_prefix(&self, prefix: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        let mut positions: Vec<usize> = self
            .by_code
            .range(prefix.to_string()..)
            .take_while(|(code, _)| code.starts_with(prefix))
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect();
        positions.sort_unstable();
        Ok(self.collect(&positions))
    }
}
