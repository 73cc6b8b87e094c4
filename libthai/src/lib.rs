//! libthai crate root
//!
//! Thai-specific data and plumbing around `libthai-core`: the curated seed
//! corpus, a TSV importer, and bootstrap of the persistent corpus database
//! used by the `libthai` binary.
//!
//! Public API exported here:
//! - `ThaiConfig` from `config`
//! - `seed` lists and loaders
//! - `import_tsv` / `ImportReport` from `import`
//! - `open_store` / `build_store` for the redb corpus

pub mod config;
pub mod import;
pub mod seed;

pub use config::ThaiConfig;
pub use import::{import_tsv, ImportReport};

// Convenience re-exports for common types used by callers.
pub use libthai_core::{
    CandidateStore, Category, Config, CorpusEntry, Engine, ImeEngine, InputSession, KeyEvent,
    KeyResult, KeystrokeSource, MatchType, MemoryStore, RedbStore, ScoredMatch, StoreError,
};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Write side of a corpus store, used while building it.
///
/// The ranking engine never writes, so this lives here rather than on
/// `CandidateStore`.
pub trait StoreWriter {
    /// Insert entries, skipping ones the store rejects. Returns how many
    /// were inserted.
    fn insert_entries(&mut self, entries: Vec<CorpusEntry>) -> Result<usize, StoreError>;
}

impl StoreWriter for MemoryStore {
    fn insert_entries(&mut self, entries: Vec<CorpusEntry>) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for entry in entries {
            if self.insert(entry) {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

impl StoreWriter for RedbStore {
    fn insert_entries(&mut self, entries: Vec<CorpusEntry>) -> Result<usize, StoreError> {
        self.insert_many(entries)
    }
}

/// Open the corpus database at `path`, seeding it if it is new or empty.
pub fn open_store<P: AsRef<Path>>(path: P) -> Result<RedbStore, StoreError> {
    let mut store = RedbStore::open(path.as_ref())?;
    if store.is_empty()? {
        tracing::info!(path = %path.as_ref().display(), "corpus database is empty, seeding");
        seed::load_all(&mut store)?;
    }
    Ok(store)
}

/// Summary of `build_store`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub seeded: usize,
    pub imported: Option<ImportReport>,
}

/// Recreate the corpus database at `path` from the seed lists plus an
/// optional TSV file. Any existing database is replaced.
pub fn build_store<P: AsRef<Path>>(
    path: P,
    tsv: Option<&Path>,
) -> Result<(RedbStore, BuildReport), StoreError> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    let mut store = RedbStore::open(path)?;
    let mut report = BuildReport {
        seeded: seed::load_all(&mut store)?,
        imported: None,
    };
    if let Some(tsv) = tsv {
        let reader = BufReader::new(File::open(tsv)?);
        report.imported = Some(import_tsv(reader, &mut store)?);
    }
    tracing::info!(path = %path.display(), ?report, "built corpus database");
    Ok((store, report))
}

/// In-memory store holding the seed corpus only.
pub fn seed_memory_store() -> MemoryStore {
    MemoryStore::from_entries(seed::seed_entries())
}
