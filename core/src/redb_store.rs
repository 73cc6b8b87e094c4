//! Persistent candidate store backed by `redb`.
//!
//! Layout:
//! - `entries`: id -> bincode-encoded `CorpusEntry` (ids are insertion order)
//! - `pairs`: (romanization, text) -> id, enforces uniqueness
//! - `by_romanization`: romanization -> ids (multimap)
//! - `by_code`: phonetic code -> ids (multimap), range-scanned for prefixes
//!
//! Writes batch into one transaction per call. The ranking engine only ever
//! reads; after `close()` every lookup fails with `StoreError::Unavailable`.

use crate::error::StoreError;
use crate::store::{CandidateStore, Category, CorpusEntry};
use redb::{
    Database, MultimapTableDefinition, ReadTransaction, ReadableTable, ReadableTableMetadata,
    TableDefinition,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const ENTRIES: TableDefinition<u64, &[u8]> = TableDefinition::new("entries");
const PAIRS: TableDefinition<(&str, &str), u64> = TableDefinition::new("pairs");
const BY_ROMANIZATION: MultimapTableDefinition<&str, u64> =
    MultimapTableDefinition::new("by_romanization");
const BY_CODE: MultimapTableDefinition<&str, u64> = MultimapTableDefinition::new("by_code");

pub struct RedbStore {
    db: Option<Database>,
    path: PathBuf,
}

impl RedbStore {
    /// Create or open a store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Create every table up front so read transactions never hit a
        // missing table on a fresh database.
        let txn = db.begin_write()?;
        txn.open_table(ENTRIES)?;
        txn.open_table(PAIRS)?;
        txn.open_multimap_table(BY_ROMANIZATION)?;
        txn.open_multimap_table(BY_CODE)?;
        txn.commit()?;

        tracing::debug!(path = %path.display(), "opened redb candidate store");
        Ok(Self {
            db: Some(db),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// Release the database. Later lookups report `StoreError::Unavailable`.
    pub fn close(&mut self) {
        if self.db.take().is_some() {
            tracing::debug!(path = %self.path.display(), "closed redb candidate store");
        }
    }

    fn db(&self) -> Result<&Database, StoreError> {
        self.db.as_ref().ok_or_else(StoreError::closed)
    }

    /// Insert one entry. Returns false for duplicates and unindexable entries.
    pub fn insert(&self, entry: CorpusEntry) -> Result<bool, StoreError> {
        Ok(self.insert_many(std::iter::once(entry))? == 1)
    }

    /// Insert entries in a single write transaction, skipping duplicate
    /// (romanization, text) pairs and entries without a phonetic code.
    /// Returns the number actually inserted.
    pub fn insert_many<I: IntoIterator<Item = CorpusEntry>>(
        &self,
        entries: I,
    ) -> Result<usize, StoreError> {
        let txn = self.db()?.begin_write()?;
        let mut inserted = 0;
        {
            let mut table = txn.open_table(ENTRIES)?;
            let mut pairs = txn.open_table(PAIRS)?;
            let mut by_romanization = txn.open_multimap_table(BY_ROMANIZATION)?;
            let mut by_code = txn.open_multimap_table(BY_CODE)?;

            let mut next_id = table.last()?.map(|(id, _)| id.value() + 1).unwrap_or(0);
            for entry in entries {
                if !entry.is_indexable() {
                    continue;
                }
                let pair = (entry.romanization.as_str(), entry.text.as_str());
                if pairs.get(pair)?.is_some() {
                    continue;
                }
                let bytes = bincode::serialize(&entry).map_err(StoreError::unavailable)?;
                table.insert(next_id, bytes.as_slice())?;
                pairs.insert(pair, next_id)?;
                by_romanization.insert(entry.romanization.as_str(), next_id)?;
                by_code.insert(entry.phonetic_code.as_str(), next_id)?;
                next_id += 1;
                inserted += 1;
            }
        }
        txn.commit()?;
        Ok(inserted)
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<u64, StoreError> {
        let txn = self.db()?.begin_read()?;
        let table = txn.open_table(ENTRIES)?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Entry counts per category.
    pub fn category_counts(&self) -> Result<BTreeMap<Category, usize>, StoreError> {
        let txn = self.db()?.begin_read()?;
        let table = txn.open_table(ENTRIES)?;
        let mut counts = BTreeMap::new();
        for item in table.iter()? {
            let (id, bytes) = item?;
            let entry = decode(id.value(), bytes.value())?;
            *counts.entry(entry.category).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn lookup_exact(
        &self,
        index: MultimapTableDefinition<&str, u64>,
        key: &str,
    ) -> Result<Vec<CorpusEntry>, StoreError> {
        let txn = self.db()?.begin_read()?;
        let ids = {
            let table = txn.open_multimap_table(index)?;
            let mut ids = Vec::new();
            for id in table.get(key)? {
                ids.push(id?.value());
            }
            ids
        };
        load_entries(&txn, &ids)
    }
}

fn decode(id: u64, bytes: &[u8]) -> Result<CorpusEntry, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corrupt {
        id,
        reason: e.to_string(),
    })
}

fn load_entries(txn: &ReadTransaction, ids: &[u64]) -> Result<Vec<CorpusEntry>, StoreError> {
    let table = txn.open_table(ENTRIES)?;
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        match table.get(id)? {
            Some(bytes) => out.push(decode(id, bytes.value())?),
            None => {
                return Err(StoreError::Corrupt {
                    id,
                    reason: "index points at a missing entry".to_string(),
                })
            }
        }
    }
    Ok(out)
}

impl CandidateStore for RedbStore {
    fn lookup_by_romanization(&self, romanization: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        self.lookup_exact(BY_ROMANIZATION, romanization)
    }

    fn lookup_by_code(&self, code: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        self.lookup_exact(BY_CODE, code)
    }

    fn lookup_by_code_prefix(&self, prefix: &str) -> Result<Vec<CorpusEntry>, StoreError> {
        let txn = self.db()?.begin_read()?;
        let ids = {
            let table = txn.open_multimap_table(BY_CODE)?;
            let mut ids = Vec::new();
            for item in table.range(prefix..)? {
                let (code, values) = item?;
                if !code.value().starts_with(prefix) {
                    break;
                }
                for id in values {
                    ids.push(id?.value());
                }
            }
            ids.sort_unstable();
            ids
        };
        load_entries(&txn, &ids)
    }
}
