//! Error types for libthai-core.
//!
//! The ranking core has exactly one failure kind: the candidate store could
//! not answer. Empty or malformed input is never an error, it simply yields
//! no matches.

use thiserror::Error;

/// Failure reported by a `CandidateStore`.
///
/// Propagated to the caller unmodified; the engine never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot serve lookups (closed, I/O failure, database error).
    #[error("candidate store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A persisted entry exists but cannot be decoded.
    #[error("corrupt corpus entry {id}: {reason}")]
    Corrupt { id: u64, reason: String },
}

impl StoreError {
    pub fn unavailable<E: std::fmt::Display>(err: E) -> Self {
        StoreError::Unavailable {
            reason: err.to_string(),
        }
    }

    /// Error returned by a store after `close()`.
    pub fn closed() -> Self {
        StoreError::Unavailable {
            reason: "store is closed".to_string(),
        }
    }
}

macro_rules! unavailable_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    StoreError::unavailable(err)
                }
            }
        )*
    };
}

unavailable_from!(
    redb::Error,
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::unavailable(err)
    }
}

/// Failure while loading or saving a `Config`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}
