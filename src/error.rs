//! Errors for the account keeper.
//!
//! Contains error variants for the fallible edges of the system:
//! - Persistence backend failures (I/O, storage quota)
//! - Serialization failures (JSON blobs, CSV rows)
//! - Lookups of unknown accounts and empty updates from the command line
//!
//! The store itself never returns these; it logs them and keeps the
//! in-memory collection authoritative.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("no fields given to update account {0}")]
    EmptyUpdate(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded writing {key:?}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
