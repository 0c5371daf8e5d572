//! Persistence backends. A backend is a plain string key-value store; the
//! account store keeps its whole collection as one JSON blob under a fixed
//! key and never interprets anything else.
//!
//! - [`MemoryBlobStore`] keeps blobs in a map, with an optional size quota
//! - [`FileBlobStore`] keeps one file per key in a directory

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::Result;

pub trait BlobStore {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
