use std::collections::HashMap;

use super::BlobStore;
use crate::error::{Error, Result};

/// Map-backed blob store for tests and embedding.
///
/// With a quota set, a write fails once the stored keys and values would
/// exceed the limit in bytes, the way browser storage rejects oversized
/// writes.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            blobs: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Seeds a blob directly, bypassing the quota.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.blobs.insert(key.into(), value.into());
    }

    /// Bytes currently held, counting keys and values.
    pub fn used_bytes(&self) -> usize {
        self.blobs.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            let replaced = self.blobs.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(Error::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    limit,
                });
            }
        }
        self.blobs.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("accounts").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryBlobStore::new();
        store.set("accounts", "[]").unwrap();
        assert_eq!(store.get("accounts").unwrap().as_deref(), Some("[]"));

        store.set("accounts", "[{}]").unwrap();
        assert_eq!(store.get("accounts").unwrap().as_deref(), Some("[{}]"));
        assert_eq!(store.used_bytes(), "accounts".len() + 4);
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let mut store = MemoryBlobStore::with_quota(10);
        let result = store.set("accounts", "[1,2,3]");
        assert!(matches!(
            result,
            Err(Error::QuotaExceeded {
                needed: 15,
                limit: 10,
                ..
            })
        ));
        assert_eq!(store.get("accounts").unwrap(), None);
    }

    #[test]
    fn test_quota_accounts_for_replaced_value() {
        let mut store = MemoryBlobStore::with_quota(12);
        store.set("k", "0123456789").unwrap();
        // Replacing the 10-byte value with another 10-byte value fits.
        store.set("k", "abcdefghij").unwrap();
        assert!(store.set("k", "abcdefghijkl").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcdefghij"));
    }
}
