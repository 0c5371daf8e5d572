use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use super::BlobStore;
use crate::error::Result;

/// Directory-backed blob store: one `<key>.json` file per key.
///
/// Writes land in a temp file next to the target and are renamed into place,
/// so readers see either the previous blob or the new one.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| err.error)?;
        debug!(path = %path.display(), bytes = value.len(), "blob written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_file_is_none() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let store = FileBlobStore::new(dir.path().join("never-created"));
        assert_eq!(store.get("accounts")?, None);
        Ok(())
    }

    #[test]
    fn test_set_creates_dir_and_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().join("data");
        let mut store = FileBlobStore::new(&data_dir);

        store.set("accounts", "[]")?;

        assert_eq!(fs::read_to_string(data_dir.join("accounts.json"))?, "[]");
        assert_eq!(store.get("accounts")?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_overwrite_replaces_contents() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut store = FileBlobStore::new(dir.path());

        store.set("accounts", "[1,2,3]")?;
        store.set("accounts", "[]")?;

        assert_eq!(store.get("accounts")?.as_deref(), Some("[]"));
        // No temp files left behind.
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_unicode_round_trip() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut store = FileBlobStore::new(dir.path());
        store.set("accounts", "[{\"type\":\"Локальная\"}]")?;
        assert_eq!(
            store.get("accounts")?.as_deref(),
            Some("[{\"type\":\"Локальная\"}]")
        );
        Ok(())
    }

    #[test]
    fn test_write_into_file_path_fails() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory")?;
        let mut store = FileBlobStore::new(&blocker);
        assert!(store.set("accounts", "[]").is_err());
        Ok(())
    }
}
