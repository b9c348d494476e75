//! Durable key-value storage behind the item store.
//!
//! The store only needs get/set/remove over named records, so the medium
//! (files on disk, memory, a remote service) is swappable behind `Persistence`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AgendaError, AgendaResult};

pub trait Persistence {
    /// Read a record. Missing records are `Ok(None)`.
    fn get(&self, key: &str) -> AgendaResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()>;

    fn remove(&mut self, key: &str) -> AgendaResult<()>;
}

/// One JSON file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AgendaResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AgendaError::Persistence(format!(
                "Invalid record key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Persistence for FileStore {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        let path = self.path_for(key)?;

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write-then-rename so readers never see a half-written record
        let temp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AgendaResult<()> {
        let path = self.path_for(key)?;

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Persistence for MemoryStore {
    fn get(&self, key: &str) -> AgendaResult<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> AgendaResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AgendaResult<()> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("data"));

        assert_eq!(store.get("cultural-events").unwrap(), None);

        store.set("cultural-events", "[]").unwrap();
        assert_eq!(store.get("cultural-events").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data/cultural-events.json").exists());
        assert!(!dir.path().join("data/cultural-events.json.tmp").exists());

        store.set("cultural-events", "[1]").unwrap();
        assert_eq!(store.get("cultural-events").unwrap().as_deref(), Some("[1]"));

        store.remove("cultural-events").unwrap();
        assert_eq!(store.get("cultural-events").unwrap(), None);
    }

    #[test]
    fn file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(store.remove("favorite-events").is_ok());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("../escape", "x"),
            Err(AgendaError::Persistence(_))
        ));
        assert!(store.get("").is_err());
    }

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();

        store.set("event-reminders", "{}").unwrap();
        assert_eq!(store.get("event-reminders").unwrap().as_deref(), Some("{}"));

        store.remove("event-reminders").unwrap();
        assert_eq!(store.get("event-reminders").unwrap(), None);
    }
}
