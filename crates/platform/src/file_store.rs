//! File-backed key-value storage.
//!
//! # Storage Layout
//!
//! ```text
//! {data_dir}/
//! └── storage.json    # { "<key>": "<value>", ... }
//! ```
//!
//! Reads are served from the copy loaded at `open`. Every write re-reads the
//! document from disk and changes only its own key, so handles sharing a file
//! keep each other's entries; the last writer of a given key wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use swipe_core::{KvStore, StorageError};
use tracing::{debug, warn};

use crate::error::PlatformError;
use crate::paths::storage_path;

/// Storage document file name.
pub const STORAGE_FILENAME: &str = "storage.json";

/// Durable string storage persisted as a single JSON object.
#[derive(Debug, Clone)]
pub struct FileKvStore {
  path: PathBuf,
  entries: BTreeMap<String, String>,
}

impl FileKvStore {
  /// Open the storage document at `path`.
  ///
  /// A missing file opens empty. A corrupt file is logged and also opens empty;
  /// it is overwritten by the next write.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlatformError> {
    let path = path.into();
    match read_entries(&path) {
      Ok(entries) => Ok(Self { path, entries }),
      Err(e) => Err(PlatformError::ReadStorage { path, source: e }),
    }
  }

  /// Open the storage document in the platform data directory.
  pub fn open_default() -> Result<Self, PlatformError> {
    Self::open(storage_path()?)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Write `entries` atomically (write to temp, then rename).
  fn save(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    let write_err = |source: io::Error| StorageError::Write {
      key: key.to_string(),
      source,
    };

    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(entries).map_err(StorageError::Serialize)?;
    let mut temp_name = self.path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, &content).map_err(write_err)?;
    fs::rename(&temp_path, &self.path).map_err(write_err)?;

    debug!(path = %self.path.display(), key = %key, entries = entries.len(), "saved storage file");
    Ok(())
  }

  /// Set or remove `key` in the on-disk document, then refresh the loaded copy.
  ///
  /// The loaded copy is left untouched if the write fails.
  fn commit(&mut self, key: &str, new_value: Option<String>) -> Result<(), StorageError> {
    let mut entries = read_entries(&self.path).map_err(|source| StorageError::Read {
      key: key.to_string(),
      source,
    })?;

    let changed = match new_value {
      Some(value) => {
        entries.insert(key.to_string(), value);
        true
      }
      None => entries.remove(key).is_some(),
    };

    if changed {
      self.save(key, &entries)?;
    }
    self.entries = entries;
    Ok(())
  }
}

/// Read the document at `path`.
///
/// A missing file reads as empty. A corrupt file is logged and also reads as
/// empty; it is overwritten by the next write.
fn read_entries(path: &Path) -> io::Result<BTreeMap<String, String>> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "storage file not found, starting empty");
      return Ok(BTreeMap::new());
    }
    Err(e) => return Err(e),
  };

  match serde_json::from_str(&content) {
    Ok(entries) => Ok(entries),
    Err(e) => {
      warn!(path = %path.display(), error = %e, "ignoring corrupt storage file");
      Ok(BTreeMap::new())
    }
  }
}

impl KvStore for FileKvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.commit(key, Some(value.to_string()))
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    self.commit(key, None)
  }

  fn keys(&self) -> Vec<String> {
    self.entries.keys().cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use swipe_core::{Decision, Identity, ReviewedStore, STORAGE_PREFIX};
  use tempfile::TempDir;
  use tracing_test::traced_test;

  fn temp_store() -> (TempDir, FileKvStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKvStore::open(temp_dir.path().join(STORAGE_FILENAME)).unwrap();
    (temp_dir, store)
  }

  #[test]
  fn missing_file_opens_empty() {
    let (_temp, store) = temp_store();
    assert!(store.keys().is_empty());
    assert!(!store.path().exists());
  }

  #[test]
  fn set_persists_across_reopen() {
    let (_temp, mut store) = temp_store();
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.remove("a").unwrap();

    let reopened = FileKvStore::open(store.path()).unwrap();
    assert_eq!(reopened.keys(), vec!["b".to_string()]);
    assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
  }

  #[test]
  fn creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join(STORAGE_FILENAME);
    let mut store = FileKvStore::open(&path).unwrap();
    store.set("a", "1").unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
  }

  #[test]
  #[traced_test]
  fn corrupt_file_opens_empty() {
    let (_temp, store) = temp_store();
    fs::write(store.path(), "{ definitely not json").unwrap();

    let mut reopened = FileKvStore::open(store.path()).unwrap();
    assert!(reopened.keys().is_empty());
    assert!(logs_contain("ignoring corrupt storage file"));

    reopened.set("a", "1").unwrap();
    let content = fs::read_to_string(reopened.path()).unwrap();
    assert!(content.contains("\"a\""));
  }

  #[test]
  fn failed_write_rolls_back() {
    let (temp, mut store) = temp_store();
    store.set("a", "1").unwrap();
    // A directory where the temp file should go.
    fs::create_dir(temp.path().join(format!("{STORAGE_FILENAME}.tmp"))).unwrap();

    let err = store.set("b", "2").unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
    assert_eq!(store.get("b").unwrap(), None);
    assert_eq!(FileKvStore::open(store.path()).unwrap().keys(), vec!["a".to_string()]);
  }

  #[test]
  fn unreadable_document_blocks_writes() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    let mut store = FileKvStore::open(blocker.join(STORAGE_FILENAME)).unwrap();
    // A regular file where the parent directory should be.
    fs::write(&blocker, "").unwrap();

    let err = store.set("a", "1").unwrap_err();
    assert!(matches!(err, StorageError::Read { .. }));
    assert_eq!(store.get("a").unwrap(), None);
  }

  #[test]
  fn handles_sharing_a_file_keep_each_others_keys() {
    let (_temp, mut first) = temp_store();
    let mut second = FileKvStore::open(first.path()).unwrap();

    first.set("a", "1").unwrap();
    second.set("b", "2").unwrap();
    first.remove("missing").unwrap();

    let reopened = FileKvStore::open(first.path()).unwrap();
    assert_eq!(reopened.keys(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(first.keys(), vec!["a".to_string(), "b".to_string()]);

    // Same key: last writer wins.
    first.set("b", "3").unwrap();
    assert_eq!(FileKvStore::open(first.path()).unwrap().get("b").unwrap().as_deref(), Some("3"));
  }

  #[test]
  fn concurrent_accounts_do_not_erase_each_other() {
    let (_temp, alice_storage) = temp_store();
    let bob_storage = FileKvStore::open(alice_storage.path()).unwrap();
    let path = alice_storage.path().to_path_buf();
    let alice = Identity::new("http://server-a", "key-a", "Alice");
    let bob = Identity::new("http://server-b", "key-b", "Bob");

    let mut as_alice = ReviewedStore::new(alice_storage, alice.clone());
    let mut as_bob = ReviewedStore::new(bob_storage, bob);
    as_alice.mark_reviewed("asset-1", Decision::Keep).unwrap();
    as_bob.mark_reviewed("asset-9", Decision::Delete).unwrap();
    drop(as_alice);
    drop(as_bob);

    let mut reopened = ReviewedStore::new(FileKvStore::open(&path).unwrap(), alice);
    assert_eq!(reopened.get_decision("asset-1"), Some(Decision::Keep));
    assert_eq!(reopened.storage().keys_with_prefix(STORAGE_PREFIX).len(), 2);
  }

  #[test]
  fn decisions_survive_restart() {
    let (_temp, store) = temp_store();
    let path = store.path().to_path_buf();
    let alice = Identity::new("http://server-a", "key-a", "Alice");
    let bob = Identity::new("http://server-b", "key-b", "Bob");

    let mut reviewed = ReviewedStore::new(store, alice.clone());
    reviewed.mark_reviewed("asset-1", Decision::Keep).unwrap();
    reviewed.mark_reviewed("asset-2", Decision::Delete).unwrap();
    drop(reviewed);

    let mut as_bob = ReviewedStore::new(FileKvStore::open(&path).unwrap(), bob);
    assert!(!as_bob.is_reviewed("asset-1"));
    drop(as_bob);

    let storage = FileKvStore::open(&path).unwrap();
    assert_eq!(storage.keys_with_prefix(STORAGE_PREFIX).len(), 2);

    let mut as_alice = ReviewedStore::new(storage, alice);
    assert_eq!(as_alice.get_decision("asset-1"), Some(Decision::Keep));
    assert_eq!(as_alice.get_decision("asset-2"), Some(Decision::Delete));
  }
}
