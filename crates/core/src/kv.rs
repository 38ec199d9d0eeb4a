//! Durable key-value storage seam.

use std::collections::BTreeMap;

use crate::error::StorageError;

/// Synchronous string key-value storage that outlives the process.
///
/// The decision store treats a failed read as a missing entry.
pub trait KvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

  /// Remove an entry. Removing a missing key is not an error.
  fn remove(&mut self, key: &str) -> Result<(), StorageError>;

  /// All keys currently stored, in no particular order.
  fn keys(&self) -> Vec<String>;

  fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
    self.keys().into_iter().filter(|key| key.starts_with(prefix)).collect()
  }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    (**self).get(key)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    (**self).set(key, value)
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    (**self).remove(key)
  }

  fn keys(&self) -> Vec<String> {
    (**self).keys()
  }
}

/// In-memory storage with an optional size quota.
///
/// The quota counts key and value bytes across all entries, which is how
/// browser-style storage reports "quota exceeded".
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
  entries: BTreeMap<String, String>,
  quota: Option<usize>,
}

impl MemoryKvStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_quota(limit: usize) -> Self {
    Self {
      entries: BTreeMap::new(),
      quota: Some(limit),
    }
  }

  /// Bytes used by keys and values.
  pub fn usage(&self) -> usize {
    self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn entry_size(key: &str, value: &str) -> usize {
  key.len() + value.len()
}

impl KvStore for MemoryKvStore {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    if let Some(limit) = self.quota {
      let current = self.entries.get(key).map(|old| entry_size(key, old)).unwrap_or(0);
      let needed = self.usage() - current + entry_size(key, value);
      if needed > limit {
        return Err(StorageError::QuotaExceeded {
          key: key.to_string(),
          needed,
          limit,
        });
      }
    }
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    self.entries.remove(key);
    Ok(())
  }

  fn keys(&self) -> Vec<String> {
    self.entries.keys().cloned().collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_remove() {
    let mut kv = MemoryKvStore::new();
    assert_eq!(kv.get("a").unwrap(), None);

    kv.set("a", "1").unwrap();
    assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));

    kv.remove("a").unwrap();
    kv.remove("a").unwrap();
    assert!(kv.is_empty());
  }

  #[test]
  fn prefix_scan() {
    let mut kv = MemoryKvStore::new();
    kv.set("app:one", "1").unwrap();
    kv.set("app:two", "2").unwrap();
    kv.set("other", "3").unwrap();

    assert_eq!(kv.keys_with_prefix("app:"), vec!["app:one".to_string(), "app:two".to_string()]);
  }

  #[test]
  fn quota_rejects_oversized_write() {
    let mut kv = MemoryKvStore::with_quota(10);
    kv.set("k", "12345").unwrap();

    let err = kv.set("k2", "123456789").unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { needed: 17, limit: 10, .. }));
    assert_eq!(kv.get("k2").unwrap(), None);
  }

  #[test]
  fn quota_accounts_for_overwritten_value() {
    let mut kv = MemoryKvStore::with_quota(10);
    kv.set("k", "123456789").unwrap();
    kv.set("k", "987654321").unwrap();
    assert_eq!(kv.usage(), 10);
  }

  #[test]
  fn mutable_reference_is_a_store() {
    fn write_one<S: KvStore>(mut storage: S) {
      storage.set("a", "1").unwrap();
    }

    let mut kv = MemoryKvStore::new();
    write_one(&mut kv);
    assert_eq!(kv.len(), 1);
  }
}
