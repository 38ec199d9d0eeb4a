//! Namespace keys and durable storage key layout.
//!
//! Every distinct `(server URL, user)` pair owns one namespace. Its decisions
//! live under a single storage entry:
//!
//! ```text
//! immich-swipe-reviewed:<namespace key>
//! ```
//!
//! Scanning storage keys by [`STORAGE_PREFIX`] therefore lists every namespace
//! that has been touched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::{hash_fields, short_hash};
use crate::kv::KvStore;

/// Application prefix shared by all decision entries.
pub const STORAGE_PREFIX: &str = "immich-swipe-reviewed";

/// Isolation key for one server account.
///
/// The key is a 20-character truncated SHA-256 over the normalized server URL
/// and the user identity, e.g. `"3f5c0a9b1e27d4c8f6a0"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NamespaceKey(String);

impl NamespaceKey {
  /// Derive the key for a server account.
  ///
  /// Only the server URL and the user take part; the API key does not.
  pub fn derive(server_url: &str, user: &str) -> Self {
    let server_url = normalize_server_url(server_url);
    let full = hash_fields(&[server_url, user]);
    Self(short_hash(&full).to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for NamespaceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Strip whitespace and trailing slashes so `http://a/` and `http://a` share a namespace.
pub fn normalize_server_url(server_url: &str) -> &str {
  server_url.trim().trim_end_matches('/')
}

fn key_prefix() -> String {
  format!("{STORAGE_PREFIX}:")
}

/// Durable storage key for a namespace.
pub fn storage_key(namespace: &NamespaceKey) -> String {
  format!("{}{}", key_prefix(), namespace)
}

/// List the namespaces that have an entry in `storage`.
///
/// Inverse of [`storage_key`]: `storage_key(&ns)` is a key in `storage` for every `ns` returned.
pub fn list_namespaces<S: KvStore + ?Sized>(storage: &S) -> Vec<NamespaceKey> {
  let prefix = key_prefix();
  storage
    .keys_with_prefix(&prefix)
    .into_iter()
    .filter_map(|key| key.strip_prefix(&prefix).map(|ns| NamespaceKey(ns.to_string())))
    .collect()
}
