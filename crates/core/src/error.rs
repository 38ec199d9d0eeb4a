//! Error types for swipe-core

use thiserror::Error;

/// Errors raised by a [`KvStore`](crate::KvStore) backend.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
  QuotaExceeded { key: String, needed: usize, limit: usize },

  #[error("failed to read storage entry '{key}': {source}")]
  Read {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write storage entry '{key}': {source}")]
  Write {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to serialize storage document: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Errors surfaced by mutating review operations.
///
/// Queries never fail; only writes to durable storage can.
#[derive(Debug, Error)]
pub enum ReviewError {
  #[error("failed to persist review decisions: {0}")]
  Storage(#[from] StorageError),

  #[error("failed to serialize decision record: {0}")]
  Serialize(#[source] serde_json::Error),
}
