//! swipe-core: Review decision cache for swipe-style photo triage
//!
//! This crate records, per asset, whether the reviewer chose to keep or delete
//! it. Decisions are namespaced by the active server account and persisted
//! through a pluggable [`KvStore`].

mod error;
mod hash;
mod identity;
mod kv;
mod namespace;
mod record;
mod store;

pub use error::{ReviewError, StorageError};
pub use identity::{AuthSession, Identity, IdentityProvider};
pub use kv::{KvStore, MemoryKvStore};
pub use namespace::{NamespaceKey, STORAGE_PREFIX, list_namespaces, normalize_server_url, storage_key};
pub use record::{Decision, DecisionRecord, ParseDecisionError};
pub use store::{ReviewStats, ReviewedStore};

/// Result type for review operations
pub type Result<T> = std::result::Result<T, ReviewError>;
