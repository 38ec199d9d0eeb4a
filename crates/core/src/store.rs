//! Namespaced review decision store.
//!
//! The store keeps the [`DecisionRecord`] of the active namespace in memory and
//! writes it through to a [`KvStore`] after every change. Before each call the
//! namespace is recomputed from the [`IdentityProvider`]; when it changed, the
//! outgoing record is flushed (if it has unsaved changes) and the incoming one
//! is loaded, or created empty.
//!
//! Touching a configured namespace materializes its storage entry, so a prefix
//! scan over storage keys lists every account that has been reviewed with.

use tracing::{debug, info, warn};

use crate::Result;
use crate::error::ReviewError;
use crate::identity::IdentityProvider;
use crate::kv::KvStore;
use crate::namespace::{NamespaceKey, storage_key};
use crate::record::{Decision, DecisionRecord};

/// Decision counts for the active namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewStats {
  pub kept: usize,
  pub deleted: usize,
}

impl ReviewStats {
  pub fn total(&self) -> usize {
    self.kept + self.deleted
  }
}

#[derive(Debug)]
struct ActiveRecord {
  namespace: NamespaceKey,
  record: DecisionRecord,
  /// In-memory changes not yet written to storage.
  dirty: bool,
}

/// Keep/delete decisions scoped to the active server account.
pub struct ReviewedStore<S, P> {
  storage: S,
  identity: P,
  active: ActiveRecord,
}

impl<S: KvStore, P: IdentityProvider> ReviewedStore<S, P> {
  /// Open the store for whichever account `identity` currently reports.
  pub fn new(storage: S, identity: P) -> Self {
    let current = identity.identity();
    let mut store = Self {
      active: ActiveRecord {
        namespace: current.namespace(),
        record: DecisionRecord::new(),
        dirty: false,
      },
      storage,
      identity,
    };
    store.active = store.load(current.namespace(), current.is_configured());
    store
  }

  /// Record a keep/delete verdict and persist it.
  pub fn mark_reviewed(&mut self, asset_id: &str, decision: Decision) -> Result<()> {
    self.sync_namespace();
    if self.active.record.mark(asset_id, decision) {
      self.active.dirty = true;
    }
    debug!(asset = %asset_id, decision = %decision, namespace = %self.active.namespace, "marked asset reviewed");
    self.persist()
  }

  /// Forget any verdict for `asset_id` and persist. Unknown ids are not an error.
  pub fn unmark_reviewed(&mut self, asset_id: &str) -> Result<()> {
    self.sync_namespace();
    if self.active.record.unmark(asset_id) {
      self.active.dirty = true;
    }
    debug!(asset = %asset_id, namespace = %self.active.namespace, "unmarked asset");
    self.persist()
  }

  pub fn is_reviewed(&mut self, asset_id: &str) -> bool {
    self.sync_namespace();
    self.active.record.contains(asset_id)
  }

  pub fn get_decision(&mut self, asset_id: &str) -> Option<Decision> {
    self.sync_namespace();
    self.active.record.decision(asset_id)
  }

  /// Drop every decision of the active namespace and remove its storage entry.
  pub fn clear(&mut self) -> Result<()> {
    self.sync_namespace();
    let key = storage_key(&self.active.namespace);
    self.active.record = DecisionRecord::new();
    self.active.dirty = true;
    self.storage.remove(&key)?;
    self.active.dirty = false;
    info!(namespace = %self.active.namespace, "cleared review decisions");
    Ok(())
  }

  /// Write pending changes, if any.
  ///
  /// Mutations already persist; this retries after a failed write.
  pub fn flush(&mut self) -> Result<()> {
    self.sync_namespace();
    if !self.active.dirty {
      return Ok(());
    }
    self.persist()
  }

  pub fn kept(&mut self) -> Vec<String> {
    self.sync_namespace();
    self.active.record.kept().to_vec()
  }

  pub fn deleted(&mut self) -> Vec<String> {
    self.sync_namespace();
    self.active.record.deleted().to_vec()
  }

  pub fn stats(&mut self) -> ReviewStats {
    self.sync_namespace();
    ReviewStats {
      kept: self.active.record.kept().len(),
      deleted: self.active.record.deleted().len(),
    }
  }

  /// Namespace of the active account.
  pub fn namespace(&mut self) -> NamespaceKey {
    self.sync_namespace();
    self.active.namespace.clone()
  }

  /// True when the last write failed and changes are only held in memory.
  pub fn has_unsaved_changes(&self) -> bool {
    self.active.dirty
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn into_storage(self) -> S {
    self.storage
  }

  /// Follow the identity provider to its current namespace.
  fn sync_namespace(&mut self) {
    let current = self.identity.identity();
    let namespace = current.namespace();
    if namespace == self.active.namespace {
      return;
    }

    if self.active.dirty {
      if let Err(e) = self.persist() {
        warn!(
          namespace = %self.active.namespace,
          error = %e,
          "failed to flush decisions before namespace switch, unsaved changes dropped"
        );
      }
    }

    info!(from = %self.active.namespace, to = %namespace, "switching review namespace");
    self.active = self.load(namespace, current.is_configured());
  }

  /// Load the record for `namespace`, creating its entry when missing.
  fn load(&mut self, namespace: NamespaceKey, materialize: bool) -> ActiveRecord {
    let key = storage_key(&namespace);
    let (record, found) = match self.storage.get(&key) {
      Ok(Some(content)) => match DecisionRecord::parse(&content) {
        Ok(record) => {
          debug!(key = %key, kept = record.kept().len(), deleted = record.deleted().len(), "loaded decision record");
          (record, true)
        }
        Err(e) => {
          warn!(key = %key, error = %e, "discarding malformed decision record");
          (DecisionRecord::new(), true)
        }
      },
      Ok(None) => {
        debug!(key = %key, "no decision record, starting empty");
        (DecisionRecord::new(), false)
      }
      Err(e) => {
        warn!(key = %key, error = %e, "failed to read decision record, starting empty");
        (DecisionRecord::new(), true)
      }
    };

    let active = ActiveRecord {
      namespace,
      record,
      dirty: !found && materialize,
    };
    if active.dirty {
      if let Err(e) = write_record(&mut self.storage, &active) {
        warn!(key = %key, error = %e, "failed to create decision record");
        return active;
      }
      return ActiveRecord { dirty: false, ..active };
    }
    active
  }

  fn persist(&mut self) -> Result<()> {
    write_record(&mut self.storage, &self.active)?;
    self.active.dirty = false;
    Ok(())
  }
}

fn write_record<S: KvStore>(storage: &mut S, active: &ActiveRecord) -> Result<()> {
  let content = active.record.to_json().map_err(ReviewError::Serialize)?;
  storage.set(&storage_key(&active.namespace), &content)?;
  Ok(())
}
