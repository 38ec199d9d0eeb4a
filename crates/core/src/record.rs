//! Decisions and the per-namespace decision record.
//!
//! # Persisted Format
//!
//! ```json
//! {
//!   "kept": ["asset-1", "asset-7"],
//!   "deleted": ["asset-2"]
//! }
//! ```
//!
//! Both lists keep insertion order. An asset id appears in at most one list,
//! at most once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reviewer's verdict on one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
  Keep,
  Delete,
}

impl Decision {
  pub fn as_str(self) -> &'static str {
    match self {
      Decision::Keep => "keep",
      Decision::Delete => "delete",
    }
  }
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
#[error("unknown decision '{0}', expected 'keep' or 'delete'")]
pub struct ParseDecisionError(String);

impl FromStr for Decision {
  type Err = ParseDecisionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "keep" => Ok(Decision::Keep),
      "delete" => Ok(Decision::Delete),
      _ => Err(ParseDecisionError(s.to_string())),
    }
  }
}

/// Kept and deleted asset ids for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
  #[serde(default)]
  kept: Vec<String>,
  #[serde(default)]
  deleted: Vec<String>,
}

impl DecisionRecord {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse a persisted record.
  ///
  /// Missing fields default to empty lists. Duplicates are dropped and an id
  /// found in both lists is kept only in `deleted`.
  pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
    let mut record: DecisionRecord = serde_json::from_str(content)?;
    record.normalize();
    Ok(record)
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Record `decision` for `asset_id`. Returns whether anything changed.
  pub fn mark(&mut self, asset_id: &str, decision: Decision) -> bool {
    let (target, other) = match decision {
      Decision::Keep => (&mut self.kept, &mut self.deleted),
      Decision::Delete => (&mut self.deleted, &mut self.kept),
    };

    let removed = remove_id(other, asset_id);
    if target.iter().any(|id| id == asset_id) {
      return removed;
    }
    target.push(asset_id.to_string());
    true
  }

  /// Forget `asset_id`. Returns whether it was present.
  pub fn unmark(&mut self, asset_id: &str) -> bool {
    let kept = remove_id(&mut self.kept, asset_id);
    let deleted = remove_id(&mut self.deleted, asset_id);
    kept || deleted
  }

  pub fn decision(&self, asset_id: &str) -> Option<Decision> {
    if self.kept.iter().any(|id| id == asset_id) {
      Some(Decision::Keep)
    } else if self.deleted.iter().any(|id| id == asset_id) {
      Some(Decision::Delete)
    } else {
      None
    }
  }

  pub fn contains(&self, asset_id: &str) -> bool {
    self.decision(asset_id).is_some()
  }

  pub fn kept(&self) -> &[String] {
    &self.kept
  }

  pub fn deleted(&self) -> &[String] {
    &self.deleted
  }

  pub fn len(&self) -> usize {
    self.kept.len() + self.deleted.len()
  }

  pub fn is_empty(&self) -> bool {
    self.kept.is_empty() && self.deleted.is_empty()
  }

  fn normalize(&mut self) {
    dedup_in_order(&mut self.deleted);
    dedup_in_order(&mut self.kept);
    let deleted = &self.deleted;
    self.kept.retain(|id| !deleted.contains(id));
  }
}

fn remove_id(ids: &mut Vec<String>, asset_id: &str) -> bool {
  let before = ids.len();
  ids.retain(|id| id != asset_id);
  ids.len() != before
}

fn dedup_in_order(ids: &mut Vec<String>) {
  let mut seen = std::collections::HashSet::new();
  ids.retain(|id| seen.insert(id.clone()));
}
