//! Namespaces command implementation.
//!
//! Lists every account namespace found in storage, without needing an identity.

use anyhow::Result;
use swipe_core::{DecisionRecord, KvStore, list_namespaces, storage_key};

use super::Context;
use crate::output::{print_info, print_json, print_stat};

pub fn cmd_namespaces(ctx: &Context) -> Result<()> {
  let storage = ctx.open_storage()?;
  let active = ctx
    .identity
    .is_configured()
    .then(|| ctx.identity.namespace());

  let mut rows = Vec::new();
  for namespace in list_namespaces(&storage) {
    let record = storage
      .get(&storage_key(&namespace))?
      .and_then(|content| DecisionRecord::parse(&content).ok())
      .unwrap_or_default();
    rows.push((namespace, record));
  }

  if ctx.json {
    let items: Vec<_> = rows
      .iter()
      .map(|(namespace, record)| {
        serde_json::json!({
          "namespace": namespace,
          "active": active.as_ref() == Some(namespace),
          "kept": record.kept().len(),
          "deleted": record.deleted().len(),
        })
      })
      .collect();
    return print_json(&items);
  }

  if rows.is_empty() {
    print_info("No review decisions stored.");
    return Ok(());
  }

  for (namespace, record) in &rows {
    let marker = if active.as_ref() == Some(namespace) { " (active)" } else { "" };
    print_info(&format!("{}{}", namespace, marker));
    print_stat("Kept", &record.kept().len().to_string());
    print_stat("Deleted", &record.deleted().len().to_string());
  }
  Ok(())
}
