//! Show and stats commands.

use anyhow::Result;
use swipe_core::Decision;

use super::Context;
use crate::output::{print_decision, print_info, print_json, print_stat, print_success};

pub fn cmd_show(ctx: &Context, asset: &str) -> Result<()> {
  let mut store = ctx.open_store()?;
  let decision = store.get_decision(asset);

  if ctx.json {
    print_json(&serde_json::json!({ "asset": asset, "decision": decision }))?;
    return Ok(());
  }

  match decision {
    Some(decision) => print_success(&format!("{}: {}", asset, decision)),
    None => print_info(&format!("{}: not reviewed", asset)),
  }
  Ok(())
}

pub fn cmd_stats(ctx: &Context) -> Result<()> {
  let mut store = ctx.open_store()?;
  let namespace = store.namespace();
  let stats = store.stats();

  if ctx.json {
    let mut value = serde_json::json!({
      "namespace": namespace,
      "kept": stats.kept,
      "deleted": stats.deleted,
      "total": stats.total(),
    });
    if ctx.verbose {
      value["kept_ids"] = serde_json::json!(store.kept());
      value["deleted_ids"] = serde_json::json!(store.deleted());
    }
    return print_json(&value);
  }

  print_success(&format!("Namespace {}", namespace));
  print_stat("Kept", &stats.kept.to_string());
  print_stat("Deleted", &stats.deleted.to_string());
  print_stat("Total", &stats.total().to_string());

  if ctx.verbose {
    let kept = store.kept();
    let deleted = store.deleted();
    if !kept.is_empty() || !deleted.is_empty() {
      println!();
    }
    for id in &kept {
      print_decision(id, Decision::Keep);
    }
    for id in &deleted {
      print_decision(id, Decision::Delete);
    }
  }
  Ok(())
}
