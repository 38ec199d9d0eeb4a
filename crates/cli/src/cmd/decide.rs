//! Mark and unmark commands.

use anyhow::Result;
use swipe_core::Decision;

use super::Context;
use crate::output::{print_json, print_success};

pub fn cmd_mark(ctx: &Context, asset: &str, decision: Decision) -> Result<()> {
  let mut store = ctx.open_store()?;
  store.mark_reviewed(asset, decision)?;

  if ctx.json {
    print_json(&serde_json::json!({ "asset": asset, "decision": decision }))?;
  } else {
    print_success(&format!("Marked {} as {}", asset, decision));
  }
  Ok(())
}

pub fn cmd_unmark(ctx: &Context, asset: &str) -> Result<()> {
  let mut store = ctx.open_store()?;
  let previous = store.get_decision(asset);
  store.unmark_reviewed(asset)?;

  if ctx.json {
    print_json(&serde_json::json!({ "asset": asset, "previous": previous }))?;
  } else {
    match previous {
      Some(decision) => print_success(&format!("Unmarked {} (was {})", asset, decision)),
      None => print_success(&format!("{} was not reviewed", asset)),
    }
  }
  Ok(())
}
