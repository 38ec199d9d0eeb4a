use anyhow::Result;

use super::Context;
use crate::output::{print_json, print_success};

pub fn cmd_clear(ctx: &Context) -> Result<()> {
  let mut store = ctx.open_store()?;
  let removed = store.stats().total();
  store.clear()?;

  if ctx.json {
    print_json(&serde_json::json!({ "namespace": store.namespace(), "removed": removed }))?;
  } else {
    print_success(&format!("Cleared {} decisions", removed));
  }
  Ok(())
}
