mod clear;
mod decide;
mod inspect;
mod namespaces;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use swipe_core::{Identity, ReviewedStore};
use swipe_platform::{FileKvStore, STORAGE_FILENAME, expand_path};
use tracing::debug;

pub use clear::cmd_clear;
pub use decide::{cmd_mark, cmd_unmark};
pub use inspect::{cmd_show, cmd_stats};
pub use namespaces::cmd_namespaces;

/// Options shared by every command.
pub struct Context {
  pub identity: Identity,
  pub data_dir: Option<PathBuf>,
  pub verbose: bool,
  pub json: bool,
}

impl Context {
  pub fn open_storage(&self) -> Result<FileKvStore> {
    debug!(data_dir = ?self.data_dir, "opening decision storage");
    let storage = match &self.data_dir {
      Some(dir) => FileKvStore::open(expand_path(dir)?.join(STORAGE_FILENAME)),
      None => FileKvStore::open_default(),
    };
    storage.context("Failed to open decision storage")
  }

  /// Open the decision store for the configured account.
  pub fn open_store(&self) -> Result<ReviewedStore<FileKvStore, Identity>> {
    if !self.identity.is_configured() {
      bail!("No server configured. Pass --server or set SWIPE_SERVER_URL.");
    }
    Ok(ReviewedStore::new(self.open_storage()?, self.identity.clone()))
  }
}
