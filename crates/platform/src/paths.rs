//! Data directory resolution
//!
//! Lookup order:
//! 1. `SWIPE_DATA_DIR`
//! 2. `%APPDATA%\immich-swipe` on Windows
//! 3. `$XDG_DATA_HOME/immich-swipe`
//! 4. `~/.local/share/immich-swipe`

use std::env;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;
use crate::file_store::STORAGE_FILENAME;

/// Directory name used under platform data roots.
pub const APP_NAME: &str = "immich-swipe";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SWIPE_DATA_DIR";

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Returns the directory holding persisted review decisions
pub fn data_dir() -> Result<PathBuf, PlatformError> {
  if let Some(dir) = non_empty_var(DATA_DIR_ENV) {
    return expand_path(dir);
  }

  #[cfg(windows)]
  if let Some(appdata) = non_empty_var("APPDATA") {
    return Ok(PathBuf::from(appdata).join(APP_NAME));
  }

  if let Some(data_home) = non_empty_var("XDG_DATA_HOME") {
    return Ok(PathBuf::from(data_home).join(APP_NAME));
  }

  let home = dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)?;
  Ok(home.join(".local").join("share").join(APP_NAME))
}

/// Returns the path of the storage document inside [`data_dir`]
pub fn storage_path() -> Result<PathBuf, PlatformError> {
  Ok(data_dir()?.join(STORAGE_FILENAME))
}

/// Expand a path, resolving `~` to the user's home directory
pub fn expand_path<P: AsRef<Path>>(path: P) -> Result<PathBuf, PlatformError> {
  let path = path.as_ref();
  let path_str = path.to_string_lossy();

  if let Some(rest) = path_str.strip_prefix("~/") {
    let home = dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)?;
    Ok(home.join(rest))
  } else if path_str == "~" {
    dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)
  } else {
    Ok(path.to_path_buf())
  }
}
