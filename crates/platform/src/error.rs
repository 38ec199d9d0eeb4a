//! Error types for swipe-platform

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("Failed to determine home directory")]
  NoHomeDirectory,

  #[error("Failed to read storage file '{path}': {source}")]
  ReadStorage {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to create data directory '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
