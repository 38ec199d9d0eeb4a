//! Platform integration for swipe-reviewed
//!
//! This crate provides:
//! - Path resolution for the data directory
//! - A file-backed [`KvStore`](swipe_core::KvStore) that survives restarts

mod error;
mod file_store;
mod paths;

pub use error::PlatformError;
pub use file_store::{FileKvStore, STORAGE_FILENAME};
pub use paths::{APP_NAME, DATA_DIR_ENV, data_dir, expand_path, storage_path};
