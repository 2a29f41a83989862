//! Common library for the movie explorer
//!
//! This crate provides the shared key-value persistence layer used by the
//! session, favorites and settings stores.

pub mod error;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use storage::{FileBackend, KeyValueBackend, LocalStorage, MemoryBackend, StorageConfig};
