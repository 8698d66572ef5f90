//! # Persistence Adapter
//!
//! The whole task collection lives under a single string key in a key-value
//! store, serialized as one JSON array. There is no partial or incremental
//! update: every save replaces the document.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw `get`/`set`/`remove` of strings.
//! - [`TaskStore`]: encoding, decoding and the load fallback policy.
//!
//! ## Load Policy
//!
//! [`TaskStore::load_tasks`] never fails. A missing key is an empty collection.
//! A corrupt document (or an unreadable backend) is also treated as empty so
//! the application stays usable, but the failure is logged with
//! `tracing::warn!` so the data loss is visible. Callers that need the error
//! use [`TaskStore::try_load_tasks`].
//!
//! ## Storage Key
//!
//! The key is a constructor argument rather than a constant, so several
//! collections (or test instances) can share one backend.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: for testing logic without filesystem I/O.

use crate::codec;
use crate::error::Result;
use crate::model::Task;
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "todo_app_tasks";

pub type InMemoryStore = TaskStore<MemBackend>;
pub type FileStore = TaskStore<FsBackend>;

/// The task collection stored under one key of a [`StorageBackend`].
pub struct TaskStore<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> TaskStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the collection, falling back to empty on any failure.
    pub fn load_tasks(&self) -> Vec<Task> {
        match self.try_load_tasks() {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    "Failed to load tasks, starting with an empty collection: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Loads the collection, surfacing read and decode errors.
    ///
    /// A missing key is not an error and yields an empty collection.
    pub fn try_load_tasks(&self) -> Result<Vec<Task>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let tasks = codec::decode_tasks(&raw)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }

    /// Replaces the stored collection with `tasks`.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = codec::encode_tasks(tasks)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = tasks.len(), "Saved tasks");
        Ok(())
    }

    /// Loads the collection, or seeds and persists `seed()` when it is empty.
    ///
    /// A document that fails to load is an error here; it is never replaced by
    /// the seed.
    pub fn load_or_seed<F>(&self, seed: F) -> Result<Vec<Task>>
    where
        F: FnOnce() -> Vec<Task>,
    {
        let tasks = self.try_load_tasks()?;
        if !tasks.is_empty() {
            return Ok(tasks);
        }
        let seeded = seed();
        if !seeded.is_empty() {
            self.save_tasks(&seeded)?;
            tracing::info!(key = %self.key, count = seeded.len(), "Seeded empty task store");
        }
        Ok(seeded)
    }

    /// Removes the stored collection.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(&self.key)
    }
}

impl InMemoryStore {
    pub fn in_memory(key: impl Into<String>) -> Self {
        TaskStore::new(MemBackend::new(), key)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::in_memory(DEFAULT_STORAGE_KEY)
    }
}

impl FileStore {
    pub fn at(root: PathBuf, key: impl Into<String>) -> Self {
        TaskStore::new(FsBackend::new(root), key)
    }
}
