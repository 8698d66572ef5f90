//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `TASKLANE_STORAGE_KEY`, `TASKLANE_DATA_DIR`, ...
//! 2. **Config file**: the TOML file passed to [`TaskConfig::load`], if any.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! The data directory falls back to the OS-appropriate location from the
//! `directories` crate when neither a file nor the environment sets it.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `todo_app_tasks` | Key the collection is stored under |
//! | `data_dir` | platform data dir | Directory of the file store |
//! | `default_sort_by` | `createdAt` | Initial sort field of the list view |
//! | `default_sort_direction` | `desc` | Initial sort direction |
//! | `stats_window_days` | `30` | Window of the completed-by-day series |
//! | `seed_samples` | `true` | Seed demo tasks into an empty store |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskError};
use crate::filter::{SortDirection, SortField, TaskFilter};
use crate::stats::DEFAULT_WINDOW_DAYS;
use crate::store::{FileStore, DEFAULT_STORAGE_KEY};

/// Configuration for tasklane, stored in `tasklane.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    /// Key the task collection is stored under.
    #[config(env = "TASKLANE_STORAGE_KEY", default = "todo_app_tasks")]
    pub storage_key: String,

    /// Directory holding the stored collection.
    /// When absent, the platform data directory is used.
    #[config(env = "TASKLANE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Sort field of a fresh list view: dueDate, priority, createdAt, title or order.
    #[config(default = "createdAt")]
    pub default_sort_by: SortField,

    /// Sort direction of a fresh list view: asc or desc.
    #[config(default = "desc")]
    pub default_sort_direction: SortDirection,

    /// Trailing window, in days, of the completed-by-day statistics.
    #[config(env = "TASKLANE_STATS_WINDOW_DAYS", default = 30)]
    pub stats_window_days: u32,

    /// Seed demo tasks when the store is empty.
    #[config(default = true)]
    pub seed_samples: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            default_sort_by: SortField::CreatedAt,
            default_sort_direction: SortDirection::Desc,
            stats_window_days: DEFAULT_WINDOW_DAYS,
            seed_samples: true,
        }
    }
}

impl TaskConfig {
    /// Loads configuration from the environment, then `file` (if given), then
    /// defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| TaskError::Config(e.to_string()))
    }

    /// A commented sample `tasklane.toml`.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("", "", "tasklane")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| TaskError::Config("Could not determine a data directory".into()))
    }

    /// A file store rooted at [`Self::data_dir`] using the configured key.
    pub fn open_store(&self) -> Result<FileStore> {
        Ok(FileStore::at(self.data_dir()?, self.storage_key.clone()))
    }

    /// An empty filter carrying the configured default sort.
    pub fn default_filter(&self) -> TaskFilter {
        TaskFilter::new().sorted_by(self.default_sort_by, self.default_sort_direction)
    }
}
