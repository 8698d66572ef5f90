//! # API Facade
//!
//! The API layer is a **thin facade** over the engine modules for UI clients.
//! It owns the authoritative in-memory collection and the store it is
//! persisted to, and wires the pure functions together the way a UI would.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Resolves ids** to tasks, failing with [`TaskError::TaskNotFound`]
//! - **Dispatches** to the pure mutators, filters and aggregations
//! - **Persists** after every mutation, replacing the stored collection
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `mutations`, `recurrence`, `filter`, ...
//! - **Presentation**: it returns tasks and statistics, not strings
//!
//! ## Completion and Recurrence
//!
//! [`TaskApi::toggle`] goes through [`crate::recurrence::complete_task`] when a
//! task is being completed, so the next occurrence of a recurring task is
//! appended to the store and to the in-memory collection in the same call.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `TaskApi<FsBackend>`
//! - Testing: `TaskApi<MemBackend>`

use crate::config::TaskConfig;
use crate::error::{Result, TaskError};
use crate::filter::{apply_view, TaskFilter};
use crate::model::Task;
use crate::mutations::{self, NewTask, TaskPatch};
use crate::recurrence::{complete_task, Completion};
use crate::reorder::reorder_tasks;
use crate::samples::generate_sample_tasks;
use crate::stats::{calculate_statistics_with_window, TaskStatistics, DEFAULT_WINDOW_DAYS};
use crate::store::{FsBackend, StorageBackend, TaskStore};
use crate::transfer::{export_tasks, import_tasks, merge_imported};

/// The main API facade for task operations.
pub struct TaskApi<B: StorageBackend> {
    store: TaskStore<B>,
    tasks: Vec<Task>,
    stats_window_days: u32,
}

impl TaskApi<FsBackend> {
    /// Opens the configured file store, seeding demo tasks if enabled and empty.
    pub fn from_config(config: &TaskConfig) -> Result<Self> {
        let store = config.open_store()?;
        let tasks = if config.seed_samples {
            store.load_or_seed(generate_sample_tasks)?
        } else {
            store.load_tasks()
        };
        Ok(Self {
            store,
            tasks,
            stats_window_days: config.stats_window_days,
        })
    }
}

impl<B: StorageBackend> TaskApi<B> {
    /// Loads the collection from `store`. A corrupt store opens empty.
    pub fn open(store: TaskStore<B>) -> Self {
        let tasks = store.load_tasks();
        Self {
            store,
            tasks,
            stats_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_stats_window(mut self, days: u32) -> Self {
        self.stats_window_days = days;
        self
    }

    pub fn store(&self) -> &TaskStore<B> {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::TaskNotFound(id.to_string()))
    }

    /// Creates a task at the top of the collection.
    pub fn create(&mut self, new: NewTask) -> Result<Task> {
        let task = mutations::create_task(new)?;
        self.tasks = mutations::upsert_task(&self.tasks, task.clone());
        self.save()?;
        Ok(task)
    }

    pub fn edit(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TaskError::Validation("Task title cannot be empty".into()));
        }
        self.modify(id, |task| Ok(mutations::update_task(task, patch)))
    }

    /// Completes a pending task or reopens a completed one.
    ///
    /// Completing a recurring task appends its next occurrence.
    pub fn toggle(&mut self, id: &str) -> Result<Completion> {
        if !self.get(id)?.is_completed() {
            return self.complete(id);
        }
        let reopened = self.modify(id, |t| Ok(mutations::toggle_task_status(t)))?;
        Ok(Completion {
            task: reopened,
            next_occurrence: None,
        })
    }

    /// Completes a task, appending the next occurrence if it recurs.
    ///
    /// An already completed task is returned unchanged.
    pub fn complete(&mut self, id: &str) -> Result<Completion> {
        let task = self.get(id)?.clone();
        if task.is_completed() {
            return Ok(Completion {
                task,
                next_occurrence: None,
            });
        }

        let completion = complete_task(&self.store, &task)?;
        self.tasks = mutations::upsert_task(&self.tasks, completion.task.clone());
        if let Some(next) = &completion.next_occurrence {
            self.tasks.push(next.clone());
        }
        self.save()?;
        Ok(completion)
    }

    pub fn toggle_subtask(&mut self, id: &str, subtask_id: &str) -> Result<Task> {
        self.modify(id, |t| Ok(mutations::toggle_subtask_status(t, subtask_id)))
    }

    pub fn add_subtask(&mut self, id: &str, title: &str) -> Result<Task> {
        self.modify(id, |t| mutations::add_subtask(t, title))
    }

    pub fn remove_subtask(&mut self, id: &str, subtask_id: &str) -> Result<Task> {
        self.modify(id, |t| Ok(mutations::remove_subtask(t, subtask_id)))
    }

    pub fn add_tag(&mut self, id: &str, name: &str, color: &str) -> Result<Task> {
        self.modify(id, |t| mutations::add_tag(t, name, color))
    }

    pub fn remove_tag(&mut self, id: &str, tag_id: &str) -> Result<Task> {
        self.modify(id, |t| Ok(mutations::remove_tag(t, tag_id)))
    }

    pub fn add_attachment(
        &mut self,
        id: &str,
        name: &str,
        mime_type: &str,
        url: &str,
        size: u64,
    ) -> Result<Task> {
        self.modify(id, |t| {
            Ok(mutations::add_attachment(t, name, mime_type, url, size))
        })
    }

    pub fn remove_attachment(&mut self, id: &str, attachment_id: &str) -> Result<Task> {
        self.modify(id, |t| Ok(mutations::remove_attachment(t, attachment_id)))
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.get(id)?;
        self.tasks = mutations::delete_task(&self.tasks, id);
        self.save()
    }

    /// Moves a task by position in the stored (unsorted) collection.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.tasks = reorder_tasks(&self.tasks, from, to)?;
        self.save()
    }

    /// Filtered and sorted view of the collection.
    pub fn view(&self, filter: &TaskFilter) -> Vec<Task> {
        apply_view(&self.tasks, filter)
    }

    pub fn statistics(&self) -> TaskStatistics {
        calculate_statistics_with_window(&self.tasks, chrono::Utc::now(), self.stats_window_days)
    }

    pub fn export(&self) -> Result<String> {
        export_tasks(&self.tasks)
    }

    /// Validates `json` and appends its tasks. Returns how many were imported.
    ///
    /// Nothing is merged if validation fails.
    pub fn import(&mut self, json: &str) -> Result<usize> {
        let imported = import_tasks(json)?;
        let count = imported.len();
        self.tasks = merge_imported(&self.tasks, imported);
        self.save()?;
        Ok(count)
    }

    pub fn save(&self) -> Result<()> {
        self.store.save_tasks(&self.tasks)
    }

    /// Discards the in-memory collection and reloads it from the store.
    pub fn reload(&mut self) {
        self.tasks = self.store.load_tasks();
    }

    fn modify<F>(&mut self, id: &str, f: F) -> Result<Task>
    where
        F: FnOnce(&Task) -> Result<Task>,
    {
        let updated = f(self.get(id)?)?;
        self.tasks = mutations::upsert_task(&self.tasks, updated.clone());
        self.save()?;
        Ok(updated)
    }
}
