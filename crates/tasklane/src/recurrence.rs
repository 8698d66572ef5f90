//! # Recurring Tasks
//!
//! A task with a recurrence other than `none` regenerates when it is completed:
//! a new pending copy (the next *occurrence*) is appended to the persisted
//! collection.
//!
//! ## Next Due Date
//!
//! | Recurrence | Advance                 |
//! |------------|-------------------------|
//! | `daily`    | +1 day                  |
//! | `weekly`   | +7 days                 |
//! | `monthly`  | +1 calendar month       |
//! | `custom`   | +7 days (same as weekly)|
//!
//! The advance is applied to the completed task's due date, or to the current
//! time when it has none. Monthly steps clamp to the end of shorter months
//! (Jan 31 -> Feb 29 in a leap year).
//!
//! `custom` has no interval model of its own yet; it behaves as weekly.
//!
//! ## Cutoff
//!
//! No occurrence is generated once `recurrence_end_date` lies strictly in the
//! past.
//!
//! ## Persistence
//!
//! Building the next occurrence ([`create_next_recurring_task`]) is pure.
//! Writing it ([`materialize_next_occurrence`]) is a read-modify-write of the
//! whole stored collection: load, append, save. A concurrent writer holding an
//! older snapshot can overwrite the append (last write wins); the engine
//! assumes a single active editor.
//!
//! [`complete_task`] is the explicit command that completes a task and
//! materializes its next occurrence in one call. The plain
//! [`crate::mutations::toggle_task_status`] never touches storage.

use chrono::{DateTime, Duration, Months, Utc};

use crate::error::Result;
use crate::id::generate_id;
use crate::model::{Recurrence, SubTask, Task, TaskStatus};
use crate::mutations::toggle_task_status_at;
use crate::store::{StorageBackend, TaskStore};

/// Advances `from` by one recurrence step. `None` for non-recurring tasks.
pub fn next_due_date(recurrence: Recurrence, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match recurrence {
        Recurrence::None => None,
        Recurrence::Daily => Some(from + Duration::days(1)),
        Recurrence::Weekly | Recurrence::Custom => Some(from + Duration::days(7)),
        Recurrence::Monthly => from.checked_add_months(Months::new(1)),
    }
}

/// Builds the next occurrence of `completed`, without persisting it.
pub fn create_next_recurring_task(completed: &Task) -> Option<Task> {
    create_next_recurring_task_at(completed, Utc::now())
}

/// Same as [`create_next_recurring_task`] with an explicit current time.
pub fn create_next_recurring_task_at(completed: &Task, now: DateTime<Utc>) -> Option<Task> {
    if !completed.recurrence.is_recurring() {
        return None;
    }
    if completed.recurrence_end_date.is_some_and(|end| now > end) {
        return None;
    }

    let base = completed.due_date.unwrap_or(now);
    let next_due = next_due_date(completed.recurrence, base)?;

    let subtasks = completed
        .subtasks
        .iter()
        .map(|s| SubTask {
            id: generate_id(),
            title: s.title.clone(),
            completed: false,
            created_at: now,
        })
        .collect();

    Some(Task {
        id: generate_id(),
        status: TaskStatus::Pending,
        due_date: Some(next_due),
        created_at: now,
        updated_at: now,
        completed_at: None,
        subtasks,
        ..completed.clone()
    })
}

/// Appends the next occurrence of `completed` to the stored collection.
///
/// Returns the appended task, or `None` when the task does not recur (or its
/// recurrence has ended), in which case storage is not touched. A stored
/// document that fails to decode is returned as an error and left as is.
pub fn materialize_next_occurrence<B: StorageBackend>(
    store: &TaskStore<B>,
    completed: &Task,
) -> Result<Option<Task>> {
    materialize_next_occurrence_at(store, completed, Utc::now())
}

pub fn materialize_next_occurrence_at<B: StorageBackend>(
    store: &TaskStore<B>,
    completed: &Task,
    now: DateTime<Utc>,
) -> Result<Option<Task>> {
    let Some(next) = create_next_recurring_task_at(completed, now) else {
        return Ok(None);
    };

    let mut tasks = store.try_load_tasks()?;
    tasks.push(next.clone());
    store.save_tasks(&tasks)?;

    tracing::info!(
        from = %completed.id,
        next = %next.id,
        recurrence = completed.recurrence.as_str(),
        "Scheduled next occurrence"
    );
    Ok(Some(next))
}

/// Outcome of [`complete_task`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The task after completion. Not persisted by [`complete_task`].
    pub task: Task,
    /// The next occurrence, already appended to the store.
    pub next_occurrence: Option<Task>,
}

/// Completes `task` and, if it recurs, persists its next occurrence.
///
/// Completing an already completed task changes nothing and schedules nothing.
/// The completed task itself is returned for the caller to place in its
/// collection.
pub fn complete_task<B: StorageBackend>(store: &TaskStore<B>, task: &Task) -> Result<Completion> {
    complete_task_at(store, task, Utc::now())
}

pub fn complete_task_at<B: StorageBackend>(
    store: &TaskStore<B>,
    task: &Task,
    now: DateTime<Utc>,
) -> Result<Completion> {
    if task.is_completed() {
        return Ok(Completion {
            task: task.clone(),
            next_occurrence: None,
        });
    }

    let completed = toggle_task_status_at(task, now);
    let next_occurrence = materialize_next_occurrence_at(store, &completed, now)?;
    Ok(Completion {
        task: completed,
        next_occurrence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::{add_subtask, add_tag, create_task, toggle_subtask_status, NewTask};
    use crate::store::InMemoryStore;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn recurring(recurrence: Recurrence, due: Option<DateTime<Utc>>) -> Task {
        let mut new = NewTask::new("Water plants").with_recurrence(recurrence, None);
        new.due_date = due;
        create_task(new).unwrap()
    }

    #[test]
    fn test_next_due_date_steps() {
        let from = at(2024, 1, 10);
        assert_eq!(next_due_date(Recurrence::None, from), None);
        assert_eq!(next_due_date(Recurrence::Daily, from), Some(at(2024, 1, 11)));
        assert_eq!(next_due_date(Recurrence::Weekly, from), Some(at(2024, 1, 17)));
        assert_eq!(next_due_date(Recurrence::Custom, from), Some(at(2024, 1, 17)));
        assert_eq!(next_due_date(Recurrence::Monthly, from), Some(at(2024, 2, 10)));
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        assert_eq!(
            next_due_date(Recurrence::Monthly, at(2024, 1, 31)),
            Some(at(2024, 2, 29))
        );
        assert_eq!(
            next_due_date(Recurrence::Monthly, at(2024, 12, 15)),
            Some(at(2025, 1, 15))
        );
    }

    #[test]
    fn test_daily_occurrence_scenario() {
        let task = recurring(Recurrence::Daily, Some(at(2024, 1, 10)));
        let task = add_subtask(&task, "Kitchen").unwrap();
        let task = add_subtask(&task, "Balcony").unwrap();
        let task = toggle_subtask_status(&task, &task.subtasks[0].id.clone());
        let task = add_tag(&task, "Home", "#ef4444").unwrap();

        let now = at(2024, 1, 10);
        let completed = toggle_task_status_at(&task, now);
        let next = create_next_recurring_task_at(&completed, now).unwrap();

        assert_eq!(next.due_date, Some(at(2024, 1, 11)));
        assert_eq!(next.status, TaskStatus::Pending);
        assert_eq!(next.completed_at, None);
        assert_eq!(next.created_at, now);
        assert_eq!(next.updated_at, now);
        assert_ne!(next.id, completed.id);
        assert_eq!(next.title, completed.title);
        assert_eq!(next.recurrence, Recurrence::Daily);

        assert_eq!(next.subtasks.len(), 2);
        for (new_sub, old_sub) in next.subtasks.iter().zip(&completed.subtasks) {
            assert!(!new_sub.completed);
            assert_ne!(new_sub.id, old_sub.id);
            assert_eq!(new_sub.title, old_sub.title);
            assert_eq!(new_sub.created_at, now);
        }
        // tags carried over, ids included
        assert_eq!(next.tags, completed.tags);
    }

    #[test]
    fn test_without_due_date_advances_from_now() {
        let task = recurring(Recurrence::Weekly, None);
        let now = at(2024, 3, 1);
        let next = create_next_recurring_task_at(&task, now).unwrap();
        assert_eq!(next.due_date, Some(at(2024, 3, 8)));
    }

    #[test]
    fn test_non_recurring_yields_none() {
        let task = recurring(Recurrence::None, Some(at(2024, 1, 10)));
        assert!(create_next_recurring_task_at(&task, at(2024, 1, 10)).is_none());
    }

    #[test]
    fn test_past_end_date_yields_none() {
        let mut task = recurring(Recurrence::Daily, Some(at(2024, 1, 10)));
        task.recurrence_end_date = Some(at(2024, 1, 5));
        assert!(create_next_recurring_task_at(&task, at(2024, 1, 10)).is_none());

        task.recurrence_end_date = Some(at(2024, 2, 1));
        assert!(create_next_recurring_task_at(&task, at(2024, 1, 10)).is_some());
    }

    #[test]
    fn test_complete_task_appends_exactly_one_occurrence() {
        let store = InMemoryStore::default();
        let task = recurring(Recurrence::Daily, Some(at(2024, 1, 10)));
        store.save_tasks(std::slice::from_ref(&task)).unwrap();

        let completion = complete_task_at(&store, &task, at(2024, 1, 10)).unwrap();
        assert_eq!(completion.task.status, TaskStatus::Completed);
        assert_eq!(completion.task.completed_at, Some(at(2024, 1, 10)));

        let next = completion.next_occurrence.unwrap();
        let stored = store.load_tasks();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], next);
        // The completed task is the caller's to persist.
        assert_eq!(stored[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_complete_non_recurring_leaves_store_alone() {
        let store = InMemoryStore::default();
        let task = recurring(Recurrence::None, None);
        let completion = complete_task(&store, &task).unwrap();
        assert!(completion.next_occurrence.is_none());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_complete_already_completed_is_noop() {
        let store = InMemoryStore::default();
        let task = recurring(Recurrence::Daily, None);
        let done = toggle_task_status_at(&task, at(2024, 1, 10));
        let completion = complete_task(&store, &done).unwrap();
        assert_eq!(completion.task, done);
        assert!(completion.next_occurrence.is_none());
        assert!(store.load_tasks().is_empty());
    }

    #[test]
    fn test_complete_keeps_corrupt_store_intact() {
        use crate::error::TaskError;
        use crate::store::DEFAULT_STORAGE_KEY;

        let store = InMemoryStore::default();
        let corrupt = r#"[{"id": "x", "title": "precious"}]"#;
        store.backend().set(DEFAULT_STORAGE_KEY, corrupt).unwrap();

        let task = recurring(Recurrence::Daily, Some(at(2024, 1, 10)));
        assert!(matches!(
            complete_task_at(&store, &task, at(2024, 1, 10)),
            Err(TaskError::Deserialization(_))
        ));
        assert_eq!(
            store.backend().get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(corrupt)
        );
    }
}
