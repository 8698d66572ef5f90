//! # Task Factory and Mutators
//!
//! Every function here is pure: it takes a task (or a collection) by reference
//! and returns a new value. Inputs are never modified, so callers can keep the
//! previous value around for undo or compare old and new by equality.
//!
//! ## Timestamps
//!
//! Any mutation refreshes `updated_at`. Status changes keep `completed_at` in
//! step with `status`: it is set on the transition to completed and cleared on
//! reopen, so `completed_at.is_some() == (status == Completed)` always holds for
//! values produced here.
//!
//! ## Recurrence
//!
//! [`toggle_task_status`] has no side effects. Completing a recurring task and
//! materializing its next occurrence is a separate command,
//! [`crate::recurrence::complete_task`].

use chrono::{DateTime, Utc};

use crate::error::{Result, TaskError};
use crate::id::generate_id;
use crate::model::{
    Attachment, Category, Priority, Recurrence, SubTask, Task, TaskStatus, TaskTag,
};

/// Parameters for [`create_task`].
///
/// Defaults: medium priority, category `other`, no due date, no recurrence,
/// no tags, subtasks or attachments.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<DateTime<Utc>>,
    pub recurrence: Recurrence,
    pub recurrence_end_date: Option<DateTime<Utc>>,
    pub tags: Vec<TaskTag>,
    pub subtasks: Vec<SubTask>,
    pub attachments: Vec<Attachment>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_recurrence(
        mut self,
        recurrence: Recurrence,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.recurrence = recurrence;
        self.recurrence_end_date = end_date;
        self
    }

    pub fn with_tags(mut self, tags: Vec<TaskTag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<SubTask>) -> Self {
        self.subtasks = subtasks;
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Creates a pending task with a fresh id.
///
/// The title must contain something other than whitespace. `order` starts out
/// as the creation time in milliseconds, so new tasks sort after older ones
/// until the first manual reorder.
pub fn create_task(new: NewTask) -> Result<Task> {
    if new.title.trim().is_empty() {
        return Err(TaskError::Validation("Task title cannot be empty".into()));
    }

    let now = Utc::now();
    Ok(Task {
        id: generate_id(),
        title: new.title,
        description: new.description,
        status: TaskStatus::Pending,
        priority: new.priority,
        category: new.category,
        due_date: new.due_date,
        created_at: now,
        updated_at: now,
        completed_at: None,
        recurrence: new.recurrence,
        recurrence_end_date: new.recurrence_end_date,
        tags: new.tags,
        subtasks: new.subtasks,
        attachments: new.attachments,
        order: Some(now.timestamp_millis()),
    })
}

/// A partial update for [`update_task`].
///
/// `None` leaves a field untouched. Fields that can be cleared are wrapped
/// twice: `Some(None)` clears them. There is no way to express a new `id` or
/// `created_at`.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub recurrence: Option<Recurrence>,
    pub recurrence_end_date: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<TaskTag>>,
    pub subtasks: Option<Vec<SubTask>>,
    pub attachments: Option<Vec<Attachment>>,
    pub order: Option<Option<i64>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.due_date.is_none()
            && self.recurrence.is_none()
            && self.recurrence_end_date.is_none()
            && self.tags.is_none()
            && self.subtasks.is_none()
            && self.attachments.is_none()
            && self.order.is_none()
    }
}

/// Overlays `patch` onto a copy of `task` and refreshes `updated_at`.
pub fn update_task(task: &Task, patch: TaskPatch) -> Task {
    update_task_at(task, patch, Utc::now())
}

pub(crate) fn update_task_at(task: &Task, patch: TaskPatch, now: DateTime<Utc>) -> Task {
    let mut next = task.clone();

    if let Some(title) = patch.title {
        next.title = title;
    }
    if let Some(description) = patch.description {
        next.description = description;
    }
    if let Some(priority) = patch.priority {
        next.priority = priority;
    }
    if let Some(category) = patch.category {
        next.category = category;
    }
    if let Some(due_date) = patch.due_date {
        next.due_date = due_date;
    }
    if let Some(recurrence) = patch.recurrence {
        next.recurrence = recurrence;
    }
    if let Some(end) = patch.recurrence_end_date {
        next.recurrence_end_date = end;
    }
    if let Some(tags) = patch.tags {
        next.tags = tags;
    }
    if let Some(subtasks) = patch.subtasks {
        next.subtasks = subtasks;
    }
    if let Some(attachments) = patch.attachments {
        next.attachments = attachments;
    }
    if let Some(order) = patch.order {
        next.order = order;
    }
    if let Some(status) = patch.status {
        if status != next.status {
            next.completed_at = match status {
                TaskStatus::Completed => Some(now),
                TaskStatus::Pending => None,
            };
        }
        next.status = status;
    }

    next.updated_at = now;
    next
}

/// Flips pending <-> completed.
///
/// Sets `completed_at` when completing and clears it when reopening. This does
/// not spawn the next occurrence of a recurring task.
pub fn toggle_task_status(task: &Task) -> Task {
    toggle_task_status_at(task, Utc::now())
}

pub(crate) fn toggle_task_status_at(task: &Task, now: DateTime<Utc>) -> Task {
    let patch = TaskPatch {
        status: Some(task.status.toggled()),
        ..Default::default()
    };
    update_task_at(task, patch, now)
}

pub fn toggle_subtask_status(task: &Task, subtask_id: &str) -> Task {
    if task.subtasks.is_empty() {
        return task.clone();
    }

    let subtasks = task
        .subtasks
        .iter()
        .map(|s| {
            if s.id == subtask_id {
                SubTask {
                    completed: !s.completed,
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect();

    update_task(
        task,
        TaskPatch {
            subtasks: Some(subtasks),
            ..Default::default()
        },
    )
}

/// Appends a new, uncompleted subtask.
pub fn add_subtask(task: &Task, title: &str) -> Result<Task> {
    if title.trim().is_empty() {
        return Err(TaskError::Validation("Subtask title cannot be empty".into()));
    }

    let mut subtasks = task.subtasks.clone();
    subtasks.push(SubTask {
        id: generate_id(),
        title: title.to_string(),
        completed: false,
        created_at: Utc::now(),
    });

    Ok(update_task(
        task,
        TaskPatch {
            subtasks: Some(subtasks),
            ..Default::default()
        },
    ))
}

pub fn remove_subtask(task: &Task, subtask_id: &str) -> Task {
    if task.subtasks.is_empty() {
        return task.clone();
    }

    let subtasks = task
        .subtasks
        .iter()
        .filter(|s| s.id != subtask_id)
        .cloned()
        .collect();

    update_task(
        task,
        TaskPatch {
            subtasks: Some(subtasks),
            ..Default::default()
        },
    )
}

/// Appends a tag with a fresh id.
///
/// The name must not be blank and the colour must be `#rrggbb`.
pub fn add_tag(task: &Task, name: &str, color: &str) -> Result<Task> {
    if name.trim().is_empty() {
        return Err(TaskError::Validation("Tag name cannot be empty".into()));
    }
    if !is_hex_color(color) {
        return Err(TaskError::Validation(format!(
            "Tag color must be a #rrggbb value, got '{}'",
            color
        )));
    }

    let mut tags = task.tags.clone();
    tags.push(TaskTag {
        id: generate_id(),
        name: name.to_string(),
        color: color.to_string(),
    });

    Ok(update_task(
        task,
        TaskPatch {
            tags: Some(tags),
            ..Default::default()
        },
    ))
}

pub fn remove_tag(task: &Task, tag_id: &str) -> Task {
    if task.tags.is_empty() {
        return task.clone();
    }

    let tags = task.tags.iter().filter(|t| t.id != tag_id).cloned().collect();

    update_task(
        task,
        TaskPatch {
            tags: Some(tags),
            ..Default::default()
        },
    )
}

pub fn add_attachment(task: &Task, name: &str, mime_type: &str, url: &str, size: u64) -> Task {
    let mut attachments = task.attachments.clone();
    attachments.push(Attachment {
        id: generate_id(),
        name: name.to_string(),
        mime_type: mime_type.to_string(),
        url: url.to_string(),
        size,
        created_at: Utc::now(),
    });

    update_task(
        task,
        TaskPatch {
            attachments: Some(attachments),
            ..Default::default()
        },
    )
}

pub fn remove_attachment(task: &Task, attachment_id: &str) -> Task {
    if task.attachments.is_empty() {
        return task.clone();
    }

    let attachments = task
        .attachments
        .iter()
        .filter(|a| a.id != attachment_id)
        .cloned()
        .collect();

    update_task(
        task,
        TaskPatch {
            attachments: Some(attachments),
            ..Default::default()
        },
    )
}

/// Removes the task with `task_id`, keeping the order of the rest.
pub fn delete_task(tasks: &[Task], task_id: &str) -> Vec<Task> {
    tasks.iter().filter(|t| t.id != task_id).cloned().collect()
}

/// Replaces the task with the same id in place, or puts a new task first.
pub fn upsert_task(tasks: &[Task], task: Task) -> Vec<Task> {
    if let Some(pos) = tasks.iter().position(|t| t.id == task.id) {
        let mut next = tasks.to_vec();
        next[pos] = task;
        next
    } else {
        let mut next = Vec::with_capacity(tasks.len() + 1);
        next.push(task);
        next.extend_from_slice(tasks);
        next
    }
}

/// Returns `(completed, total)` subtask counts.
pub fn subtask_progress(task: &Task) -> (usize, usize) {
    let done = task.subtasks.iter().filter(|s| s.completed).count();
    (done, task.subtasks.len())
}

pub(crate) fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
