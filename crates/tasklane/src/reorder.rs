//! Manual (drag-and-drop) reordering.

use crate::error::{Result, TaskError};
use crate::model::Task;

/// Moves the task at `from` to `to` and renumbers every `order` key.
///
/// Splice semantics: the task is removed first, then inserted at `to` in the
/// shortened list. Afterwards each task's `order` equals its zero-based
/// position. Both indices must be `< tasks.len()`.
pub fn reorder_tasks(tasks: &[Task], from: usize, to: usize) -> Result<Vec<Task>> {
    let len = tasks.len();
    for index in [from, to] {
        if index >= len {
            return Err(TaskError::IndexOutOfRange { index, len });
        }
    }

    let mut result = tasks.to_vec();
    let moved = result.remove(from);
    result.insert(to, moved);

    for (position, task) in result.iter_mut().enumerate() {
        task.order = Some(position as i64);
    }
    Ok(result)
}
