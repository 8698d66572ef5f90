//! # Import and Export
//!
//! Export writes the collection as a pretty-printed JSON array (two-space
//! indent, ISO 8601 dates). Import accepts the same shape, including files
//! produced by older versions that lack the optional fields.
//!
//! Import is strict about the envelope: malformed JSON, anything that is not
//! an array, an empty array, or an element that fails the task shape check
//! all fail with [`TaskError::InvalidImportData`] before any task reaches the
//! live collection. Merging is a separate step ([`merge_imported`]) so the UI
//! can preview or confirm first.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, DecodeError};
use crate::error::{Result, TaskError};
use crate::id::generate_id;
use crate::model::Task;

pub fn export_tasks(tasks: &[Task]) -> Result<String> {
    codec::encode_tasks_pretty(tasks)
}

pub fn import_tasks(json: &str) -> Result<Vec<Task>> {
    let tasks = codec::decode_tasks(json).map_err(|e| match e {
        DecodeError::Malformed(msg) => {
            TaskError::InvalidImportData(format!("Invalid JSON format: {}", msg))
        }
        other => TaskError::InvalidImportData(other.to_string()),
    })?;

    if tasks.is_empty() {
        return Err(TaskError::InvalidImportData(
            "No valid tasks found in the import data".into(),
        ));
    }
    Ok(tasks)
}

/// Appends `imported` after `existing`.
///
/// An imported task whose id is already taken (by an existing task or an
/// earlier imported one) gets a fresh id, so re-importing an export never
/// produces duplicate ids.
pub fn merge_imported(existing: &[Task], imported: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<String> = existing.iter().map(|t| t.id.clone()).collect();
    let mut merged = existing.to_vec();
    merged.reserve(imported.len());

    for mut task in imported {
        if seen.contains(&task.id) {
            let fresh = generate_id();
            tracing::debug!(old = %task.id, new = %fresh, "Re-keyed imported task");
            task.id = fresh;
        }
        seen.insert(task.id.clone());
        merged.push(task);
    }
    merged
}

/// `tasks-export-YYYY-MM-DD.json`
pub fn export_filename(date: NaiveDate) -> String {
    format!("tasks-export-{}.json", date.format("%Y-%m-%d"))
}

/// Writes an export of `tasks` into `dir`, named after today's date.
pub fn export_to_dir(dir: &Path, tasks: &[Task]) -> Result<PathBuf> {
    let json = export_tasks(tasks)?;
    let path = dir.join(export_filename(chrono::Utc::now().date_naive()));
    fs::write(&path, json).map_err(TaskError::Io)?;
    tracing::info!(path = %path.display(), count = tasks.len(), "Exported tasks");
    Ok(path)
}

/// Reads and validates an export file.
pub fn import_from_file(path: &Path) -> Result<Vec<Task>> {
    let json = fs::read_to_string(path).map_err(TaskError::Io)?;
    import_tasks(&json)
}
