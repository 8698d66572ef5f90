//! # JSON Codec
//!
//! Shared by the persistence adapter ([`crate::store`]) and the import/export
//! codec ([`crate::transfer`]). Both move a `Vec<Task>` through a JSON array.
//!
//! Decoding is two-phase:
//!
//! 1. **Shape check**: the document must be an array, every element an object
//!    carrying the required keys, and nested subtasks/attachments objects with
//!    a `createdAt`. Failures name the offending element index.
//! 2. **Typed decode**: only a document that passed the shape check is turned
//!    into [`Task`] values, which is where date strings become `DateTime<Utc>`.
//!
//! The two callers map [`DecodeError`] differently: the store treats it as a
//! deserialization failure, import reports it as invalid import data.

use serde_json::Value;
use thiserror::Error;

use crate::error::{Result, TaskError};
use crate::model::Task;

/// Keys every serialized task must carry.
pub const REQUIRED_TASK_FIELDS: &[&str] = &[
    "id",
    "title",
    "status",
    "priority",
    "category",
    "createdAt",
    "updatedAt",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("expected a JSON array of tasks, found {0}")]
    NotAnArray(&'static str),

    #[error("task at index {index}: {reason}")]
    Schema { index: usize, reason: String },
}

impl From<DecodeError> for TaskError {
    fn from(err: DecodeError) -> Self {
        TaskError::Deserialization(err.to_string())
    }
}

pub fn decode_tasks(json: &str) -> std::result::Result<Vec<Task>, DecodeError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> std::result::Result<Vec<Task>, DecodeError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(DecodeError::NotAnArray(kind_of(&other))),
    };

    for (index, item) in items.iter().enumerate() {
        check_task_shape(item).map_err(|reason| DecodeError::Schema { index, reason })?;
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| DecodeError::Schema {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Compact single-line JSON, used for persistence.
pub fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks).map_err(TaskError::Serialization)
}

/// Pretty-printed JSON with two-space indentation, used for export.
pub fn encode_tasks_pretty(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).map_err(TaskError::Serialization)
}

fn check_task_shape(item: &Value) -> std::result::Result<(), String> {
    let obj = item
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", kind_of(item)))?;

    for field in REQUIRED_TASK_FIELDS {
        match obj.get(*field) {
            None | Some(Value::Null) => return Err(format!("missing required field '{}'", field)),
            Some(_) => {}
        }
    }

    if !obj["title"].is_string() {
        return Err("'title' must be a string".to_string());
    }

    for nested in ["subtasks", "attachments"] {
        match obj.get(nested) {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => {
                for (i, child) in children.iter().enumerate() {
                    let has_created_at = child
                        .as_object()
                        .and_then(|c| c.get("createdAt"))
                        .is_some_and(|v| v.is_string());
                    if !has_created_at {
                        return Err(format!("{}[{}] is missing 'createdAt'", nested, i));
                    }
                }
            }
            Some(other) => {
                return Err(format!(
                    "'{}' must be an array, found {}",
                    nested,
                    kind_of(other)
                ))
            }
        }
    }

    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
