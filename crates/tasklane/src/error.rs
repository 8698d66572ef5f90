use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// A required field was empty or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An import payload was not a non-empty JSON array of tasks.
    #[error("Invalid import data: {0}")]
    InvalidImportData(String),

    #[error("Index {index} out of range for {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Persisted JSON did not match the task schema.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
