//! Error types shared across the board.

use std::path::PathBuf;

use thiserror::Error;

/// A status string that is not part of the taxonomy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct UnknownStatus(pub String);

/// Errors returned by a task source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No task with the requested identifier exists.
    #[error("task not found: {0}")]
    NotFound(String),

    /// A task record carries a status outside the taxonomy.
    #[error("task '{task_id}' has unrecognized status '{status}'")]
    UnrecognizedStatus { task_id: String, status: String },

    /// The source could not be reached or read.
    #[error("task source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the drag interaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag is already in progress for task '{0}'")]
    AlreadyDragging(String),

    #[error("task not on the board: {0}")]
    UnknownTask(String),
}

/// Errors reading or writing the JSON database file.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("failed to encode database: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors loading a theme override file.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse theme {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("invalid color '{color}' for {status}")]
    InvalidColor { status: String, color: String },

    #[error(transparent)]
    Status(#[from] UnknownStatus),
}
