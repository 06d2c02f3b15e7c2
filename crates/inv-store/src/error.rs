//! Error types for the inventory store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a movement with id '{0}' already exists")]
    DuplicateId(String),

    #[error("no movement with id '{0}'")]
    NotFound(String),

    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i64, supported: i64 },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Hint shown next to the error in the CLI.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::DuplicateId(_) => Some("Use `update` to change an existing movement."),
            StoreError::NotFound(_) => Some("Run `list` to see the stored identifiers."),
            StoreError::UnsupportedSchema { .. } => {
                Some("The database was written by a newer version of this tool.")
            }
            StoreError::CreateDir { .. } | StoreError::Sqlite(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
