use docanchor_editor::{BatchError, EditorError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("Document is not backed by a file")]
    NotFileBacked,

    #[error("Document path has no usable file name: {0}")]
    InvalidPath(PathBuf),

    #[error("Version not found: {0}")]
    VersionNotFound(String),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
