//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] sitecraft_document::TreeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown task: {0}")]
    UnknownTask(u64),
}
