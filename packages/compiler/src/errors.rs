use sitecraft_document::TreeError;
use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that block an export. Compilation is all-or-nothing: any of these
/// means no bundle is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Node {node_id} has a name that does not produce a usable identifier")]
    InvalidIdentifier { node_id: String },

    #[error("Node {node_id} has a style {property} that would break out of its rule")]
    InvalidStyle { node_id: String, property: String },

    #[error("Node {node_id} ({node_type}) has no media source")]
    MissingMediaSource { node_id: String, node_type: String },

    #[error("Page {page_id} does not produce a usable file name")]
    InvalidPageSlug { page_id: String },

    #[error("Pages {first} and {second} both map to {slug}.html")]
    DuplicatePage {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Page {page_id} has an invalid tree: {source}")]
    InvalidTree {
        page_id: String,
        #[source]
        source: TreeError,
    },

    #[error("Site file is not valid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for CompileError {
    fn from(e: serde_json::Error) -> Self {
        CompileError::Json(e.to_string())
    }
}
