//! # Sitecraft Editor
//!
//! Mutation engine for Sitecraft page documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ geometry: pointer/drag/resize → style edits │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document state + mutations          │
//! │  - Insert/update/remove/reparent nodes      │
//! │  - Selection tracking                       │
//! │  - Version-checked async completions        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler: tree snapshot → HTML + CSS bundle │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: a [`Document`] owns its tree; writes go through mutations
//! 2. **Misses are no-ops**: unknown ids never raise, they report [`MutationResult::Noop`]
//! 3. **Late results are checked**: async completions compare node versions first
//!
//! ## Usage
//!
//! ```rust
//! use sitecraft_editor::{Document, NodeOverrides, NodeType, ROOT_ID};
//!
//! let mut doc = Document::new("landing");
//! let section = doc
//!     .insert_child(ROOT_ID, NodeType::Section, NodeOverrides::default())
//!     .unwrap();
//! let text = doc
//!     .insert_child(&section, NodeType::Text, NodeOverrides::default().with_content("Hello"))
//!     .unwrap();
//!
//! doc.update_styles(&text, [("fontSize".to_string(), "40px".to_string())].into());
//! assert_eq!(doc.find(&text).unwrap().style("fontSize"), Some("40px"));
//! ```

mod document;
mod errors;
mod mutations;
mod session;

pub use document::Document;
pub use errors::EditorError;
pub use mutations::{ChangeSet, Mutation, MutationError, MutationResult, Property};
pub use session::{AssetTarget, ConflictPolicy, EditSession, TaskOutcome, TaskTicket};

// Re-export document types for convenience
pub use sitecraft_document::{
    find, Animation, AnimationPreset, Interaction, LayoutMode, Node, NodeOverrides, NodeType,
    Styles, ROOT_ID,
};
