//! # Sitecraft Document
//!
//! The page document model: a tree of layout nodes owned by a single root.
//!
//! ```text
//! root (page)
//!  ├── section
//!  │    ├── text "Hello"
//!  │    └── button "Buy"
//!  └── container (free layout)
//!       └── image  { position: absolute; top; left }
//! ```
//!
//! This crate is pure data. Every write goes through `sitecraft-editor`,
//! which keeps the invariants below intact:
//!
//! 1. The tree is acyclic and has exactly one root with id [`ROOT_ID`]
//! 2. Node ids are unique across the whole document
//! 3. A node lives in exactly one parent's `children`
//! 4. Style updates merge; they never drop unspecified keys

mod effects;
mod factory;
mod id_generator;
mod node;
mod tree;
mod units;

pub use effects::{ColorStop, Effects, Filter, Gradient, Shadow};
pub use factory::NodeOverrides;
pub use id_generator::{get_document_id, IDGenerator};
pub use node::{
    Animation, AnimationPreset, DataMap, Interaction, LayoutMode, Node, NodeType, Styles, ROOT_ID,
};
pub use tree::{find, TreeError};
pub use units::{format_number, format_px, parse_px, ROOT_FONT_SIZE};
