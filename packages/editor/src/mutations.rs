//! # Tree Mutations
//!
//! The only way the document tree changes.
//!
//! ## Design Principles
//!
//! 1. **Validate, then apply**: a mutation that fails validation leaves the
//!    tree untouched, so a failed mutation is always a no-op
//! 2. **Lookup misses are silent**: an unknown id is reported as a
//!    [`MutationError`] for logging, never as a panic
//! 3. **Merge, don't replace**: style updates only add or overwrite keys
//!
//! ## Mutation Semantics
//!
//! ### InsertNode
//! - Appends to the parent's children (authoring order is significant)
//! - Rejects subtrees whose ids already exist in the document
//!
//! ### RemoveNode
//! - Removes the node and all descendants
//! - The root can never be removed
//!
//! ### Reparent
//! - Detaches and appends to the new parent
//! - Refuses to move a node into itself or its own descendant

use serde::{Deserialize, Serialize};
use sitecraft_document::{
    Animation, DataMap, Effects, Interaction, LayoutMode, Node, Styles, ROOT_ID,
};
use std::collections::HashSet;
use thiserror::Error;

/// Top-level field replaced by [`Mutation::UpdateProperty`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum Property {
    LayoutMode(LayoutMode),
    Animation(Option<Animation>),
    Interaction(Option<Interaction>),
    Data(Option<DataMap>),
    Name(Option<String>),
    HtmlId(Option<String>),
    ClassName(Option<String>),
    Effects(Effects),
}

impl Property {
    fn assign(&self, node: &mut Node) {
        match self {
            Property::LayoutMode(mode) => node.layout_mode = *mode,
            Property::Animation(animation) => node.animation = animation.clone(),
            Property::Interaction(interaction) => node.interaction = interaction.clone(),
            Property::Data(data) => node.data = data.clone(),
            Property::Name(name) => node.name = name.clone(),
            Property::HtmlId(html_id) => node.html_id = html_id.clone(),
            Property::ClassName(class_name) => node.class_name = class_name.clone(),
            Property::Effects(effects) => node.effects = effects.clone(),
        }
    }
}

/// Semantic mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Append an already-built subtree to a parent
    #[serde(rename_all = "camelCase")]
    InsertNode { parent_id: String, node: Node },

    /// Merge style properties into a node
    #[serde(rename_all = "camelCase")]
    UpdateStyles { node_id: String, styles: Styles },

    /// Replace a node's payload (text, media URL)
    #[serde(rename_all = "camelCase")]
    UpdateContent {
        node_id: String,
        content: Option<String>,
    },

    /// Replace a top-level property
    #[serde(rename_all = "camelCase")]
    UpdateProperty { node_id: String, property: Property },

    /// Remove a node and its subtree
    #[serde(rename_all = "camelCase")]
    RemoveNode { node_id: String },

    /// Move a node under a new parent (appended last)
    #[serde(rename_all = "camelCase")]
    Reparent {
        node_id: String,
        new_parent_id: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("The root node cannot be removed or moved")]
    RootProtected,

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Node {0} cannot have children")]
    InvalidParent(String),

    #[error("Node id already in use: {0}")]
    DuplicateId(String),
}

/// Ids whose state changed as a result of a mutation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    /// Nodes created or modified
    pub touched: Vec<String>,
    /// Nodes that no longer exist
    pub removed: Vec<String>,
}

impl Mutation {
    /// Id of the node the mutation is about
    pub fn target_id(&self) -> &str {
        match self {
            Mutation::InsertNode { node, .. } => &node.id,
            Mutation::UpdateStyles { node_id, .. }
            | Mutation::UpdateContent { node_id, .. }
            | Mutation::UpdateProperty { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::Reparent { node_id, .. } => node_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "insertNode",
            Mutation::UpdateStyles { .. } => "updateStyles",
            Mutation::UpdateContent { .. } => "updateContent",
            Mutation::UpdateProperty { .. } => "updateProperty",
            Mutation::RemoveNode { .. } => "removeNode",
            Mutation::Reparent { .. } => "reparent",
        }
    }

    /// Apply mutation to the tree with validation
    pub fn apply(&self, tree: &mut Node) -> Result<ChangeSet, MutationError> {
        self.validate(tree)?;

        match self {
            Mutation::InsertNode { parent_id, node } => {
                let touched = node.ids();
                let parent = tree
                    .find_mut(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                parent.children.push(node.clone());

                let mut change = ChangeSet {
                    touched,
                    removed: vec![],
                };
                change.touched.push(parent_id.clone());
                Ok(change)
            }

            Mutation::UpdateStyles { node_id, styles } => {
                let node = Self::node_mut(tree, node_id)?;
                for (key, value) in styles {
                    node.styles.insert(key.clone(), value.clone());
                }
                Ok(ChangeSet::touching(node_id))
            }

            Mutation::UpdateContent { node_id, content } => {
                Self::node_mut(tree, node_id)?.content = content.clone();
                Ok(ChangeSet::touching(node_id))
            }

            Mutation::UpdateProperty { node_id, property } => {
                property.assign(Self::node_mut(tree, node_id)?);
                Ok(ChangeSet::touching(node_id))
            }

            Mutation::RemoveNode { node_id } => {
                let parent_id = tree
                    .parent_of(node_id)
                    .map(|parent| parent.id.clone())
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let removed = tree
                    .detach(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

                Ok(ChangeSet {
                    touched: vec![parent_id],
                    removed: removed.ids(),
                })
            }

            Mutation::Reparent {
                node_id,
                new_parent_id,
            } => {
                let old_parent_id = tree
                    .parent_of(node_id)
                    .map(|parent| parent.id.clone())
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let moved = tree
                    .detach(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let parent = tree
                    .find_mut(new_parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.clone()))?;
                parent.children.push(moved);

                Ok(ChangeSet {
                    touched: vec![node_id.clone(), old_parent_id, new_parent_id.clone()],
                    removed: vec![],
                })
            }
        }
    }

    /// Pure variant of [`Mutation::apply`]: returns the next snapshot and
    /// leaves `tree` untouched. A failing mutation returns an equal copy.
    pub fn applied(&self, tree: &Node) -> Node {
        let mut next = tree.clone();
        let _ = self.apply(&mut next);
        next
    }

    /// Validate without applying
    pub fn validate(&self, tree: &Node) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode { parent_id, node } => {
                let parent = tree
                    .find(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                if !parent.node_type.accepts_children() {
                    return Err(MutationError::InvalidParent(parent_id.clone()));
                }

                let mut seen: HashSet<String> = tree.ids().into_iter().collect();
                for id in node.ids() {
                    if !seen.insert(id.clone()) {
                        return Err(MutationError::DuplicateId(id));
                    }
                }
                Ok(())
            }

            Mutation::UpdateStyles { node_id, .. }
            | Mutation::UpdateContent { node_id, .. }
            | Mutation::UpdateProperty { node_id, .. } => {
                tree.find(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::RemoveNode { node_id } => {
                if node_id == ROOT_ID {
                    return Err(MutationError::RootProtected);
                }
                tree.find(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                Ok(())
            }

            Mutation::Reparent {
                node_id,
                new_parent_id,
            } => {
                if node_id == ROOT_ID {
                    return Err(MutationError::RootProtected);
                }
                let node = tree
                    .find(node_id)
                    .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;
                let parent = tree
                    .find(new_parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(new_parent_id.clone()))?;

                // node itself or anything below it
                if node.contains(new_parent_id) {
                    return Err(MutationError::CycleDetected);
                }
                if !parent.node_type.accepts_children() {
                    return Err(MutationError::InvalidParent(new_parent_id.clone()));
                }
                Ok(())
            }
        }
    }

    fn node_mut<'a>(tree: &'a mut Node, node_id: &str) -> Result<&'a mut Node, MutationError> {
        tree.find_mut(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
    }
}

impl ChangeSet {
    fn touching(id: &str) -> Self {
        Self {
            touched: vec![id.to_string()],
            removed: vec![],
        }
    }
}

/// Outcome of applying a mutation to a [`crate::Document`]
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// Mutation changed the document
    Applied { version: u64 },
    /// Mutation had no effect; the document is unchanged
    Noop { reason: MutationError },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }

    pub fn is_noop(&self) -> bool {
        !self.is_applied()
    }
}
