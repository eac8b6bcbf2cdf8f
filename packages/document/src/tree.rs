//! Read-only tree queries.
//!
//! Lookups re-traverse the tree depth-first on every call. Documents are
//! small enough that an id index is not worth keeping in sync.

use crate::node::{Node, ROOT_ID};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Root node must have id \"root\", found \"{0}\"")]
    InvalidRoot(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node with empty id under parent {0}")]
    EmptyId(String),

    #[error("Node {id} of type {node_type} cannot have children")]
    UnexpectedChildren { id: String, node_type: String },
}

/// Depth-first search for the first node with `id`
pub fn find<'a>(tree: &'a Node, id: &str) -> Option<&'a Node> {
    tree.find(id)
}

impl Node {
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Parent of the node with `id`, if it is below `self`
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        if self.children.iter().any(|child| child.id == id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.parent_of(id))
    }

    /// True when `id` is this node or one of its descendants
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// True when `id` names a strict descendant of the node `ancestor_id`
    pub fn is_descendant_of(&self, id: &str, ancestor_id: &str) -> bool {
        self.find(ancestor_id)
            .map(|ancestor| ancestor.children.iter().any(|child| child.contains(id)))
            .unwrap_or(false)
    }

    /// Remove the node with `id` from its parent and return it
    pub fn detach(&mut self, id: &str) -> Option<Node> {
        if let Some(pos) = self.children.iter().position(|child| child.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|child| child.detach(id))
    }

    /// Pre-order visit with depth
    pub fn walk<F: FnMut(&Node, usize)>(&self, visit: &mut F) {
        self.walk_at(0, visit);
    }

    fn walk_at<F: FnMut(&Node, usize)>(&self, depth: usize, visit: &mut F) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// All ids in pre-order
    pub fn ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.walk(&mut |node, _| ids.push(node.id.clone()));
        ids
    }

    /// Number of nodes in this subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Check the structural invariants of a document root
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.id != ROOT_ID {
            return Err(TreeError::InvalidRoot(self.id.clone()));
        }
        let mut seen = HashSet::new();
        self.validate_subtree(&mut seen)
    }

    /// Check a detached subtree before it is grafted into a document
    pub fn validate_subtree(&self, seen: &mut HashSet<String>) -> Result<(), TreeError> {
        if !seen.insert(self.id.clone()) {
            return Err(TreeError::DuplicateId(self.id.clone()));
        }
        if !self.children.is_empty() && !self.node_type.accepts_children() {
            return Err(TreeError::UnexpectedChildren {
                id: self.id.clone(),
                node_type: self.node_type.to_string(),
            });
        }
        for child in &self.children {
            if child.id.is_empty() {
                return Err(TreeError::EmptyId(self.id.clone()));
            }
            child.validate_subtree(seen)?;
        }
        Ok(())
    }
}
