//! # Document Handle
//!
//! The single owned editing state for one page.
//!
//! Every consumer (geometry, async task completions, property panels) writes
//! through the named operations here, which funnel into [`Mutation`]. Nothing
//! else gets a mutable reference to the tree, so the root, uniqueness and
//! acyclicity invariants hold after every call.
//!
//! ## Lifecycle
//!
//! ```text
//! new/load → insert/update/remove/reparent → tree() snapshot → compile
//! ```

use crate::{EditorError, Mutation, MutationResult, Property};
use sitecraft_document::{IDGenerator, Node, NodeOverrides, NodeType, Styles};
use std::collections::HashMap;
use tracing::debug;

/// Editable page document
#[derive(Debug, Clone)]
pub struct Document {
    /// Document name (also seeds generated ids)
    pub name: String,

    /// Increments on each applied mutation
    version: u64,

    tree: Node,
    ids: IDGenerator,

    /// Currently selected node, if any
    selected: Option<String>,

    /// Document version at which each node last changed
    node_versions: HashMap<String, u64>,
}

impl Document {
    /// Create a document holding an empty page root
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ids: IDGenerator::new(&name),
            name,
            version: 0,
            tree: Node::root(),
            selected: None,
            node_versions: HashMap::new(),
        }
    }

    /// Create a document from an existing tree
    pub fn from_tree(name: impl Into<String>, tree: Node) -> Result<Self, EditorError> {
        let mut doc = Self::new(name);
        doc.load(tree)?;
        doc.version = 0;
        doc.node_versions.clear();
        Ok(doc)
    }

    /// Parse a serialized tree
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, EditorError> {
        let tree: Node = serde_json::from_str(json)?;
        Self::from_tree(name, tree)
    }

    /// Serialize the current tree (for the template store)
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current tree snapshot
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.tree.find(id)
    }

    /// Version at which `id` last changed; `None` if the node does not exist
    pub fn node_version(&self, id: &str) -> Option<u64> {
        self.tree
            .find(id)
            .map(|_| self.node_versions.get(id).copied().unwrap_or(0))
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        match mutation.apply(&mut self.tree) {
            Ok(change) => {
                self.version += 1;
                for id in change.touched {
                    self.node_versions.insert(id, self.version);
                }
                for id in &change.removed {
                    self.node_versions.remove(id);
                }
                if let Some(selected) = &self.selected {
                    if change.removed.contains(selected) {
                        self.selected = None;
                    }
                }
                debug!(op = mutation.kind(), target = mutation.target_id(), version = self.version, "Applied mutation");
                MutationResult::Applied {
                    version: self.version,
                }
            }
            Err(reason) => {
                debug!(op = mutation.kind(), target = mutation.target_id(), %reason, "Mutation ignored");
                MutationResult::Noop { reason }
            }
        }
    }

    /// Build a node through the type factory and append it to `parent_id`.
    ///
    /// Returns the new node's id, or `None` when nothing was inserted.
    pub fn insert_child(
        &mut self,
        parent_id: &str,
        node_type: NodeType,
        overrides: NodeOverrides,
    ) -> Option<String> {
        let node = Node::create_with(node_type, overrides, &mut self.ids);
        let id = node.id.clone();
        let result = self.apply(Mutation::InsertNode {
            parent_id: parent_id.to_string(),
            node,
        });
        result.is_applied().then_some(id)
    }

    pub fn update_styles(&mut self, id: &str, styles: Styles) -> MutationResult {
        self.apply(Mutation::UpdateStyles {
            node_id: id.to_string(),
            styles,
        })
    }

    pub fn update_content(&mut self, id: &str, content: impl Into<String>) -> MutationResult {
        self.apply(Mutation::UpdateContent {
            node_id: id.to_string(),
            content: Some(content.into()),
        })
    }

    pub fn update_property(&mut self, id: &str, property: Property) -> MutationResult {
        self.apply(Mutation::UpdateProperty {
            node_id: id.to_string(),
            property,
        })
    }

    pub fn remove(&mut self, id: &str) -> MutationResult {
        self.apply(Mutation::RemoveNode {
            node_id: id.to_string(),
        })
    }

    pub fn reparent(&mut self, id: &str, new_parent_id: &str) -> MutationResult {
        self.apply(Mutation::Reparent {
            node_id: id.to_string(),
            new_parent_id: new_parent_id.to_string(),
        })
    }

    /// Replace the whole tree. Destructive: nothing of the previous tree is
    /// kept. An invalid tree is rejected and the document stays as it was.
    ///
    /// Every loaded node is stamped with the new version, so work started
    /// against the previous tree sees its target as changed.
    pub fn load(&mut self, tree: Node) -> Result<(), EditorError> {
        tree.validate()?;

        self.ids.sync_with(&tree);
        self.tree = tree;
        self.version += 1;
        self.selected = None;
        self.node_versions.clear();
        let version = self.version;
        let node_versions = &mut self.node_versions;
        self.tree.walk(&mut |node, _| {
            node_versions.insert(node.id.clone(), version);
        });
        debug!(document = %self.name, nodes = self.tree.count(), "Loaded document");
        Ok(())
    }

    /// Select a node; returns false (and clears selection) if it doesn't exist
    pub fn select(&mut self, id: &str) -> bool {
        if self.tree.contains(id) {
            self.selected = Some(id.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
