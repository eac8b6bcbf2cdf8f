//! # Edit Session
//!
//! Owns the [`Document`] for one author and guards mutations that arrive
//! late from asynchronous collaborators (uploads, asset lookups, content
//! moderation).
//!
//! A task records the version of the node it targets when it starts. When
//! it completes, the result is compared against the node's current version:
//! if the author edited the node in the meantime, the [`ConflictPolicy`]
//! decides whether the late result is dropped or written anyway.

use crate::{Document, EditorError, MutationResult};
use sitecraft_document::{NodeOverrides, NodeType};
use std::collections::HashMap;
use tracing::{debug, warn};

/// What to do with an async result whose target changed while it was in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Drop the late result; the author's edit wins
    #[default]
    Reject,
    /// Apply the late result over the author's edit
    Overwrite,
}

/// Where the URL produced by an async task ends up
#[derive(Debug, Clone, PartialEq)]
pub enum AssetTarget {
    /// Replace the content of an existing media node
    ReplaceContent { node_id: String },
    /// Create a new node under `parent_id` with the URL as content
    InsertChild {
        parent_id: String,
        node_type: NodeType,
        overrides: NodeOverrides,
    },
}

impl AssetTarget {
    fn node_id(&self) -> &str {
        match self {
            AssetTarget::ReplaceContent { node_id } => node_id,
            AssetTarget::InsertChild { parent_id, .. } => parent_id,
        }
    }
}

/// Handle for an in-flight async task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTicket {
    pub task_id: u64,
    pub target: AssetTarget,
    /// Target node version when the task started
    pub base_version: u64,
}

/// Outcome of completing an async task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The result was written to the document
    Applied { node_id: String, version: u64 },
    /// The collaborator refused the payload; the reason is shown to the author
    Rejected { reason: String },
    /// The target node no longer exists
    Dropped,
    /// The target changed while the task was in flight
    Stale { node_id: String },
}

/// Single-author edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    pub conflict_policy: ConflictPolicy,

    next_task_id: u64,
    pending: HashMap<u64, TaskTicket>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            conflict_policy: ConflictPolicy::default(),
            next_task_id: 0,
            pending: HashMap::new(),
        }
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Register an async task against `target`.
    ///
    /// Returns `None` when the target node does not exist.
    pub fn begin_task(&mut self, target: AssetTarget) -> Option<TaskTicket> {
        let base_version = self.document.node_version(target.node_id())?;
        self.next_task_id += 1;

        let ticket = TaskTicket {
            task_id: self.next_task_id,
            target,
            base_version,
        };
        debug!(task_id = ticket.task_id, target = ticket.target.node_id(), "Started async task");
        self.pending.insert(ticket.task_id, ticket.clone());
        Some(ticket)
    }

    /// Finish a task with the collaborator's answer: a usable URL, or a
    /// human-readable reason for refusing the payload.
    pub fn complete_task(
        &mut self,
        task_id: u64,
        result: Result<String, String>,
    ) -> Result<TaskOutcome, EditorError> {
        let ticket = self
            .pending
            .remove(&task_id)
            .ok_or(EditorError::UnknownTask(task_id))?;

        let url = match result {
            Ok(url) => url,
            Err(reason) => {
                warn!(task_id, %reason, "Async task rejected");
                return Ok(TaskOutcome::Rejected { reason });
            }
        };

        let node_id = ticket.target.node_id().to_string();
        let Some(current) = self.document.node_version(&node_id) else {
            debug!(task_id, %node_id, "Target removed before task completed");
            return Ok(TaskOutcome::Dropped);
        };

        // Inserting a new child doesn't overwrite anything on the parent,
        // so only content replacement is version-checked.
        let replaces = matches!(ticket.target, AssetTarget::ReplaceContent { .. });
        if replaces && current != ticket.base_version && self.conflict_policy == ConflictPolicy::Reject {
            warn!(task_id, %node_id, base = ticket.base_version, current, "Discarding stale async result");
            return Ok(TaskOutcome::Stale { node_id });
        }

        let outcome = match ticket.target {
            AssetTarget::ReplaceContent { node_id } => match self.document.update_content(&node_id, url) {
                MutationResult::Applied { version } => TaskOutcome::Applied { node_id, version },
                MutationResult::Noop { .. } => TaskOutcome::Dropped,
            },
            AssetTarget::InsertChild {
                parent_id,
                node_type,
                overrides,
            } => {
                let overrides = overrides.with_content(url);
                match self.document.insert_child(&parent_id, node_type, overrides) {
                    Some(node_id) => TaskOutcome::Applied {
                        node_id,
                        version: self.document.version(),
                    },
                    None => TaskOutcome::Dropped,
                }
            }
        };
        Ok(outcome)
    }

    /// Forget an in-flight task without touching the document
    pub fn cancel_task(&mut self, task_id: u64) -> bool {
        self.pending.remove(&task_id).is_some()
    }

    /// Get number of pending tasks
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
