//! Drop handling.
//!
//! Pointer positions arrive in viewport space. Free-layout containers need
//! them in the container's content space, which is independent of how far
//! the container is scrolled:
//!
//! ```text
//! content = clamp((pointer - origin) + scroll, 0, scroll_extent)
//! ```
//!
//! Stack containers ignore the coordinate and use [`DropZone`] hinting.

use crate::drop_zone::DropZone;
use crate::geometry::{Bounds, Point, Size};
use serde::{Deserialize, Serialize};
use sitecraft_document::{format_px, LayoutMode, NodeOverrides, NodeType, Styles};
use sitecraft_editor::{AssetTarget, Document, Mutation, MutationError, MutationResult};
use thiserror::Error;
use tracing::debug;

/// Where a container sits on screen and how far it is scrolled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerViewport {
    /// Viewport-space box of the container
    pub bounds: Bounds,
    /// Current scroll offset
    pub scroll: Point,
    /// Full scrollable content size
    pub scroll_extent: Size,
}

impl ContainerViewport {
    pub fn new(bounds: Bounds, scroll: Point, scroll_extent: Size) -> Self {
        Self {
            bounds,
            scroll,
            scroll_extent,
        }
    }

    /// Unscrolled container whose content is exactly its box
    pub fn fixed(bounds: Bounds) -> Self {
        Self::new(bounds, Point::default(), bounds.to_size())
    }

    pub fn origin(&self) -> Point {
        self.bounds.min_point()
    }

    /// Convert a viewport pointer into clamped content-space coordinates
    pub fn to_content(&self, pointer: Point) -> Point {
        resolve_drop_point(pointer, self.origin(), self.scroll, self.scroll_extent)
    }
}

/// `clamp((pointer - origin) + scroll)` per axis into `[0, extent]`
pub fn resolve_drop_point(pointer: Point, origin: Point, scroll: Point, extent: Size) -> Point {
    pointer.sub_point(origin).add_point(scroll).clamp_to(extent)
}

/// A file dropped from the operating system
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DroppedFile {
    /// Node kind the file becomes once uploaded
    pub fn node_type(&self) -> Option<NodeType> {
        if self.mime.starts_with("image/") {
            Some(NodeType::Image)
        } else if self.mime.starts_with("video/") {
            Some(NodeType::Video)
        } else {
            None
        }
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// A new element from the palette
    NewElement { element_type: NodeType },
    /// A node already in the document
    MoveExisting { node_id: String },
    /// A file from the operating system
    OsFile { file: DroppedFile },
}

/// Result of a successful drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Inserted { node_id: String },
    Moved { node_id: String },
    /// The file must go through the upload collaborator first; start a task
    /// for `target` and complete it with the resulting URL.
    NeedsUpload { target: AssetTarget, file: DroppedFile },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),
}

/// Absolute offsets for a free-layout child at `at`
pub fn positioned_styles(at: Point) -> Styles {
    Styles::from([
        ("left".to_string(), format_px(at.x())),
        ("position".to_string(), "absolute".to_string()),
        ("top".to_string(), format_px(at.y())),
    ])
}

/// Styles that return a previously positioned node to normal flow
fn flow_styles() -> Styles {
    Styles::from([
        ("left".to_string(), "auto".to_string()),
        ("position".to_string(), "static".to_string()),
        ("top".to_string(), "auto".to_string()),
    ])
}

fn check(result: MutationResult) -> Result<(), DropError> {
    match result {
        MutationResult::Applied { .. } => Ok(()),
        MutationResult::Noop { reason } => Err(reason.into()),
    }
}

/// Drop `payload` onto the container `target_id` at viewport `pointer`.
///
/// Nothing is changed when an error is returned.
pub fn drop_payload(
    doc: &mut Document,
    target_id: &str,
    viewport: &ContainerViewport,
    payload: DragPayload,
    pointer: Point,
) -> Result<DropOutcome, DropError> {
    let target = doc
        .find(target_id)
        .ok_or_else(|| MutationError::NodeNotFound(target_id.to_string()))?;
    if !target.node_type.accepts_children() {
        return Err(MutationError::InvalidParent(target_id.to_string()).into());
    }

    if let DragPayload::MoveExisting { node_id } = &payload {
        Mutation::Reparent {
            node_id: node_id.clone(),
            new_parent_id: target_id.to_string(),
        }
        .validate(doc.tree())?;
    }

    match target.layout_mode {
        LayoutMode::Free => {
            let at = viewport.to_content(pointer);
            debug!(target_id, x = at.x(), y = at.y(), "Dropping into free container");
            drop_free(doc, target_id, payload, at)
        }
        LayoutMode::Stack => {
            let zone = DropZone::from_pointer(viewport.bounds, pointer);
            debug!(target_id, ?zone, "Dropping into stack container");
            drop_stack(doc, target_id, payload, zone)
        }
    }
}

fn drop_free(
    doc: &mut Document,
    target_id: &str,
    payload: DragPayload,
    at: Point,
) -> Result<DropOutcome, DropError> {
    let offsets = positioned_styles(at);
    match payload {
        DragPayload::NewElement { element_type } => {
            let overrides = NodeOverrides {
                styles: offsets,
                ..NodeOverrides::default()
            };
            doc.insert_child(target_id, element_type, overrides)
                .map(|node_id| DropOutcome::Inserted { node_id })
                .ok_or_else(|| MutationError::InvalidParent(target_id.to_string()).into())
        }
        DragPayload::MoveExisting { node_id } => {
            check(doc.update_styles(&node_id, offsets))?;
            check(doc.reparent(&node_id, target_id))?;
            Ok(DropOutcome::Moved { node_id })
        }
        DragPayload::OsFile { file } => upload(target_id, file, offsets),
    }
}

fn drop_stack(
    doc: &mut Document,
    target_id: &str,
    payload: DragPayload,
    zone: DropZone,
) -> Result<DropOutcome, DropError> {
    match payload {
        DragPayload::NewElement { element_type } => {
            check(doc.update_styles(target_id, zone.alignment_styles()))?;
            doc.insert_child(target_id, element_type, NodeOverrides::default())
                .map(|node_id| DropOutcome::Inserted { node_id })
                .ok_or_else(|| MutationError::InvalidParent(target_id.to_string()).into())
        }
        DragPayload::MoveExisting { node_id } => {
            check(doc.update_styles(target_id, zone.alignment_styles()))?;
            let positioned = doc.find(&node_id).map(|n| n.is_positioned()).unwrap_or(false);
            if positioned {
                check(doc.update_styles(&node_id, flow_styles()))?;
            }
            check(doc.reparent(&node_id, target_id))?;
            Ok(DropOutcome::Moved { node_id })
        }
        // Alignment is left alone: the upload may still be refused
        DragPayload::OsFile { file } => upload(target_id, file, Styles::new()),
    }
}

fn upload(target_id: &str, file: DroppedFile, styles: Styles) -> Result<DropOutcome, DropError> {
    let node_type = file
        .node_type()
        .ok_or_else(|| DropError::UnsupportedFile(file.mime.clone()))?;
    Ok(DropOutcome::NeedsUpload {
        target: AssetTarget::InsertChild {
            parent_id: target_id.to_string(),
            node_type,
            overrides: NodeOverrides {
                styles,
                ..NodeOverrides::default()
            },
        },
        file,
    })
}
