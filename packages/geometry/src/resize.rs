//! Direction-aware resize.
//!
//! A gesture is `Idle` until a handle is pressed, then `Dragging` until the
//! pointer is released. Every move recomputes the patch from the captured
//! start box, so patches never accumulate rounding error. Negative sizes are
//! clamped to zero rather than rejected.
//!
//! West/north handles behave differently per layout regime:
//!
//! - positioned nodes move their `left`/`top` with the pointer and keep the
//!   opposite edge fixed at `start_offset + start_size`
//! - flow nodes have nothing to anchor against, so the margin on that side
//!   absorbs the delta instead

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};
use sitecraft_document::{format_px, parse_px, Node, Styles};
use sitecraft_editor::{Document, MutationResult};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::North,
        ResizeDirection::South,
        ResizeDirection::East,
        ResizeDirection::West,
        ResizeDirection::NorthEast,
        ResizeDirection::NorthWest,
        ResizeDirection::SouthEast,
        ResizeDirection::SouthWest,
    ];

    fn is_north(self) -> bool {
        matches!(
            self,
            ResizeDirection::North | ResizeDirection::NorthEast | ResizeDirection::NorthWest
        )
    }

    fn is_south(self) -> bool {
        matches!(
            self,
            ResizeDirection::South | ResizeDirection::SouthEast | ResizeDirection::SouthWest
        )
    }

    fn is_east(self) -> bool {
        matches!(
            self,
            ResizeDirection::East | ResizeDirection::NorthEast | ResizeDirection::SouthEast
        )
    }

    fn is_west(self) -> bool {
        matches!(
            self,
            ResizeDirection::West | ResizeDirection::NorthWest | ResizeDirection::SouthWest
        )
    }
}

/// Box captured when a handle is pressed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBox {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub positioned: bool,
}

impl StartBox {
    /// Read the start box from a node's styles.
    ///
    /// Sizes that are not pixel lengths (`auto`, percentages) fall back to
    /// the measured `rendered` size.
    pub fn from_node(node: &Node, rendered: Size) -> Self {
        let length = |key: &str| node.style(key).and_then(parse_px);
        Self {
            width: length("width").unwrap_or(rendered.width()),
            height: length("height").unwrap_or(rendered.height()),
            left: length("left").unwrap_or(0.0),
            top: length("top").unwrap_or(0.0),
            margin_left: length("marginLeft").unwrap_or(0.0),
            margin_top: length("marginTop").unwrap_or(0.0),
            positioned: node.is_positioned(),
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Numeric result of one resize step, before formatting
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeFrame {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_top: Option<f32>,
}

impl ResizeFrame {
    pub fn to_styles(&self) -> Styles {
        let fields = [
            ("height", self.height),
            ("left", self.left),
            ("marginLeft", self.margin_left),
            ("marginTop", self.margin_top),
            ("top", self.top),
            ("width", self.width),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), format_px(v))))
            .collect()
    }
}

/// An in-progress resize
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub direction: ResizeDirection,
    pub start_pointer: Point,
    pub start: StartBox,
    last: Option<Styles>,
}

/// Resolve one axis of a start/near-side handle: returns (offset, size)
fn anchored(start_offset: f32, start_size: f32, delta: f32) -> (f32, f32) {
    let anchor = start_offset + start_size;
    let offset = (start_offset + delta).clamp(0.0, anchor.max(0.0));
    (offset, (anchor - offset).max(0.0))
}

impl ResizeSession {
    pub fn new(direction: ResizeDirection, start_pointer: Point, start: StartBox) -> Self {
        Self {
            direction,
            start_pointer,
            start,
            last: None,
        }
    }

    /// Compute the frame for the pointer's current position
    pub fn frame_for(&self, pointer: Point) -> ResizeFrame {
        let delta = pointer.sub_point(self.start_pointer);
        let start = &self.start;
        let mut frame = ResizeFrame::default();

        if self.direction.is_east() {
            frame.width = Some((start.width + delta.x()).max(0.0));
        } else if self.direction.is_west() {
            if start.positioned {
                let (left, width) = anchored(start.left, start.width, delta.x());
                frame.left = Some(left);
                frame.width = Some(width);
            } else {
                frame.width = Some((start.width - delta.x()).max(0.0));
                frame.margin_left = Some(start.margin_left + delta.x());
            }
        }

        if self.direction.is_south() {
            frame.height = Some((start.height + delta.y()).max(0.0));
        } else if self.direction.is_north() {
            if start.positioned {
                let (top, height) = anchored(start.top, start.height, delta.y());
                frame.top = Some(top);
                frame.height = Some(height);
            } else {
                frame.height = Some((start.height - delta.y()).max(0.0));
                frame.margin_top = Some(start.margin_top + delta.y());
            }
        }

        frame
    }

    pub fn patch_for(&self, pointer: Point) -> Styles {
        self.frame_for(pointer).to_styles()
    }
}

/// Resize state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResizeGesture {
    #[default]
    Idle,
    Dragging(ResizeSession),
}

impl ResizeGesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, ResizeGesture::Dragging(_))
    }

    /// Start dragging. A press while already dragging is ignored.
    pub fn press(&mut self, direction: ResizeDirection, pointer: Point, start: StartBox) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = ResizeGesture::Dragging(ResizeSession::new(direction, pointer, start));
        true
    }

    /// Style patch for the current pointer; `None` while idle
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Styles> {
        match self {
            ResizeGesture::Idle => None,
            ResizeGesture::Dragging(session) => {
                let patch = session.patch_for(pointer);
                session.last = Some(patch.clone());
                Some(patch)
            }
        }
    }

    /// Back to idle, returning the last patch produced while dragging
    pub fn release(&mut self) -> Option<Styles> {
        match std::mem::take(self) {
            ResizeGesture::Idle => None,
            ResizeGesture::Dragging(session) => session.last,
        }
    }
}

/// Drives a [`ResizeGesture`] against one node of a [`Document`]
#[derive(Debug, Default)]
pub struct ResizeController {
    node_id: Option<String>,
    gesture: ResizeGesture,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &ResizeGesture {
        &self.gesture
    }

    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Press a handle on `node_id`. `rendered` is the node's measured size,
    /// used when its styles carry no pixel width/height.
    pub fn press(
        &mut self,
        doc: &Document,
        node_id: &str,
        direction: ResizeDirection,
        pointer: Point,
        rendered: Size,
    ) -> bool {
        let Some(node) = doc.find(node_id) else {
            return false;
        };
        let start = StartBox::from_node(node, rendered);
        if !self.gesture.press(direction, pointer, start) {
            return false;
        }
        debug!(node_id, ?direction, "Resize started");
        self.node_id = Some(node_id.to_string());
        true
    }

    pub fn pointer_move(&mut self, doc: &mut Document, pointer: Point) -> Option<MutationResult> {
        let patch = self.gesture.pointer_move(pointer)?;
        let node_id = self.node_id.as_deref()?;
        Some(doc.update_styles(node_id, patch))
    }

    /// Finish the gesture. The document already holds the last patch.
    pub fn release(&mut self) -> Option<Styles> {
        let node_id = self.node_id.take();
        let patch = self.gesture.release();
        debug!(node_id = node_id.as_deref(), "Resize released");
        patch
    }
}
