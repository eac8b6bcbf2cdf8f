//! # Sitecraft Geometry
//!
//! Turns pointer input into style edits on a [`sitecraft_editor::Document`].
//!
//! Two layout regimes are supported. `stack` containers lay children out in
//! flow and only take alignment hints from a drop; `free` containers
//! position children absolutely at content-space coordinates.

mod drop;
mod drop_zone;
mod geometry;
mod resize;

pub use drop::{
    drop_payload, positioned_styles, resolve_drop_point, ContainerViewport, DragPayload,
    DropError, DropOutcome, DroppedFile,
};
pub use drop_zone::{DropZone, LEFT_ZONE_END, RIGHT_ZONE_START};
pub use geometry::{Bounds, Point, Size};
pub use resize::{
    ResizeController, ResizeDirection, ResizeFrame, ResizeGesture, ResizeSession, StartBox,
};
