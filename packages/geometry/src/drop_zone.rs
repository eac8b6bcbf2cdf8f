//! Smart drop-zone hinting for stack containers.
//!
//! While dragging over a flow container, the pointer's horizontal position
//! picks one of three zones. On drop the container's own alignment is
//! rewritten to match the zone and the item is appended last. This sets
//! alignment for every child; it does not insert at a pointer index.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use sitecraft_document::Styles;

/// Fraction of the width at or below which the left zone applies
pub const LEFT_ZONE_END: f32 = 0.4;
/// Fraction of the width at or above which the right zone applies
pub const RIGHT_ZONE_START: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Left,
    Center,
    Right,
}

impl DropZone {
    /// Zone for a viewport-space pointer over a container's viewport bounds
    pub fn from_pointer(container: Bounds, pointer: Point) -> Self {
        let width = container.width();
        if width <= 0.0 {
            return DropZone::Center;
        }
        Self::from_ratio((pointer.x() - container.min_x()) / width)
    }

    pub fn from_ratio(ratio: f32) -> Self {
        if ratio <= LEFT_ZONE_END {
            DropZone::Left
        } else if ratio >= RIGHT_ZONE_START {
            DropZone::Right
        } else {
            DropZone::Center
        }
    }

    fn alignment(self) -> &'static str {
        match self {
            DropZone::Left => "flex-start",
            DropZone::Center => "center",
            DropZone::Right => "flex-end",
        }
    }

    /// Container alignment styles for this zone
    pub fn alignment_styles(self) -> Styles {
        let value = self.alignment().to_string();
        Styles::from([
            ("alignItems".to_string(), value.clone()),
            ("justifyContent".to_string(), value),
        ])
    }
}
