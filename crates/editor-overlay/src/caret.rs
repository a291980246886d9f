//! Caret tracking.
//!
//! Maps a document position to a pixel coordinate on a rendering surface. An unresolvable
//! position (pending layout, unmounted node) is reported as `None`, which callers treat as
//! "skip the caret guide this frame".

use crate::host::{DocumentView, Rect};

/// Which surface axis a coordinate is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// X, measured from the surface's left edge.
    Horizontal,
    /// Y, measured from the surface's top edge.
    Vertical,
}

/// A document position together with its on-surface coordinate, if it has one right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretMarker {
    /// Document position of the caret.
    pub document_position: usize,
    /// Pixel coordinate along the tracked axis; `None` when not resolvable this frame.
    pub pixel_coordinate: Option<f64>,
}

impl CaretMarker {
    /// Resolve the view's current selection head along `axis`.
    pub fn resolve(view: &dyn DocumentView, surface: Rect, axis: Axis) -> Self {
        let document_position = view.selection_head();
        Self {
            document_position,
            pixel_coordinate: track(view, document_position, surface, axis),
        }
    }
}

/// Map `position` to a coordinate along `axis`, relative to `surface`.
pub fn track(view: &dyn DocumentView, position: usize, surface: Rect, axis: Axis) -> Option<f64> {
    let coords = view.coords_at_pos(position);
    let value = match axis {
        Axis::Horizontal => coords.left - surface.x,
        Axis::Vertical => coords.top - surface.y,
    };
    value.is_finite().then_some(value)
}
