//! Page geometry resolution.
//!
//! Locates the active page inside the host view and expresses it relative to a rendering
//! surface. The page is looked up through a fallback chain:
//!
//! 1. the explicit page-break marker,
//! 2. a generic page marker,
//! 3. the view's own root bounds.
//!
//! Resolution never fails; a view without pagination simply yields root-bounds geometry.

use crate::host::{DocumentView, Rect};

/// Page position and size relative to a rendering surface, plus the current scroll offset.
///
/// Derived fresh on every redraw and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportGeometry {
    /// Distance from the surface's left edge to the page's left edge.
    pub origin_x: f64,
    /// Distance from the surface's top edge to the page's top edge.
    pub origin_y: f64,
    /// Page width (never negative).
    pub page_width: f64,
    /// Page height (never negative).
    pub page_height: f64,
    /// Scroll offset of the nearest scrollable ancestor.
    pub scroll_offset: f64,
}

impl ViewportGeometry {
    /// Right edge of the page in surface space.
    pub fn page_right(&self) -> f64 {
        self.origin_x + self.page_width
    }

    /// Bottom edge of the page in surface space.
    pub fn page_bottom(&self) -> f64 {
        self.origin_y + self.page_height
    }
}

/// Pick the page bounds from the view, following the marker fallback chain.
pub fn page_bounds(view: &dyn DocumentView) -> Rect {
    view.page_break_bounds()
        .or_else(|| view.page_bounds())
        .unwrap_or_else(|| view.root_bounds())
}

/// Resolve page geometry relative to `surface`.
pub fn resolve(view: &dyn DocumentView, surface: Rect) -> ViewportGeometry {
    let page = page_bounds(view);
    let scroll = view.effective_scroll();

    ViewportGeometry {
        origin_x: finite_or_zero(page.x - surface.x),
        origin_y: finite_or_zero(page.y - surface.y),
        page_width: finite_or_zero(page.width).max(0.0),
        page_height: finite_or_zero(page.height).max(0.0),
        scroll_offset: finite_or_zero(scroll.scroll_top),
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
