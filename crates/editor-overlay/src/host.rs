//! Host integration interfaces.
//!
//! The overlay engine never touches a windowing system, a canvas or the document model
//! directly. The embedding application implements the traits in this module:
//!
//! - [`DocumentView`] - read-only geometry queries against the mounted editor view
//! - [`DocumentTree`] - document-order traversal of content nodes
//! - [`TransactionSink`] - presentation-only updates (highlight transactions, scrolling)
//! - [`RenderSurface`] - a pixel surface a ruler paints onto
//!
//! All coordinates are CSS pixels relative to the host's client area unless noted otherwise.

use crate::decorations::HighlightTransaction;
use crate::ruler::DrawCommand;

/// An axis-aligned bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (may be reported negative or non-finite by a misbehaving host).
    pub width: f64,
    /// Height (may be reported negative or non-finite by a misbehaving host).
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Screen coordinates of a document position, as reported by the view.
///
/// Either field may be `NaN`/infinite while the position is not renderable (pending layout,
/// unmounted node).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretCoords {
    /// Left edge of the caret.
    pub left: f64,
    /// Top edge of the caret.
    pub top: f64,
}

impl CaretCoords {
    /// Coordinates for a position that cannot be resolved right now.
    pub const UNRESOLVED: Self = Self {
        left: f64::NAN,
        top: f64::NAN,
    };
}

/// Scroll offset and viewport size of a scrollable element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Vertical scroll offset.
    pub scroll_top: f64,
    /// Visible height.
    pub client_height: f64,
}

/// Read-only access to the mounted editor view.
pub trait DocumentView {
    /// Bounds of the explicit page-break marker, if the pagination layer rendered one.
    fn page_break_bounds(&self) -> Option<Rect>;

    /// Bounds of a generic page marker, if any.
    fn page_bounds(&self) -> Option<Rect>;

    /// Bounds of the view's root element. Always available.
    fn root_bounds(&self) -> Rect;

    /// Screen coordinates of a document position.
    fn coords_at_pos(&self, position: usize) -> CaretCoords;

    /// Head of the current selection (the `from` side).
    fn selection_head(&self) -> usize;

    /// Metrics of the nearest scrollable ancestor of the view, if there is one.
    fn scroll_container(&self) -> Option<ScrollMetrics>;

    /// Metrics of the window, used when the view has no scrollable ancestor.
    fn window_metrics(&self) -> ScrollMetrics;

    /// Device pixel ratio of the display the view is on.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Scroll metrics of the nearest scroller, falling back to the window.
    fn effective_scroll(&self) -> ScrollMetrics {
        self.scroll_container().unwrap_or_else(|| self.window_metrics())
    }
}

/// Coarse node type exposed by the document traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A text leaf. Only these are searched.
    Text,
    /// A heading block with its level (1-based).
    Heading(u8),
    /// A paragraph block.
    Paragraph,
    /// Any other node (lists, tables, page chrome...).
    Other,
}

/// A content node visited during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentNode<'a> {
    /// Node kind.
    pub kind: NodeKind,
    /// Text of a leaf, or the concatenated text content of a block.
    pub text: &'a str,
    /// Document position where the node (or leaf text) starts.
    pub position: usize,
}

impl<'a> ContentNode<'a> {
    /// Create a text leaf node.
    pub fn text(text: &'a str, position: usize) -> Self {
        Self {
            kind: NodeKind::Text,
            text,
            position,
        }
    }

    /// Returns `true` for text-bearing leaves.
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}

/// Document-order traversal over content nodes.
pub trait DocumentTree {
    /// Visit every node in document order (parents before their children).
    fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>));
}

/// Alignment used when scrolling a document position into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align to the start of the viewport.
    Start,
    /// Center in the viewport.
    Center,
}

/// Presentation-only update channel into the editor view.
///
/// None of these calls may change document content.
pub trait TransactionSink {
    /// Dispatch a transaction carrying a highlight-set payload.
    fn dispatch(&mut self, transaction: HighlightTransaction);

    /// Scroll the element at `position` into view.
    fn scroll_into_view(&mut self, position: usize, align: ScrollAlign);

    /// Collapse the selection to `position`.
    fn set_text_selection(&mut self, position: usize);

    /// Scroll the nearest scrollable ancestor to `top`.
    fn scroll_container_to(&mut self, top: f64);
}

/// A pixel surface a ruler paints onto.
pub trait RenderSurface {
    /// Bounding box of the surface element.
    fn bounds(&self) -> Rect;

    /// Laid-out width of the surface element.
    fn client_width(&self) -> f64;

    /// Laid-out height of the surface element.
    fn client_height(&self) -> f64;

    /// Set the CSS height of the surface element.
    fn set_css_height(&mut self, height: f64);

    /// Reallocate the backing pixel buffer.
    fn resize_buffer(&mut self, width: u32, height: u32);

    /// Start a frame, mapping CSS pixels to device pixels by `scale`.
    fn begin_frame(&mut self, scale: f64);

    /// Execute one draw command.
    fn draw(&mut self, command: &DrawCommand);
}
