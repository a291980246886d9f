#![warn(missing_docs)]
//! Editor Overlay - Headless Rulers and Search Highlights for Paginated Editors
//!
//! # Overview
//!
//! `editor-overlay` computes the measurement overlays drawn around a paginated rich-text
//! editor: a horizontal ruler along the top edge, a vertical ruler along the left edge, and a
//! caret guide on each. It also owns the search-highlight layer: matching a term against the
//! document's text leaves and publishing the result as one decoration set.
//!
//! The crate never touches a real canvas or DOM. The host supplies geometry and scroll state
//! through [`DocumentView`], text through [`DocumentTree`], and receives draw commands through
//! [`RenderSurface`] and highlight transactions through [`TransactionSink`].
//!
//! # Core Features
//!
//! - **Tick rulers**: minor / labeled / major tiers, labels only inside the page
//! - **Caret guides**: follow the selection head, hidden while unresolved
//! - **HiDPI backing**: the buffer is reallocated only when device-pixel dimensions change
//! - **Search**: case-insensitive literal search by default, in document positions
//! - **Highlight layer**: whole-set replacement, explicit clearing, scroll to the first hit
//! - **Scheduling**: signal subscriptions, redraw coalescing, debounced search, clean teardown
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  OverlaySession (signals, flush, debounce)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Rulers (horizontal / vertical)             │  ← Draw Commands
//! ├─────────────────────────────────────────────┤
//! │  Ticks & Caret Guides                       │  ← Pure Layout
//! ├─────────────────────────────────────────────┤
//! │  Viewport Geometry                          │  ← Host Measurements
//! ├─────────────────────────────────────────────┤
//! │  Search & Decorations                       │  ← Highlight Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Matching a Document
//!
//! ```rust
//! use editor_overlay::{ContentNode, DocumentTree, HighlightSet, search};
//!
//! struct Doc;
//!
//! impl DocumentTree for Doc {
//!     fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>)) {
//!         visit(ContentNode::text("Hello world", 1));
//!         visit(ContentNode::text("hello again", 14));
//!     }
//! }
//!
//! let spans = search::match_document(&Doc, "hello");
//! let set = HighlightSet::from_spans(spans);
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.first().map(|span| span.start), Some(1));
//! ```
//!
//! ## Laying Out a Ruler
//!
//! ```rust
//! use editor_overlay::{HorizontalRuler, ViewportGeometry};
//!
//! let ruler = HorizontalRuler::default();
//! let geometry = ViewportGeometry {
//!     origin_x: 0.0,
//!     origin_y: 0.0,
//!     page_width: 600.0,
//!     page_height: 842.0,
//!     scroll_offset: 0.0,
//! };
//!
//! let frame = ruler.layout(&geometry, None, 600.0);
//! assert!(frame.ticks.iter().any(|tick| tick.label == Some(5)));
//! ```
//!
//! # Module Description
//!
//! - [`host`] - Host-facing traits and value types
//! - [`geometry`] - Page bounds and scroll offset resolution
//! - [`caret`] - Caret guide tracking
//! - [`ticks`] - Tick classification and labels
//! - [`ruler`] - Horizontal and vertical ruler rendering
//! - [`search`] - Document search
//! - [`decorations`] - Search highlight sets, dispatch and the host-side layer
//! - [`signals`] - Subscription registry for view signals
//! - [`debounce`] - Quiescence-window debouncing
//! - [`scheduler`] - Render scheduling and session lifecycle
//! - [`outline`] - Heading index and page navigation
//! - [`config`] - Styles, tick spacing and page layout

pub mod caret;
pub mod config;
pub mod debounce;
pub mod decorations;
pub mod error;
pub mod geometry;
pub mod host;
pub mod outline;
pub mod ruler;
pub mod scheduler;
pub mod search;
pub mod signals;
pub mod ticks;

pub use caret::{Axis, CaretMarker};
pub use config::{Color, OverlayConfig, PageLayout, RulerStyle, TickSpacing};
pub use debounce::Debouncer;
pub use decorations::{
    Decoration, DecorationDispatcher, DecorationLayerId, DecorationRange, HighlightLayer,
    HighlightSet, HighlightTransaction, SEARCH_HIGHLIGHT_META,
};
pub use error::{ConfigError, SearchError};
pub use geometry::ViewportGeometry;
pub use host::{
    CaretCoords, ContentNode, DocumentTree, DocumentView, NodeKind, Rect, RenderSurface,
    ScrollAlign, ScrollMetrics, TransactionSink,
};
pub use outline::HeadingEntry;
pub use ruler::{
    BackingStore, DrawCommand, HorizontalRuler, Point, RulerFrame, TextAlign, TextBaseline,
    VerticalRuler,
};
pub use scheduler::{FlushReport, OverlaySession, PendingWork, RenderTrigger};
pub use search::{MatchSpan, SearchOptions};
pub use signals::{SignalHub, Subscription, SubscriptionId};
pub use ticks::{Tick, TickTier};
