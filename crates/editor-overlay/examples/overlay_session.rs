//! Drives an overlay session against a small in-memory host and prints what it draws.

use std::time::{Duration, Instant};

use editor_overlay::{
    CaretCoords, ContentNode, DocumentTree, DocumentView, DrawCommand, HighlightLayer,
    HighlightTransaction, NodeKind, OverlayConfig, OverlaySession, Rect, RenderSurface,
    RenderTrigger, ScrollAlign, ScrollMetrics, SignalHub, TransactionSink,
};

struct View {
    scroll_top: f64,
}

impl DocumentView for View {
    fn page_break_bounds(&self) -> Option<Rect> {
        None
    }
    fn page_bounds(&self) -> Option<Rect> {
        Some(Rect::new(96.0, 48.0 - self.scroll_top, 794.0, 842.0))
    }
    fn root_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 986.0, 1800.0)
    }
    fn coords_at_pos(&self, _position: usize) -> CaretCoords {
        CaretCoords {
            left: 240.0,
            top: 180.0 - self.scroll_top,
        }
    }
    fn selection_head(&self) -> usize {
        7
    }
    fn scroll_container(&self) -> Option<ScrollMetrics> {
        Some(ScrollMetrics {
            scroll_top: self.scroll_top,
            client_height: 720.0,
        })
    }
    fn window_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: 0.0,
            client_height: 900.0,
        }
    }
    fn device_pixel_ratio(&self) -> f64 {
        2.0
    }
}

struct Doc;

impl DocumentTree for Doc {
    fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>)) {
        visit(ContentNode {
            kind: NodeKind::Heading(1),
            text: "Rulers",
            position: 0,
        });
        visit(ContentNode::text("Rulers", 1));
        visit(ContentNode::text("A ruler measures the page; a caret guide follows you.", 9));
    }
}

struct Surface {
    name: &'static str,
    bounds: Rect,
    height: f64,
    commands: usize,
}

impl RenderSurface for Surface {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn client_width(&self) -> f64 {
        self.bounds.width
    }
    fn client_height(&self) -> f64 {
        self.height
    }
    fn set_css_height(&mut self, height: f64) {
        self.height = height;
        self.bounds.height = height;
    }
    fn resize_buffer(&mut self, width: u32, height: u32) {
        println!("[{}] buffer {width}x{height}", self.name);
    }
    fn begin_frame(&mut self, _scale: f64) {
        self.commands = 0;
    }
    fn draw(&mut self, command: &DrawCommand) {
        self.commands += 1;
        if let DrawCommand::Text { text, at, .. } = command
            && self.commands < 40
        {
            println!("[{}] label {text} at ({:.0}, {:.0})", self.name, at.x, at.y);
        }
    }
}

#[derive(Default)]
struct Sink {
    layer: HighlightLayer,
}

impl TransactionSink for Sink {
    fn dispatch(&mut self, transaction: HighlightTransaction) {
        self.layer.apply_transaction(&transaction);
        println!("highlights: {:?}", self.layer.highlights().spans());
    }
    fn scroll_into_view(&mut self, position: usize, align: ScrollAlign) {
        println!("scroll {position} into view ({align:?})");
    }
    fn set_text_selection(&mut self, position: usize) {
        println!("select {position}");
    }
    fn scroll_container_to(&mut self, top: f64) {
        println!("scroll container to {top}");
    }
}

fn main() {
    let mut hub = SignalHub::new();
    let mut session = OverlaySession::new(OverlayConfig::default());
    let mut view = View { scroll_top: 0.0 };
    let mut top = Surface {
        name: "top",
        bounds: Rect::new(0.0, 0.0, 986.0, 28.0),
        height: 28.0,
        commands: 0,
    };
    let mut left = Surface {
        name: "left",
        bounds: Rect::new(0.0, 0.0, 28.0, 0.0),
        height: 0.0,
        commands: 0,
    };
    let mut sink = Sink::default();

    session.mount(&mut hub);
    let report = session.flush(&view, &Doc, &mut top, &mut left);
    println!(
        "initial flush: height {:?}, headings {:?}",
        report.vertical_height,
        session.headings()
    );

    view.scroll_top = 400.0;
    hub.emit(&RenderTrigger::Scroll);
    let report = session.flush(&view, &Doc, &mut top, &mut left);
    println!("after scroll: caret guide at {:?}", report.vertical.and_then(|f| f.caret));

    let t0 = Instant::now();
    session.search("rul", t0);
    session.search("ruler", t0 + Duration::from_millis(80));
    if let Some(deadline) = session.next_deadline() {
        session.tick(deadline, &Doc, &mut sink);
    }

    session.jump_to_heading(0, &mut sink);
    session.jump_to_page(1, &mut sink);
    session.teardown(&mut hub);
}
