//! Recording host used by the integration tests.

#![allow(dead_code)]

use editor_overlay::{
    CaretCoords, ContentNode, DocumentTree, DocumentView, DrawCommand, HighlightTransaction,
    NodeKind, Rect, RenderSurface, ScrollAlign, ScrollMetrics, TransactionSink,
};

#[derive(Debug, Clone)]
pub struct MockView {
    pub page_break: Option<Rect>,
    pub page: Option<Rect>,
    pub root: Rect,
    pub caret: CaretCoords,
    pub head: usize,
    pub scroller: Option<ScrollMetrics>,
    pub window: ScrollMetrics,
    pub dpr: f64,
}

impl Default for MockView {
    fn default() -> Self {
        Self {
            page_break: None,
            page: Some(Rect::new(100.0, 40.0, 600.0, 842.0)),
            root: Rect::new(0.0, 0.0, 800.0, 2000.0),
            caret: CaretCoords::UNRESOLVED,
            head: 0,
            scroller: Some(ScrollMetrics {
                scroll_top: 0.0,
                client_height: 700.0,
            }),
            window: ScrollMetrics {
                scroll_top: 0.0,
                client_height: 900.0,
            },
            dpr: 1.0,
        }
    }
}

impl DocumentView for MockView {
    fn page_break_bounds(&self) -> Option<Rect> {
        self.page_break
    }
    fn page_bounds(&self) -> Option<Rect> {
        self.page
    }
    fn root_bounds(&self) -> Rect {
        self.root
    }
    fn coords_at_pos(&self, _position: usize) -> CaretCoords {
        self.caret
    }
    fn selection_head(&self) -> usize {
        self.head
    }
    fn scroll_container(&self) -> Option<ScrollMetrics> {
        self.scroller
    }
    fn window_metrics(&self) -> ScrollMetrics {
        self.window
    }
    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}

#[derive(Debug, Default)]
pub struct MockSurface {
    pub bounds: Rect,
    pub client_width: f64,
    pub client_height: f64,
    pub css_heights: Vec<f64>,
    pub resizes: Vec<(u32, u32)>,
    pub frames: usize,
    pub commands: Vec<DrawCommand>,
}

impl MockSurface {
    pub fn horizontal(width: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, 28.0),
            client_width: width,
            client_height: 28.0,
            ..Default::default()
        }
    }

    pub fn vertical() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 28.0, 0.0),
            client_width: 28.0,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for MockSurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }
    fn client_width(&self) -> f64 {
        self.client_width
    }
    fn client_height(&self) -> f64 {
        self.client_height
    }
    fn set_css_height(&mut self, height: f64) {
        self.client_height = height;
        self.bounds.height = height;
        self.css_heights.push(height);
    }
    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }
    fn begin_frame(&mut self, _scale: f64) {
        self.frames += 1;
        self.commands.clear();
    }
    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}

/// A document made of owned nodes, visited in order.
#[derive(Debug, Default)]
pub struct MockDoc {
    pub nodes: Vec<(NodeKind, String, usize)>,
}

impl MockDoc {
    pub fn paragraphs(texts: &[&str]) -> Self {
        let mut nodes = Vec::new();
        let mut position = 0;
        for text in texts {
            nodes.push((NodeKind::Paragraph, text.to_string(), position));
            nodes.push((NodeKind::Text, text.to_string(), position + 1));
            position += text.chars().count() + 2;
        }
        Self { nodes }
    }

    pub fn with_heading(mut self, level: u8, text: &str, position: usize) -> Self {
        self.nodes
            .push((NodeKind::Heading(level), text.to_string(), position));
        self.nodes.sort_by_key(|(_, _, position)| *position);
        self
    }
}

impl DocumentTree for MockDoc {
    fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>)) {
        for (kind, text, position) in &self.nodes {
            visit(ContentNode {
                kind: *kind,
                text: text.as_str(),
                position: *position,
            });
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SinkEvent {
    Dispatch(usize),
    ScrollIntoView(usize, ScrollAlign),
    Select(usize),
    ScrollTo(f64),
}

#[derive(Debug, Default)]
pub struct MockSink {
    pub events: Vec<SinkEvent>,
    pub transactions: Vec<HighlightTransaction>,
}

impl TransactionSink for MockSink {
    fn dispatch(&mut self, transaction: HighlightTransaction) {
        self.events
            .push(SinkEvent::Dispatch(transaction.highlights.len()));
        self.transactions.push(transaction);
    }
    fn scroll_into_view(&mut self, position: usize, align: ScrollAlign) {
        self.events.push(SinkEvent::ScrollIntoView(position, align));
    }
    fn set_text_selection(&mut self, position: usize) {
        self.events.push(SinkEvent::Select(position));
    }
    fn scroll_container_to(&mut self, top: f64) {
        self.events.push(SinkEvent::ScrollTo(top));
    }
}
