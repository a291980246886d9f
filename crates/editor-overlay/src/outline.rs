//! Heading index and page navigation.

use crate::config::PageLayout;
use crate::host::{DocumentTree, NodeKind, ScrollAlign, TransactionSink};

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Text content of the heading.
    pub text: String,
    /// Heading level (1-based).
    pub level: u8,
    /// Document position of the heading node.
    pub position: usize,
}

/// Collect every heading in document order.
pub fn collect_headings(doc: &dyn DocumentTree) -> Vec<HeadingEntry> {
    let mut headings = Vec::new();
    doc.descendants(&mut |node| {
        if let NodeKind::Heading(level) = node.kind {
            headings.push(HeadingEntry {
                text: node.text.to_string(),
                level,
                position: node.position,
            });
        }
    });
    headings
}

/// Move the caret to a heading and scroll it to the top of the viewport.
pub fn jump_to_heading(position: usize, sink: &mut dyn TransactionSink) {
    sink.set_text_selection(position);
    sink.scroll_into_view(position, ScrollAlign::Start);
}

/// Scroll the container so that page `index` (0-based) starts at the top.
pub fn jump_to_page(index: usize, pages: &PageLayout, sink: &mut dyn TransactionSink) -> f64 {
    let top = pages.page_offset(index);
    sink.scroll_container_to(top);
    top
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorations::HighlightTransaction;
    use crate::host::ContentNode;

    struct Doc;

    impl DocumentTree for Doc {
        fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>)) {
            visit(ContentNode {
                kind: NodeKind::Heading(1),
                text: "Intro",
                position: 0,
            });
            visit(ContentNode::text("Intro", 1));
            visit(ContentNode {
                kind: NodeKind::Paragraph,
                text: "Body",
                position: 7,
            });
            visit(ContentNode::text("Body", 8));
            visit(ContentNode {
                kind: NodeKind::Heading(2),
                text: "Details",
                position: 14,
            });
        }
    }

    #[derive(Default)]
    struct Sink {
        calls: Vec<String>,
    }

    impl TransactionSink for Sink {
        fn dispatch(&mut self, _transaction: HighlightTransaction) {
            self.calls.push("dispatch".to_string());
        }
        fn scroll_into_view(&mut self, position: usize, align: ScrollAlign) {
            self.calls.push(format!("scroll {position} {align:?}"));
        }
        fn set_text_selection(&mut self, position: usize) {
            self.calls.push(format!("select {position}"));
        }
        fn scroll_container_to(&mut self, top: f64) {
            self.calls.push(format!("scroll_to {top}"));
        }
    }

    #[test]
    fn test_collect_headings_in_order() {
        let headings = collect_headings(&Doc);
        assert_eq!(
            headings,
            vec![
                HeadingEntry {
                    text: "Intro".to_string(),
                    level: 1,
                    position: 0,
                },
                HeadingEntry {
                    text: "Details".to_string(),
                    level: 2,
                    position: 14,
                },
            ]
        );
    }

    #[test]
    fn test_navigation_requests() {
        let mut sink = Sink::default();
        jump_to_heading(14, &mut sink);
        let top = jump_to_page(2, &PageLayout::default(), &mut sink);

        assert_eq!(top, 1724.0);
        assert_eq!(
            sink.calls,
            vec!["select 14", "scroll 14 Start", "scroll_to 1724"]
        );
    }
}
