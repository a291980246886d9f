//! Search-highlight decorations.
//!
//! Decorations are presentation-only annotations anchored to document positions; applying
//! them never modifies document text. The search highlight layer works in whole sets:
//!
//! - [`HighlightSet`] is an ordered, non-overlapping list of spans.
//! - [`DecorationDispatcher`] owns the authoritative set and is the only writer. Every write
//!   replaces the set wholesale and is announced to the host as one [`HighlightTransaction`].
//! - [`HighlightLayer`] is the host-side reducer. It keeps the previous set for transactions
//!   that carry no highlight payload, and adopts the payload (including an empty one) otherwise.

use std::sync::Arc;

use crate::host::{ScrollAlign, TransactionSink};
use crate::search::MatchSpan;

/// Transaction meta key carrying a search highlight payload.
pub const SEARCH_HIGHLIGHT_META: &str = "searchHighlight";

/// A source/layer identifier for decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationLayerId(pub u32);

impl DecorationLayerId {
    /// Decorations representing search matches.
    pub const SEARCH_HIGHLIGHTS: Self = Self(1);

    /// Create a new layer id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A half-open document-position range (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationRange {
    /// Range start position (inclusive).
    pub start: usize,
    /// Range end position (exclusive).
    pub end: usize,
}

impl DecorationRange {
    /// Create a new decoration range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<MatchSpan> for DecorationRange {
    fn from(span: MatchSpan) -> Self {
        Self::new(span.start, span.end)
    }
}

/// A single inline decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// Anchor range.
    pub range: DecorationRange,
    /// Whether text inserted exactly at `range.start` joins the decoration.
    pub inclusive_start: bool,
    /// Whether text inserted exactly at `range.end` joins the decoration.
    pub inclusive_end: bool,
}

impl Decoration {
    /// An inline highlight that does not grow when text is typed at either edge.
    pub fn highlight(span: MatchSpan) -> Self {
        Self {
            range: span.into(),
            inclusive_start: false,
            inclusive_end: false,
        }
    }
}

/// An ordered, non-overlapping sequence of highlight spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightSet {
    spans: Vec<MatchSpan>,
}

impl HighlightSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary spans.
    ///
    /// Spans are sorted; empty spans and spans overlapping an earlier one are dropped.
    pub fn from_spans<I>(spans: I) -> Self
    where
        I: IntoIterator<Item = MatchSpan>,
    {
        let mut spans: Vec<MatchSpan> = spans.into_iter().filter(|s| !s.is_empty()).collect();
        spans.sort_unstable();

        let mut normalized: Vec<MatchSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match normalized.last() {
                Some(last) if span.start < last.end => continue,
                _ => normalized.push(span),
            }
        }
        Self { spans: normalized }
    }

    /// Spans in document order.
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if there are no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// First span in document order.
    pub fn first(&self) -> Option<MatchSpan> {
        self.spans.first().copied()
    }

    /// Inline decorations for every span.
    pub fn decorations(&self) -> Vec<Decoration> {
        self.spans.iter().copied().map(Decoration::highlight).collect()
    }
}

/// A presentation-only transaction tagged with a highlight payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTransaction {
    /// Meta key identifying the payload ([`SEARCH_HIGHLIGHT_META`]).
    pub meta: &'static str,
    /// Decoration layer the payload belongs to.
    pub layer: DecorationLayerId,
    /// The complete replacement set.
    pub highlights: Arc<HighlightSet>,
}

impl HighlightTransaction {
    /// Create a search highlight transaction.
    pub fn search(highlights: Arc<HighlightSet>) -> Self {
        Self {
            meta: SEARCH_HIGHLIGHT_META,
            layer: DecorationLayerId::SEARCH_HIGHLIGHTS,
            highlights,
        }
    }
}

/// Owner of the authoritative search highlight set.
#[derive(Debug, Default)]
pub struct DecorationDispatcher {
    current: Arc<HighlightSet>,
    generation: u64,
}

impl DecorationDispatcher {
    /// Create a dispatcher holding the empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current set. Readers get a complete snapshot that later writes never touch.
    pub fn current(&self) -> Arc<HighlightSet> {
        Arc::clone(&self.current)
    }

    /// Number of sets applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the highlight set and announce it to the host.
    ///
    /// A non-empty set also scrolls its first span into view, centered.
    pub fn apply(&mut self, set: HighlightSet, sink: &mut dyn TransactionSink) {
        let set = Arc::new(set);
        self.current = Arc::clone(&set);
        self.generation += 1;

        log::debug!(
            "highlight set #{} applied ({} spans)",
            self.generation,
            set.len()
        );
        sink.dispatch(HighlightTransaction::search(Arc::clone(&set)));

        if let Some(first) = set.first() {
            sink.scroll_into_view(first.start, ScrollAlign::Center);
        }
    }

    /// Apply the empty set.
    pub fn clear(&mut self, sink: &mut dyn TransactionSink) {
        self.apply(HighlightSet::empty(), sink);
    }
}

/// Host-side reducer for the highlight overlay.
#[derive(Debug, Clone, Default)]
pub struct HighlightLayer {
    state: Arc<HighlightSet>,
}

impl HighlightLayer {
    /// Create a layer with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a transaction's payload (if any) into the layer.
    ///
    /// `None` means "no highlight update in this transaction" and keeps the previous set.
    pub fn apply(&mut self, meta: Option<Arc<HighlightSet>>) {
        if let Some(set) = meta {
            self.state = set;
        }
    }

    /// Fold a dispatched transaction into the layer, ignoring foreign meta keys.
    pub fn apply_transaction(&mut self, transaction: &HighlightTransaction) {
        let meta = (transaction.meta == SEARCH_HIGHLIGHT_META)
            .then(|| Arc::clone(&transaction.highlights));
        self.apply(meta);
    }

    /// The set currently rendered.
    pub fn highlights(&self) -> &HighlightSet {
        &self.state
    }

    /// Decorations to render.
    pub fn decorations(&self) -> Vec<Decoration> {
        self.state.decorations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sink {
        transactions: Vec<HighlightTransaction>,
        scrolls: Vec<(usize, ScrollAlign)>,
    }

    impl TransactionSink for Sink {
        fn dispatch(&mut self, transaction: HighlightTransaction) {
            self.transactions.push(transaction);
        }
        fn scroll_into_view(&mut self, position: usize, align: ScrollAlign) {
            self.scrolls.push((position, align));
        }
        fn set_text_selection(&mut self, _position: usize) {}
        fn scroll_container_to(&mut self, _top: f64) {}
    }

    fn set(pairs: &[(usize, usize)]) -> HighlightSet {
        HighlightSet::from_spans(pairs.iter().map(|&(s, e)| MatchSpan::new(s, e)))
    }

    #[test]
    fn test_from_spans_sorts_and_drops_overlaps() {
        let set = set(&[(10, 12), (0, 3), (2, 5), (4, 4), (3, 6)]);
        assert_eq!(
            set.spans(),
            &[MatchSpan::new(0, 3), MatchSpan::new(3, 6), MatchSpan::new(10, 12)]
        );
    }

    #[test]
    fn test_apply_dispatches_single_transaction_and_scrolls() {
        let mut dispatcher = DecorationDispatcher::new();
        let mut sink = Sink::default();

        dispatcher.apply(set(&[(7, 9), (20, 22)]), &mut sink);

        assert_eq!(sink.transactions.len(), 1);
        let tr = &sink.transactions[0];
        assert_eq!(tr.meta, SEARCH_HIGHLIGHT_META);
        assert_eq!(tr.layer, DecorationLayerId::SEARCH_HIGHLIGHTS);
        assert_eq!(tr.highlights.len(), 2);
        assert!(tr.highlights.decorations().iter().all(|d| !d.inclusive_start));
        assert_eq!(sink.scrolls, vec![(7, ScrollAlign::Center)]);
        assert_eq!(dispatcher.current().len(), 2);
    }

    #[test]
    fn test_clear_is_explicit_and_idempotent() {
        let mut dispatcher = DecorationDispatcher::new();
        let mut sink = Sink::default();
        let mut layer = HighlightLayer::new();

        dispatcher.apply(set(&[(1, 2)]), &mut sink);
        dispatcher.clear(&mut sink);
        dispatcher.clear(&mut sink);

        for tr in &sink.transactions {
            layer.apply_transaction(tr);
        }
        assert!(layer.highlights().is_empty());
        assert!(dispatcher.current().is_empty());
        assert_eq!(sink.transactions.len(), 3);
        // Clearing never scrolls.
        assert_eq!(sink.scrolls.len(), 1);
    }

    #[test]
    fn test_layer_keeps_prior_set_without_meta() {
        let mut layer = HighlightLayer::new();
        layer.apply(Some(Arc::new(set(&[(0, 4)]))));
        layer.apply(None);
        assert_eq!(layer.highlights().len(), 1);

        layer.apply(Some(Arc::new(HighlightSet::empty())));
        assert!(layer.highlights().is_empty());
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let mut dispatcher = DecorationDispatcher::new();
        let mut sink = Sink::default();

        dispatcher.apply(set(&[(0, 1)]), &mut sink);
        let snapshot = dispatcher.current();
        dispatcher.apply(set(&[(5, 6), (8, 9)]), &mut sink);

        assert_eq!(snapshot.spans(), &[MatchSpan::new(0, 1)]);
        assert_eq!(dispatcher.current().len(), 2);
        assert_eq!(dispatcher.generation(), 2);
    }
}
