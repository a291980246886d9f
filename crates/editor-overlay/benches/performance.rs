use criterion::{Criterion, black_box, criterion_group, criterion_main};
use editor_overlay::{
    ContentNode, DocumentTree, HighlightSet, HorizontalRuler, NodeKind, VerticalRuler,
    ViewportGeometry, search,
};
use rand::Rng;
use rand::seq::SliceRandom;

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "ruler", "page", "margin",
];

struct Doc {
    paragraphs: Vec<(String, usize)>,
}

impl Doc {
    fn random(paragraph_count: usize) -> Self {
        let mut rng = rand::thread_rng();
        let mut paragraphs = Vec::with_capacity(paragraph_count);
        let mut position = 0;
        for _ in 0..paragraph_count {
            let len = rng.gen_range(20..80);
            let text = (0..len)
                .map(|_| *WORDS.choose(&mut rng).unwrap_or(&"the"))
                .collect::<Vec<_>>()
                .join(" ");
            let chars = text.chars().count();
            paragraphs.push((text, position + 1));
            position += chars + 2;
        }
        Self { paragraphs }
    }
}

impl DocumentTree for Doc {
    fn descendants(&self, visit: &mut dyn FnMut(ContentNode<'_>)) {
        for (text, position) in &self.paragraphs {
            visit(ContentNode {
                kind: NodeKind::Paragraph,
                text: text.as_str(),
                position: position - 1,
            });
            visit(ContentNode::text(text, *position));
        }
    }
}

fn bench_match_document(c: &mut Criterion) {
    let doc = Doc::random(5_000);
    c.bench_function("match_document/5k_paragraphs", |b| {
        b.iter(|| {
            let spans = search::match_document(black_box(&doc), black_box("fox"));
            black_box(HighlightSet::from_spans(spans).len());
        })
    });
}

fn bench_ruler_layout(c: &mut Criterion) {
    let geometry = ViewportGeometry {
        origin_x: 120.0,
        origin_y: 40.0,
        page_width: 794.0,
        page_height: 842.0 * 40.0,
        scroll_offset: 12_000.0,
    };
    let horizontal = HorizontalRuler::default();
    let vertical = VerticalRuler::default();

    c.bench_function("ruler_layout/horizontal", |b| {
        b.iter(|| black_box(horizontal.layout(black_box(&geometry), Some(300.0), 1040.0)))
    });
    c.bench_function("ruler_layout/vertical", |b| {
        b.iter(|| black_box(vertical.layout(black_box(&geometry), Some(12_300.0), 900.0)))
    });
}

criterion_group!(benches, bench_match_document, bench_ruler_layout);
criterion_main!(benches);
