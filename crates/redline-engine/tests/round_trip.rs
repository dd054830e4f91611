use redline_engine::markup::{MarkupTree, NodeId};
use redline_engine::selection::point_at_rendered_offset;
use redline_engine::span::slice_chars;
use redline_engine::{
    Annotation, Bound, Point, RenderOptions, Selection, SelectionWatcher, Span, parse_markup,
    render,
};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, n: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) % n as u64) as usize
    }
}

/// Disjoint highlights and inline markup over a single line.
fn disjoint_annotations(rng: &mut Lcg, len: usize) -> Vec<Annotation> {
    let mut out = vec![];
    let mut at = rng.below(3);
    while at < len {
        let end = (at + 1 + rng.below(5)).min(len);
        out.push(match rng.below(3) {
            0 => Annotation::highlight(at, end),
            1 => Annotation::markup(at, end).with_tag("em"),
            _ => Annotation::markup(at, end),
        });
        at = end + rng.below(4);
    }
    out
}

/// The element rendered for an annotation starting at `start`.
fn element_at(tree: &MarkupTree, start: usize) -> NodeId {
    (0..tree.len())
        .map(NodeId)
        .find(|&id| {
            tree.element(id).is_some_and(|e| !e.has_class("paragraph"))
                && tree.coords(id).is_some_and(|c| c.position == start as f64)
        })
        .unwrap()
}

fn watcher_on_root(tree: &MarkupTree) -> SelectionWatcher {
    let mut watcher = SelectionWatcher::new();
    watcher.register(tree.root());
    watcher.start();
    watcher
}

#[test]
fn selecting_an_element_recovers_its_annotation() {
    let mut rng = Lcg(42);
    for _ in 0..200 {
        let len = 1 + rng.below(40);
        let text: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let annotations = disjoint_annotations(&mut rng, len);

        let tree = parse_markup(&render(&text, &annotations, &RenderOptions::default())).unwrap();
        let watcher = watcher_on_root(&tree);

        for a in &annotations {
            let element = element_at(&tree, a.start);
            let selection = Selection::between(
                Point::new(element, 0),
                Point::new(element, tree.children(element).len()),
            );
            let resolved = watcher.handle(&tree, &selection).unwrap();
            assert_eq!(resolved.ranges, vec![Span::new(a.start, a.end)]);
        }
    }
}

#[test]
fn selecting_rendered_text_recovers_raw_offsets() {
    let text = "The quick brown fox\njumps over the lazy dog";
    let annotations = [
        Annotation::highlight(4, 9),
        Annotation::markup(10, 15).with_tag("strong"),
        Annotation::highlight(26, 30),
    ];
    let tree = parse_markup(&render(text, &annotations, &RenderOptions::default())).unwrap();
    let watcher = watcher_on_root(&tree);
    let root = tree.root();

    for a in &annotations {
        let selection = Selection::between(
            point_at_rendered_offset(&tree, root, a.start, Bound::Start).unwrap(),
            point_at_rendered_offset(&tree, root, a.end, Bound::End).unwrap(),
        );
        let resolved = watcher.handle(&tree, &selection).unwrap();
        assert_eq!(resolved.ranges, vec![a.span()]);
    }
}

#[test]
fn selecting_a_redaction_recovers_the_hidden_span() {
    let text = "card 4111111111111111 expires";
    let annotations = [Annotation::redaction(5, 21).with_content("CARD").with_extent(6)];
    let tree = parse_markup(&render(text, &annotations, &RenderOptions::default())).unwrap();
    let watcher = watcher_on_root(&tree);
    let root = tree.root();

    // rendered: "card " + "█CARD█" + " expires"
    assert_eq!(tree.text_content(root), "card \u{2588}CARD\u{2588} expires");
    let select = |start, end| {
        let selection = Selection::between(
            point_at_rendered_offset(&tree, root, start, Bound::Start).unwrap(),
            point_at_rendered_offset(&tree, root, end, Bound::End).unwrap(),
        );
        watcher.handle(&tree, &selection).map(|r| r.ranges)
    };

    assert_eq!(select(5, 11), Some(vec![Span::new(5, 21)]));
    assert_eq!(slice_chars(text, Span::new(5, 21)), "4111111111111111");
    assert_eq!(select(0, 6), Some(vec![Span::new(0, 8)]));
    assert_eq!(select(12, 19), Some(vec![Span::new(22, 29)]));
}

/// Disjoint `(span, extent)` redactions with at least one raw char between
/// neighbours.
fn disjoint_redactions(rng: &mut Lcg, len: usize) -> Vec<(Span, usize)> {
    let mut out = vec![];
    let mut at = rng.below(4);
    while at < len {
        let end = (at + 1 + rng.below(8)).min(len);
        out.push((Span::new(at, end), 1 + rng.below(6)));
        at = end + 1 + rng.below(5);
    }
    out
}

#[test]
fn redactions_split_by_paragraphs_resolve_exactly() {
    let mut rng = Lcg(7);
    for _ in 0..300 {
        let len = 1 + rng.below(40);
        let text: String = (0..len)
            .map(|i| match rng.below(4) {
                0 => '\n',
                _ => (b'a' + (i % 26) as u8) as char,
            })
            .collect();
        let redactions = disjoint_redactions(&mut rng, len);
        let annotations: Vec<Annotation> = redactions
            .iter()
            .map(|&(span, extent)| Annotation::redaction(span.start, span.end).with_extent(extent))
            .collect();

        let tree = parse_markup(&render(&text, &annotations, &RenderOptions::default())).unwrap();
        let watcher = watcher_on_root(&tree);
        let root = tree.root();
        let select = |start, end| {
            let selection = Selection::between(
                point_at_rendered_offset(&tree, root, start, Bound::Start).unwrap(),
                point_at_rendered_offset(&tree, root, end, Bound::End).unwrap(),
            );
            watcher.handle(&tree, &selection).map(|r| r.ranges)
        };

        let rendered_len = tree.text_content(root).chars().count();
        for at in 0..rendered_len {
            for range in select(at, at + 1).unwrap() {
                assert!(
                    range.start < range.end && range.end <= len,
                    "{range:?} outside 0..{len} for {text:?} {redactions:?}"
                );
            }
        }

        // each redaction shows `extent` chars in place of its span
        let mut shift = 0isize;
        for &(span, extent) in &redactions {
            let shown = (span.start as isize + shift) as usize;
            assert_eq!(
                select(shown, shown + extent),
                Some(vec![span]),
                "{text:?} {redactions:?}"
            );
            if span.end < len {
                let after = shown + extent;
                assert_eq!(
                    select(after, after + 1),
                    Some(vec![Span::new(span.end, span.end + 1)]),
                    "{text:?} {redactions:?}"
                );
            }
            shift += extent as isize - span.len() as isize;
        }
    }
}

#[test]
fn text_after_a_redaction_crossing_a_line_break_is_exact() {
    let text = "abc\ndef";
    let annotations = [Annotation::redaction(2, 6).with_extent(3)];
    let tree = parse_markup(&render(text, &annotations, &RenderOptions::default())).unwrap();
    let watcher = watcher_on_root(&tree);
    let root = tree.root();
    assert_eq!(tree.text_content(root), "ab\u{2588}\u{2588}\u{2588}f");

    let select = |start, end| {
        let selection = Selection::between(
            point_at_rendered_offset(&tree, root, start, Bound::Start).unwrap(),
            point_at_rendered_offset(&tree, root, end, Bound::End).unwrap(),
        );
        watcher.handle(&tree, &selection).map(|r| r.ranges)
    };
    assert_eq!(select(2, 5), Some(vec![Span::new(2, 6)]));
    assert_eq!(select(5, 6), Some(vec![Span::new(6, 7)]));
    assert_eq!(select(0, 6), Some(vec![Span::new(0, 7)]));
}
