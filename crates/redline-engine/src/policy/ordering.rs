use std::cmp::Ordering;

use crate::annotation::{Annotation, AnnotationType};

use super::tags::{is_block_tag, is_paragraph_tag};

/// Processing order: `start` ascending, and for equal starts the annotation
/// with the larger `end` first so that it opens outermost.
pub fn sort_annotations(a: &Annotation, b: &Annotation) -> Ordering {
    a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end))
}

/// Nesting order for annotations opening at the same sweep position,
/// outermost first.
///
/// 1. paragraph tags before everything else
/// 2. highlights after annotations of a different type
/// 3. block tags before inline tags
///
/// Anything left equal keeps its input order, so callers must use a stable
/// sort (`sort_by`).
pub fn sort_openings(a: &Annotation, b: &Annotation) -> Ordering {
    opening_rank(a).cmp(&opening_rank(b))
}

/// Lexicographic rank behind [`sort_openings`]. Comparing the highlight flag
/// only separates pairs of different types, which is exactly rule 2, and
/// the tuple keeps the order a total preorder.
fn opening_rank(a: &Annotation) -> (bool, bool, bool) {
    let tag = a.tag();
    (
        !is_paragraph_tag(tag),
        a.ty() == AnnotationType::Highlight,
        !is_block_tag(tag),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted_openings(mut batch: Vec<Annotation>) -> Vec<Annotation> {
        batch.sort_by(sort_openings);
        batch
    }

    #[test]
    fn annotations_sort_by_start_then_longest_first() {
        let mut anns = vec![
            Annotation::markup(3, 4),
            Annotation::highlight(0, 2),
            Annotation::markup(0, 9),
            Annotation::redaction(3, 8),
        ];
        anns.sort_by(sort_annotations);
        let spans: Vec<_> = anns.iter().map(|a| (a.start, a.end)).collect();
        assert_eq!(spans, vec![(0, 9), (0, 2), (3, 8), (3, 4)]);
    }

    #[test]
    fn paragraph_opens_outermost() {
        let batch = vec![
            Annotation::markup(0, 3).with_tag("div"),
            Annotation::highlight(0, 3),
            Annotation::markup(0, 3).with_tag("p"),
        ];
        assert_eq!(sorted_openings(batch)[0].tag(), "p");
    }

    #[test]
    fn highlight_opens_inside_other_types() {
        let batch = vec![Annotation::highlight(0, 3), Annotation::redaction(0, 3)];
        let sorted = sorted_openings(batch);
        assert_eq!(sorted[0].ty(), AnnotationType::Redaction);
        assert_eq!(sorted[1].ty(), AnnotationType::Highlight);
    }

    #[test]
    fn highlight_rule_wins_over_block_rule() {
        let batch = vec![
            Annotation::highlight(0, 3).with_tag("div"),
            Annotation::markup(0, 3),
        ];
        let sorted = sorted_openings(batch);
        assert_eq!(sorted[0].ty(), AnnotationType::Markup);
    }

    #[test]
    fn block_opens_outside_inline() {
        let batch = vec![
            Annotation::markup(0, 3).with_tag("em"),
            Annotation::markup(0, 3).with_tag("blockquote"),
        ];
        assert_eq!(sorted_openings(batch)[0].tag(), "blockquote");
    }

    #[test]
    fn ties_keep_input_order() {
        let batch = vec![
            Annotation::markup(0, 3).with_id("first"),
            Annotation::markup(0, 9).with_id("second"),
            Annotation::redaction(0, 3).with_id("third"),
        ];
        let ids: Vec<_> = sorted_openings(batch)
            .iter()
            .map(|a| a.id().unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
