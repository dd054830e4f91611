use crate::annotation::{Annotation, AnnotationType};

use super::tags::is_block_tag;

/// Returns whether `child` may nest inside `ancestor`.
///
/// Block content never goes inside inline content, and a redaction never
/// goes inside a highlight. Everything else may nest.
pub fn can_contain(ancestor: &Annotation, child: &Annotation) -> bool {
    if is_block_tag(child.tag()) && !is_block_tag(ancestor.tag()) {
        return false;
    }
    !(child.ty() == AnnotationType::Redaction && ancestor.ty() == AnnotationType::Highlight)
}
