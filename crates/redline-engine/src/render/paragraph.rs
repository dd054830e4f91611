use crate::annotation::Annotation;
use crate::policy::tags::PARAGRAPH_TAG;

/// Class token on synthesized paragraphs.
pub const PARAGRAPH_CLASS: &str = "paragraph";

/// Synthesizes one paragraph markup annotation per line.
///
/// Each paragraph includes its trailing newline; text after the last newline
/// becomes a final paragraph ending at the text end.
pub fn paragraph_annotations(text: &str) -> Vec<Annotation> {
    let mut out = vec![];
    let mut start = 0;
    let mut len = 0;
    for (i, c) in text.chars().enumerate() {
        len = i + 1;
        if c == '\n' {
            out.push(paragraph(start, i + 1));
            start = i + 1;
        }
    }
    if start < len {
        out.push(paragraph(start, len));
    }
    out
}

fn paragraph(start: usize, end: usize) -> Annotation {
    Annotation::markup(start, end)
        .with_tag(PARAGRAPH_TAG)
        .with_class(PARAGRAPH_CLASS)
}
