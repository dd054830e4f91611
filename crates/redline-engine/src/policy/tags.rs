/// Tags whose content is laid out as a block and may not appear inside
/// inline elements.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Tag used for paragraphs, both synthesized and caller supplied.
pub const PARAGRAPH_TAG: &str = "p";

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

pub fn is_paragraph_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case(PARAGRAPH_TAG)
}
