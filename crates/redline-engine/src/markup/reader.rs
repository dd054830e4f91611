use std::sync::OnceLock;

use regex::Regex;

use super::cursor::Cursor;
use super::tree::{Element, MarkupTree, NodeId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("malformed tag at byte {offset}")]
    MalformedTag { offset: usize },
    #[error("unexpected </{tag}> at byte {offset}")]
    UnexpectedClose { tag: String, offset: usize },
    #[error("</{found}> at byte {offset} does not close <{expected}>")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("<{tag}> is never closed")]
    Unclosed { tag: String },
}

fn tag_name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*").expect("Invalid tag name regex"))
}

fn attribute_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"^\s+([A-Za-z_:][-A-Za-z0-9_:.]*)="([^"]*)""#)
            .expect("Invalid attribute regex")
    })
}

/// Parses a markup fragment as produced by [`crate::render()`] into a tree.
///
/// Understands elements with double-quoted attributes, self-closing tags and
/// entity-escaped text. Anything else is a [`MarkupError`].
pub fn parse_markup(s: &str) -> Result<MarkupTree, MarkupError> {
    let mut tree = MarkupTree::new();
    let mut open: Vec<NodeId> = vec![];
    let mut cur = Cursor::new(s);

    while !cur.eof() {
        let parent = open.last().copied().unwrap_or(tree.root());
        if cur.starts_with("</") {
            let offset = cur.i;
            let tag = read_close(&mut cur)?;
            let Some(top) = open.pop() else {
                return Err(MarkupError::UnexpectedClose { tag, offset });
            };
            let expected = tree
                .element(top)
                .map(|e| e.tag.clone())
                .unwrap_or_default();
            if !expected.eq_ignore_ascii_case(&tag) {
                return Err(MarkupError::MismatchedClose {
                    expected,
                    found: tag,
                    offset,
                });
            }
        } else if cur.peek() == Some('<') {
            let (element, self_closing) = read_open(&mut cur)?;
            let id = tree.append_element(parent, element);
            if !self_closing {
                open.push(id);
            }
        } else {
            let raw = cur.take_until('<');
            tree.append_text(parent, &html_escape::decode_html_entities(raw));
        }
    }

    if let Some(&top) = open.last() {
        let tag = tree
            .element(top)
            .map(|e| e.tag.clone())
            .unwrap_or_default();
        return Err(MarkupError::Unclosed { tag });
    }
    Ok(tree)
}

fn read_name<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let m = tag_name_regex().find(cur.rest())?;
    let name = &cur.rest()[..m.end()];
    cur.i += m.end();
    Some(name)
}

fn read_close(cur: &mut Cursor<'_>) -> Result<String, MarkupError> {
    let offset = cur.i;
    cur.eat("</");
    let name = read_name(cur).ok_or(MarkupError::MalformedTag { offset })?;
    cur.take_until('>');
    if !cur.eat(">") {
        return Err(MarkupError::MalformedTag { offset });
    }
    Ok(name.to_string())
}

fn read_open(cur: &mut Cursor<'_>) -> Result<(Element, bool), MarkupError> {
    let offset = cur.i;
    cur.eat("<");
    let name = read_name(cur).ok_or(MarkupError::MalformedTag { offset })?;
    let mut element = Element::new(name);

    while let Some(caps) = attribute_regex().captures(cur.rest()) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        let name = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(2).map_or("", |m| m.as_str());
        element.attrs.insert(
            name.to_string(),
            html_escape::decode_html_entities(value).into_owned(),
        );
        cur.i += whole;
    }

    let rest = cur.rest();
    let trimmed = rest.trim_start();
    cur.i += rest.len() - trimmed.len();
    if cur.eat("/>") {
        return Ok((element, true));
    }
    if cur.eat(">") {
        return Ok((element, false));
    }
    Err(MarkupError::MalformedTag { offset })
}
