//! Test helpers shared across module tests.

use std::path::PathBuf;

use tempfile::TempDir;

use crate::annotation::{Annotation, AnnotationType};
use crate::policy::is_block_tag;
use crate::markup::{Element, MarkupTree};
use crate::render::{MarkupEvent, Opening};

/// Compact rendering of an event stream: `<tag@position>` for openings
/// (with `~warp` when the warp is not 1), `</tag>` for closes and raw text.
pub fn shape(events: &[MarkupEvent]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            MarkupEvent::Open(o) if o.warp.is_identity() => {
                out.push_str(&format!("<{}@{}>", o.tag, o.position));
            }
            MarkupEvent::Open(o) => {
                out.push_str(&format!("<{}@{}~{}>", o.tag, o.position, o.warp));
            }
            MarkupEvent::Close { tag } => out.push_str(&format!("</{tag}>")),
            MarkupEvent::Text(t) => out.push_str(t),
        }
    }
    out
}

/// Builds the tree a host surface would construct from rendered events.
pub fn tree_from_events(events: &[MarkupEvent]) -> MarkupTree {
    let mut tree = MarkupTree::new();
    let mut open = vec![tree.root()];
    for event in events {
        let parent = open.last().copied().unwrap_or(tree.root());
        match event {
            MarkupEvent::Open(opening) => {
                let element = opening
                    .attributes()
                    .into_iter()
                    .fold(Element::new(opening.tag.clone()), |e, (name, value)| {
                        e.with_attr(name, value)
                    });
                open.push(tree.append_element(parent, element));
            }
            MarkupEvent::Close { .. } => {
                if open.len() > 1 {
                    open.pop();
                }
            }
            MarkupEvent::Text(text) => {
                tree.append_text(parent, text);
            }
        }
    }
    tree
}

/// Panics unless every open has exactly one matching close in LIFO order.
pub fn assert_well_formed(events: &[MarkupEvent]) {
    let mut stack: Vec<&str> = vec![];
    for event in events {
        match event {
            MarkupEvent::Open(o) => stack.push(&o.tag),
            MarkupEvent::Close { tag } => {
                let open = stack.pop();
                assert_eq!(open, Some(tag.as_str()), "mismatched close in {}", shape(events));
            }
            MarkupEvent::Text(_) => {}
        }
    }
    assert!(stack.is_empty(), "unclosed {stack:?} in {}", shape(events));
}

/// Panics if a block element sits inside an inline one or a redaction sits
/// inside a highlight.
pub fn assert_containment(events: &[MarkupEvent]) {
    let mut stack: Vec<&Opening> = vec![];
    for event in events {
        match event {
            MarkupEvent::Open(o) => {
                for ancestor in &stack {
                    assert!(
                        !(is_block_tag(&o.tag) && !is_block_tag(&ancestor.tag)),
                        "<{}> inside <{}> in {}",
                        o.tag,
                        ancestor.tag,
                        shape(events)
                    );
                    assert!(
                        !(o.ty == AnnotationType::Redaction
                            && ancestor.ty == AnnotationType::Highlight),
                        "redaction inside highlight in {}",
                        shape(events)
                    );
                }
                stack.push(o);
            }
            MarkupEvent::Close { .. } => {
                stack.pop();
            }
            MarkupEvent::Text(_) => {}
        }
    }
}

/// Small deterministic generator for property-style tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Uniform-ish value in `0..n`; `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    pub fn text(&mut self, max_len: usize) -> String {
        let len = self.below(max_len + 1);
        (0..len)
            .map(|_| match self.below(12) {
                0 => '\n',
                1 => ' ',
                k => (b'a' + k as u8) as char,
            })
            .collect()
    }

    /// Random annotations over a text of `len` chars. Highlights always use
    /// their default inline tag.
    pub fn annotations(&mut self, len: usize, max_count: usize) -> Vec<Annotation> {
        if len == 0 {
            return vec![];
        }
        let count = self.below(max_count + 1);
        (0..count)
            .map(|_| {
                let start = self.below(len);
                let end = start + 1 + self.below(len - start);
                match self.below(3) {
                    0 => {
                        let tag = ["span", "em", "div", "p"][self.below(4)];
                        Annotation::markup(start, end).with_tag(tag)
                    }
                    1 => Annotation::highlight(start, end),
                    _ => {
                        let r = Annotation::redaction(start, end);
                        match self.below(3) {
                            0 => r,
                            1 => r.with_extent(1 + self.below(8)),
                            _ => r.with_content("xy"),
                        }
                    }
                }
            })
            .collect()
    }
}

pub fn create_test_root() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, content).unwrap();
    file_path
}
