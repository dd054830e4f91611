use std::borrow::Cow;

use crate::annotation::Annotation;
use crate::redaction::{RedactionCursor, Warp};

use super::event::{MarkupEvent, Opening};

/// An annotation taking part in one render call, in processing order.
#[derive(Debug, Clone)]
pub(crate) struct Entry<'a> {
    pub annotation: Cow<'a, Annotation>,
    /// Index into the caller's slice, `None` when synthesized.
    pub source: Option<usize>,
}

impl<'a> Entry<'a> {
    pub fn borrowed(source: usize, annotation: &'a Annotation) -> Self {
        Self {
            annotation: Cow::Borrowed(annotation),
            source: Some(source),
        }
    }

    pub fn synthesized(annotation: Annotation) -> Self {
        Self {
            annotation: Cow::Owned(annotation),
            source: None,
        }
    }

    pub fn start(&self) -> usize {
        self.annotation.start
    }

    pub fn end(&self) -> usize {
        self.annotation.end
    }

    pub fn opening(&self, position: f64, warp: Warp) -> Opening {
        let a = &self.annotation;
        Opening {
            source: self.source,
            ty: a.ty(),
            tag: a.tag().to_string(),
            class_name: a.class_name().map(str::to_string),
            id: a.id().map(str::to_string),
            style: a.style(),
            position,
            warp,
        }
    }
}

/// Working state of a single render call. Entries are referred to by their
/// index in the sorted entry list.
#[derive(Debug, Default)]
pub(crate) struct RenderState {
    /// Open entries, outermost first; the last one closes first.
    pub open_order: Vec<usize>,
    /// The same entries ordered by ascending `end`.
    pub end_order: Vec<usize>,
    /// Entries closed early that reopen at the current position, in the
    /// order they were closed (innermost first).
    pub reopen: Vec<usize>,
    /// Cursors of open redactions, outermost first.
    pub redactions: Vec<RedactionCursor>,
    pub events: Vec<MarkupEvent>,
}

impl RenderState {
    pub fn insert_end_order(&mut self, entries: &[Entry<'_>], index: usize) {
        let end = entries[index].end();
        let at = self.end_order.partition_point(|&j| entries[j].end() <= end);
        self.end_order.insert(at, index);
    }

    pub fn remove_end_order(&mut self, index: usize) {
        if let Some(at) = self.end_order.iter().position(|&j| j == index) {
            self.end_order.remove(at);
        }
    }

    pub fn cursor(&self, index: usize) -> Option<&RedactionCursor> {
        self.redactions.iter().find(|c| c.source() == index)
    }

    /// True when some open element is a redaction.
    pub fn inside_redaction(&self) -> bool {
        self.open_order.iter().any(|&i| self.cursor(i).is_some())
    }

    /// True once nothing is open or waiting to reopen.
    pub fn is_settled(&self) -> bool {
        self.open_order.is_empty()
            && self.end_order.is_empty()
            && self.reopen.is_empty()
            && self.redactions.is_empty()
    }
}
