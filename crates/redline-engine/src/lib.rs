//! # redline
//!
//! Overlays highlights, redactions and structural markup onto a flat text,
//! producing well-nested markup, and maps selections made over that markup
//! back to offsets in the original text.
//!
//! - [`render()`] serializes annotations with the interval sweep in
//!   [`render`](mod@render), consulting [`policy`] and [`redaction`]
//! - [`markup`] reads rendered output back into a tree
//! - [`selection`] resolves points and selections in that tree to raw offsets
//! - [`io`] loads source texts and annotation files

pub mod annotation;
pub mod io;
pub mod markup;
pub mod policy;
pub mod redaction;
pub mod render;
pub mod selection;
pub mod span;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use annotation::{
    Annotation, AnnotationError, AnnotationKind, AnnotationType, Format, Meta, Redaction, validate,
};
pub use markup::{MarkupError, MarkupTree, NodeId, parse_markup};
pub use redaction::{DEFAULT_FILLER, Warp};
pub use render::{MarkupEvent, RenderOptions, render, render_events, write_markup};
pub use selection::{
    Bound, Point, ResolvedSelection, Selection, SelectionRange, SelectionWatcher,
};
pub use span::Span;
