//! # Interval-Sweep Renderer
//!
//! Serializes a set of arbitrarily overlapping annotations over a flat text
//! into well-nested markup.
//!
//! ## Architecture
//!
//! The renderer walks the raw text one char position at a time. At each
//! position it:
//!
//! 1. closes every element ending here, closing and queueing for reopen
//!    anything nested above it
//! 2. drops redaction cursors whose redaction ended here
//! 3. collects the annotations starting here, splitting open ancestors that
//!    may not contain them (see [`crate::policy::can_contain`])
//! 4. opens the new batch together with the reopen queue in
//!    [`crate::policy::sort_openings`] order
//! 5. emits the raw char, or the outermost redaction's substitute text
//!
//! Every opened element records its `position` and the `warp` of the content
//! it will hold, which is all the [`crate::selection`] resolver needs to map
//! rendered offsets back. Inside a redaction the position is where the
//! substitute resumes, not the sweep pointer, so it can be fractional.
//!
//! All working state lives in one `RenderState` owned by the call, so
//! concurrent renders never share anything.
//!
//! ## Modules
//!
//! - **`event`**: `MarkupEvent`/`Opening` output model and serialization
//! - **`paragraph`**: auto-paragraph pre-pass
//! - **`state`**: per-call stacks and cursors
//! - **`sweep`**: the position loop

pub mod event;
pub mod paragraph;
mod state;
mod sweep;

pub use event::{MarkupEvent, Opening, write_markup};
pub use paragraph::paragraph_annotations;

use crate::annotation::Annotation;
use crate::policy::sort_annotations;
use crate::redaction::DEFAULT_FILLER;

use state::Entry;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Wrap every line in a synthesized `<p>` annotation.
    pub auto_paragraph: bool,
    /// Symbol padding redaction substitutes.
    pub filler: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            auto_paragraph: true,
            filler: DEFAULT_FILLER,
        }
    }
}

impl RenderOptions {
    pub fn without_paragraphs() -> Self {
        Self {
            auto_paragraph: false,
            ..Self::default()
        }
    }
}

/// Renders `text` with `annotations` overlaid, returning markup.
///
/// Preconditions (see [`crate::annotation::validate`]): every annotation has
/// `start <= end <= text.chars().count()`. Violations are caller defects.
pub fn render(text: &str, annotations: &[Annotation], options: &RenderOptions) -> String {
    write_markup(&render_events(text, annotations, options))
}

/// Same as [`render`] but returns the unserialized event stream.
pub fn render_events(
    text: &str,
    annotations: &[Annotation],
    options: &RenderOptions,
) -> Vec<MarkupEvent> {
    let chars: Vec<char> = text.chars().collect();

    let mut entries: Vec<Entry<'_>> = annotations
        .iter()
        .enumerate()
        .map(|(i, a)| Entry::borrowed(i, a))
        .collect();
    if options.auto_paragraph {
        entries.extend(
            paragraph_annotations(text)
                .into_iter()
                .map(Entry::synthesized),
        );
    }

    let total = entries.len();
    entries.retain(|e| !e.annotation.span().is_empty());
    if entries.len() < total {
        log::debug!(
            "dropped {} zero-length annotation(s)",
            total - entries.len()
        );
    }

    entries.sort_by(|a, b| sort_annotations(&a.annotation, &b.annotation));
    sweep::sweep(&entries, &chars, options)
}
