use serde::{Deserialize, Serialize};

/// A char range `[start, end)` into the raw text.
///
/// Offsets count Unicode scalar values, so a span maps onto
/// `text.chars().skip(start).take(len)` rather than a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in chars. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Extracts the text covered by `sp` as an owned String.
pub fn slice_chars(text: &str, sp: Span) -> String {
    text.chars().skip(sp.start).take(sp.len()).collect()
}
