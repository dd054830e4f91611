//! # Redaction Substitution
//!
//! A redaction hides its raw span and displays a fixed-width substitute
//! instead: the replacement `content` centred in a buffer of filler symbols.
//! Because the displayed width need not match the raw span length, every
//! redaction element carries a [`Warp`] so that rendered offsets inside it can
//! be mapped back to raw offsets.
//!
//! The buffer is revealed incrementally while the sweep walks the raw span,
//! one [`RedactionCursor`] per open redaction.

use std::fmt;

use crate::annotation::Redaction;
use crate::span::Span;

/// Default symbol used to pad redaction buffers.
pub const DEFAULT_FILLER: char = '\u{2588}';

/// Raw chars consumed per rendered char, kept as an exact reduced fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warp {
    raw: usize,
    rendered: usize,
}

impl Warp {
    pub const IDENTITY: Warp = Warp {
        raw: 1,
        rendered: 1,
    };

    /// `raw / rendered`, reduced. A zero `rendered` width is treated as one.
    pub fn new(raw: usize, rendered: usize) -> Self {
        let rendered = rendered.max(1);
        let d = gcd(raw, rendered);
        Self {
            raw: raw / d,
            rendered: rendered / d,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    pub fn as_f64(self) -> f64 {
        self.raw as f64 / self.rendered as f64
    }
}

impl Default for Warp {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Integral warps print without a decimal point; others print the shortest
/// `f64` that round-trips.
impl fmt::Display for Warp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rendered == 1 {
            write!(f, "{}", self.raw)
        } else {
            write!(f, "{}", self.as_f64())
        }
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Centres `content` in `extent` slots of `filler`. Content at least as long
/// as `extent` is returned unpadded and untruncated.
pub fn substitution_buffer(content: &str, extent: usize, filler: char) -> Vec<char> {
    let content: Vec<char> = content.chars().collect();
    if content.len() >= extent {
        return content;
    }
    let padding = extent - content.len();
    let left = padding / 2;
    let mut buf = Vec::with_capacity(extent);
    buf.extend(std::iter::repeat_n(filler, left));
    buf.extend(content);
    buf.extend(std::iter::repeat_n(filler, padding - left));
    buf
}

/// Incremental reveal state for one open redaction.
#[derive(Debug, Clone)]
pub struct RedactionCursor {
    source: usize,
    span: Span,
    buffer: Vec<char>,
    cursor: usize,
}

impl RedactionCursor {
    /// `source` identifies the redaction within the render call.
    ///
    /// The requested extent defaults to `max(span len, content len)`; the
    /// actual width is the buffer length, at least one char.
    pub fn new(source: usize, span: Span, redaction: &Redaction, filler: char) -> Self {
        let content = redaction.content.as_deref().unwrap_or_default();
        let extent = redaction
            .extent
            .unwrap_or_else(|| span.len().max(content.chars().count()))
            .max(1);
        Self {
            source,
            span,
            buffer: substitution_buffer(content, extent, filler),
            cursor: 0,
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Displayed width in chars.
    pub fn width(&self) -> usize {
        self.buffer.len()
    }

    /// Number of buffer chars revealed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn warp(&self) -> Warp {
        Warp::new(self.span.len(), self.width())
    }

    /// Raw offset matching the next buffer char to be revealed. It lags the
    /// sweep whenever the buffer is narrower than the span.
    pub fn resume_position(&self) -> f64 {
        let width = self.width();
        (self.span.start * width + self.cursor * self.span.len()) as f64 / width as f64
    }

    /// Moves the cursor to the share of the buffer matching raw `pointer`
    /// and returns the chars passed over. The cursor never moves backwards.
    pub fn advance(&mut self, pointer: usize) -> &[char] {
        let len = self.span.len();
        if len == 0 || pointer < self.span.start {
            return &[];
        }
        let consumed = (pointer - self.span.start + 1).min(len);
        let target = consumed * self.width() / len;
        let from = self.cursor;
        self.cursor = self.cursor.max(target);
        &self.buffer[from..self.cursor]
    }
}
