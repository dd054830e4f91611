/// A cursor for char-by-char markup reading with position tracking.
///
/// Positions are byte indices into `s`; every move stays on a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being read.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Unread remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// Advances past `pat` if the input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if self.starts_with(pat) {
            self.i += pat.len();
            true
        } else {
            false
        }
    }

    /// Consumes up to (not including) the next `stop` char, or to the end.
    pub fn take_until(&mut self, stop: char) -> &'a str {
        let rest = self.rest();
        let n = rest.find(stop).unwrap_or(rest.len());
        self.i += n;
        &rest[..n]
    }
}
