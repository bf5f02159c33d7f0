//! Character-by-character text reveal.

/// Reveals or retracts a target text one character at a time.
///
/// The revealed text is always a prefix of the target, cut on a `char`
/// boundary, so multi-byte text such as `"Tornøe 👋"` is never split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    target: String,
    /// Byte offset of the end of the revealed prefix.
    end: usize,
}

impl Typewriter {
    /// Nothing revealed yet.
    #[must_use]
    pub fn empty(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            end: 0,
        }
    }

    /// Entire target revealed.
    #[must_use]
    pub fn filled(target: impl Into<String>) -> Self {
        let target = target.into();
        let end = target.len();
        Self { target, end }
    }

    /// Reveals one more character. Returns `false` if already complete.
    pub fn type_next(&mut self) -> bool {
        match self.target[self.end..].chars().next() {
            Some(c) => {
                self.end += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Hides the last revealed character. Returns `false` if already empty.
    pub fn backspace(&mut self) -> bool {
        match self.target[..self.end].chars().next_back() {
            Some(c) => {
                self.end -= c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// The revealed prefix.
    #[must_use]
    pub fn revealed(&self) -> &str {
        &self.target[..self.end]
    }

    /// Whether the whole target is revealed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.end == self.target.len()
    }

    /// Whether nothing is revealed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// The text being revealed.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}
