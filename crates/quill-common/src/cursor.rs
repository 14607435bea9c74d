//! Scanner cursor.
//!
//! A [`Cursor`] owns the code points of one input and a position into them.
//! Consuming past the last code point yields the end-of-input sentinel
//! (`None`) and moves the position one past the end, exactly once, so that a
//! following [`Cursor::retreat`] makes the end of input "reconsumable" in the
//! same way as any other code point.

/// An owned position over a code-point buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    chars: Vec<char>,
    /// Index of the next code point to consume. At most `chars.len() + 1`.
    position: usize,
}

impl Cursor {
    /// Create a cursor at the start of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect())
    }

    /// Create a cursor at the start of an already decoded buffer.
    #[must_use]
    pub const fn from_chars(chars: Vec<char>) -> Self {
        Self { chars, position: 0 }
    }

    /// Index of the next code point to be consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of code points in the input.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the input holds no code points at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The code point `offset` places after the next unconsumed one, or
    /// `None` past the end. `peek(0)` is the next input code point.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// The most recently consumed code point, or `None` when nothing has been
    /// consumed yet or the last consumption was the end of input.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.chars.get(index).copied())
    }

    /// Consume the next code point.
    ///
    /// Returns `None` at the end of input. The first such call still moves
    /// the position, later ones do not.
    pub fn advance(&mut self) -> Option<char> {
        let next = self.peek(0);
        if self.position <= self.chars.len() {
            self.position += 1;
        }
        next
    }

    /// Step back one code point so the last consumed one is read again.
    pub const fn retreat(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Consume `count` code points without looking at them.
    pub fn skip(&mut self, count: usize) {
        for _ in 0..count {
            let _ = self.advance();
        }
    }

    /// True once every code point, including the end-of-input sentinel, has
    /// been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.position > self.chars.len()
    }

    /// True when no code point remains before the end of input.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Whether the upcoming code points spell `literal` exactly.
    #[must_use]
    pub fn starts_with(&self, literal: &str) -> bool {
        literal
            .chars()
            .enumerate()
            .all(|(offset, expected)| self.peek(offset) == Some(expected))
    }

    /// Whether the upcoming code points spell `literal`, ignoring ASCII case.
    #[must_use]
    pub fn starts_with_ignore_ascii_case(&self, literal: &str) -> bool {
        literal.chars().enumerate().all(|(offset, expected)| {
            self.peek(offset)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new("abc");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(2), Some('c'));
        assert_eq!(cursor.peek(3), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        cursor.retreat();
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.current(), Some('b'));
    }

    #[test]
    fn test_end_of_input_is_reconsumable() {
        let mut cursor = Cursor::new("a");
        assert_eq!(cursor.advance(), Some('a'));
        assert!(cursor.at_end());
        assert!(!cursor.is_exhausted());

        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), 2);

        // Further reads stay put.
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 2);

        cursor.retreat();
        assert!(!cursor.is_exhausted());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_retreat_at_start_saturates() {
        let mut cursor = Cursor::new("x");
        cursor.retreat();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.advance(), Some('x'));
    }

    #[test]
    fn test_starts_with() {
        let mut cursor = Cursor::new("<!DOCTYPE html>");
        cursor.skip(2);
        assert!(cursor.starts_with("DOCTYPE"));
        assert!(!cursor.starts_with("doctype"));
        assert!(cursor.starts_with_ignore_ascii_case("doctype"));
        assert!(!cursor.starts_with_ignore_ascii_case("doctype html>!"));
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_empty());
        assert!(cursor.at_end());
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_exhausted());
    }
}
