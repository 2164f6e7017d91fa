use std::ops::Range;

/// A position inside one range of the inline source.
///
/// Positions are absolute byte offsets into the whole source, so spans taken
/// while scanning a nested range still index the original string. The scanner
/// only moves by whole characters or by markers it matched, so every position
/// is a char boundary.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str, range: Range<usize>) -> Self {
        Self {
            src,
            pos: range.start,
            end: range.end,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.end
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..self.end]
    }

    pub fn at(&self, marker: &str) -> bool {
        self.rest().starts_with(marker)
    }

    /// Moves past `marker` if the scanner is on it.
    pub fn eat(&mut self, marker: &str) -> bool {
        let found = self.at(marker);
        if found {
            self.pos += marker.len();
        }
        found
    }

    /// Moves past the current character.
    pub fn step(&mut self) {
        if let Some(c) = self.rest().chars().next() {
            self.pos += c.len_utf8();
        }
    }

    /// Offset of the next `marker` at or after the current position, within
    /// the range.
    pub fn find(&self, marker: &str) -> Option<usize> {
        self.rest().find(marker).map(|i| self.pos + i)
    }

    /// Jumps to an offset returned by [`Scanner::find`].
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos <= self.end && self.src.is_char_boundary(pos));
        self.pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_range_keeps_absolute_positions() {
        let src = "ab<u>cd</u>";
        let mut sc = Scanner::new(src, 5..7);
        assert_eq!(sc.pos(), 5);
        assert!(sc.at("c"));
        sc.step();
        sc.step();
        assert!(sc.is_done());
        assert_eq!(sc.pos(), 7);
    }

    #[test]
    fn eat_only_on_match() {
        let mut sc = Scanner::new("<mark>x</mark>", 0..14);
        assert!(!sc.eat("<u>"));
        assert_eq!(sc.pos(), 0);
        assert!(sc.eat("<mark>"));
        assert_eq!(sc.pos(), 6);
    }

    #[test]
    fn markers_past_range_end_are_not_seen() {
        let sc = Scanner::new("a**b**", 0..4);
        assert_eq!(sc.find("**"), Some(1));
        let sc = Scanner::new("a**b**", 3..5);
        assert_eq!(sc.find("**"), None);
        assert!(sc.at("b*"));
        assert!(!sc.at("b**"));
    }

    #[test]
    fn step_moves_by_char() {
        let mut sc = Scanner::new("é`", 0..3);
        sc.step();
        assert_eq!(sc.pos(), 2);
        assert!(sc.at("`"));
        sc.step();
        sc.step();
        assert_eq!(sc.pos(), 3);
    }

    #[test]
    fn seek_to_found_marker() {
        let mut sc = Scanner::new("x `code` y", 0..10);
        sc.seek(sc.find("`").unwrap());
        assert!(sc.eat("`"));
        let close = sc.find("`").unwrap();
        assert_eq!(close, 7);
        sc.seek(close);
        assert!(sc.eat("`"));
        assert!(sc.at(" y"));
    }

    #[test]
    fn empty_range() {
        let mut sc = Scanner::new("abc", 3..3);
        assert!(sc.is_done());
        sc.step();
        assert_eq!(sc.pos(), 3);
        assert_eq!(sc.find("a"), None);
    }
}
