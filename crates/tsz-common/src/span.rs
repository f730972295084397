//! Byte-offset spans into source text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// An empty span at `pos`.
    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice `text` by this span, clamped to the text bounds.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let end = (self.end as usize).min(text.len());
        let start = (self.start as usize).min(end);
        text.get(start..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_cover() {
        let a = Span::new(2, 5);
        let b = Span::new(4, 9);
        assert_eq!(a.len(), 3);
        assert_eq!(a.cover(b), Span::new(2, 9));
        assert!(Span::at(3).is_empty());
    }

    #[test]
    fn test_span_slice_is_clamped() {
        let text = "let x = 1;";
        assert_eq!(Span::new(4, 5).slice(text), "x");
        assert_eq!(Span::new(8, 100).slice(text), "1;");
        assert_eq!(Span::new(50, 60).slice(text), "");
    }
}
