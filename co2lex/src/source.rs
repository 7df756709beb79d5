use std::ops::Range;

/// Byte range of the scanned text covered by a token or a diagnostic.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct InputSpan {
    pub start: usize,
    pub end: usize,
}

impl InputSpan {
    pub fn new(start: usize, end: usize) -> InputSpan {
        debug_assert!(start <= end);
        InputSpan { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn merge(&self, other: InputSpan) -> InputSpan {
        InputSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
