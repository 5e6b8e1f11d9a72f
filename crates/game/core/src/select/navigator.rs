//! Wrap-around cursor shared by the target and action list selectors.

/// Index into a list whose length may change between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves back one entry, wrapping to the end.
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index % len + len - 1) % len;
    }

    /// Moves forward one entry, wrapping to the start.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Pulls the cursor back into `0..len` (or to 0 for an empty list).
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut cursor = ListCursor::new();
        cursor.previous(3);
        assert_eq!(cursor.index(), 2);
        cursor.next(3);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn clamp_follows_shrinking_lists() {
        let mut cursor = ListCursor::new();
        cursor.next(5);
        cursor.next(5);
        cursor.next(5);
        cursor.clamp(2);
        assert_eq!(cursor.index(), 1);
        cursor.clamp(0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn empty_lists_leave_the_cursor_alone() {
        let mut cursor = ListCursor::new();
        cursor.next(0);
        cursor.previous(0);
        assert_eq!(cursor.index(), 0);
    }
}
