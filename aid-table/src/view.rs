//! Paging over the filtered rows.

use std::ops::Range;

/// Rows shown at once.
pub const PAGE_SIZE: usize = 10;
/// Rows moved per wheel notch.
pub const SCROLL_STEP: usize = PAGE_SIZE.div_ceil(2);

/// Visible window of a table. `generation` identifies the row set: whenever
/// it changes the window goes back to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableWindow {
    start: usize,
    len: usize,
    generation: u64,
}

impl TableWindow {
    pub fn new(len: usize, generation: u64) -> Self {
        Self {
            start: 0,
            len,
            generation,
        }
    }

    /// Follow a new row set.
    pub fn sync(&mut self, len: usize, generation: u64) {
        if generation != self.generation {
            self.start = 0;
            self.generation = generation;
        }
        self.len = len;
        self.start = self.start.min(self.max_start());
    }

    fn max_start(&self) -> usize {
        self.len.saturating_sub(PAGE_SIZE)
    }

    /// Wheel scroll: positive `delta_y` moves down.
    pub fn scroll(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.start = (self.start + SCROLL_STEP).min(self.max_start());
        } else if delta_y < 0.0 {
            self.start = self.start.saturating_sub(SCROLL_STEP);
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Indices of the visible rows.
    pub fn range(&self) -> Range<usize> {
        self.start..(self.start + PAGE_SIZE).min(self.len)
    }

    pub fn visible<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let range = self.range();
        rows.get(range).unwrap_or(&[])
    }

    /// `"{first} to {last} of {len}"`, one-based and inclusive.
    pub fn footer(&self) -> String {
        let range = self.range();
        if range.is_empty() {
            return format!("0 to 0 of {}", self.len);
        }
        format!("{} to {} of {}", range.start + 1, range.end, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_and_clamp() {
        let mut w = TableWindow::new(25, 1);
        assert_eq!(w.range(), 0..10);
        w.scroll(100.0);
        assert_eq!(w.range(), 5..15);
        w.scroll(100.0);
        w.scroll(100.0);
        w.scroll(100.0);
        assert_eq!(w.start(), 15);
        assert_eq!(w.range(), 15..25);
        w.scroll(-1.0);
        assert_eq!(w.start(), 10);
        for _ in 0..5 {
            w.scroll(-1.0);
        }
        assert_eq!(w.start(), 0);
    }

    #[test]
    fn test_short_tables_do_not_scroll() {
        let mut w = TableWindow::new(7, 1);
        w.scroll(1.0);
        assert_eq!(w.range(), 0..7);
        assert_eq!(w.footer(), "1 to 7 of 7");
        w.scroll(0.0);
        assert_eq!(w.start(), 0);
    }

    #[test]
    fn test_new_generation_resets() {
        let mut w = TableWindow::new(40, 1);
        w.scroll(1.0);
        w.scroll(1.0);
        w.sync(40, 1);
        assert_eq!(w.start(), 10);
        w.sync(40, 2);
        assert_eq!(w.start(), 0);
    }

    #[test]
    fn test_shrinking_row_set_clamps() {
        let mut w = TableWindow::new(40, 1);
        for _ in 0..10 {
            w.scroll(1.0);
        }
        assert_eq!(w.start(), 30);
        w.sync(12, 1);
        assert_eq!(w.start(), 2);
    }

    #[test]
    fn test_footer_and_visible() {
        let rows: Vec<usize> = (0..25).collect();
        let mut w = TableWindow::new(rows.len(), 0);
        assert_eq!(w.footer(), "1 to 10 of 25");
        w.scroll(1.0);
        assert_eq!(w.visible(&rows), &rows[5..15]);
        assert_eq!(w.footer(), "6 to 15 of 25");
        assert_eq!(TableWindow::new(0, 0).footer(), "0 to 0 of 0");
    }
}
