//! Forward-only coordinate tracking within one segment's text.

use crate::line_break::{LineBreaks, break_scan_limit, char_count, slice};

/// Tracks the line and column of a moving offset within a segment's text.
///
/// The locator only ever moves forward, so locating a sequence of ascending
/// offsets (the pieces of a split, say) costs one pass over the text rather
/// than one rescan from the start per offset.
#[derive(Debug, Clone)]
pub(crate) struct Locator<'a> {
    text: &'a str,
    /// Offset most recently located.
    offset: usize,
    /// Line breaks before this offset have been counted.
    scanned: usize,
    line: usize,
    column: usize,
}

impl<'a> Locator<'a> {
    /// Creates a locator whose offset 0 sits at `(line, column)`.
    pub(crate) const fn new(text: &'a str, line: usize, column: usize) -> Self {
        Self {
            text,
            offset: 0,
            scanned: 0,
            line,
            column,
        }
    }

    /// Moves to `offset` and returns its `(line, column)`.
    ///
    /// `offset` must not be less than the previously located offset.
    pub(crate) fn advance_to(&mut self, offset: usize) -> (usize, usize) {
        debug_assert!(offset >= self.offset, "locator moved backwards");
        let limit = break_scan_limit(self.text, offset).max(self.scanned);
        let mut line_start = None;
        for brk in LineBreaks::new(slice(self.text, self.scanned, limit)) {
            self.line += 1;
            line_start = Some(self.scanned + brk.end);
        }
        self.scanned = limit;
        self.column = match line_start {
            Some(start) => char_count(self.text, start, offset),
            None => self.column + char_count(self.text, self.offset, offset),
        };
        self.offset = offset;
        (self.line, self.column)
    }
}
