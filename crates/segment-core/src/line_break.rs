//! Line-break recognition shared by every coordinate computation.
//!
//! `\r\n`, `\r` and `\n` each count as exactly one line break. Scanning works
//! on bytes: neither `\r` nor `\n` can occur inside a multi-byte UTF-8
//! sequence, so every break boundary is also a character boundary.

use std::ops::Range;

/// Iterator over the byte ranges of the line breaks in a string.
#[derive(Debug, Clone)]
pub(crate) struct LineBreaks<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LineBreaks<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }
}

impl Iterator for LineBreaks<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&byte) = self.bytes.get(self.pos) {
            let start = self.pos;
            self.pos += 1;
            match byte {
                b'\n' => return Some(start..self.pos),
                b'\r' => {
                    if self.bytes.get(self.pos) == Some(&b'\n') {
                        self.pos += 1;
                    }
                    return Some(start..self.pos);
                }
                _ => {}
            }
        }
        None
    }
}

/// Returns `text[start..end]`, or the empty string for an invalid range.
///
/// Callers validate ranges before deriving segments; the fallback keeps the
/// arithmetic panic-free.
pub(crate) fn slice(text: &str, start: usize, end: usize) -> &str {
    text.get(start..end).unwrap_or_default()
}

/// Counts the characters in `text[start..end]`.
pub(crate) fn char_count(text: &str, start: usize, end: usize) -> usize {
    slice(text, start, end).chars().count()
}

/// Converts a count to a signed column value.
pub(crate) fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

/// Returns how far a prefix ending at `offset` may be scanned for line
/// breaks.
///
/// When `offset` sits between the `\r` and `\n` of a pair, the pair belongs
/// to whatever starts at `offset`, so scanning stops before the `\r`.
pub(crate) fn break_scan_limit(text: &str, offset: usize) -> usize {
    let bytes = text.as_bytes();
    let splits_pair = offset > 0
        && bytes.get(offset) == Some(&b'\n')
        && bytes.get(offset - 1) == Some(&b'\r');
    if splits_pair { offset - 1 } else { offset }
}

/// Computes the coordinates of the last character of `text` when its first
/// character sits at `(start_line, start_col)`.
///
/// A break that ends the text is that text's last character and does not
/// advance the line. Empty text yields `start_col - 1`.
pub(crate) fn end_position(text: &str, start_line: usize, start_col: usize) -> (usize, isize) {
    let len = text.len();
    let mut line = start_line;
    let mut line_start = None;
    for brk in LineBreaks::new(text) {
        if brk.end >= len {
            break;
        }
        line += 1;
        line_start = Some(brk.end);
    }
    let column = match line_start {
        Some(start) => signed(char_count(text, start, len)) - 1,
        None => signed(start_col).saturating_add(signed(text.chars().count())) - 1,
    };
    (line, column)
}
