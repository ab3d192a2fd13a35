//! Rendering a segment as its source lines with the covered columns marked.

use unicode_width::UnicodeWidthChar;

use crate::config::RenderConfig;
use crate::line_break::signed;
use crate::segment::Segment;

/// Terminal columns occupied by `ch`; control characters count as one.
fn display_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

impl Segment {
    /// Renders the lines of the root that this segment touches, each
    /// followed by a line of `^` under the columns the segment covers.
    ///
    /// An empty segment is marked with a single `^` at its position.
    ///
    /// # Example
    ///
    /// ```
    /// use segment_core::Segment;
    ///
    /// let root = Segment::new("one\ntwo three\nfour", "demo", 0, 0);
    /// let word = root.substring(8, 13)?;
    /// assert_eq!(word.underline_in_context(), "two three\n    ^^^^^");
    /// # Ok::<(), segment_core::IndexError>(())
    /// ```
    #[must_use]
    pub fn underline_in_context(&self) -> String {
        self.underline_in_context_with(&RenderConfig::default())
    }

    /// Renders [`underline_in_context`](Self::underline_in_context) with a
    /// custom separator and marker.
    #[must_use]
    pub fn underline_in_context_with(&self, config: &RenderConfig) -> String {
        let blocks: Vec<String> = self
            .root()
            .lines()
            .iter()
            .filter(|line| (self.start_line()..=self.end_line()).contains(&line.start_line()))
            .map(|line| {
                format!(
                    "{}{}{}",
                    line.as_str(),
                    config.line_separator(),
                    self.marker_line(line, config.marker())
                )
            })
            .collect();
        blocks.join(config.line_separator())
    }

    /// Builds the marker line placed under `line`.
    fn marker_line(&self, line: &Segment, marker: char) -> String {
        let row = line.start_line();
        let base = line.start_col();
        let chars: Vec<char> = line.as_str().chars().collect();
        let char_at = |col: usize| col.checked_sub(base).and_then(|i| chars.get(i).copied());
        let mut out = String::new();

        let first_col = if row == self.start_line() {
            for col in base..self.start_col() {
                match char_at(col) {
                    Some('\t') => out.push('\t'),
                    Some(ch) => out.extend(std::iter::repeat_n(' ', display_width(ch))),
                    None => out.push(' '),
                }
            }
            self.start_col().max(base)
        } else {
            base
        };

        if self.start_line() == self.end_line() && self.end_col() < signed(self.start_col()) {
            out.push(marker);
            return out;
        }

        let mut mark = |col: usize| {
            let width = char_at(col).map_or(1, |ch| display_width(ch).max(1));
            out.extend(std::iter::repeat_n(marker, width));
        };
        if row < self.end_line() {
            for col in first_col..base + chars.len() {
                mark(col);
            }
        } else {
            let mut col = first_col;
            while signed(col) <= self.end_col() {
                mark(col);
                col += 1;
            }
        }
        out
    }
}
