//! Splitting segments around pattern matches.

use std::num::NonZeroUsize;
use std::ops::Range;

use regex::Regex;
use tracing::trace;

use crate::line_break::LineBreaks;
use crate::locator::Locator;
use crate::matcher::next_search_start;
use crate::segment::Segment;

const SPLIT_TARGET: &str = "segment_core::split";

/// Characters that make a one-character pattern a regular expression.
const REGEX_META: &str = ".$|()[{^?*+\\";

/// How many pieces a split may produce and what happens to trailing empties.
///
/// Converts from the conventional integer limit: a positive `n` caps the
/// result at `n` pieces, `0` drops trailing empty pieces and a negative
/// value keeps them.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use segment_core::SplitLimit;
///
/// assert_eq!(SplitLimit::from(0), SplitLimit::DropTrailing);
/// assert_eq!(SplitLimit::from(-1), SplitLimit::KeepTrailing);
/// assert_eq!(SplitLimit::from(3), SplitLimit::AtMost(NonZeroUsize::new(3).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitLimit {
    /// Split at every match and keep trailing empty pieces.
    KeepTrailing,
    /// Split at every match and remove trailing empty pieces.
    DropTrailing,
    /// Produce at most this many pieces; the last holds the unsplit
    /// remainder.
    AtMost(NonZeroUsize),
}

impl From<isize> for SplitLimit {
    fn from(limit: isize) -> Self {
        match NonZeroUsize::new(limit.unsigned_abs()) {
            Some(n) if limit > 0 => Self::AtMost(n),
            _ if limit == 0 => Self::DropTrailing,
            _ => Self::KeepTrailing,
        }
    }
}

/// Non-overlapping matches of a pattern, found one search at a time.
///
/// After an empty match the next search begins one character later; after a
/// non-empty match an empty match at its end is still reported.
struct PatternMatches<'r, 'h> {
    pattern: &'r Regex,
    haystack: &'h str,
    from: Option<usize>,
}

impl<'r, 'h> PatternMatches<'r, 'h> {
    const fn new(pattern: &'r Regex, haystack: &'h str) -> Self {
        Self {
            pattern,
            haystack,
            from: Some(0),
        }
    }
}

impl Iterator for PatternMatches<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.from?;
        let Some(found) = self.pattern.find_at(self.haystack, from) else {
            self.from = None;
            return None;
        };
        self.from = next_search_start(self.haystack, found.range(), self.haystack.len());
        Some(found.range())
    }
}

/// Returns the separator character when `pattern` is a plain literal.
///
/// A single character that is not a metacharacter qualifies, as does a
/// backslash followed by ASCII punctuation that the regex syntax would also
/// read as a literal.
fn literal_separator(pattern: &str) -> Option<char> {
    let mut chars = pattern.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(ch), None, None) if !REGEX_META.contains(ch) => Some(ch),
        (Some('\\'), Some(ch), None)
            if ch.is_ascii_punctuation() && !matches!(ch, '<' | '>') =>
        {
            Some(ch)
        }
        _ => None,
    }
}

impl Segment {
    /// Splits around the matches of `pattern`.
    ///
    /// A zero-width match at the very start never produces a leading empty
    /// piece. With no match at all the result is a clone of `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use regex::Regex;
    /// use segment_core::{Segment, SplitLimit};
    ///
    /// let root = Segment::new("a, b,c", "list", 0, 0);
    /// let comma = Regex::new(r",\s*").unwrap();
    /// let items = root.split(&comma, SplitLimit::KeepTrailing);
    /// assert_eq!(items, ["a", "b", "c"]);
    /// assert_eq!(items[2].start_col(), 5);
    /// ```
    #[must_use]
    pub fn split(&self, pattern: &Regex, limit: SplitLimit) -> Vec<Self> {
        self.split_at_matches(PatternMatches::new(pattern, self.as_str()), limit)
    }

    /// Splits around the matches of a pattern given as a string.
    ///
    /// Plain one-character separators are located by character search; all
    /// other patterns are compiled as regular expressions. Both routes give
    /// identical results.
    ///
    /// # Errors
    ///
    /// Returns the compilation error if `pattern` is not a valid regular
    /// expression.
    pub fn split_str(&self, pattern: &str, limit: SplitLimit) -> Result<Vec<Self>, regex::Error> {
        if let Some(separator) = literal_separator(pattern) {
            let matches = self
                .as_str()
                .match_indices(separator)
                .map(|(at, found)| at..at + found.len());
            return Ok(self.split_at_matches(matches, limit));
        }
        let compiled = Regex::new(pattern)?;
        Ok(self.split(&compiled, limit))
    }

    /// Splits into lines, without their terminators.
    ///
    /// A trailing line break yields a final empty line.
    #[must_use]
    pub fn lines(&self) -> Vec<Self> {
        self.split_at_matches(LineBreaks::new(self.as_str()), SplitLimit::KeepTrailing)
    }

    fn split_at_matches(
        &self,
        matches: impl IntoIterator<Item = Range<usize>>,
        limit: SplitLimit,
    ) -> Vec<Self> {
        let text = self.as_str();
        let cap = match limit {
            SplitLimit::AtMost(n) => Some(n.get()),
            SplitLimit::KeepTrailing | SplitLimit::DropTrailing => None,
        };

        let mut pieces: Vec<Range<usize>> = Vec::new();
        let mut index = 0;
        for found in matches {
            if found.start == 0 && found.end == 0 {
                continue;
            }
            if cap.is_some_and(|n| pieces.len() + 1 >= n) {
                break;
            }
            pieces.push(index..found.start);
            index = found.end;
        }

        if pieces.is_empty() {
            trace!(target: SPLIT_TARGET, len = text.len(), "no separator found");
            return vec![self.clone()];
        }

        pieces.push(index..text.len());
        if limit == SplitLimit::DropTrailing {
            while pieces.last().is_some_and(Range::is_empty) {
                pieces.pop();
            }
        }
        trace!(target: SPLIT_TARGET, len = text.len(), pieces = pieces.len(), "split segment");

        let mut locator = Locator::new(text, self.start_line(), self.start_col());
        pieces
            .into_iter()
            .map(|piece| {
                let (line, col) = locator.advance_to(piece.start);
                self.derive_at(piece.start, piece.end, line, col)
            })
            .collect()
    }
}
