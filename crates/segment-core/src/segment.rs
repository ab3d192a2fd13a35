//! The [`Segment`] type: immutable text that knows where it came from.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::{IndexError, Location};
use crate::line_break::{end_position, slice};
use crate::locator::Locator;
use crate::matcher::SegmentMatcher;

/// The document every segment derived from one root shares.
#[derive(Debug)]
struct Document {
    text: String,
    source: String,
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: isize,
}

/// An immutable excerpt of a source document together with its coordinates.
///
/// A root segment is created with [`Segment::new`]; every other segment is
/// derived from it (by [`substring`](Self::substring), [`split`](Self::split),
/// [`trim`](Self::trim), and so on) and shares the root's text buffer rather
/// than copying it. Derivation recomputes line and column numbers from the
/// parent's own coordinates, scanning only the text between the parent's
/// start and the new start.
///
/// Offsets passed to and returned from a segment are byte offsets into its
/// UTF-8 text. Lines and columns are zero-based; columns count characters.
/// `\r\n`, `\r` and `\n` each end a line.
///
/// # Example
///
/// ```
/// use segment_core::Segment;
///
/// let root = Segment::new("foo bar baz\r\n qux\nthis is a\ntest", "foo.txt", 5, 3);
/// let middle = root.substring(13, 28)?;
/// assert_eq!(middle.source_index(), Some(13));
/// assert_eq!((middle.start_line(), middle.start_col()), (6, 0));
/// assert_eq!((middle.end_line(), middle.end_col()), (7, 9));
/// # Ok::<(), segment_core::IndexError>(())
/// ```
#[derive(Clone)]
pub struct Segment {
    document: Arc<Document>,
    derived: bool,
    start: usize,
    end: usize,
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: isize,
}

impl Segment {
    /// Creates a root segment whose first character sits at
    /// `(start_line, start_col)`.
    ///
    /// `source` is an opaque tag (typically a file name) that is carried by
    /// every derived segment and printed in diagnostics.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        start_line: usize,
        start_col: usize,
    ) -> Self {
        let owned: String = text.into();
        let (end_line, end_col) = end_position(&owned, start_line, start_col);
        let end = owned.len();
        let document = Document {
            text: owned,
            source: source.into(),
            start_line,
            start_col,
            end_line,
            end_col,
        };
        Self {
            document: Arc::new(document),
            derived: false,
            start: 0,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the text of this segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        slice(&self.document.text, self.start, self.end)
    }

    /// Returns the length of the text in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the segment contains no text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the source tag of the originating document.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.document.source
    }

    /// Returns the offset of this segment within its root, or `None` for a
    /// root segment.
    #[must_use]
    pub const fn source_index(&self) -> Option<usize> {
        if self.derived { Some(self.start) } else { None }
    }

    /// Returns `true` if this segment was created by [`Segment::new`].
    #[must_use]
    pub const fn is_root(&self) -> bool {
        !self.derived
    }

    /// Returns the zero-based line of the first character.
    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start_line
    }

    /// Returns the zero-based column of the first character.
    #[must_use]
    pub const fn start_col(&self) -> usize {
        self.start_col
    }

    /// Returns the zero-based line of the last character.
    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.end_line
    }

    /// Returns the zero-based column of the last character.
    ///
    /// For an empty segment this is one less than
    /// [`start_col`](Self::start_col), and may therefore be `-1`.
    #[must_use]
    pub const fn end_col(&self) -> isize {
        self.end_col
    }

    /// Returns the one-based location of the first character.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(
            self.document.source.clone(),
            self.start_line.saturating_add(1),
            self.start_col.saturating_add(1),
        )
    }

    /// Returns the root segment this segment was derived from.
    #[must_use]
    pub fn root(&self) -> Self {
        if !self.derived {
            return self.clone();
        }
        let document = &self.document;
        Self {
            document: Arc::clone(document),
            derived: false,
            start: 0,
            end: document.text.len(),
            start_line: document.start_line,
            start_col: document.start_col,
            end_line: document.end_line,
            end_col: document.end_col,
        }
    }

    /// Returns the segment covering `begin..end` of this segment's text.
    ///
    /// Only the text before `begin` is scanned to locate the new segment.
    /// `substring(len, len)` is the empty segment one column past the last
    /// character.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidRange`] if the range is reversed or past
    /// the end, and [`IndexError::NotCharBoundary`] if either bound splits a
    /// character.
    pub fn substring(&self, begin: usize, end: usize) -> Result<Self, IndexError> {
        self.check_range(begin, end)?;
        Ok(self.derive(begin, end))
    }

    /// Returns the segment from `begin` to the end of this segment.
    ///
    /// # Errors
    ///
    /// As for [`substring`](Self::substring).
    pub fn substring_from(&self, begin: usize) -> Result<Self, IndexError> {
        self.substring(begin, self.len())
    }

    /// Returns the character starting at byte offset `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfBounds`] if `index >= len()` and
    /// [`IndexError::NotCharBoundary`] if `index` splits a character.
    pub fn char_at(&self, index: usize) -> Result<char, IndexError> {
        let len = self.len();
        if index >= len {
            return Err(IndexError::OutOfBounds { index, len });
        }
        self.as_str()
            .get(index..)
            .and_then(|rest| rest.chars().next())
            .ok_or(IndexError::NotCharBoundary { index })
    }

    /// Returns the Unicode code point starting at byte offset `index`.
    ///
    /// # Errors
    ///
    /// As for [`char_at`](Self::char_at).
    pub fn code_point_at(&self, index: usize) -> Result<u32, IndexError> {
        self.char_at(index).map(u32::from)
    }

    /// Returns the Unicode code point ending at byte offset `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfBounds`] if `index` is 0 or past the end,
    /// and [`IndexError::NotCharBoundary`] if `index` splits a character.
    pub fn code_point_before(&self, index: usize) -> Result<u32, IndexError> {
        let len = self.len();
        if index == 0 || index > len {
            return Err(IndexError::OutOfBounds { index, len });
        }
        self.as_str()
            .get(..index)
            .and_then(|head| head.chars().next_back())
            .map(u32::from)
            .ok_or(IndexError::NotCharBoundary { index })
    }

    /// Counts the code points in `begin..end`.
    ///
    /// # Errors
    ///
    /// As for [`substring`](Self::substring).
    pub fn code_point_count(&self, begin: usize, end: usize) -> Result<usize, IndexError> {
        self.check_range(begin, end)?;
        Ok(slice(self.as_str(), begin, end).chars().count())
    }

    /// Returns the one-character segment at `index`, or the empty segment
    /// after the last character when `index == len()`.
    ///
    /// The empty form marks insertion points, such as "expected `;`" at the
    /// end of the input.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfBounds`] if `index > len()` and
    /// [`IndexError::NotCharBoundary`] if `index` splits a character.
    pub fn char_at_as_segment(&self, index: usize) -> Result<Self, IndexError> {
        if index == self.len() {
            return Ok(self.tail());
        }
        let ch = self.char_at(index)?;
        Ok(self.derive(index, index + ch.len_utf8()))
    }

    /// Returns the empty segment immediately after the last character.
    #[must_use]
    pub fn tail(&self) -> Self {
        let len = self.len();
        self.derive(len, len)
    }

    /// Returns the character of the root immediately before this segment,
    /// or an empty segment at this segment's start if there is none.
    #[must_use]
    pub fn char_before(&self) -> Self {
        if !self.derived || self.start == 0 {
            return self.derive(0, 0);
        }
        let root = self.root();
        let previous = slice(root.as_str(), 0, self.start).chars().next_back();
        match previous {
            Some(ch) => root.derive(self.start - ch.len_utf8(), self.start),
            None => self.derive(0, 0),
        }
    }

    /// Returns the character of the root immediately after this segment,
    /// or an empty segment at this segment's end if there is none.
    #[must_use]
    pub fn char_after(&self) -> Self {
        if !self.derived || self.end >= self.document.text.len() {
            return self.tail();
        }
        self.root()
            .char_at_as_segment(self.end)
            .unwrap_or_else(|_| self.tail())
    }

    /// Strips leading and trailing characters up to and including `' '`.
    ///
    /// Returns a clone of `self` when there is nothing to strip.
    #[must_use]
    pub fn trim(&self) -> Self {
        let text = self.as_str();
        let is_blank = |ch: char| ch <= ' ';
        let begin = text.len() - text.trim_start_matches(is_blank).len();
        let end = text.trim_end_matches(is_blank).len().max(begin);
        if begin == 0 && end == text.len() {
            self.clone()
        } else {
            self.derive(begin, end)
        }
    }

    /// Returns `true` if the text starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Returns `true` if the text ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    /// Returns `true` if the text contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.as_str().contains(needle)
    }

    /// Returns `true` if `pattern` matches the whole text.
    ///
    /// See [`SegmentMatcher::matches`] for how builder options are treated.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchored form of `pattern` cannot be compiled.
    pub fn is_match(&self, pattern: &Regex) -> Result<bool, regex::Error> {
        self.matcher(pattern).matches()
    }

    /// Creates a matcher that searches this segment with `pattern`.
    #[must_use]
    pub fn matcher(&self, pattern: &Regex) -> SegmentMatcher {
        SegmentMatcher::new(self.clone(), pattern)
    }

    /// Validates a range of this segment's text.
    pub(crate) fn check_range(&self, begin: usize, end: usize) -> Result<(), IndexError> {
        let len = self.len();
        if begin > end || end > len {
            return Err(IndexError::InvalidRange { begin, end, len });
        }
        let text = self.as_str();
        if !text.is_char_boundary(begin) {
            return Err(IndexError::NotCharBoundary { index: begin });
        }
        if !text.is_char_boundary(end) {
            return Err(IndexError::NotCharBoundary { index: end });
        }
        Ok(())
    }

    /// Derives `begin..end`, which the caller has already validated.
    ///
    /// The empty position after the last character sits one column past it,
    /// on the same line, even when that character is a line break.
    pub(crate) fn derive(&self, begin: usize, end: usize) -> Self {
        if begin == self.len() && !self.is_empty() {
            let col = usize::try_from(self.end_col + 1).unwrap_or_default();
            return self.derive_at(begin, end, self.end_line, col);
        }
        let (line, col) =
            Locator::new(self.as_str(), self.start_line, self.start_col).advance_to(begin);
        self.derive_at(begin, end, line, col)
    }

    /// Derives `begin..end` whose start coordinates are already known.
    pub(crate) fn derive_at(&self, begin: usize, end: usize, line: usize, col: usize) -> Self {
        let (end_line, end_col) = end_position(slice(self.as_str(), begin, end), line, col);
        Self {
            document: Arc::clone(&self.document),
            derived: true,
            start: self.start + begin,
            end: self.start + end,
            start_line: line,
            start_col: col,
            end_line,
            end_col,
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
            && self.source() == other.source()
            && self.start_line == other.start_line
            && self.start_col == other.start_col
            && self.end_line == other.end_line
            && self.end_col == other.end_col
    }
}

impl Eq for Segment {}

impl PartialEq<str> for Segment {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Segment {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("text", &self.as_str())
            .field("source", &self.source())
            .field("source_index", &self.source_index())
            .field("start", &(self.start_line, self.start_col))
            .field("end", &(self.end_line, self.end_col))
            .finish()
    }
}

