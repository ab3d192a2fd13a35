//! Regular-expression matching that reports results as segments.
//!
//! [`SegmentMatcher`] is a stateful search cursor over one segment. Match
//! offsets are byte offsets into the segment; groups come back as derived
//! segments carrying their own line and column numbers.

use std::ops::Range;

use regex::{CaptureLocations, Regex};
use tracing::trace;

use crate::error::IndexError;
use crate::line_break::slice;
use crate::segment::Segment;

const MATCHER_TARGET: &str = "segment_core::matcher";

/// How the edges of a matcher's region appear to the pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bounds {
    /// The region is searched as if it were the whole text: `^`, `$`, `\A`,
    /// `\z` and `\b` all treat the region edges as text edges.
    #[default]
    Anchoring,
    /// Assertions see the text before the region start, so `^` only matches
    /// there if it is a real line start. The region end is always a hard
    /// end.
    Transparent,
}

/// Returns where the search after `found` begins, or `None` once `limit`
/// is passed.
///
/// An empty match moves the next search one character forward so the same
/// empty match is not reported twice.
pub(crate) fn next_search_start(
    haystack: &str,
    found: Range<usize>,
    limit: usize,
) -> Option<usize> {
    if !found.is_empty() {
        return Some(found.end);
    }
    haystack
        .get(found.end..)
        .and_then(|rest| rest.chars().next())
        .map(|ch| found.end + ch.len_utf8())
        .filter(|&next| next <= limit)
}

/// A stateful regular-expression search over one [`Segment`].
///
/// # Example
///
/// ```
/// use regex::Regex;
/// use segment_core::Segment;
///
/// let root = Segment::new("x = 1\ny = 22", "vars", 0, 0);
/// let assignment = Regex::new(r"(\w+) = (\d+)").unwrap();
/// let mut matcher = root.matcher(&assignment);
///
/// assert!(matcher.find());
/// assert!(matcher.find());
/// let value = matcher.group_at(2).unwrap();
/// assert_eq!(value, "22");
/// assert_eq!((value.start_line(), value.start_col()), (1, 4));
/// assert!(!matcher.find());
/// ```
#[derive(Debug, Clone)]
pub struct SegmentMatcher {
    segment: Segment,
    pattern: Regex,
    /// Anchored form of `pattern`, compiled on first use by
    /// [`matches`](Self::matches).
    whole: Option<Regex>,
    region: Range<usize>,
    bounds: Bounds,
    /// Capture offsets of the current match, relative to `base`.
    locations: Option<CaptureLocations>,
    base: usize,
    next_from: Option<usize>,
}

impl SegmentMatcher {
    /// Creates a matcher over the whole of `segment`.
    #[must_use]
    pub fn new(segment: Segment, pattern: &Regex) -> Self {
        let len = segment.len();
        Self {
            segment,
            pattern: pattern.clone(),
            whole: None,
            region: 0..len,
            bounds: Bounds::default(),
            locations: None,
            base: 0,
            next_from: Some(0),
        }
    }

    /// Returns the segment being searched.
    #[must_use]
    pub const fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the pattern being searched for.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Replaces the pattern, keeping the search position but discarding the
    /// current match.
    pub fn use_pattern(&mut self, pattern: &Regex) -> &mut Self {
        self.pattern = pattern.clone();
        self.whole = None;
        self.locations = None;
        self
    }

    /// Selects how region edges appear to the pattern.
    pub const fn use_bounds(&mut self, bounds: Bounds) -> &mut Self {
        self.bounds = bounds;
        self
    }

    /// Returns the current bounds mode.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Confines matching to `start..end` of the segment and resets the
    /// search.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if the range does not fit the segment.
    pub fn region(&mut self, start: usize, end: usize) -> Result<&mut Self, IndexError> {
        self.segment.check_range(start, end)?;
        self.region = start..end;
        self.locations = None;
        self.next_from = Some(start);
        Ok(self)
    }

    /// Returns the inclusive start of the region.
    #[must_use]
    pub const fn region_start(&self) -> usize {
        self.region.start
    }

    /// Returns the exclusive end of the region.
    #[must_use]
    pub const fn region_end(&self) -> usize {
        self.region.end
    }

    /// Restores the region to the whole segment and restarts the search.
    pub fn reset(&mut self) -> &mut Self {
        self.region = 0..self.segment.len();
        self.locations = None;
        self.next_from = Some(0);
        self
    }

    /// Advances to the next match.
    ///
    /// The first call searches from the region start; later calls continue
    /// after the previous match.
    pub fn find(&mut self) -> bool {
        match self.next_from {
            Some(from) => self.search(from),
            None => {
                self.locations = None;
                false
            }
        }
    }

    /// Resets the matcher and searches from byte offset `from`.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `from` is past the end or splits a
    /// character.
    pub fn find_from(&mut self, from: usize) -> Result<bool, IndexError> {
        self.reset();
        self.segment.check_range(from, self.segment.len())?;
        Ok(self.search(from))
    }

    /// Returns `true` if a match starts exactly at the region start.
    ///
    /// A failed attempt leaves the position of the next [`find`](Self::find)
    /// untouched.
    pub fn looking_at(&mut self) -> bool {
        let start = self.region.start;
        let resume = self.next_from;
        if self.search(start) && self.start() == Some(start) {
            return true;
        }
        self.locations = None;
        self.next_from = resume;
        false
    }

    /// Returns `true` if the pattern matches the entire region.
    ///
    /// The pattern as compiled is tried first, so options set through
    /// [`regex::RegexBuilder`] apply whenever its leftmost match already
    /// spans the region. Only when that match stops short is an anchored
    /// copy compiled from [`Regex::as_str`]; that copy sees inline flags
    /// such as `(?i)` but not builder options.
    ///
    /// # Errors
    ///
    /// Returns an error if the anchored copy of the pattern cannot be
    /// compiled.
    pub fn matches(&mut self) -> Result<bool, regex::Error> {
        let segment = self.segment.clone();
        let region = self.region.clone();
        let haystack = slice(segment.as_str(), region.start, region.end);
        let mut locations = self.pattern.capture_locations();
        let leftmost = self
            .pattern
            .captures_read(&mut locations, haystack)
            .map(|found| found.range());
        let whole = match leftmost {
            Some(range) if range == (0..haystack.len()) => Some(locations),
            Some(range) if range.start == 0 => self.anchored_match(haystack)?,
            _ => None,
        };
        let found = whole.is_some();
        self.base = region.start;
        self.locations = whole;
        self.next_from = if found { Some(region.end) } else { None };
        Ok(found)
    }

    /// Returns the number of capturing groups in the pattern.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len().saturating_sub(1)
    }

    /// Returns the start offset of the current match.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.start_of(0)
    }

    /// Returns the end offset of the current match.
    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.end_of(0)
    }

    /// Returns the start offset of group `group` in the current match.
    #[must_use]
    pub fn start_of(&self, group: usize) -> Option<usize> {
        self.group_range(group).map(|range| range.start)
    }

    /// Returns the end offset of group `group` in the current match.
    #[must_use]
    pub fn end_of(&self, group: usize) -> Option<usize> {
        self.group_range(group).map(|range| range.end)
    }

    /// Returns the current match as a segment.
    #[must_use]
    pub fn group(&self) -> Option<Segment> {
        self.group_at(0)
    }

    /// Returns capturing group `group` of the current match as a segment.
    ///
    /// Returns `None` when there is no current match or the group did not
    /// take part in it.
    #[must_use]
    pub fn group_at(&self, group: usize) -> Option<Segment> {
        self.group_range(group)
            .map(|range| self.segment.derive(range.start, range.end))
    }

    /// Returns the capturing group called `name` in the current match as a
    /// segment.
    #[must_use]
    pub fn group_named(&self, name: &str) -> Option<Segment> {
        self.group_at(self.group_index(name)?)
    }

    /// Returns the start offset of the group called `name`.
    #[must_use]
    pub fn start_of_named(&self, name: &str) -> Option<usize> {
        self.start_of(self.group_index(name)?)
    }

    /// Returns the end offset of the group called `name`.
    #[must_use]
    pub fn end_of_named(&self, name: &str) -> Option<usize> {
        self.end_of(self.group_index(name)?)
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.pattern
            .capture_names()
            .position(|candidate| candidate == Some(name))
    }

    /// Matches `haystack` against the pattern wrapped in `\A(?:..)\z`,
    /// compiling the wrapper on first use.
    fn anchored_match(&mut self, haystack: &str) -> Result<Option<CaptureLocations>, regex::Error> {
        let whole = match &self.whole {
            Some(whole) => whole.clone(),
            None => {
                let compiled = Regex::new(&format!(r"\A(?:{})\z", self.pattern.as_str()))?;
                self.whole = Some(compiled.clone());
                compiled
            }
        };
        let mut locations = whole.capture_locations();
        let found = whole.captures_read(&mut locations, haystack).is_some();
        Ok(found.then_some(locations))
    }

    fn group_range(&self, group: usize) -> Option<Range<usize>> {
        let (start, end) = self.locations.as_ref()?.get(group)?;
        Some(self.base + start..self.base + end)
    }

    fn search(&mut self, from: usize) -> bool {
        let text = self.segment.as_str();
        let region = self.region.clone();
        if from < region.start || from > region.end {
            self.locations = None;
            self.next_from = None;
            return false;
        }
        let (haystack, base) = match self.bounds {
            Bounds::Anchoring => (slice(text, region.start, region.end), region.start),
            Bounds::Transparent => (slice(text, 0, region.end), 0),
        };
        let mut locations = self.pattern.capture_locations();
        let found = self
            .pattern
            .captures_read_at(&mut locations, haystack, from - base)
            .map(|found| base + found.start()..base + found.end());
        trace!(target: MATCHER_TARGET, from, found = ?found, "searched segment");

        match found {
            Some(range) => {
                self.base = base;
                self.locations = Some(locations);
                self.next_from = next_search_start(text, range, region.end);
                true
            }
            None => {
                self.locations = None;
                self.next_from = None;
                false
            }
        }
    }
}
