//! Segment: position-tracking text spans for hand-written parsers.
//!
//! This facade crate re-exports the stable types from [`segment_core`] and
//! [`segment_parser`]. Parsers built on it report failures with the source
//! name, one-based line and column, and the offending lines underlined.
//!
//! # Stability
//!
//! The `segment` crate is the semver-stable entrypoint. The internal crates
//! may evolve, but this facade preserves type names and method behaviour.
//!
//! # Core types
//!
//! - [`Segment`]: immutable text that knows where it came from
//! - [`SegmentMatcher`] and [`Bounds`]: regular-expression search over a
//!   segment
//! - [`SplitLimit`]: piece limits for splitting
//! - [`SegmentParser`]: a cursor with consuming parse primitives
//! - [`ErrorMessage`] and [`missing_or_invalid`]: deferred failure messages
//! - [`ParseError`] and [`Location`]: located parse failures
//! - [`IndexError`]: offsets that do not fit a segment
//! - [`RenderConfig`]: layout of underlined context
//!
//! # Example
//!
//! ```
//! use segment::{ParseError, Segment, SegmentParser};
//!
//! fn parse_pair(line: &Segment) -> Result<(Segment, Segment), ParseError> {
//!     let mut parser = SegmentParser::new(line.clone());
//!     let key = parser.nonwhitespace()?;
//!     parser.whitespace()?;
//!     let value = parser.rest();
//!     if value.is_empty() {
//!         return parser.fail("missing value");
//!     }
//!     Ok((key, value))
//! }
//!
//! let file = Segment::new("width 80\nheight", "layout.conf", 0, 0);
//! let lines = file.lines();
//! let (key, value) = parse_pair(&lines[0])?;
//! assert_eq!((key.as_str(), value.as_str()), ("width", "80"));
//!
//! let error = parse_pair(&lines[1]).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "expected whitespace (in layout.conf, line 2, column 7):\nheight\n      ^"
//! );
//! # Ok::<(), ParseError>(())
//! ```

pub use segment_core::{
    Bounds, IndexError, Location, ParseError, RenderConfig, Segment, SegmentMatcher, SplitLimit,
};
pub use segment_parser::{ErrorMessage, SegmentParser, missing_or_invalid};

#[cfg(test)]
mod tests;
