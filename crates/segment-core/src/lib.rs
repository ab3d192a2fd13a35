//! Position-aware text segments for parsers and diagnostics.
//!
//! A [`Segment`] is an immutable piece of a source document that remembers
//! where it came from: the source tag, its offset in the original text, and
//! the zero-based line and column of its first and last characters. Every
//! operation that carves a smaller piece out of a segment (substring, split,
//! trim, line splitting, regular-expression groups) produces a new segment
//! with correct coordinates, so errors found deep inside a parser can still
//! point at the exact input that caused them.
//!
//! # Core types
//!
//! - [`Segment`]: the text excerpt and its coordinates
//! - [`SegmentMatcher`] and [`Bounds`]: regular-expression search yielding
//!   segments
//! - [`SplitLimit`]: how many pieces a split may produce
//! - [`ParseError`] and [`Location`]: located, underlined error reports
//! - [`IndexError`]: offsets that do not fit a segment
//! - [`RenderConfig`]: layout of underlined context
//!
//! # Example
//!
//! ```
//! use segment_core::{Segment, SplitLimit};
//!
//! let root = Segment::new("name: ada\nrole: admin", "users.yaml", 0, 0);
//! let lines = root.lines();
//! let fields = lines[1].split_str(":", SplitLimit::KeepTrailing)?;
//! let value = fields[1].trim();
//! assert_eq!(value, "admin");
//! assert_eq!((value.start_line(), value.start_col()), (1, 6));
//! # Ok::<(), regex::Error>(())
//! ```

mod config;
mod error;
mod line_break;
mod locator;
mod matcher;
mod segment;
mod split;
mod underline;

pub use config::RenderConfig;
pub use error::{IndexError, Location, ParseError};
pub use matcher::{Bounds, SegmentMatcher};
pub use segment::Segment;
pub use split::SplitLimit;

#[cfg(test)]
mod tests;
