//! A hand-written-parser toolkit over position-tracking segments.
//!
//! [`SegmentParser`] walks a [`segment_core::Segment`] with a byte index and
//! offers small consuming primitives (single characters, regular-expression
//! tokens, whitespace runs, decimal numerals). Every failure is a
//! [`segment_core::ParseError`] pointing at the exact input position, ready to
//! print with the offending line underlined.
//!
//! Failure messages implement [`ErrorMessage`]; a closure message is only
//! evaluated when the primitive actually fails.
//!
//! # Example
//!
//! ```
//! use segment_core::Segment;
//! use segment_parser::SegmentParser;
//!
//! let mut parser = SegmentParser::new(Segment::new("x = ", "input.txt", 0, 0));
//! parser.nonwhitespace()?;
//! parser.whitespace()?;
//! parser.literal('=')?;
//! parser.whitespace()?;
//! let error = parser.big_decimal().unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "invalid number (in input.txt, line 1, column 5):\nx = \n    ^"
//! );
//! # Ok::<(), segment_core::ParseError>(())
//! ```

mod cursor;
mod message;
mod number;

pub use cursor::SegmentParser;
pub use message::{ErrorMessage, missing_or_invalid};

#[cfg(test)]
mod tests;
