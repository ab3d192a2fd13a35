//! Error types for segment access and parsing.
//!
//! [`IndexError`] reports a caller passing an offset or range that does not
//! fit a segment; it signals a contract violation rather than bad input.
//! [`ParseError`] is the recoverable failure produced while parsing: it
//! carries a message and the [`Segment`] it points at, and renders the
//! offending lines with the covered columns underlined.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RenderConfig;
use crate::segment::Segment;

/// An offset or range that does not fit a segment's text.
///
/// Offsets are byte offsets into the segment's UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IndexError {
    /// The index lies at or past the end of the segment.
    #[error("index {index} out of bounds for segment of length {len}")]
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the segment in bytes.
        len: usize,
    },

    /// The index falls inside a multi-byte character.
    #[error("index {index} does not fall on a character boundary")]
    NotCharBoundary {
        /// The offending index.
        index: usize,
    },

    /// The range is reversed or extends past the end of the segment.
    #[error("range {begin}..{end} out of bounds for segment of length {len}")]
    InvalidRange {
        /// Inclusive start of the range.
        begin: usize,
        /// Exclusive end of the range.
        end: usize,
        /// Length of the segment in bytes.
        len: usize,
    },
}

/// A one-based source position suitable for reporting to tools.
///
/// # Example
///
/// ```
/// use segment_core::Segment;
///
/// let root = Segment::new("alpha\nbeta", "notes.txt", 0, 0);
/// let beta = root.substring(6, 10)?;
/// let location = beta.location();
/// assert_eq!(location.line(), 2);
/// assert_eq!(location.column(), 1);
/// assert_eq!(location.to_string(), "notes.txt:2:1");
/// # Ok::<(), segment_core::IndexError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The source tag of the segment, typically a file name.
    source: String,
    /// One-based line number.
    line: usize,
    /// One-based column number.
    column: usize,
}

impl Location {
    /// Creates a location from one-based coordinates.
    #[must_use]
    pub const fn new(source: String, line: usize, column: usize) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    /// Returns the source tag.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the one-based column number.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Renders the message header followed by the underlined context.
fn located_summary(message: &str, segment: &Segment, config: &RenderConfig) -> String {
    let location = segment.location();
    format!(
        "{message} (in {}, line {}, column {}):{}{}",
        location.source(),
        location.line(),
        location.column(),
        config.line_separator(),
        segment.underline_in_context_with(config)
    )
}

/// A parse failure located at a segment of the input.
///
/// The `Display` form is
/// `<message> (in <source>, line <L>, column <C>):` followed by the
/// segment's lines, each underlined where the segment covers it. Line and
/// column are one-based.
///
/// # Example
///
/// ```
/// use segment_core::{ParseError, Segment};
///
/// let root = Segment::new("let x = ;", "input.txt", 0, 0);
/// let at = root.char_at_as_segment(8)?;
/// let error = ParseError::new("expected expression", at);
/// assert_eq!(
///     error.to_string(),
///     "expected expression (in input.txt, line 1, column 9):\nlet x = ;\n        ^"
/// );
/// # Ok::<(), segment_core::IndexError>(())
/// ```
#[derive(Debug, Error)]
#[error("{}", located_summary(&self.message, &self.segment, &RenderConfig::default()))]
pub struct ParseError {
    message: String,
    segment: Segment,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ParseError {
    /// Creates a parse error pointing at `segment`.
    #[must_use]
    pub fn new(message: impl Into<String>, segment: Segment) -> Self {
        Self {
            message: message.into(),
            segment,
            cause: None,
        }
    }

    /// Attaches the underlying failure that triggered this error.
    #[must_use]
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns the bare message, without location or context.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the segment the error points at.
    #[must_use]
    pub const fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the one-based location of the error.
    #[must_use]
    pub fn location(&self) -> Location {
        self.segment.location()
    }

    /// Renders the error with a custom layout.
    #[must_use]
    pub fn render_with(&self, config: &RenderConfig) -> String {
        located_summary(&self.message, &self.segment, config)
    }
}
