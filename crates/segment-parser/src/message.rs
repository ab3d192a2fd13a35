//! Failure messages that are only built when a primitive fails.

use crate::cursor::SegmentParser;

/// Describes why a [`SegmentParser`] primitive failed.
///
/// Implemented for `&str`, `String` and closures taking the parser. A
/// closure is called only on failure, with the parser still positioned where
/// the failure happened, so it can tailor the message to the input without
/// costing anything on the success path.
///
/// Closures need their parameter type spelled out so they accept a parser
/// borrowed for any lifetime.
///
/// # Example
///
/// ```
/// use segment_core::Segment;
/// use segment_parser::SegmentParser;
///
/// let mut parser = SegmentParser::new(Segment::new("x", "demo", 0, 0));
/// let error = parser
///     .literal_with('=', |p: &SegmentParser| format!("expected '=' at byte {}", p.index()))
///     .unwrap_err();
/// assert_eq!(error.message(), "expected '=' at byte 0");
/// ```
pub trait ErrorMessage {
    /// Builds the message for a failure at the parser's current position.
    fn message(&self, parser: &SegmentParser) -> String;
}

impl ErrorMessage for &str {
    fn message(&self, _parser: &SegmentParser) -> String {
        (*self).to_owned()
    }
}

impl ErrorMessage for String {
    fn message(&self, _parser: &SegmentParser) -> String {
        self.clone()
    }
}

impl<F> ErrorMessage for F
where
    F: Fn(&SegmentParser) -> String,
{
    fn message(&self, parser: &SegmentParser) -> String {
        self(parser)
    }
}

/// Builds "missing `what`" when the parser is at the end of its input and
/// "invalid `what`" otherwise.
///
/// # Example
///
/// ```
/// use segment_core::Segment;
/// use segment_parser::{SegmentParser, missing_or_invalid};
///
/// let mut empty = SegmentParser::new(Segment::new("", "demo", 0, 0));
/// let error = empty.big_decimal_with(missing_or_invalid("price")).unwrap_err();
/// assert_eq!(error.message(), "missing price");
///
/// let mut text = SegmentParser::new(Segment::new("free", "demo", 0, 0));
/// let error = text.big_decimal_with(missing_or_invalid("price")).unwrap_err();
/// assert_eq!(error.message(), "invalid price");
/// ```
#[must_use]
pub fn missing_or_invalid(what: impl Into<String>) -> impl Fn(&SegmentParser) -> String {
    let noun: String = what.into();
    move |parser: &SegmentParser| {
        let problem = if parser.at_end() { "missing" } else { "invalid" };
        format!("{problem} {noun}")
    }
}
