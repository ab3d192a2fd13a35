//! The [`SegmentParser`] cursor and its consuming primitives.

use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use segment_core::{IndexError, ParseError, Segment};
use tracing::debug;

use crate::message::ErrorMessage;
use crate::number::{decimal_pattern, parse_decimal};

const CURSOR_TARGET: &str = "segment_parser::cursor";

#[expect(
    clippy::expect_used,
    reason = "the whitespace pattern is a compile-time constant"
)]
pub(crate) fn whitespace_pattern() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| {
        Regex::new(r"\A[\t\n\x0B\x0C\r ]+").expect("whitespace pattern is valid")
    })
}

#[expect(
    clippy::expect_used,
    reason = "the non-whitespace pattern is a compile-time constant"
)]
pub(crate) fn nonwhitespace_pattern() -> &'static Regex {
    static NONWHITESPACE: OnceLock<Regex> = OnceLock::new();
    NONWHITESPACE.get_or_init(|| {
        Regex::new(r"\A[^\t\n\x0B\x0C\r ]+").expect("non-whitespace pattern is valid")
    })
}

/// A forward-moving cursor over one [`Segment`].
///
/// Each primitive either consumes input and advances [`index`](Self::index),
/// or fails with a [`ParseError`] located at the current position and leaves
/// the index where it was. There is no automatic backtracking: to try an
/// alternative, save [`index`](Self::index) and restore it with
/// [`move_to`](Self::move_to).
///
/// The index is a byte offset and always falls on a character boundary.
///
/// # Example
///
/// ```
/// use segment_core::Segment;
/// use segment_parser::SegmentParser;
///
/// let mut parser = SegmentParser::new(Segment::new("width=12.5", "style", 0, 0));
/// let key = parser.match_pattern(&regex::Regex::new("[a-z]+").unwrap(), "expected key")?;
/// parser.literal('=')?;
/// let value = parser.big_decimal()?;
/// assert_eq!(key, "width");
/// assert_eq!(value.to_string(), "12.5");
/// assert!(parser.at_end());
/// # Ok::<(), segment_core::ParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SegmentParser {
    segment: Segment,
    index: usize,
}

impl SegmentParser {
    /// Creates a parser positioned at the start of `segment`.
    #[must_use]
    pub const fn new(segment: Segment) -> Self {
        Self { segment, index: 0 }
    }

    /// Returns the segment being parsed.
    #[must_use]
    pub const fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Returns the current byte offset into the segment.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` once every character has been consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.index >= self.segment.len()
    }

    /// Returns the character at the current position without consuming it.
    #[must_use]
    pub fn current_char(&self) -> Option<char> {
        self.segment.char_at(self.index).ok()
    }

    /// Moves the index to byte offset `index`, forwards or backwards.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::OutOfBounds`] if `index` is past the end and
    /// [`IndexError::NotCharBoundary`] if it splits a character.
    pub fn move_to(&mut self, index: usize) -> Result<&mut Self, IndexError> {
        let len = self.segment.len();
        if index > len {
            return Err(IndexError::OutOfBounds { index, len });
        }
        if !self.segment.as_str().is_char_boundary(index) {
            return Err(IndexError::NotCharBoundary { index });
        }
        self.index = index;
        Ok(self)
    }

    /// Moves the index forward by `amount` bytes.
    ///
    /// # Errors
    ///
    /// As for [`move_to`](Self::move_to).
    pub fn advance(&mut self, amount: usize) -> Result<&mut Self, IndexError> {
        self.move_to(self.index.saturating_add(amount))
    }

    /// Moves forward to the next whitespace character, or to the end.
    pub fn skip_to_whitespace(&mut self) -> &mut Self {
        let rest = self.segment.as_str().get(self.index..).unwrap_or_default();
        self.index += rest.find(char::is_whitespace).unwrap_or(rest.len());
        self
    }

    /// Consumes `expected`, failing with "expected '`expected`'".
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the next character is not `expected`.
    pub fn literal(&mut self, expected: char) -> Result<&mut Self, ParseError> {
        self.literal_with(expected, move |_: &Self| format!("expected '{expected}'"))
    }

    /// Consumes `expected`, failing with `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the next character is not `expected`.
    pub fn literal_with(
        &mut self,
        expected: char,
        message: impl ErrorMessage,
    ) -> Result<&mut Self, ParseError> {
        if self.current_char() != Some(expected) {
            return Err(self.reject(&message));
        }
        self.index += expected.len_utf8();
        Ok(self)
    }

    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at the end of the input.
    pub fn one_char(&mut self) -> Result<char, ParseError> {
        self.one_char_with("unexpected end of input")
    }

    /// Consumes and returns the next character, failing with `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at the end of the input.
    pub fn one_char_with(&mut self, message: impl ErrorMessage) -> Result<char, ParseError> {
        let Some(ch) = self.current_char() else {
            return Err(self.reject(&message));
        };
        self.index += ch.len_utf8();
        Ok(ch)
    }

    /// Consumes a match of `pattern` that starts exactly at the current
    /// position and returns it.
    ///
    /// The rest of the segment is searched as if it were the whole text, so
    /// `^` and `\A` match at the current position. A pattern that starts with
    /// `\A` gives up at the current position instead of scanning ahead for a
    /// later match; the built-in primitives are anchored this way.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `pattern` does not match here.
    pub fn match_pattern(
        &mut self,
        pattern: &Regex,
        message: impl ErrorMessage,
    ) -> Result<Segment, ParseError> {
        self.match_here(pattern, &message)
    }

    /// Consumes a run of ASCII whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if no whitespace follows.
    pub fn whitespace(&mut self) -> Result<Segment, ParseError> {
        self.whitespace_with("expected whitespace")
    }

    /// Consumes a run of ASCII whitespace, failing with `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if no whitespace follows.
    pub fn whitespace_with(&mut self, message: impl ErrorMessage) -> Result<Segment, ParseError> {
        self.match_pattern(whitespace_pattern(), message)
    }

    /// Consumes a run of characters other than ASCII whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at whitespace or the end of the input.
    pub fn nonwhitespace(&mut self) -> Result<Segment, ParseError> {
        self.nonwhitespace_with("expected non-whitespace")
    }

    /// Consumes a run of characters other than ASCII whitespace, failing
    /// with `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] at whitespace or the end of the input.
    pub fn nonwhitespace_with(
        &mut self,
        message: impl ErrorMessage,
    ) -> Result<Segment, ParseError> {
        self.match_pattern(nonwhitespace_pattern(), message)
    }

    /// Consumes a decimal numeral such as `42`, `-3.5`, `.5` or `6.02e23`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if no numeral starts here.
    pub fn big_decimal(&mut self) -> Result<BigDecimal, ParseError> {
        self.big_decimal_with("invalid number")
    }

    /// Consumes a decimal numeral, failing with `message`.
    ///
    /// A numeral that matches but cannot be represented (an exponent too
    /// large to hold, say) fails at the numeral itself, with the conversion
    /// failure as the error's source, and the index is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if no representable numeral starts here.
    pub fn big_decimal_with(&mut self, message: impl ErrorMessage) -> Result<BigDecimal, ParseError> {
        let start = self.index;
        let numeral = self.match_here(decimal_pattern(), &message)?;
        parse_decimal(numeral.as_str()).map_err(|cause| {
            self.index = start;
            let text = message.message(self);
            debug!(target: CURSOR_TARGET, index = start, message = %text, "numeral out of range");
            ParseError::new(text, numeral).with_cause(cause)
        })
    }

    /// Consumes and returns everything from the current position to the end.
    pub fn rest(&mut self) -> Segment {
        let rest = self.tail_from_index();
        self.index = self.segment.len();
        rest
    }

    /// Builds a [`ParseError`] located at the current position.
    #[must_use]
    pub fn error_here(&self, message: impl ErrorMessage) -> ParseError {
        ParseError::new(message.message(self), self.here())
    }

    /// Fails at the current position.
    ///
    /// # Errors
    ///
    /// Always returns a [`ParseError`] carrying `message`.
    pub fn fail<T>(&self, message: impl ErrorMessage) -> Result<T, ParseError> {
        Err(self.reject(&message))
    }

    /// The character at the index, or the empty segment at the end.
    fn here(&self) -> Segment {
        self.segment
            .char_at_as_segment(self.index)
            .unwrap_or_else(|_| self.segment.tail())
    }

    fn tail_from_index(&self) -> Segment {
        self.segment
            .substring_from(self.index)
            .unwrap_or_else(|_| self.segment.tail())
    }

    fn match_here(
        &mut self,
        pattern: &Regex,
        message: &dyn ErrorMessage,
    ) -> Result<Segment, ParseError> {
        let mut matcher = self.segment.matcher(pattern);
        let found = matcher.region(self.index, self.segment.len()).is_ok() && matcher.looking_at();
        let matched = if found { matcher.group() } else { None };
        let Some(token) = matched else {
            return Err(self.reject(message));
        };
        self.index += token.len();
        Ok(token)
    }

    fn reject(&self, message: &dyn ErrorMessage) -> ParseError {
        let text = message.message(self);
        debug!(target: CURSOR_TARGET, index = self.index, message = %text, "parse failed");
        ParseError::new(text, self.here())
    }
}
