//! Rendering configuration for underlined diagnostics.

use std::borrow::Cow;

/// Controls how [`Segment::underline_in_context_with`] and
/// [`ParseError::render_with`] lay out their output.
///
/// # Defaults
///
/// - `line_separator`: `"\n"`
/// - `marker`: `'^'`
///
/// # Example
///
/// ```
/// use segment_core::RenderConfig;
///
/// let config = RenderConfig::default().with_marker('~');
/// assert_eq!(config.line_separator(), "\n");
/// assert_eq!(config.marker(), '~');
/// ```
///
/// [`Segment::underline_in_context_with`]: crate::Segment::underline_in_context_with
/// [`ParseError::render_with`]: crate::ParseError::render_with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Text placed between a source line and its marker line, and between
    /// consecutive line blocks.
    line_separator: Cow<'static, str>,
    /// Character used to underline covered columns.
    marker: char,
}

impl RenderConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(line_separator: &'static str, marker: char) -> Self {
        Self {
            line_separator: Cow::Borrowed(line_separator),
            marker,
        }
    }

    /// Replaces the line separator.
    #[must_use]
    pub fn with_line_separator(mut self, line_separator: impl Into<Cow<'static, str>>) -> Self {
        self.line_separator = line_separator.into();
        self
    }

    /// Replaces the underline marker.
    #[must_use]
    pub const fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Returns the line separator.
    #[must_use]
    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    /// Returns the underline marker.
    #[must_use]
    pub const fn marker(&self) -> char {
        self.marker
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new("\n", '^')
    }
}
