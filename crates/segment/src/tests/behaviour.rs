//! Behaviour-driven tests for parsing a small settings format end to end.

use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{ParseError, Segment, SegmentParser, missing_or_invalid};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file, with `\n` escapes
/// expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').replace("\\n", "\n")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// The settings format: one `name = number` per line, blank lines allowed
// ---------------------------------------------------------------------------

fn name_pattern() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new("[a-z]+").expect("name pattern is valid"))
}

fn parse_settings(file: &Segment) -> Result<Vec<(Segment, BigDecimal)>, ParseError> {
    let mut settings = Vec::new();
    for line in file.lines() {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        let mut parser = SegmentParser::new(content);
        let name = parser.match_pattern(name_pattern(), "expected setting name")?;
        parser.whitespace().ok();
        parser.literal('=')?;
        parser.whitespace().ok();
        let value = parser.big_decimal_with(missing_or_invalid(name.as_str()))?;
        if !parser.at_end() {
            return parser.fail("unexpected text after value");
        }
        settings.push((name, value));
    }
    Ok(settings)
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    file: Option<Segment>,
    outcome: Option<Result<Vec<(Segment, BigDecimal)>, ParseError>>,
}

impl TestWorld {
    fn settings(&self) -> &[(Segment, BigDecimal)] {
        match self.outcome.as_ref().expect("settings should be parsed") {
            Ok(settings) => settings,
            Err(error) => panic!("settings should parse, got: {error}"),
        }
    }

    fn error(&self) -> &ParseError {
        match self.outcome.as_ref().expect("settings should be parsed") {
            Ok(_) => panic!("settings should fail to parse"),
            Err(error) => error,
        }
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the settings file {text}")]
fn given_settings_file(world: &mut TestWorld, text: QuotedString) {
    world.file = Some(Segment::new(text.as_str(), "settings.conf", 0, 0));
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the settings are parsed")]
fn when_parsed(world: &mut TestWorld) {
    let file = world.file.as_ref().expect("file should be set");
    world.outcome = Some(parse_settings(file));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("there are {count} settings")]
fn then_count(world: &mut TestWorld, count: usize) {
    assert_eq!(world.settings().len(), count);
}

#[then("setting {name} is {value} at line {line} column {column}")]
fn then_setting(
    world: &mut TestWorld,
    name: QuotedString,
    value: QuotedString,
    line: usize,
    column: usize,
) {
    let (found, parsed) = world
        .settings()
        .iter()
        .find(|(key, _)| key == &name.as_str())
        .expect("setting should exist");
    let expected = BigDecimal::from_str(value.as_str()).expect("valid decimal");
    assert_eq!(parsed, &expected);
    let location = found.location();
    assert_eq!((location.line(), location.column()), (line, column));
}

#[then("the error is {expected}")]
fn then_error(world: &mut TestWorld, expected: QuotedString) {
    assert_eq!(world.error().to_string(), expected.as_str());
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/segment.feature",
    name = "Settings are parsed with their positions"
)]
fn settings_are_parsed(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/segment.feature",
    name = "A malformed value is underlined in context"
)]
fn malformed_value(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/segment.feature",
    name = "A truncated line points past its end"
)]
fn truncated_line(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/segment.feature",
    name = "Trailing text after a value is rejected"
)]
fn trailing_text(world: TestWorld) {
    let _ = world;
}
