//! Tests for the [`SegmentParser`] primitives.

use std::error::Error as _;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use insta::assert_snapshot;
use regex::Regex;
use rstest::{fixture, rstest};
use segment_core::{IndexError, Segment};

use crate::SegmentParser;
use crate::cursor::{nonwhitespace_pattern, whitespace_pattern};
use crate::number::decimal_pattern;

fn parser(text: &str) -> SegmentParser {
    SegmentParser::new(Segment::new(text, "input.txt", 0, 0))
}

#[fixture]
fn empty() -> SegmentParser {
    parser("")
}

#[rstest]
fn literal_consumes_matching_character() {
    let mut p = parser("abc");
    p.literal('a').expect("a").literal('b').expect("b");
    assert_eq!(p.index(), 2);
    assert_eq!(p.current_char(), Some('c'));
}

#[rstest]
#[case::first(0)]
#[case::second(1)]
#[case::third(2)]
fn literal_failure_points_at_current_character(#[case] index: usize) {
    let mut p = parser("abc");
    p.move_to(index).expect("in range");
    let error = p.literal('x').expect_err("mismatch");
    assert_eq!(error.message(), "expected 'x'");
    assert_eq!(error.segment().start_col(), index);
    assert_eq!(error.segment().len(), 1);
    assert_eq!(p.index(), index);
}

#[rstest]
fn literal_handles_multibyte_characters() {
    let mut p = parser("é!");
    p.literal('é').expect("accent");
    assert_eq!(p.index(), 2);
    assert_eq!(p.one_char().expect("bang"), '!');
    assert!(p.at_end());
}

#[rstest]
fn one_char_at_end_fails(mut empty: SegmentParser) {
    let error = empty.one_char().expect_err("end of input");
    assert_eq!(error.message(), "unexpected end of input");
    assert!(error.segment().is_empty());
}

#[rstest]
fn primitives_on_empty_input_fail_at_column_zero(mut empty: SegmentParser) {
    let failures = [
        empty.whitespace().map(drop).expect_err("whitespace"),
        empty.nonwhitespace().map(drop).expect_err("nonwhitespace"),
        empty.big_decimal().map(drop).expect_err("big_decimal"),
        empty.literal('c').map(drop).expect_err("literal"),
    ];
    for error in failures {
        assert_eq!(error.segment().start_line(), 0);
        assert_eq!(error.segment().start_col(), 0);
        assert_eq!(error.location().column(), 1);
    }
    assert_eq!(empty.index(), 0);
}

#[rstest]
#[case::whitespace(" \t\r\nx", " \t\r\n")]
#[case::vertical_tab("\u{b}\u{c}x", "\u{b}\u{c}")]
fn whitespace_consumes_run(#[case] text: &str, #[case] expected: &str) {
    let mut p = parser(text);
    let run = p.whitespace().expect("whitespace");
    assert_eq!(run, expected);
    assert_eq!(p.current_char(), Some('x'));
}

#[rstest]
fn whitespace_fails_on_text() {
    let mut p = parser("x ");
    let error = p.whitespace().expect_err("no whitespace");
    assert_eq!(error.message(), "expected whitespace");
    assert_eq!(p.index(), 0);
}

#[rstest]
fn nonwhitespace_consumes_word() {
    let mut p = parser("word rest");
    assert_eq!(p.nonwhitespace().expect("word"), "word");
    assert_eq!(p.index(), 4);
    let error = p.nonwhitespace().expect_err("at space");
    assert_eq!(error.message(), "expected non-whitespace");
    assert_eq!(error.segment().start_col(), 4);
}

#[rstest]
fn built_in_patterns_are_anchored() {
    for pattern in [whitespace_pattern(), nonwhitespace_pattern(), decimal_pattern()] {
        assert!(pattern.as_str().starts_with(r"\A"), "{pattern}");
    }
}

#[rstest]
fn failure_ignores_later_candidates() {
    let mut p = parser("abc 12");
    assert!(p.whitespace().is_err());
    assert!(p.big_decimal().is_err());
    assert_eq!(p.index(), 0);
    p.move_to(3).expect("in range");
    assert!(p.nonwhitespace().is_err());
    assert_eq!(p.whitespace().expect("gap"), " ");
}

#[rstest]
fn whitespace_classes_are_ascii() {
    let mut p = parser("\u{a0}x");
    assert!(p.whitespace().is_err());
    assert_eq!(p.nonwhitespace().expect("non-breaking space"), "\u{a0}x");
}

#[rstest]
fn match_pattern_must_start_at_index() {
    let digits = Regex::new(r"\d+").expect("pattern");
    let mut p = parser("ab12");
    let error = p.match_pattern(&digits, "expected digits").expect_err("letters");
    assert_eq!(error.segment().start_col(), 0);

    p.move_to(2).expect("in range");
    let number = p.match_pattern(&digits, "expected digits").expect("digits");
    assert_eq!(number, "12");
    assert_eq!(number.source_index(), Some(2));
    assert!(p.at_end());
}

#[rstest]
fn match_pattern_anchors_at_index() {
    let start = Regex::new(r"^\w+").expect("pattern");
    let mut p = parser("key=value");
    p.move_to(4).expect("in range");
    assert_eq!(p.match_pattern(&start, "expected word").expect("word"), "value");
}

#[rstest]
#[case::scenario_fraction("3.5kj", "3.5", 3)]
#[case::negative_exponent("-.5e-2", "-0.005", 6)]
#[case::signed_exponent("-3.5e4", "-35000", 6)]
#[case::negative_integer("-5", "-5", 2)]
#[case::dangling_point("7.x", "7", 2)]
fn big_decimal_parses_numerals(
    #[case] text: &str,
    #[case] expected: &str,
    #[case] index: usize,
) {
    let mut p = parser(text);
    let value = p.big_decimal().expect("numeral");
    assert_eq!(value, BigDecimal::from_str(expected).expect("expected value"));
    assert_eq!(p.index(), index);
}

#[rstest]
#[case::leading_space(" 3.5")]
#[case::leading_letter("a3.5")]
#[case::exponent_only("e3.5")]
#[case::bare_point(".")]
fn big_decimal_rejects_non_numerals(#[case] text: &str) {
    let mut p = parser(text);
    let error = p.big_decimal().expect_err("not a numeral");
    assert_eq!(error.message(), "invalid number");
    assert_eq!(error.segment().start_col(), 0);
    assert_eq!(p.index(), 0);
}

#[rstest]
fn big_decimal_out_of_range_keeps_index_and_cause() {
    let text = format!("1e{}", "9".repeat(45));
    let mut p = parser(&text);
    let error = p.big_decimal().expect_err("exponent overflow");
    assert_eq!(p.index(), 0);
    assert_eq!(error.segment().as_str(), text);
    assert!(error.source().is_some());
}

#[rstest]
fn rest_consumes_remainder() {
    let mut p = parser("key: value");
    p.move_to(5).expect("in range");
    let rest = p.rest();
    assert_eq!(rest, "value");
    assert_eq!(rest.start_col(), 5);
    assert!(p.at_end());
    assert!(p.rest().is_empty());
}

#[rstest]
fn movement_is_validated() {
    let mut p = parser("hé");
    assert_eq!(p.advance(1).map(|moved| moved.index()), Ok(1));
    assert_eq!(
        p.advance(1).map(|moved| moved.index()),
        Err(IndexError::NotCharBoundary { index: 2 })
    );
    assert_eq!(
        p.move_to(4).map(|moved| moved.index()),
        Err(IndexError::OutOfBounds { index: 4, len: 3 })
    );
    assert_eq!(p.move_to(3).map(|moved| moved.index()), Ok(3));
    assert_eq!(p.move_to(0).map(|moved| moved.index()), Ok(0));
}

#[rstest]
fn skip_to_whitespace_stops_before_whitespace() {
    let mut p = parser("token next");
    assert_eq!(p.skip_to_whitespace().index(), 5);
    assert_eq!(p.skip_to_whitespace().index(), 5);
    p.advance(1).expect("in range");
    assert_eq!(p.skip_to_whitespace().index(), 10);
    assert!(p.at_end());
}

#[rstest]
fn fail_and_error_here_point_at_index() {
    let mut p = parser("abc");
    p.advance(1).expect("in range");
    let failed: Result<(), _> = p.fail("unsupported");
    let error = failed.expect_err("always fails");
    assert_eq!(error.message(), "unsupported");
    assert_eq!(error.segment(), &"b");

    p.move_to(3).expect("in range");
    let at_end = p.error_here("truncated");
    assert!(at_end.segment().is_empty());
    assert_eq!(at_end.location().column(), 4);
}

#[rstest]
fn rendered_error_at_end_of_input() {
    let mut p = parser("a,");
    p.literal('a').expect("a").literal(',').expect(",");
    let error = p.literal('b').expect_err("end of input");
    assert_snapshot!(error.to_string(), @r"
expected 'b' (in input.txt, line 1, column 3):
a,
  ^
");
}
