//! Decimal numerals.

use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use regex::Regex;

/// An optionally signed decimal with optional fraction and exponent.
///
/// Either side of the point may be empty, but not both: `3.`, `.5` and
/// `-.5e-2` are all accepted. Anchored, so a failed match stops at the
/// first character.
const DECIMAL_PATTERN: &str = r"\A[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?";

#[expect(
    clippy::expect_used,
    reason = "the decimal pattern is a compile-time constant"
)]
pub(crate) fn decimal_pattern() -> &'static Regex {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    DECIMAL.get_or_init(|| Regex::new(DECIMAL_PATTERN).expect("decimal pattern is valid"))
}

/// Rewrites a matched numeral into the canonical form `BigDecimal` parses:
/// no leading `+`, a digit before the point and none of `3.`'s dangling
/// point.
fn canonical(numeral: &str) -> String {
    let (sign, unsigned) = match numeral.strip_prefix(['+', '-']) {
        Some(rest) if numeral.starts_with('-') => ("-", rest),
        Some(rest) => ("", rest),
        None => ("", numeral),
    };
    let (written, exponent) = unsigned
        .find(['e', 'E'])
        .map_or((unsigned, ""), |at| unsigned.split_at(at));
    let mantissa = written.strip_suffix('.').unwrap_or(written);
    let lead = if mantissa.starts_with('.') { "0" } else { "" };
    format!("{sign}{lead}{mantissa}{exponent}")
}

/// Parses text matched by [`decimal_pattern`].
pub(crate) fn parse_decimal(numeral: &str) -> Result<BigDecimal, ParseBigDecimalError> {
    BigDecimal::from_str(&canonical(numeral))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("35", "35")]
    #[case::plus_sign("+3.5", "3.5")]
    #[case::minus_sign("-3.5", "-3.5")]
    #[case::bare_fraction(".5", "0.5")]
    #[case::signed_fraction("-.5e-2", "-0.5e-2")]
    #[case::dangling_point("3.", "3")]
    #[case::dangling_point_exponent("3.e4", "3e4")]
    #[case::upper_exponent("1E+3", "1E+3")]
    fn canonical_forms(#[case] numeral: &str, #[case] expected: &str) {
        assert_eq!(canonical(numeral), expected);
    }

    #[rstest]
    #[case::integer("42", "42")]
    #[case::fraction("3.5", "3.5")]
    #[case::negative_exponent("-.5e-2", "-0.005")]
    #[case::positive_exponent("+2.5E+2", "250")]
    #[case::dangling_point("7.", "7")]
    fn parses_numerals(#[case] numeral: &str, #[case] expected: &str) {
        let value = parse_decimal(numeral).expect("valid numeral");
        assert_eq!(value, BigDecimal::from_str(expected).expect("expected value"));
    }

    #[rstest]
    #[case::integer("12", "12")]
    #[case::stops_at_letters("3.5kj", "3.5")]
    #[case::exponent_needs_digits("1e", "1")]
    #[case::signed("-.5e-2", "-.5e-2")]
    fn pattern_matches_numeral_prefix(#[case] text: &str, #[case] expected: &str) {
        let found = decimal_pattern().find(text).expect("numeral");
        assert_eq!(found.start(), 0);
        assert_eq!(found.as_str(), expected);
    }

    #[test]
    fn pattern_rejects_bare_point() {
        assert!(decimal_pattern().find(".").is_none());
    }

    #[test]
    fn pattern_only_matches_at_start() {
        assert!(decimal_pattern().find("x12").is_none());
    }
}
