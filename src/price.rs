//! Locale price parsing and formatting.
//!
//! Prices arrive from legacy data and display strings in the shop's locale:
//! thousands groups split by commas or non-breaking spaces, decimal comma,
//! optional `грн` suffix. Both functions are total: bad input maps to the
//! `Decimal::ZERO` sentinel instead of an error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const CURRENCY_SUFFIX: &str = "грн";
const NBSP: char = '\u{a0}';

/// Parse a stored or display-formatted price string into a `Decimal`.
///
/// `"2,109"` parses as `2109` (comma before a three-digit group is a
/// thousands separator); `"2 109,0 грн"` parses back to `2109` (comma before
/// one or two digits is the decimal comma). Empty or unparseable input
/// yields `Decimal::ZERO`.
pub fn parse_db_price(raw: &str) -> Decimal {
    let mut s: String = raw
        .trim()
        .trim_end_matches(CURRENCY_SUFFIX)
        .chars()
        .filter(|c| *c != ' ' && *c != NBSP)
        .collect();

    if let Some(pos) = s.rfind(',') {
        let frac_digits = s.len() - pos - 1;
        if frac_digits == 3 {
            s.retain(|c| c != ',');
        } else {
            let head: String = s[..pos].chars().filter(|c| *c != ',').collect();
            s = format!("{}.{}", head, &s[pos + 1..]);
        }
    }

    if s.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&s).unwrap_or(Decimal::ZERO)
}

/// Format a price for display: thousands groups joined with a non-breaking
/// space, one fractional digit after a decimal comma, ` грн` suffix.
/// `format_price(2109) == "2\u{a0}109,0 грн"`.
pub fn format_price(price: Decimal) -> String {
    // Display prices round half-up, not half-to-even.
    let rounded = price.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let units = abs.trunc();
    let tenths = ((abs - units) * Decimal::TEN)
        .trunc()
        .to_u32()
        .unwrap_or(0);

    let digits = units.normalize().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped},{tenths} {CURRENCY_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_thousands_comma() {
        assert_eq!(parse_db_price("2,109"), dec!(2109));
        assert_eq!(parse_db_price("1,234,567"), dec!(1234567));
    }

    #[test]
    fn parses_decimal_comma_and_suffix() {
        assert_eq!(parse_db_price("2\u{a0}109,0 грн"), dec!(2109.0));
        assert_eq!(parse_db_price("149,5"), dec!(149.5));
    }

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_db_price("870"), dec!(870));
        assert_eq!(parse_db_price("  870.25 "), dec!(870.25));
    }

    #[test]
    fn invalid_input_is_zero() {
        assert_eq!(parse_db_price(""), Decimal::ZERO);
        assert_eq!(parse_db_price("   "), Decimal::ZERO);
        assert_eq!(parse_db_price("ціна"), Decimal::ZERO);
    }

    #[test]
    fn formats_with_nbsp_groups() {
        assert_eq!(format_price(dec!(2109)), "2\u{a0}109,0 грн");
        assert_eq!(format_price(dec!(1234567.25)), "1\u{a0}234\u{a0}567,3 грн");
        assert_eq!(format_price(dec!(870)), "870,0 грн");
        // midpoints round away from zero, not to even
        assert_eq!(format_price(dec!(0.25)), "0,3 грн");
    }

    #[test]
    fn round_trips_integer_prices() {
        for n in [1000i64, 2109, 49999, 1234567] {
            let n = Decimal::from(n);
            assert_eq!(parse_db_price(&format_price(n)), n);
        }
    }
}
