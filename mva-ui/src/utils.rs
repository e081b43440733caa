use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Group separator used by the nb-NO locale (no-break space).
const GROUP_SEPARATOR: char = '\u{a0}';

/// Minus sign used by the nb-NO locale.
const MINUS_SIGN: char = '\u{2212}';

const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Error returned when a string cannot be parsed as a price.
#[derive(Debug, Error)]
pub enum ParsePriceError {
    #[error("no price given")]
    Empty,

    #[error("invalid price '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("price '{0}' is too large")]
    TooLarge(String),
}

/// Normalizes price input: lowercases, drops grouping (spaces, no-break
/// spaces, commas, underscores) and a trailing "kr".
fn normalize_price_input(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    let without_unit = lowered.strip_suffix("kr").unwrap_or(&lowered);
    without_unit
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | ',' | '_'))
        .collect()
}

/// Parses a price such as `"750000"`, `"750 000 kr"`, `"1,500,000"`,
/// `"200k"` or `"1.5M"`.
///
/// Returns an error when the input is not a number or does not fit a
/// [`Decimal`] once scaled. Sign checks are left to the view model's input
/// boundary.
pub fn parse_price(s: &str) -> Result<Decimal, ParsePriceError> {
    let normalized = normalize_price_input(s);
    if normalized.is_empty() {
        return Err(ParsePriceError::Empty);
    }

    let (digits, multiplier) = if let Some(rest) = normalized.strip_suffix('m') {
        (rest, MILLION)
    } else if let Some(rest) = normalized.strip_suffix('k') {
        (rest, THOUSAND)
    } else {
        (normalized.as_str(), Decimal::ONE)
    };

    let value = digits.parse::<Decimal>().map_err(|e| {
        tracing::debug!(input = %s, "invalid price: {}", e);
        ParsePriceError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })?;

    value
        .checked_mul(multiplier)
        .map(|v| v.normalize())
        .ok_or_else(|| ParsePriceError::TooLarge(s.to_string()))
}

/// Formats a whole number with nb-NO digit grouping, e.g. `500 000`.
///
/// Fractions are rounded half away from zero.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push(MINUS_SIGN);
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

/// Formats an amount as Norwegian kroner with no decimals, e.g. `500 000 kr`.
pub fn format_nok(value: Decimal) -> String {
    format!("{}{GROUP_SEPARATOR}kr", format_grouped(value))
}

/// Compact magnitude: `1.25M`, `2M`, `500k`.
///
/// Millions keep up to two decimals with trailing zeros dropped; anything
/// smaller is shown in whole thousands.
pub fn format_short(value: Decimal) -> String {
    if value >= MILLION {
        let millions =
            (value / MILLION).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}M", millions.normalize())
    } else {
        let thousands =
            (value / THOUSAND).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{}k", thousands.normalize())
    }
}

/// Formats an increase as `+37 500 kr`, or `—` when there is none.
pub fn format_increase(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_nok(value))
    } else {
        "—".to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_price tests
    // =========================================================================

    #[test]
    fn parse_price_accepts_plain_digits() {
        assert_eq!(parse_price("750000").unwrap(), dec!(750000));
    }

    #[test]
    fn parse_price_accepts_grouping_separators() {
        assert_eq!(parse_price("1,500,000").unwrap(), dec!(1500000));
        assert_eq!(parse_price("1 500 000").unwrap(), dec!(1500000));
        assert_eq!(parse_price("1\u{a0}500\u{a0}000 kr").unwrap(), dec!(1500000));
    }

    #[test]
    fn parse_price_accepts_magnitude_suffixes() {
        assert_eq!(parse_price("200k").unwrap(), dec!(200000));
        assert_eq!(parse_price("1.5M").unwrap(), dec!(1500000));
        assert_eq!(parse_price(" 2m ").unwrap(), dec!(2000000));
    }

    #[test]
    fn parse_price_keeps_sign_for_boundary_check() {
        assert_eq!(parse_price("-5000").unwrap(), dec!(-5000));
    }

    #[test]
    fn parse_price_empty_is_error() {
        assert!(matches!(parse_price("   "), Err(ParsePriceError::Empty)));
    }

    #[test]
    fn parse_price_invalid_returns_error() {
        assert!(matches!(
            parse_price("abc"),
            Err(ParsePriceError::Invalid { .. })
        ));
        assert!(parse_price("1.5x").is_err());
    }

    #[test]
    fn parse_price_rejects_overflowing_suffix() {
        assert!(matches!(
            parse_price("79228162514264337593543950335m"),
            Err(ParsePriceError::TooLarge(_))
        ));
        assert!(matches!(
            parse_price("80000000000000000000000000k"),
            Err(ParsePriceError::TooLarge(_))
        ));
    }

    // =========================================================================
    // format tests
    // =========================================================================

    #[test]
    fn format_grouped_inserts_no_break_spaces() {
        assert_eq!(format_grouped(dec!(500000)), "500\u{a0}000");
        assert_eq!(format_grouped(dec!(2125000)), "2\u{a0}125\u{a0}000");
        assert_eq!(format_grouped(dec!(999)), "999");
        assert_eq!(format_grouped(dec!(0)), "0");
    }

    #[test]
    fn format_grouped_rounds_fractions() {
        assert_eq!(format_grouped(dec!(37499.5)), "37\u{a0}500");
        assert_eq!(format_grouped(dec!(37499.4)), "37\u{a0}499");
    }

    #[test]
    fn format_grouped_uses_minus_sign() {
        assert_eq!(format_grouped(dec!(-1500)), "\u{2212}1\u{a0}500");
    }

    #[test]
    fn format_nok_appends_currency() {
        assert_eq!(format_nok(dec!(625000)), "625\u{a0}000\u{a0}kr");
    }

    #[test]
    fn format_short_uses_thousands_below_a_million() {
        assert_eq!(format_short(dec!(500000)), "500k");
        assert_eq!(format_short(dec!(187500)), "188k");
        assert_eq!(format_short(dec!(37500)), "38k");
        assert_eq!(format_short(dec!(0)), "0k");
    }

    #[test]
    fn format_short_strips_trailing_zeros_for_millions() {
        assert_eq!(format_short(dec!(1000000)), "1M");
        assert_eq!(format_short(dec!(1500000)), "1.5M");
        assert_eq!(format_short(dec!(1125000)), "1.13M");
        assert_eq!(format_short(dec!(2125000)), "2.13M");
    }

    #[test]
    fn format_increase_shows_dash_for_zero() {
        assert_eq!(format_increase(dec!(0)), "—");
        assert_eq!(format_increase(dec!(50000)), "+50\u{a0}000\u{a0}kr");
    }
}
