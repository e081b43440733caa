//! Common utility functions for the projection calculations.
//!
//! Shared arithmetic used by the engine and the view model: clamping a price
//! into a band, and rounding to whole kroner for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to whole units using half-up rounding.
///
/// Values at exactly .5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mva_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(187499.4)), dec!(187499));
/// assert_eq!(round_whole(dec!(187499.5)), dec!(187500));
/// assert_eq!(round_whole(dec!(-0.5)), dec!(-1));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mva_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the portion of `value` that falls inside the band `(lower, upper]`.
///
/// This is `max(0, min(value, upper) - lower)`: zero below the band, the
/// full band width above it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mva_core::calculations::common::band_portion;
///
/// assert_eq!(band_portion(dec!(400000), dec!(300000), dec!(500000)), dec!(100000));
/// assert_eq!(band_portion(dec!(900000), dec!(300000), dec!(500000)), dec!(200000));
/// assert_eq!(band_portion(dec!(100000), dec!(300000), dec!(500000)), dec!(0));
/// ```
pub fn band_portion(
    value: Decimal,
    lower: Decimal,
    upper: Decimal,
) -> Decimal {
    max(value.min(upper) - lower, Decimal::ZERO)
}
