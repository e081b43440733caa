use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`BasePrice`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// Prices below zero have no meaning for the projection.
    #[error("base price cannot be negative (got {0})")]
    Negative(Decimal),

    #[error("base price {0} is above the supported maximum of {max}", max = BasePrice::MAX)]
    TooLarge(Decimal),
}

/// The 2025 purchase price, before any of the new VAT increments.
///
/// Always between zero and [`BasePrice::MAX`], so every projected price fits
/// a [`Decimal`]. The interactive input range is narrower than this and is
/// enforced by the view model, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct BasePrice(Decimal);

impl BasePrice {
    pub const ZERO: BasePrice = BasePrice(Decimal::ZERO);

    /// One trillion kroner.
    pub const MAX: BasePrice = BasePrice(Decimal::from_parts(3_567_587_328, 232, 0, false, 0));

    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative(value));
        }
        if value > Self::MAX.0 {
            return Err(PriceError::TooLarge(value));
        }
        // Normalise -0 to 0 so equality and display are stable.
        Ok(Self(value.abs()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for BasePrice {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BasePrice> for Decimal {
    fn from(price: BasePrice) -> Self {
        price.0
    }
}

impl fmt::Display for BasePrice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
