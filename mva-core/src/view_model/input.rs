//! The price input boundary.
//!
//! Raw values from the slider, the preset marks or a typed command pass
//! through [`SliderConfig::constrain`] before they become a
//! [`BasePrice`](crate::BasePrice):
//!
//! * negative values are rejected,
//! * values outside `[min, max]` are clamped to the nearest bound,
//! * everything is snapped to the nearest `step`, measured from `min`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PriceError;

/// Errors raised at the view-model input boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),

    #[error("{0} is not one of the preset prices")]
    UnknownPreset(Decimal),

    #[error("invalid slider configuration: {0}")]
    InvalidSlider(String),

    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Range, step and preset marks of the price slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
    pub marks: Vec<Decimal>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: Decimal::from(200_000),
            max: Decimal::from(2_000_000),
            step: Decimal::from(5_000),
            marks: [200_000, 500_000, 1_000_000, 1_500_000, 2_000_000]
                .into_iter()
                .map(Decimal::from)
                .collect(),
        }
    }
}

impl SliderConfig {
    /// Checks that the range is non-empty, non-negative and has a positive step.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.min.is_sign_negative() && !self.min.is_zero() {
            return Err(InputError::InvalidSlider(format!(
                "minimum {} is negative",
                self.min
            )));
        }
        if self.max <= self.min {
            return Err(InputError::InvalidSlider(format!(
                "maximum {} must exceed minimum {}",
                self.max, self.min
            )));
        }
        if self.step <= Decimal::ZERO {
            return Err(InputError::InvalidSlider(format!(
                "step {} must be positive",
                self.step
            )));
        }
        Ok(())
    }

    /// Maps a raw input value onto the slider's domain.
    pub fn constrain(
        &self,
        raw: Decimal,
    ) -> Result<Decimal, InputError> {
        if raw.is_sign_negative() && !raw.is_zero() {
            return Err(InputError::Negative(raw));
        }

        let clamped = raw.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Ok((self.min + steps * self.step).min(self.max).normalize())
    }

    /// How far along the track `value` sits, as a percentage with two decimals.
    pub fn fill_percent(
        &self,
        value: Decimal,
    ) -> Decimal {
        let span = self.max - self.min;
        if span <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let percent = (value - self.min) / span * Decimal::ONE_HUNDRED;
        percent
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            .round_dp(2)
    }

    pub fn is_mark(
        &self,
        value: Decimal,
    ) -> bool {
        self.marks.contains(&value)
    }
}
