//! VAT phase-in projection for electric vehicles.
//!
//! This module projects a 2025 purchase price onto the fiscal years 2026-2028
//! while the VAT exemption ceiling steps down and the rate stays at 25 %.
//!
//! # Bands
//!
//! Each year taxes only the band of the *2025* base price that its
//! lowered ceiling newly exposes:
//!
//! | Year | Ceiling   | Newly taxed band      | Maximum increment |
//! |------|-----------|-----------------------|-------------------|
//! | 2025 | 500 000   | (none, base year)     | 0                 |
//! | 2026 | 300 000   | 300 000 - 500 000     | 50 000            |
//! | 2027 | 150 000   | 150 000 - 300 000     | 37 500            |
//! | 2028 | 0         | 0 - 150 000           | 37 500            |
//!
//! Bands are measured against the base price, never against the running
//! cumulative price, so yearly increments add up but never compound.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mva_core::calculations::project;
//! use mva_core::{BasePrice, FiscalYear};
//!
//! let set = project(BasePrice::new(dec!(500000)).unwrap());
//!
//! assert_eq!(set.increment(FiscalYear::Y2026), dec!(50000));
//! assert_eq!(set.increment(FiscalYear::Y2027), dec!(37500));
//! assert_eq!(set.increment(FiscalYear::Y2028), dec!(37500));
//! assert_eq!(set.total_increase, dec!(125000));
//! assert_eq!(set.price(FiscalYear::Y2028), dec!(625000));
//! ```

use std::sync::OnceLock;

use rust_decimal::Decimal;

use crate::calculations::common::band_portion;
use crate::models::{BasePrice, FiscalYear, PhaseInSchedule, ProjectionSet, YearProjection};

/// Projects `base_price` using the statutory phase-in schedule.
///
/// Pure and total: every non-negative price has exactly one projection.
pub fn project(base_price: BasePrice) -> ProjectionSet {
    static STATUTORY: OnceLock<PhaseInSchedule> = OnceLock::new();
    let schedule = STATUTORY.get_or_init(PhaseInSchedule::statutory);

    VatPhaseIn::new(schedule).project(base_price)
}

/// Calculator for the VAT phase-in.
///
/// Borrows a [`PhaseInSchedule`] and derives the four yearly projections for
/// any base price.
#[derive(Debug, Clone)]
pub struct VatPhaseIn<'a> {
    schedule: &'a PhaseInSchedule,
}

impl<'a> VatPhaseIn<'a> {
    /// Creates a calculator over `schedule`.
    ///
    /// A year without a step keeps the previous year's ceiling (and so adds
    /// nothing); a schedule without a 2025 step starts from no exemption.
    pub fn new(schedule: &'a PhaseInSchedule) -> Self {
        Self { schedule }
    }

    /// Calculates the full projection for `base_price`.
    pub fn project(
        &self,
        base_price: BasePrice,
    ) -> ProjectionSet {
        let base = base_price.value();
        let ceilings = self.ceilings();

        let mut price = base;
        let mut total_increase = Decimal::ZERO;

        let years = FiscalYear::ALL.map(|year| {
            let increment = match year.index() {
                0 => Decimal::ZERO,
                i => self.band_increment(base, ceilings[i], ceilings[i - 1]),
            };
            price += increment;
            total_increase += increment;

            YearProjection {
                year,
                price,
                increment,
                threshold: self.schedule.displayed_threshold(year),
                is_base: year.is_base(),
            }
        });

        ProjectionSet {
            base_price,
            years,
            total_increase,
        }
    }

    /// Resolves the ceiling in force for each year, carrying the previous
    /// ceiling forward over years the schedule does not list.
    fn ceilings(&self) -> [Decimal; 4] {
        let mut current = Decimal::ZERO;
        FiscalYear::ALL.map(|year| {
            if let Some(step) = self.schedule.step(year) {
                current = step.ceiling;
            }
            current
        })
    }

    /// VAT on the part of the base price between the new and old ceiling.
    fn band_increment(
        &self,
        base: Decimal,
        new_ceiling: Decimal,
        old_ceiling: Decimal,
    ) -> Decimal {
        band_portion(base, new_ceiling, old_ceiling) * self.schedule.vat_rate
    }
}
