use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BasePrice, FiscalYear};

/// Projected price for a single fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: FiscalYear,

    /// Cumulative price after this year's rule.
    pub price: Decimal,

    /// Amount added this year relative to the prior year (zero for 2025).
    pub increment: Decimal,

    /// Exemption ceiling effective this year, `None` for 2025 and 2028.
    pub threshold: Option<Decimal>,

    pub is_base: bool,
}

/// The four cumulative segments of one bar in the price chart.
///
/// Segments belonging to years after the bar's year are zero, so a bar
/// shows exactly the increments realized up to and including its year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedSegments {
    pub base: Decimal,
    pub inc_2026: Decimal,
    pub inc_2027: Decimal,
    pub inc_2028: Decimal,
}

impl StackedSegments {
    pub fn total(&self) -> Decimal {
        self.base + self.inc_2026 + self.inc_2027 + self.inc_2028
    }
}

/// All four projected years for one base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSet {
    pub base_price: BasePrice,
    pub years: [YearProjection; 4],
    pub total_increase: Decimal,
}

impl ProjectionSet {
    pub fn year(
        &self,
        year: FiscalYear,
    ) -> &YearProjection {
        &self.years[year.index()]
    }

    pub fn price(
        &self,
        year: FiscalYear,
    ) -> Decimal {
        self.year(year).price
    }

    pub fn increment(
        &self,
        year: FiscalYear,
    ) -> Decimal {
        self.year(year).increment
    }

    /// Sum of the increments of every year up to and including `year`.
    pub fn cumulative_increase(
        &self,
        through: FiscalYear,
    ) -> Decimal {
        self.years
            .iter()
            .filter(|y| y.year <= through)
            .map(|y| y.increment)
            .sum()
    }

    /// Chart segments for the bar of `year`.
    pub fn stacked_segments(
        &self,
        year: FiscalYear,
    ) -> StackedSegments {
        let realized = |y: FiscalYear| {
            if y <= year {
                self.increment(y)
            } else {
                Decimal::ZERO
            }
        };

        StackedSegments {
            base: self.base_price.value(),
            inc_2026: realized(FiscalYear::Y2026),
            inc_2027: realized(FiscalYear::Y2027),
            inc_2028: realized(FiscalYear::Y2028),
        }
    }
}
