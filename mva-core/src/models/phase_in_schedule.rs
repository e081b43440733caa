use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FiscalYear;

/// The exemption ceiling in force for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionStep {
    pub year: FiscalYear,
    /// Portion of the price that stays free of VAT. Zero means full VAT.
    pub ceiling: Decimal,
    /// Short description of the rule, as shown in the rule-change box.
    pub summary: String,
}

/// Rule table for the VAT phase-in on electric vehicles.
///
/// The rate is fixed; only the exemption ceiling steps down each year.
/// `steps` is ordered by year and starts with the 2025 status quo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInSchedule {
    pub vat_rate: Decimal,
    pub steps: Vec<ExemptionStep>,
}

impl PhaseInSchedule {
    /// The statutory schedule: 25 % VAT, ceiling 500k → 300k → 150k → 0.
    pub fn statutory() -> Self {
        let step = |year, ceiling: i64, summary: &str| ExemptionStep {
            year,
            ceiling: Decimal::from(ceiling),
            summary: summary.to_string(),
        };

        Self {
            vat_rate: Decimal::new(25, 2),
            steps: vec![
                step(
                    FiscalYear::Y2025,
                    500_000,
                    "Fri for MVA under 500 000 kr · MVA 25% over 500 000 kr",
                ),
                step(FiscalYear::Y2026, 300_000, "Grense senket til 300 000 kr"),
                step(FiscalYear::Y2027, 150_000, "Grense senket til 150 000 kr"),
                step(FiscalYear::Y2028, 0, "Full MVA (25%) på hele kjøpsprisen"),
            ],
        }
    }

    pub fn step(
        &self,
        year: FiscalYear,
    ) -> Option<&ExemptionStep> {
        self.steps.iter().find(|s| s.year == year)
    }

    /// The ceiling shown for a year, or `None` when the year has no partial
    /// exemption to show: 2025 is the untaxed base, and 2028 taxes the whole
    /// price.
    pub fn displayed_threshold(
        &self,
        year: FiscalYear,
    ) -> Option<Decimal> {
        if year.is_base() {
            return None;
        }
        self.step(year)
            .map(|s| s.ceiling)
            .filter(|ceiling| !ceiling.is_zero())
    }
}

impl Default for PhaseInSchedule {
    fn default() -> Self {
        Self::statutory()
    }
}
