//! Read-only views handed to the display collaborators.
//!
//! Everything here is derived from a [`ProjectionSet`] (plus the selection
//! and slider settings) and holds no state of its own.

use rust_decimal::Decimal;
use serde::Serialize;

use super::input::SliderConfig;
use crate::models::{FiscalYear, ProjectionSet, StackedSegments};

/// Smallest chart scale, so cheap cars do not fill the whole track.
pub const CHART_FLOOR: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

/// Headroom added above the tallest bar (5 %).
pub const CHART_HEADROOM: Decimal = Decimal::from_parts(105, 0, 0, false, 2);

const LOW_INCREASE_LIMIT: i64 = 30_000;
const MODERATE_INCREASE_LIMIT: i64 = 75_000;

/// How strongly a year card should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IncreaseTier {
    /// The 2025 base year.
    Base,
    /// No increase this year.
    Unchanged,
    /// Below 30 000.
    Low,
    /// Below 75 000.
    Moderate,
    High,
}

impl IncreaseTier {
    pub fn classify(
        is_base: bool,
        increase: Decimal,
    ) -> Self {
        if is_base {
            Self::Base
        } else if increase <= Decimal::ZERO {
            Self::Unchanged
        } else if increase < Decimal::from(LOW_INCREASE_LIMIT) {
            Self::Low
        } else if increase < Decimal::from(MODERATE_INCREASE_LIMIT) {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// One of the four year cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCard {
    pub year: FiscalYear,
    pub price: Decimal,
    pub increase: Decimal,
    pub threshold: Option<Decimal>,
    pub is_base: bool,
    pub active: bool,
    pub tier: IncreaseTier,
}

pub(crate) fn year_cards(
    projection: &ProjectionSet,
    selection: FiscalYear,
) -> [YearCard; 4] {
    projection.years.clone().map(|y| YearCard {
        year: y.year,
        price: y.price,
        increase: y.increment,
        threshold: y.threshold,
        is_base: y.is_base,
        active: y.year == selection,
        tier: IncreaseTier::classify(y.is_base, y.increment),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakdownKind {
    BasePrice,
    Increment(FiscalYear),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub kind: BreakdownKind,
    pub amount: Decimal,
}

/// Detail panel for the selected year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub year: FiscalYear,
    pub price: Decimal,
    /// This year's own increment.
    pub increment: Decimal,
    pub is_base: bool,
    /// Base price, then one row per increment year up to the selection.
    pub rows: Vec<BreakdownRow>,
    /// Sum of every increment up to and including the selected year.
    /// `None` for the base year.
    pub total_from_base: Option<Decimal>,
}

pub(crate) fn detail(
    projection: &ProjectionSet,
    selection: FiscalYear,
) -> DetailPanel {
    let selected = projection.year(selection);

    let mut rows = vec![BreakdownRow {
        kind: BreakdownKind::BasePrice,
        amount: projection.base_price.value(),
    }];
    rows.extend(
        projection
            .years
            .iter()
            .filter(|y| !y.is_base && y.year <= selection)
            .map(|y| BreakdownRow {
                kind: BreakdownKind::Increment(y.year),
                amount: y.increment,
            }),
    );

    DetailPanel {
        year: selection,
        price: selected.price,
        increment: selected.increment,
        is_base: selected.is_base,
        rows,
        total_from_base: (!selected.is_base).then(|| projection.cumulative_increase(selection)),
    }
}

/// One bar of the stacked price chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub year: FiscalYear,
    pub segments: StackedSegments,
    pub total: Decimal,
}

/// Stacked bar chart with a scale shared by all four bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub scale: Decimal,
    pub bars: [ChartBar; 4],
}

impl BarChart {
    /// Width of `value` as a percentage of the shared scale, two decimals.
    pub fn percent(
        &self,
        value: Decimal,
    ) -> Decimal {
        if self.scale <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (value / self.scale * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Percentages of the four segments of `bar`, in stacking order.
    pub fn segment_percentages(
        &self,
        bar: &ChartBar,
    ) -> [Decimal; 4] {
        let s = bar.segments;
        [s.base, s.inc_2026, s.inc_2027, s.inc_2028].map(|v| self.percent(v))
    }
}

pub(crate) fn chart(projection: &ProjectionSet) -> BarChart {
    let bars = FiscalYear::ALL.map(|year| {
        let segments = projection.stacked_segments(year);
        ChartBar {
            year,
            segments,
            total: segments.total(),
        }
    });

    let tallest = bars
        .iter()
        .map(|b| b.total)
        .max()
        .unwrap_or(Decimal::ZERO);

    BarChart {
        scale: tallest.max(CHART_FLOOR) * CHART_HEADROOM,
        bars,
    }
}

/// The "total increase 2025 → 2028" grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub increments: [(FiscalYear, Decimal); 3],
    pub total: Decimal,
}

pub(crate) fn summary(projection: &ProjectionSet) -> Summary {
    let entry = |year| (year, projection.increment(year));

    Summary {
        increments: [
            entry(FiscalYear::Y2026),
            entry(FiscalYear::Y2027),
            entry(FiscalYear::Y2028),
        ],
        total: projection.total_increase,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetMark {
    pub value: Decimal,
    pub active: bool,
}

/// Slider state for the price input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderView {
    pub value: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub fill_percent: Decimal,
    pub marks: Vec<PresetMark>,
}

pub(crate) fn slider(
    config: &SliderConfig,
    value: Decimal,
) -> SliderView {
    SliderView {
        value,
        min: config.min,
        max: config.max,
        fill_percent: config.fill_percent(value),
        marks: config
            .marks
            .iter()
            .map(|&mark| PresetMark {
                value: mark,
                active: mark == value,
            })
            .collect(),
    }
}
