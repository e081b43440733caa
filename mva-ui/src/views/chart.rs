//! Stacked bar chart of the price per year.

use mva_core::ViewModel;
use mva_core::view_model::{BarChart, ChartBar};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::PANEL_WIDTH;
use crate::utils::format_short;

/// Fill characters for base, +2026, +2027, +2028.
const SEGMENT_GLYPHS: [char; 4] = ['█', '▓', '▒', '░'];

const BAR_WIDTH: usize = PANEL_WIDTH - 18;

/// Turns a percentage of the shared scale into a column count.
fn columns(percent: Decimal) -> usize {
    (percent * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

/// Draws one bar; boundaries are placed on cumulative percentages so that
/// rounding never makes the bar longer than its total.
fn draw_bar(
    chart: &BarChart,
    bar: &ChartBar,
) -> String {
    let mut drawn = String::with_capacity(BAR_WIDTH * 3);
    let mut cumulative = Decimal::ZERO;
    let mut used = 0;

    for (percent, glyph) in chart.segment_percentages(bar).into_iter().zip(SEGMENT_GLYPHS) {
        cumulative += percent;
        let end = columns(cumulative).max(used);
        drawn.extend(std::iter::repeat_n(glyph, end - used));
        used = end;
    }
    drawn.extend(std::iter::repeat_n(' ', BAR_WIDTH - used));
    drawn
}

pub fn render(vm: &ViewModel) -> String {
    let chart = vm.chart();

    let mut out = String::from("PRISUTVIKLING PER ÅR\n");
    for bar in &chart.bars {
        out.push_str(&format!(
            "{} |{}| {:>7} kr\n",
            bar.year,
            draw_bar(&chart, bar),
            format_short(bar.total)
        ));
    }
    out.push_str("█ Grunnpris  ▓ +MVA 2026  ▒ +MVA 2027  ░ +MVA 2028\n");
    out
}
