//! Text renderers for the dashboard.
//!
//! Each module draws one panel from the view model and keeps no state.

pub mod chart;
pub mod detail;
pub mod slider;
pub mod status_bar;
pub mod summary;
pub mod year_cards;

use mva_core::{PhaseInSchedule, ViewModel};

use crate::utils::format_grouped;

/// Width of a dashboard panel in characters.
pub const PANEL_WIDTH: usize = 64;

fn separator() -> String {
    format!("{}\n", "─".repeat(PANEL_WIDTH))
}

/// Renders every panel, top to bottom.
pub fn render_dashboard(
    vm: &ViewModel,
    schedule: &PhaseInSchedule,
) -> String {
    let panels = [
        "ELBIL MVA-KALKULATOR\n".to_string(),
        slider::render(vm),
        year_cards::render(vm),
        detail::render(vm, schedule),
        chart::render(vm),
        summary::render(vm, schedule),
    ];
    panels.join(&separator())
}

/// One-line view of the animated counters, redrawn on every frame.
pub fn render_counters(vm: &ViewModel) -> String {
    let counters = vm.counters();
    format!(
        "2025: {} kr │ {}: {} kr │ økning: +{} kr",
        format_grouped(counters.base_price.displayed()),
        vm.selection(),
        format_grouped(counters.selected_price.displayed()),
        format_grouped(counters.total_increase.displayed()),
    )
}
