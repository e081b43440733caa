//! Total increase summary and the rule-change box.

use mva_core::{PhaseInSchedule, ViewModel};

use super::PANEL_WIDTH;
use crate::utils::format_increase;

pub fn render(
    vm: &ViewModel,
    schedule: &PhaseInSchedule,
) -> String {
    let counters = vm.counters();
    let summary = vm.summary();
    let animated = [
        &counters.increment_2026,
        &counters.increment_2027,
        &counters.increment_2028,
    ];

    let mut out = String::from("SAMLET PRISØKNING 2025 → 2028\n");
    for ((year, _), counter) in summary.increments.iter().zip(animated) {
        let label = format!("  Prisøkning {year}");
        let value = format_increase(counter.displayed());
        out.push_str(&format!(
            "{label}{value:>width$}\n",
            width = PANEL_WIDTH - label.chars().count()
        ));
    }
    let label = "  Total økning";
    out.push_str(&format!(
        "{label}{:>width$}\n",
        format_increase(counters.total_increase.displayed()),
        width = PANEL_WIDTH - label.chars().count()
    ));

    out.push_str("\nℹ Regelendringer\n");
    for step in &schedule.steps {
        out.push_str(&format!("  {}: {}\n", step.year, step.summary));
    }
    out
}
