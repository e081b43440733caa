//! Detail panel for the selected year.

use mva_core::view_model::{BreakdownKind, BreakdownRow};
use mva_core::{FiscalYear, PhaseInSchedule, ViewModel};
use rust_decimal::Decimal;

use super::PANEL_WIDTH;
use crate::utils::{format_grouped, format_increase, format_short};

/// Label of one breakdown row, e.g. `MVA-økning 2027 (150k–300k grense)`.
fn row_label(
    kind: BreakdownKind,
    schedule: &PhaseInSchedule,
) -> String {
    let BreakdownKind::Increment(year) = kind else {
        return format!("Grunnpris ({})", FiscalYear::Y2025);
    };

    let ceiling = |y: FiscalYear| schedule.step(y).map(|s| s.ceiling);
    let previous = FiscalYear::ALL[year.index().saturating_sub(1)];

    match (ceiling(year), ceiling(previous)) {
        (Some(lower), Some(upper)) if !lower.is_zero() => format!(
            "MVA-økning {year} ({}–{} grense)",
            format_short(lower),
            format_short(upper)
        ),
        _ => format!("MVA-økning {year} (full MVA)"),
    }
}

fn line(
    label: &str,
    value: &str,
) -> String {
    let width = PANEL_WIDTH.saturating_sub(label.chars().count());
    format!("{label}{value:>width$}\n")
}

fn render_row(
    row: &BreakdownRow,
    schedule: &PhaseInSchedule,
) -> String {
    line(
        &format!("  {}", row_label(row.kind, schedule)),
        &format_increase(row.amount),
    )
}

pub fn render(
    vm: &ViewModel,
    schedule: &PhaseInSchedule,
) -> String {
    let panel = vm.detail();

    let badge = if panel.is_base {
        "Utgangspris".to_string()
    } else if panel.increment > Decimal::ZERO {
        format_increase(panel.increment)
    } else {
        String::new()
    };

    let mut out = line(&format!("PRISOVERSIKT {}", panel.year), &badge);
    out.push_str(&format!(
        "Ny pris: {} NOK\n",
        format_grouped(vm.counters().selected_price.displayed())
    ));

    for row in &panel.rows {
        out.push_str(&render_row(row, schedule));
    }

    if let Some(total) = panel.total_from_base {
        let value = if total > Decimal::ZERO {
            format_increase(total)
        } else {
            "Ingen økning".to_string()
        };
        out.push_str(&line("Totalt økning fra 2025", &value));
    }
    out
}
