//! Price slider with its preset marks.

use mva_core::ViewModel;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::PANEL_WIDTH;
use crate::utils::{format_grouped, format_short};

const TRACK_WIDTH: usize = PANEL_WIDTH - 2;

pub fn render(vm: &ViewModel) -> String {
    let view = vm.slider();
    let shown = format!(
        "{} kr",
        format_grouped(vm.counters().base_price.displayed())
    );

    let filled = (view.fill_percent * Decimal::from(TRACK_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(TRACK_WIDTH);

    let marks = view
        .marks
        .iter()
        .map(|m| {
            let label = format_short(m.value);
            if m.active { format!("[{label}]") } else { label }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let title = "PRIS I 2025";
    let mut out = format!(
        "{title}{shown:>width$}\n",
        width = PANEL_WIDTH - title.chars().count()
    );
    out.push('[');
    out.push_str(&"=".repeat(filled));
    out.push_str(&"-".repeat(TRACK_WIDTH - filled));
    out.push_str("]\n");
    out.push_str(&marks);
    out.push('\n');
    out
}
