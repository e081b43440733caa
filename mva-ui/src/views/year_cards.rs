//! The four year cards, side by side.

use mva_core::ViewModel;
use mva_core::view_model::{IncreaseTier, YearCard};
use rust_decimal::Decimal;

use super::PANEL_WIDTH;
use crate::utils::format_short;

const CARD_WIDTH: usize = PANEL_WIDTH / 4;

fn tier_marker(tier: IncreaseTier) -> &'static str {
    match tier {
        IncreaseTier::Base | IncreaseTier::Unchanged => "",
        IncreaseTier::Low => " ▲",
        IncreaseTier::Moderate => " ▲▲",
        IncreaseTier::High => " ▲▲▲",
    }
}

fn heading(card: &YearCard) -> String {
    if card.active {
        format!("▶ {}", card.year)
    } else {
        format!("  {}", card.year)
    }
}

fn threshold_label(card: &YearCard) -> String {
    match (card.is_base, card.threshold) {
        (true, _) => "Nåværende pris".to_string(),
        (false, Some(threshold)) => format!("Grense: {} kr", format_short(threshold)),
        (false, None) => "Full MVA".to_string(),
    }
}

fn increase_label(card: &YearCard) -> String {
    if card.is_base {
        String::new()
    } else if card.increase > Decimal::ZERO {
        format!("+{} kr{}", format_short(card.increase), tier_marker(card.tier))
    } else {
        "Ingen økning".to_string()
    }
}

pub fn render(vm: &ViewModel) -> String {
    let cards = vm.year_cards();
    let rows: [fn(&YearCard) -> String; 4] = [
        heading,
        |c| format!("  {}", threshold_label(c)),
        |c| format!("  {} kr", format_short(c.price)),
        |c| format!("  {}", increase_label(c)),
    ];

    let mut out = String::new();
    for row in rows {
        let line = cards
            .iter()
            .map(|c| format!("{:<width$}", row(c), width = CARD_WIDTH))
            .collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
