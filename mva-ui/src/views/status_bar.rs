//! Status bar listing the available commands.

/// Command hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Build a status bar line from a list of hints.
pub fn build_status_bar(hints: &[KeyHint]) -> String {
    hints
        .iter()
        .map(|h| format!("{}: {}", h.key, h.action))
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Hints for the interactive prompt.
pub mod hints {
    use super::KeyHint;

    pub const PRICE: KeyHint = KeyHint::new("price <beløp>", "Sett pris");
    pub const PRESET: KeyHint = KeyHint::new("preset <200k|500k|1M|1.5M|2M>", "Forhåndsvalg");
    pub const YEAR: KeyHint = KeyHint::new("year <2025-2028>", "Velg år");
    pub const STEP: KeyHint = KeyHint::new("+/-", "Ett steg");
    pub const SHOW: KeyHint = KeyHint::new("show", "Vis");
    pub const LOG: KeyHint = KeyHint::new("log <nivå>", "Loggnivå");
    pub const QUIT: KeyHint = KeyHint::new("quit", "Avslutt");

    pub const ALL: [KeyHint; 7] = [PRICE, PRESET, YEAR, STEP, SHOW, LOG, QUIT];
}
